use std::ops::RangeInclusive;

use crate::domain::validation::ValidationError;

/// Netease accepts at most this many `mobiles` per template send.
pub const TEMPLATE_SEND_MAX_RECIPIENTS: usize = 100;

/// Accepted values for a server-generated code length (`codeLen`).
pub const CODE_LEN_RANGE: RangeInclusive<u8> = 4..=10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Notification or marketing message sent from a registered Netease template.
pub struct TemplateSend {
    pub templateid: String,
    pub mobiles: Vec<String>,
    /// Template substitution values, in template order. `None` is sent as `[]`.
    pub params: Option<Vec<String>>,
    /// Ask Netease to forward recipients' replies. Sent as the `needUp` form field
    /// only when set; `None` leaves the field out and Netease's default applies.
    pub need_up: Option<bool>,
}

impl TemplateSend {
    pub const TEMPLATE_FIELD: &'static str = "templateid";
    pub const MOBILES_FIELD: &'static str = "mobiles";

    /// Template send to `mobiles` with no params and no `needUp`.
    pub fn new(templateid: impl Into<String>, mobiles: Vec<String>) -> Self {
        Self {
            templateid: templateid.into(),
            mobiles,
            ..Default::default()
        }
    }

    /// Set the template substitution values.
    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = Some(params);
        self
    }

    /// Set [`TemplateSend::need_up`].
    pub fn with_need_up(mut self, need_up: bool) -> Self {
        self.need_up = Some(need_up);
        self
    }

    /// Check the fields Netease requires before anything goes on the wire.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.templateid.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::TEMPLATE_FIELD,
            });
        }
        if self.mobiles.is_empty() || self.mobiles.iter().any(|m| m.trim().is_empty()) {
            return Err(ValidationError::Empty {
                field: Self::MOBILES_FIELD,
            });
        }
        if self.mobiles.len() > TEMPLATE_SEND_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: TEMPLATE_SEND_MAX_RECIPIENTS,
                actual: self.mobiles.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Single verification code sent through Netease, either generated by Netease
/// (`code_len`) or supplied by the caller (`auth_code`).
///
/// When `auth_code` is set Netease ignores `code_len`.
pub struct CodeSend {
    /// Template to use; Netease falls back to the app's default template when unset.
    pub templateid: Option<String>,
    pub mobile: String,
    pub code_len: Option<u8>,
    pub auth_code: Option<String>,
    pub need_up: Option<bool>,
}

impl CodeSend {
    pub const MOBILE_FIELD: &'static str = "mobile";

    /// Let Netease generate a code of `code_len` digits.
    pub fn generated(mobile: impl Into<String>, code_len: u8) -> Self {
        Self {
            mobile: mobile.into(),
            code_len: Some(code_len),
            ..Default::default()
        }
    }

    /// Send a code chosen by the caller.
    pub fn custom(mobile: impl Into<String>, auth_code: impl Into<String>) -> Self {
        Self {
            mobile: mobile.into(),
            auth_code: Some(auth_code.into()),
            ..Default::default()
        }
    }

    /// Use a specific code template instead of the app default.
    pub fn with_template(mut self, templateid: impl Into<String>) -> Self {
        self.templateid = Some(templateid.into());
        self
    }

    /// Ask Netease to forward replies (`needUp`).
    pub fn with_need_up(mut self, need_up: bool) -> Self {
        self.need_up = Some(need_up);
        self
    }

    /// The code material that ends up in the message: the caller's code if any,
    /// otherwise the requested length.
    pub fn code_summary(&self) -> String {
        match (&self.auth_code, self.code_len) {
            (Some(code), _) => code.clone(),
            (None, Some(len)) => len.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Require a mobile and either a caller code or a `code_len` within [`CODE_LEN_RANGE`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.mobile.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::MOBILE_FIELD,
            });
        }
        let auth_code = self.auth_code.as_deref().filter(|code| !code.is_empty());
        match (auth_code, self.code_len) {
            (None, None) => Err(ValidationError::MissingCode),
            (None, Some(len)) if !CODE_LEN_RANGE.contains(&len) => {
                Err(ValidationError::CodeLenOutOfRange {
                    min: *CODE_LEN_RANGE.start(),
                    max: *CODE_LEN_RANGE.end(),
                    actual: len,
                })
            }
            _ => Ok(()),
        }
    }
}
