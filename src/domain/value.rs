use std::fmt;

use crate::domain::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Chuanglan API account.
///
/// Invariant: non-empty after trimming.
pub struct Account(String);

impl Account {
    /// Configuration / JSON field name (`account`).
    pub const FIELD: &'static str = "account";

    /// Create a validated [`Account`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingField { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Chuanglan API password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Configuration / JSON field name (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::MissingField { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Chuanglan send endpoint.
///
/// Invariant: an absolute `http` or `https` URL. The trimmed input is kept verbatim.
pub struct EndpointUrl(String);

impl EndpointUrl {
    /// Configuration field name (`url`).
    pub const FIELD: &'static str = "url";

    /// Create a validated [`EndpointUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingField { field: Self::FIELD });
        }
        let parsed = url::Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl {
            value: trimmed.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Netease Yunxin `AppKey`.
///
/// Invariant: non-empty after trimming.
pub struct AppKey(String);

impl AppKey {
    /// Configuration field name (`appKey`); also the HTTP header carrying it.
    pub const FIELD: &'static str = "appKey";

    /// Create a validated [`AppKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingField { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Netease Yunxin `AppSecret`, used only as checksum input and never sent.
///
/// Invariant: non-empty after trimming.
pub struct AppSecret(String);

impl AppSecret {
    /// Configuration field name (`appSecret`).
    pub const FIELD: &'static str = "appSecret";

    /// Create a validated [`AppSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingField { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated secret.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_requires_http_scheme() {
        assert!(EndpointUrl::new("http://example/send").is_ok());
        assert!(EndpointUrl::new("https://example.invalid/send").is_ok());
        assert!(matches!(
            EndpointUrl::new("ftp://example/send"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            EndpointUrl::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn endpoint_url_keeps_configured_text() {
        let url = EndpointUrl::new(" http://example/send ").unwrap();
        assert_eq!(url.as_str(), "http://example/send");
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let password = Password::new("hunter2").unwrap();
        let secret = AppSecret::new("s3cr3t").unwrap();
        assert!(!format!("{password:?}").contains("hunter2"));
        assert!(!format!("{secret:?}").contains("s3cr3t"));
    }
}
