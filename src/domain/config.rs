use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value::{Account, AppKey, AppSecret, EndpointUrl, Password};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Provider configuration is missing, malformed, or does not match the requested operation.
pub enum ConfigError {
    /// A field required by the selected provider is absent or empty.
    #[error("config.{field} is required")]
    MissingField { field: &'static str },

    /// The configured endpoint is not an absolute http(s) URL.
    #[error("invalid endpoint url: {value}")]
    InvalidUrl { value: String },

    /// `method` names a provider this crate does not know.
    #[error("unknown provider method: {method:?}")]
    UnknownMethod { method: String },

    /// The operation belongs to a different provider than the one configured.
    #[error("operation requires {expected} configuration, client is configured for {configured}")]
    ProviderMismatch {
        expected: Provider,
        configured: Provider,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Chuanglan (account/password gateway).
    Chuanglan,
    /// Netease Yunxin (AppKey/AppSecret gateway).
    Netease,
}

impl Provider {
    /// Value of the `method` configuration tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chuanglan => "chuanglan",
            Self::Netease => "netease",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Loose configuration as it usually arrives from a config file or JSON document.
///
/// Only the fields of the provider selected by `method` are read. Turn it into a
/// [`ProviderConfig`] (or pass it to [`crate::SmsClient::new`]) to validate it.
///
/// ```rust
/// let config: sms_sdk::SmsSdkConfig = serde_json::from_str(
///     r#"{"method":"netease","appKey":"K","appSecret":"S"}"#,
/// )?;
/// let provider = sms_sdk::ProviderConfig::try_from(config)?;
/// assert_eq!(provider.provider(), sms_sdk::Provider::Netease);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SmsSdkConfig {
    /// `"chuanglan"` or `"netease"`.
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,
}

impl fmt::Debug for SmsSdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("SmsSdkConfig")
            .field("method", &self.method)
            .field("account", &self.account)
            .field("password", &redact(&self.password))
            .field("url", &self.url)
            .field("app_key", &self.app_key)
            .field("app_secret", &redact(&self.app_secret))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated provider configuration.
///
/// Every variant carries all of its required credentials, so a value of this type is
/// always usable for its provider's operations.
pub enum ProviderConfig {
    Chuanglan {
        account: Account,
        password: Password,
        url: EndpointUrl,
    },
    Netease {
        app_key: AppKey,
        app_secret: AppSecret,
    },
}

impl ProviderConfig {
    /// Build a validated Chuanglan configuration.
    pub fn chuanglan(
        account: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::Chuanglan {
            account: Account::new(account)?,
            password: Password::new(password)?,
            url: EndpointUrl::new(url)?,
        })
    }

    /// Build a validated Netease configuration.
    pub fn netease(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::Netease {
            app_key: AppKey::new(app_key)?,
            app_secret: AppSecret::new(app_secret)?,
        })
    }

    /// Which gateway these credentials belong to.
    pub fn provider(&self) -> Provider {
        match self {
            Self::Chuanglan { .. } => Provider::Chuanglan,
            Self::Netease { .. } => Provider::Netease,
        }
    }
}

impl TryFrom<SmsSdkConfig> for ProviderConfig {
    type Error = ConfigError;

    fn try_from(config: SmsSdkConfig) -> Result<Self, Self::Error> {
        match config.method.trim() {
            "chuanglan" => Self::chuanglan(
                required(config.account, Account::FIELD)?,
                required(config.password, Password::FIELD)?,
                required(config.url, EndpointUrl::FIELD)?,
            ),
            "netease" => Self::netease(
                required(config.app_key, AppKey::FIELD)?,
                required(config.app_secret, AppSecret::FIELD)?,
            ),
            other => Err(ConfigError::UnknownMethod {
                method: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<&SmsSdkConfig> for ProviderConfig {
    type Error = ConfigError;

    fn try_from(config: &SmsSdkConfig) -> Result<Self, Self::Error> {
        Self::try_from(config.clone())
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value.ok_or(ConfigError::MissingField { field })
}
