//! Domain layer: strong types with validation and invariants (no I/O).

mod config;
mod request;
mod response;
mod validation;
mod value;

pub use config::{ConfigError, Provider, ProviderConfig, SmsSdkConfig};
pub use request::{CODE_LEN_RANGE, CodeSend, TEMPLATE_SEND_MAX_RECIPIENTS, TemplateSend};
pub use response::{ChuanglanReply, ChuanglanSendResult, NeteaseReply, NeteaseResponse};
pub use validation::ValidationError;
pub use value::{Account, AppKey, AppSecret, EndpointUrl, Password};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_key_rejects_empty() {
        assert!(matches!(
            AppKey::new("   "),
            Err(ConfigError::MissingField {
                field: AppKey::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ConfigError::MissingField {
                field: Password::FIELD
            })
        ));
    }

    #[test]
    fn template_send_requires_template_and_recipients() {
        let ok = TemplateSend::new("T1", vec!["1500000".to_owned()]);
        assert!(ok.validate().is_ok());

        let err = TemplateSend::new(" ", vec!["1500000".to_owned()])
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: TemplateSend::TEMPLATE_FIELD
            }
        );

        let err = TemplateSend::new("T1", Vec::new()).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: TemplateSend::MOBILES_FIELD
            }
        );

        let err = TemplateSend::new("T1", vec!["1500000".to_owned(), String::new()])
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: TemplateSend::MOBILES_FIELD
            }
        );
    }

    #[test]
    fn template_send_recipient_limit_is_enforced() {
        let mobiles = vec!["1500000".to_owned(); TEMPLATE_SEND_MAX_RECIPIENTS + 1];
        let err = TemplateSend::new("T1", mobiles).validate().unwrap_err();
        assert!(matches!(err, ValidationError::TooManyRecipients { .. }));
    }

    #[test]
    fn code_send_requires_mobile() {
        let err = CodeSend::generated("", 6).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: CodeSend::MOBILE_FIELD
            }
        );
    }

    #[test]
    fn code_send_requires_len_or_code() {
        let request = CodeSend {
            mobile: "1500000".to_owned(),
            ..Default::default()
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingCode));

        let request = CodeSend {
            mobile: "1500000".to_owned(),
            auth_code: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingCode));
    }

    #[test]
    fn code_len_range_is_enforced_only_without_custom_code() {
        assert!(CodeSend::generated("1500000", 3).validate().is_err());
        assert!(CodeSend::generated("1500000", 4).validate().is_ok());
        assert!(CodeSend::generated("1500000", 10).validate().is_ok());
        assert!(CodeSend::generated("1500000", 11).validate().is_err());

        let mut request = CodeSend::custom("1500000", "123456");
        request.code_len = Some(42);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn code_summary_prefers_custom_code() {
        let mut request = CodeSend::custom("1500000", "9876");
        request.code_len = Some(6);
        assert_eq!(request.code_summary(), "9876");
        assert_eq!(CodeSend::generated("1500000", 6).code_summary(), "6");
    }

    #[test]
    fn provider_config_reports_its_provider() {
        let config = ProviderConfig::chuanglan("A", "P", "http://example/send").unwrap();
        assert_eq!(config.provider(), Provider::Chuanglan);
        assert_eq!(config.provider().as_str(), "chuanglan");

        let config = ProviderConfig::netease("K", "S").unwrap();
        assert_eq!(config.provider(), Provider::Netease);
    }
}
