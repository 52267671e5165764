//! Client layer: validates requests, signs them, and maps transport ↔ domain.

mod http;

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

pub use self::http::{
    BoxFuture, DEFAULT_EXPECTED_STATUS, HttpRequest, HttpResponse, HttpTransport, Method,
    RequestBody,
};

use crate::domain::{
    AppKey, AppSecret, ChuanglanReply, CodeSend, ConfigError, NeteaseReply, Provider,
    ProviderConfig, SmsSdkConfig, TemplateSend, ValidationError,
};
use crate::transport::{
    AuthHeaders, CHUANGLAN_CONTENT_TYPE, decode_chuanglan_reply, decode_netease_reply,
    encode_chuanglan_send_body, encode_code_send_form, encode_template_send_form,
};
use self::http::{ReqwestTransport, execute_expecting};

const DEFAULT_TEMPLATE_ENDPOINT: &str = "https://api.netease.im/sms/sendtemplate.action";
const DEFAULT_CODE_ENDPOINT: &str = "https://api.netease.im/sms/sendcode.action";

/// Observer called with a one-line summary right before each outbound request.
pub type LogHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
///
/// Provider-level failures (a Chuanglan error code, a Netease `code != 200`) are
/// not errors; they come back inside the provider's own response type.
pub enum SmsError {
    /// Credentials are missing, or the operation targets the other provider.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request object lacks mandatory fields. No request was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with a status code other than the expected one.
    #[error("bad code {status} (expected {expected})")]
    HttpStatus {
        status: u16,
        expected: u16,
        body: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize the Netease endpoints, timeout, user-agent,
/// or the HTTP transport itself.
pub struct SmsClientBuilder {
    config: ProviderConfig,
    template_endpoint: String,
    code_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    log_hook: Option<LogHook>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmsClientBuilder {
    /// Start from the default Netease endpoints and the built-in `reqwest` transport.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            template_endpoint: DEFAULT_TEMPLATE_ENDPOINT.to_owned(),
            code_endpoint: DEFAULT_CODE_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            log_hook: None,
            transport: None,
        }
    }

    /// Override the Netease `sendtemplate.action` URL.
    pub fn template_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.template_endpoint = endpoint.into();
        self
    }

    /// Override the Netease `sendcode.action` URL.
    pub fn code_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.code_endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Install a log hook on the built client; see [`SmsClient::set_log_hook`].
    pub fn log_hook(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log_hook = Some(Arc::new(hook));
        self
    }

    /// Replace the built-in `reqwest` transport. Timeout and user-agent settings are
    /// then the transport's business.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, SmsError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| SmsError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(SmsClient {
            config: self.config,
            template_endpoint: self.template_endpoint,
            code_endpoint: self.code_endpoint,
            http,
            log_hook: self.log_hook,
        })
    }
}

#[derive(Clone)]
/// SMS client for one configured provider.
///
/// The provider configuration is owned by the client and never changes after
/// construction. Calls are independent: each Netease call signs itself with a fresh
/// nonce and timestamp, so a shared client can be used from many tasks at once.
///
/// - Chuanglan: [`SmsClient::send_chuanglan`]
/// - Netease: [`SmsClient::send_template`], [`SmsClient::send_code`]
pub struct SmsClient {
    config: ProviderConfig,
    template_endpoint: String,
    code_endpoint: String,
    http: Arc<dyn HttpTransport>,
    log_hook: Option<LogHook>,
}

impl SmsClient {
    /// Validate `config` and create a client using the default endpoints.
    ///
    /// Fails with [`SmsError::Config`] when a field required by the selected provider
    /// is missing.
    pub fn new(config: SmsSdkConfig) -> Result<Self, SmsError> {
        Ok(Self::from_provider(ProviderConfig::try_from(config)?))
    }

    /// Create a client from an already validated configuration.
    pub fn from_provider(config: ProviderConfig) -> Self {
        Self {
            config,
            template_endpoint: DEFAULT_TEMPLATE_ENDPOINT.to_owned(),
            code_endpoint: DEFAULT_CODE_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
            log_hook: None,
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(config: ProviderConfig) -> SmsClientBuilder {
        SmsClientBuilder::new(config)
    }

    /// The provider this client was configured for.
    pub fn provider(&self) -> Provider {
        self.config.provider()
    }

    /// The validated configuration the client owns.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Install an observer that receives a summary of every outbound send.
    pub fn set_log_hook(&mut self, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.log_hook = Some(Arc::new(hook));
    }

    /// Remove the log hook; later sends log nothing.
    pub fn clear_log_hook(&mut self) {
        self.log_hook = None;
    }

    /// Send `content` to `phone` (one number, or several separated by commas)
    /// through Chuanglan.
    ///
    /// The body is returned as-is, parsed when it is Chuanglan's usual JSON document.
    ///
    /// Errors:
    /// - [`SmsError::Config`] if the client is not configured for Chuanglan,
    /// - [`SmsError::HttpStatus`] for any status other than 200,
    /// - [`SmsError::Transport`] when the request could not complete.
    pub async fn send_chuanglan(
        &self,
        phone: &str,
        content: &str,
    ) -> Result<ChuanglanReply, SmsError> {
        let ProviderConfig::Chuanglan {
            account,
            password,
            url,
        } = &self.config
        else {
            return Err(self.mismatch(Provider::Chuanglan));
        };

        let request = HttpRequest::post(url.as_str())
            .header("Content-Type", CHUANGLAN_CONTENT_TYPE)
            .json(encode_chuanglan_send_body(account, password, phone, content));

        self.log(format_args!(
            "send message->method:send_chuanglan, phone:{phone}, content:{content}"
        ));
        tracing::debug!(
            operation = "send_chuanglan",
            recipients = phone.split(',').count(),
            "sending sms"
        );

        let body = execute_expecting(self.http.as_ref(), &request).await?;
        Ok(decode_chuanglan_reply(&body))
    }

    /// Send a templated notification/marketing message through Netease.
    ///
    /// Errors:
    /// - [`SmsError::Config`] if the client is not configured for Netease,
    /// - [`SmsError::Validation`] for an empty template id or recipient list,
    /// - [`SmsError::HttpStatus`] for any status other than 200,
    /// - [`SmsError::Parse`] when the body is not valid JSON.
    ///
    /// Valid JSON without a usable `code` comes back as [`NeteaseReply::Raw`].
    pub async fn send_template(&self, request: &TemplateSend) -> Result<NeteaseReply, SmsError> {
        let (app_key, app_secret) = self.netease_credentials()?;
        request.validate()?;

        let http_request = HttpRequest::post(self.template_endpoint.as_str())
            .headers(AuthHeaders::generate(app_key, app_secret).into_headers())
            .form(encode_template_send_form(request));

        self.log(format_args!(
            "send message->method:send_template, phone:{}, content:{}",
            serde_json::Value::from(request.mobiles.clone()),
            serde_json::Value::from(request.params.clone().unwrap_or_default()),
        ));
        tracing::debug!(
            operation = "send_template",
            templateid = %request.templateid,
            recipients = request.mobiles.len(),
            "sending sms"
        );

        self.execute_netease(&http_request).await
    }

    /// Send one verification code through Netease.
    ///
    /// Errors:
    /// - [`SmsError::Config`] if the client is not configured for Netease,
    /// - [`SmsError::Validation`] if `mobile` is empty or neither `code_len` nor
    ///   `auth_code` is set,
    /// - [`SmsError::HttpStatus`] for any status other than 200,
    /// - [`SmsError::Parse`] when the body is not valid JSON.
    pub async fn send_code(&self, request: &CodeSend) -> Result<NeteaseReply, SmsError> {
        let (app_key, app_secret) = self.netease_credentials()?;
        request.validate()?;

        let http_request = HttpRequest::post(self.code_endpoint.as_str())
            .headers(AuthHeaders::generate(app_key, app_secret).into_headers())
            .form(encode_code_send_form(request));

        self.log(format_args!(
            "send message->method:send_code, phone:{}, content:{}",
            request.mobile,
            request.code_summary(),
        ));
        tracing::debug!(
            operation = "send_code",
            custom_code = request.auth_code.is_some(),
            "sending verification code"
        );

        self.execute_netease(&http_request).await
    }

    async fn execute_netease(&self, request: &HttpRequest) -> Result<NeteaseReply, SmsError> {
        let body = execute_expecting(self.http.as_ref(), request).await?;
        decode_netease_reply(&body).map_err(|err| SmsError::Parse(Box::new(err)))
    }

    fn netease_credentials(&self) -> Result<(&AppKey, &AppSecret), SmsError> {
        match &self.config {
            ProviderConfig::Netease {
                app_key,
                app_secret,
            } => Ok((app_key, app_secret)),
            ProviderConfig::Chuanglan { .. } => Err(self.mismatch(Provider::Netease)),
        }
    }

    fn mismatch(&self, expected: Provider) -> SmsError {
        SmsError::Config(ConfigError::ProviderMismatch {
            expected,
            configured: self.config.provider(),
        })
    }

    fn log(&self, message: std::fmt::Arguments<'_>) {
        if let Some(hook) = self.log_hook.as_ref() {
            hook(&message.to_string());
        }
    }
}
