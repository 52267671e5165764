//! HTTP adapter: one request, one outcome, judged against an expected status code.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use crate::client::SmsError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Status code a request is expected to come back with unless overridden.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized as a JSON document.
    Json(serde_json::Value),
    /// Serialized as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
/// A fully buffered outbound request.
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub expected_status: u16,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            expected_status: DEFAULT_EXPECTED_STATUS,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn form(mut self, params: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(params);
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
/// Status and body text of a completed call. The body is not decoded here.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can put an [`HttpRequest`] on the wire.
///
/// Implementations perform exactly one call and report what came back; judging
/// the status code is left to the caller. Errors are transport failures only
/// (DNS, connect, TLS, timeouts).
///
/// Request bodies are encoded by the transport ([`RequestBody::Json`] or
/// [`RequestBody::Form`]). Response bodies go back as text: [`SmsClient`](crate::SmsClient)
/// decodes the provider's JSON itself, so a transport never needs to know the reply format.
///
/// ```rust
/// use std::error::Error;
/// use std::sync::Arc;
///
/// use sms_sdk::client::{BoxFuture, HttpRequest, HttpResponse, HttpTransport};
/// use sms_sdk::{ProviderConfig, SmsClient, TemplateSend};
///
/// struct Canned;
///
/// impl HttpTransport for Canned {
///     fn execute<'a>(
///         &'a self,
///         _request: &'a HttpRequest,
///     ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn Error + Send + Sync>>> {
///         Box::pin(async {
///             let response: Result<HttpResponse, Box<dyn Error + Send + Sync>> =
///                 Ok(HttpResponse {
///                     status: 200,
///                     body: r#"{"code":200,"msg":"ok","obj":"42"}"#.to_owned(),
///                 });
///             response
///         })
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), sms_sdk::SmsError> {
/// let client = SmsClient::builder(ProviderConfig::netease("K", "S")?)
///     .transport(Arc::new(Canned))
///     .build()?;
/// let reply = client
///     .send_template(&TemplateSend::new("T1", vec!["1500000".to_owned()]))
///     .await?;
/// assert_eq!(reply.parsed().map(|r| r.code), Some(200));
/// # Ok(())
/// # }
/// ```
pub trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub(crate) client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Patch => reqwest::Method::PATCH,
            };

            let mut builder = self.client.request(method, request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder = match &request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(body) => builder.json(body),
                RequestBody::Form(params) => builder.form(params),
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Run `request` once and return the body if the status matches `request.expected_status`.
pub(crate) async fn execute_expecting(
    transport: &dyn HttpTransport,
    request: &HttpRequest,
) -> Result<String, SmsError> {
    let response = transport
        .execute(request)
        .await
        .map_err(SmsError::Transport)?;

    if response.status != request.expected_status {
        tracing::warn!(
            url = %request.url,
            status = response.status,
            expected = request.expected_status,
            "unexpected HTTP status"
        );
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(SmsError::HttpStatus {
            status: response.status,
            expected: request.expected_status,
            body,
        });
    }

    Ok(response.body)
}
