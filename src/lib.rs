//! Typed Rust client for two SMS gateways: Chuanglan (account/password) and
//! Netease Yunxin (AppKey/AppSecret with per-request SHA-1 checksum).
//!
//! The crate is layered: a domain layer of validated types (configuration,
//! requests, provider responses), a transport layer for each provider's wire
//! format and request signing, and a small client layer that ties them to an
//! HTTP adapter.
//!
//! ```rust,no_run
//! use sms_sdk::{NeteaseReply, ProviderConfig, SmsClient, TemplateSend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sms_sdk::SmsError> {
//!     let mut client = SmsClient::from_provider(ProviderConfig::netease("app-key", "app-secret")?);
//!     client.set_log_hook(|line| eprintln!("{line}"));
//!
//!     let request = TemplateSend::new("10001", vec!["13800000000".to_owned()])
//!         .with_params(vec!["Alice".to_owned()]);
//!     match client.send_template(&request).await? {
//!         NeteaseReply::Parsed(response) => println!("code: {}, obj: {}", response.code, response.obj),
//!         NeteaseReply::Raw(body) => println!("unrecognised reply: {body}"),
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{LogHook, SmsClient, SmsClientBuilder, SmsError};
pub use domain::{
    ChuanglanReply, ChuanglanSendResult, CodeSend, ConfigError, NeteaseReply, NeteaseResponse,
    Provider, ProviderConfig, SmsSdkConfig, TemplateSend, ValidationError,
};
