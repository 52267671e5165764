use std::io;
use std::time::Duration;

use sms_sdk::{CodeSend, NeteaseReply, SmsClient, SmsSdkConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Same shape as a config file entry, e.g. {"method":"netease","appKey":"...","appSecret":"..."}.
    let config_json = std::env::var("SMS_CONFIG_JSON").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_CONFIG_JSON environment variable is required",
        )
    })?;
    let phone = std::env::var("SMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_PHONE environment variable is required",
        )
    })?;

    let config: SmsSdkConfig = serde_json::from_str(&config_json)?;
    let provider = sms_sdk::ProviderConfig::try_from(config)?;
    let client = SmsClient::builder(provider)
        .timeout(Duration::from_secs(10))
        .build()?;

    let request = match std::env::var("SMS_AUTH_CODE") {
        Ok(code) => CodeSend::custom(phone, code),
        Err(_) => CodeSend::generated(phone, 6),
    };

    match client.send_code(&request).await? {
        NeteaseReply::Parsed(response) if response.is_success() => {
            println!("sent, code: {}", response.obj);
        }
        NeteaseReply::Parsed(response) => {
            println!("rejected: {} {:?}", response.code, response.msg);
        }
        NeteaseReply::Raw(body) => println!("unrecognised reply: {body}"),
    }

    Ok(())
}
