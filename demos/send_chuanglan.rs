use std::io;

use sms_sdk::{ChuanglanReply, ProviderConfig, SmsClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ProviderConfig::chuanglan(
        required_env("CHUANGLAN_ACCOUNT")?,
        required_env("CHUANGLAN_PASSWORD")?,
        required_env("CHUANGLAN_URL")?,
    )?;
    let phone = required_env("SMS_PHONE")?;
    let message = std::env::var("SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the sms-sdk demo.".to_owned());

    let mut client = SmsClient::from_provider(config);
    client.set_log_hook(|line| eprintln!("{line}"));

    match client.send_chuanglan(&phone, &message).await? {
        ChuanglanReply::Parsed(result) => println!(
            "code: {}, msg_id: {:?}, error: {:?}",
            result.code, result.msg_id, result.error_msg
        ),
        ChuanglanReply::Raw(body) => println!("raw reply: {body}"),
    }

    Ok(())
}
