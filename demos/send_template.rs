use std::io;

use sms_sdk::{NeteaseReply, ProviderConfig, SmsClient, TemplateSend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app_key = std::env::var("NETEASE_APP_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NETEASE_APP_KEY environment variable is required",
        )
    })?;
    let app_secret = std::env::var("NETEASE_APP_SECRET").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NETEASE_APP_SECRET environment variable is required",
        )
    })?;
    let template_id = std::env::var("NETEASE_TEMPLATE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NETEASE_TEMPLATE_ID environment variable is required",
        )
    })?;
    // Comma-separated list of recipients.
    let phones = std::env::var("SMS_PHONES").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_PHONES environment variable is required",
        )
    })?;
    let params = std::env::var("SMS_PARAMS").unwrap_or_default();

    let client = SmsClient::builder(ProviderConfig::netease(app_key, app_secret)?)
        .log_hook(|line| eprintln!("{line}"))
        .build()?;

    let mobiles = phones.split(',').map(|p| p.trim().to_owned()).collect();
    let mut request = TemplateSend::new(template_id, mobiles);
    if !params.is_empty() {
        request = request.with_params(params.split(',').map(str::to_owned).collect());
    }

    match client.send_template(&request).await? {
        NeteaseReply::Parsed(response) => println!(
            "code: {}, msg: {:?}, obj: {}",
            response.code, response.msg, response.obj
        ),
        NeteaseReply::Raw(body) => println!("unrecognised reply: {body}"),
    }

    Ok(())
}
