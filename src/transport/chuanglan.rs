use serde::Deserialize;

use crate::domain::{Account, ChuanglanReply, ChuanglanSendResult, Password};
use crate::transport::lenient::Lenient;

pub const CHUANGLAN_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChuanglanJsonResponse {
    code: Lenient<String>,
    #[serde(default)]
    msg_id: Option<Lenient<String>>,
    #[serde(default)]
    time: Option<Lenient<String>>,
    #[serde(default)]
    error_msg: Option<String>,
}

pub fn encode_chuanglan_send_body(
    account: &Account,
    password: &Password,
    phone: &str,
    msg: &str,
) -> serde_json::Value {
    serde_json::json!({
        "account": account.as_str(),
        "password": password.as_str(),
        "phone": phone,
        "msg": msg,
        "report": "false",
    })
}

/// Interpret a Chuanglan body, falling back to the raw text when it is not the
/// documented JSON document.
pub fn decode_chuanglan_reply(body: &str) -> ChuanglanReply {
    match serde_json::from_str::<ChuanglanJsonResponse>(body) {
        Ok(parsed) => ChuanglanReply::Parsed(ChuanglanSendResult {
            code: parsed.code.into_inner(),
            msg_id: parsed.msg_id.map(Lenient::into_inner),
            time: parsed.time.map(Lenient::into_inner),
            error_msg: parsed.error_msg,
        }),
        Err(_) => ChuanglanReply::Raw(body.to_owned()),
    }
}
