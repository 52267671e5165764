use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::domain::{AppKey, AppSecret, CodeSend, NeteaseReply, NeteaseResponse, TemplateSend};
use crate::transport::lenient::Lenient;

pub const NETEASE_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Nonces are decimal integers below this bound, well under the 128 characters Netease allows.
const NONCE_UPPER_BOUND: u32 = 0xFF_FFFF;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct NeteaseJsonResponse {
    code: Lenient<i32>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    obj: serde_json::Value,
}

/// Per-request authentication material for the Netease API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub app_key: String,
    pub nonce: String,
    pub cur_time: String,
    pub check_sum: String,
}

impl AuthHeaders {
    /// Fresh nonce and current time.
    pub fn generate(app_key: &AppKey, app_secret: &AppSecret) -> Self {
        Self::with_nonce(app_key, app_secret, create_nonce(), cur_time())
    }

    pub fn with_nonce(
        app_key: &AppKey,
        app_secret: &AppSecret,
        nonce: String,
        cur_time: String,
    ) -> Self {
        let check_sum = checksum(app_secret.as_str(), &nonce, &cur_time);
        Self {
            app_key: app_key.as_str().to_owned(),
            nonce,
            cur_time,
            check_sum,
        }
    }

    /// Header list for a form-encoded Netease request.
    pub fn into_headers(self) -> Vec<(String, String)> {
        vec![
            ("AppKey".to_owned(), self.app_key),
            ("Nonce".to_owned(), self.nonce),
            ("CurTime".to_owned(), self.cur_time),
            ("CheckSum".to_owned(), self.check_sum),
            ("Content-Type".to_owned(), NETEASE_CONTENT_TYPE.to_owned()),
        ]
    }
}

/// Lowercase hex SHA-1 of `secret + nonce + cur_time`.
pub fn checksum(secret: &str, nonce: &str, cur_time: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(secret.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(cur_time.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn create_nonce() -> String {
    rand::thread_rng().gen_range(0..NONCE_UPPER_BOUND).to_string()
}

/// Whole seconds since the Unix epoch.
pub fn cur_time() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
        .to_string()
}

pub fn encode_template_send_form(request: &TemplateSend) -> Vec<(String, String)> {
    let params = request.params.clone().unwrap_or_default();
    let mut form = vec![
        (
            TemplateSend::TEMPLATE_FIELD.to_owned(),
            request.templateid.clone(),
        ),
        (
            TemplateSend::MOBILES_FIELD.to_owned(),
            serde_json::Value::from(request.mobiles.clone()).to_string(),
        ),
        (
            "params".to_owned(),
            serde_json::Value::from(params).to_string(),
        ),
    ];
    if let Some(need_up) = request.need_up {
        form.push(("needUp".to_owned(), need_up.to_string()));
    }
    form
}

pub fn encode_code_send_form(request: &CodeSend) -> Vec<(String, String)> {
    let mut form = Vec::<(String, String)>::new();
    if let Some(templateid) = request.templateid.as_ref() {
        form.push((TemplateSend::TEMPLATE_FIELD.to_owned(), templateid.clone()));
    }
    form.push((CodeSend::MOBILE_FIELD.to_owned(), request.mobile.clone()));
    if let Some(code_len) = request.code_len {
        form.push(("codeLen".to_owned(), code_len.to_string()));
    }
    if let Some(auth_code) = request.auth_code.as_ref() {
        form.push(("authCode".to_owned(), auth_code.clone()));
    }
    if let Some(need_up) = request.need_up {
        form.push(("needUp".to_owned(), need_up.to_string()));
    }
    form
}

/// Decode a Netease body. Only text that is not JSON at all is an error; JSON
/// without a usable `code` comes back as [`NeteaseReply::Raw`].
pub fn decode_netease_reply(json: &str) -> Result<NeteaseReply, TransportError> {
    match serde_json::from_str::<NeteaseJsonResponse>(json) {
        Ok(parsed) => Ok(NeteaseReply::Parsed(NeteaseResponse {
            code: parsed.code.into_inner(),
            msg: parsed.msg,
            obj: parsed.obj,
        })),
        Err(_) => Ok(NeteaseReply::Raw(serde_json::from_str(json)?)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn checksum_is_sha1_hex_of_concatenation() {
        // sha1("abc")
        assert_eq!(
            checksum("a", "b", "c"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(checksum("S", "123", "1700000000"), checksum("S", "123", "1700000000"));
    }

    #[test]
    fn checksum_changes_with_every_input() {
        let base = checksum("S", "123", "1700000000");
        assert_ne!(base, checksum("T", "123", "1700000000"));
        assert_ne!(base, checksum("S", "124", "1700000000"));
        assert_ne!(base, checksum("S", "123", "1700000001"));
    }

    #[test]
    fn nonce_is_short_numeric_and_varies() {
        let nonces = (0..64).map(|_| create_nonce()).collect::<Vec<_>>();
        for nonce in &nonces {
            assert!(!nonce.is_empty() && nonce.len() < 128);
            assert!(nonce.bytes().all(|b| b.is_ascii_digit()));
        }
        let distinct = nonces.iter().collect::<HashSet<_>>();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn cur_time_is_epoch_seconds() {
        let value: u64 = cur_time().parse().unwrap();
        assert!(value > 1_600_000_000);
    }

    #[test]
    fn auth_headers_carry_matching_checksum() {
        let headers = AuthHeaders::with_nonce(
            &AppKey::new("K").unwrap(),
            &AppSecret::new("S").unwrap(),
            "42".to_owned(),
            "1700000000".to_owned(),
        );
        assert_eq!(headers.check_sum, checksum("S", "42", "1700000000"));

        let list = headers.into_headers();
        assert_eq!(list[0], ("AppKey".to_owned(), "K".to_owned()));
        assert_eq!(list[1], ("Nonce".to_owned(), "42".to_owned()));
        assert_eq!(list[2], ("CurTime".to_owned(), "1700000000".to_owned()));
        assert_eq!(
            list[4],
            ("Content-Type".to_owned(), NETEASE_CONTENT_TYPE.to_owned())
        );
    }

    #[test]
    fn encode_template_form_json_encodes_lists() {
        let request = TemplateSend::new("T1", vec!["1500000".to_owned(), "1600000".to_owned()])
            .with_params(vec!["Alice".to_owned()]);
        assert_eq!(
            encode_template_send_form(&request),
            vec![
                ("templateid".to_owned(), "T1".to_owned()),
                ("mobiles".to_owned(), r#"["1500000","1600000"]"#.to_owned()),
                ("params".to_owned(), r#"["Alice"]"#.to_owned()),
            ]
        );
    }

    #[test]
    fn encode_template_form_defaults_params_and_keeps_need_up() {
        let request = TemplateSend::new("T1", vec!["1500000".to_owned()]).with_need_up(true);
        let form = encode_template_send_form(&request);
        assert!(form.contains(&("params".to_owned(), "[]".to_owned())));
        assert!(form.contains(&("needUp".to_owned(), "true".to_owned())));
    }

    #[test]
    fn encode_template_form_sends_need_up_only_when_set() {
        let request = TemplateSend::new("T1", vec!["1500000".to_owned()]);
        let form = encode_template_send_form(&request);
        assert!(!form.iter().any(|(k, _)| k == "needUp"));

        let form = encode_template_send_form(&request.with_need_up(false));
        assert_eq!(form.last(), Some(&("needUp".to_owned(), "false".to_owned())));
    }

    #[test]
    fn encode_code_form_includes_only_set_fields() {
        let request = CodeSend::generated("1500000", 6);
        assert_eq!(
            encode_code_send_form(&request),
            vec![
                ("mobile".to_owned(), "1500000".to_owned()),
                ("codeLen".to_owned(), "6".to_owned()),
            ]
        );

        let request = CodeSend::custom("1500000", "9876")
            .with_template("T9")
            .with_need_up(false);
        assert_eq!(
            encode_code_send_form(&request),
            vec![
                ("templateid".to_owned(), "T9".to_owned()),
                ("mobile".to_owned(), "1500000".to_owned()),
                ("authCode".to_owned(), "9876".to_owned()),
                ("needUp".to_owned(), "false".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_response_keeps_opaque_payload() {
        let reply = decode_netease_reply(r#"{"code":200,"msg":"ok","obj":""}"#).unwrap();
        assert!(reply.is_success());
        let resp = reply.parsed().unwrap();
        assert_eq!(resp.msg.as_deref(), Some("ok"));
        assert_eq!(resp.obj, serde_json::Value::String(String::new()));

        let reply = decode_netease_reply(r#"{"code":416}"#).unwrap();
        assert!(!reply.is_success());
        assert_eq!(reply.parsed().unwrap().obj, serde_json::Value::Null);
    }

    #[test]
    fn decode_accepts_string_code() {
        let reply = decode_netease_reply(r#"{"code":"200","msg":"ok","obj":"1"}"#).unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.parsed().unwrap().code, 200);
    }

    #[test]
    fn decode_keeps_unrecognised_json_whole() {
        let reply = decode_netease_reply(r#"{"desc":"bad"}"#).unwrap();
        assert_eq!(
            reply,
            NeteaseReply::Raw(serde_json::json!({ "desc": "bad" }))
        );
        assert!(!reply.is_success());

        let reply = decode_netease_reply(r#"{"code":"oops","msg":"x"}"#).unwrap();
        assert!(reply.parsed().is_none());
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(
            decode_netease_reply("not-json"),
            Err(TransportError::Json(_))
        ));
    }
}
