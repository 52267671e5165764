#[derive(Debug, Clone, PartialEq, Eq)]
/// What Chuanglan answered to a send.
///
/// The gateway normally answers with a JSON document; anything else is handed
/// back untouched.
pub enum ChuanglanReply {
    Parsed(ChuanglanSendResult),
    Raw(String),
}

impl ChuanglanReply {
    /// The structured result, if the body was a recognised JSON document.
    pub fn parsed(&self) -> Option<&ChuanglanSendResult> {
        match self {
            Self::Parsed(result) => Some(result),
            Self::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChuanglanSendResult {
    /// `"0"` on success; any other value is a Chuanglan error code.
    pub code: String,
    pub msg_id: Option<String>,
    pub time: Option<String>,
    pub error_msg: Option<String>,
}

impl ChuanglanSendResult {
    pub fn is_success(&self) -> bool {
        self.code == "0"
    }
}

#[derive(Debug, Clone, PartialEq)]
/// What Netease answered to a send.
///
/// Bodies in the documented `{code, msg, obj}` shape are decoded; any other valid
/// JSON document is kept whole.
pub enum NeteaseReply {
    Parsed(NeteaseResponse),
    Raw(serde_json::Value),
}

impl NeteaseReply {
    /// The structured response, if the body had a usable `code`.
    pub fn parsed(&self) -> Option<&NeteaseResponse> {
        match self {
            Self::Parsed(response) => Some(response),
            Self::Raw(_) => None,
        }
    }

    /// `false` for bodies that could not be interpreted.
    pub fn is_success(&self) -> bool {
        self.parsed().is_some_and(NeteaseResponse::is_success)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Netease JSON response (`{code, msg, obj}`).
pub struct NeteaseResponse {
    /// `200` on success. Netease sends it as a number or a numeric string.
    pub code: i32,
    pub msg: Option<String>,
    /// Opaque payload: the send id for template sends, the code for code sends.
    pub obj: serde_json::Value,
}

impl NeteaseResponse {
    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}
