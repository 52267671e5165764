//! Transport layer: wire-format details per provider (encoding, signing, decoding).

mod chuanglan;
mod lenient;
mod netease;

pub use chuanglan::{CHUANGLAN_CONTENT_TYPE, decode_chuanglan_reply, encode_chuanglan_send_body};
pub use netease::{
    AuthHeaders, decode_netease_reply, encode_code_send_form, encode_template_send_form,
};
