pub mod base64url;
pub(crate) mod bounds;

pub use base64url::{decode, decode_bytes, encode, encode_bytes, Base64Url, UrlEncoder};
