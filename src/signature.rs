//! `x-line-signature`: base64 HMAC-SHA256 of the body, keyed by the channel secret.

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

fn mac(channel_secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(channel_secret.as_bytes()).expect("HMAC can take key of any size")
}

pub fn sign(body: &[u8], channel_secret: &str) -> String {
    let mut mac = mac(channel_secret);
    mac.update(body);
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

pub fn verify_signature(body: &[u8], signature: &str, channel_secret: &str) -> bool {
    let Ok(expected) = general_purpose::STANDARD.decode(signature.trim()) else {
        return false;
    };

    let mut mac = mac(channel_secret);
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
