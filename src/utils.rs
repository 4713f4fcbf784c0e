// For signature verification
use hex::decode as hex_decode;
use hmac::{Hmac, Mac};
use sha2::Sha256;
type HmacSha256 = Hmac<Sha256>;

/// Helper function for verifying GitHub webhook signature
///
/// Expected header format: "sha256=<hex digest>". Any other algorithm
/// token, a missing separator or a non-hex digest fails closed.
pub fn verify_github_signature(secret: &str, payload: &[u8], signature_header: &str) -> bool {
    let Some((algorithm, digest)) = signature_header.split_once('=') else {
        return false;
    };
    if algorithm != "sha256" {
        return false;
    }

    // GitHub provides the signature as hex
    let expected = match hex_decode(digest) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    // Compute HMAC SHA256 over the raw body
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    // Constant-time comparison
    mac.verify_slice(&expected).is_ok()
}
