//! HMAC-SHA256 message signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Result, WardenError};

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret).map_err(|e| WardenError::Crypto(e.to_string()))
}

/// Sign `data` with `secret` and return the lowercase hex HMAC-SHA256.
pub fn create_signature(data: &[u8], secret: &[u8]) -> Result<String> {
    let mut mac = keyed_mac(secret)?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check that `signature` is the HMAC-SHA256 of `data` under `secret`.
///
/// The comparison is constant-time. A signature that is not valid hex, or
/// has the wrong length, is rejected.
pub fn verify_signature(data: &[u8], secret: &[u8], signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = keyed_mac(secret) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"shared-secret";
    const DATA: &[u8] = b"important message";

    #[test]
    fn test_sign_then_verify() {
        let signature = create_signature(DATA, SECRET).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(verify_signature(DATA, SECRET, &signature));
    }

    #[test]
    fn test_signature_is_deterministic() {
        assert_eq!(
            create_signature(DATA, SECRET).unwrap(),
            create_signature(DATA, SECRET).unwrap()
        );
    }

    #[test]
    fn test_tampered_data_rejected() {
        let signature = create_signature(DATA, SECRET).unwrap();
        assert!(!verify_signature(b"important messagE", SECRET, &signature));
    }

    #[test]
    fn test_tampered_secret_rejected() {
        let signature = create_signature(DATA, SECRET).unwrap();
        assert!(!verify_signature(DATA, b"other-secret", &signature));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let signature = create_signature(DATA, SECRET).unwrap();
        let mut bytes = hex::decode(&signature).unwrap();
        bytes[31] ^= 0x80;
        assert!(!verify_signature(DATA, SECRET, &hex::encode(bytes)));
    }

    #[test]
    fn test_malformed_signature_rejected() {
        let signature = create_signature(DATA, SECRET).unwrap();
        assert!(!verify_signature(DATA, SECRET, "not hex at all"));
        assert!(!verify_signature(DATA, SECRET, &signature[..32]));
        assert!(!verify_signature(DATA, SECRET, ""));
    }

    #[test]
    fn test_known_hmac_value() {
        // RFC 4231 test case 2
        let signature = create_signature(b"what do ya want for nothing?", b"Jefe").unwrap();
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
