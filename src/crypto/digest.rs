//! Hex-encoded message digests.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha512};

use crate::error::WardenError;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
            DigestAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            other => Err(WardenError::InvalidArgument(format!(
                "unsupported digest algorithm: {}",
                other
            ))),
        }
    }
}

/// Hash `data` with `algorithm` and return the lowercase hex digest.
pub fn hash(data: &[u8], algorithm: DigestAlgorithm) -> String {
    match algorithm {
        DigestAlgorithm::Sha256 => format!("{:x}", Sha256::digest(data)),
        DigestAlgorithm::Sha512 => format!("{:x}", Sha512::digest(data)),
    }
}

/// SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hash(data, DigestAlgorithm::Sha256)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let data = b"the same input every time";
        assert_eq!(sha256_hex(data), sha256_hex(data));
        assert_eq!(
            hash(data, DigestAlgorithm::Sha512),
            hash(data, DigestAlgorithm::Sha512)
        );
    }

    #[test]
    fn test_single_bit_change_changes_digest() {
        let original = b"payload".to_vec();
        let mut flipped = original.clone();
        flipped[0] ^= 0x01;

        assert_ne!(sha256_hex(&original), sha256_hex(&flipped));
        assert_ne!(
            hash(&original, DigestAlgorithm::Sha512),
            hash(&flipped, DigestAlgorithm::Sha512)
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(sha256_hex(b"").len(), DigestAlgorithm::Sha256.output_len() * 2);
        assert_eq!(
            hash(b"", DigestAlgorithm::Sha512).len(),
            DigestAlgorithm::Sha512.output_len() * 2
        );
    }

    #[test]
    fn test_known_sha256_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("sha256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("SHA-512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert!("md5".parse::<DigestAlgorithm>().is_err());
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha256);
        assert_eq!(DigestAlgorithm::Sha512.to_string(), "sha512");
    }
}
