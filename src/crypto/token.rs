//! Secure random tokens.

use rand::rngs::OsRng;
use rand::RngCore;

/// Default token length in bytes (64 hex characters).
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generate `length` random bytes from the OS CSPRNG, rendered as lowercase hex.
///
/// The returned string is `2 * length` characters long.
pub fn generate_secure_token(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
