//! Salted PBKDF2-HMAC-SHA256 password hashes.
//!
//! Stored format is `"{salt}${hash}"`: the salt is 16 random bytes as 32 hex
//! characters, and the hash is 32 bytes of PBKDF2 output in hex. The salt's
//! hex text (not its raw bytes) is what feeds the KDF.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::token::generate_secure_token;

/// Default PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const SALT_BYTES: usize = 16;
const HASH_BYTES: usize = 32;

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; HASH_BYTES] {
    let mut out = [0u8; HASH_BYTES];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

/// Hash `password` with a fresh random salt and the default iteration count.
pub fn hash_password(password: &str) -> String {
    hash_password_with_iterations(password, PBKDF2_ITERATIONS)
}

/// Hash `password` with a fresh random salt and `iterations` rounds.
pub fn hash_password_with_iterations(password: &str, iterations: u32) -> String {
    let salt = generate_secure_token(SALT_BYTES);
    let hash = derive(password, &salt, iterations);
    format!("{}${}", salt, hex::encode(hash))
}

/// Check `password` against a stored `salt$hash` string.
pub fn verify_password(password: &str, stored: &str) -> bool {
    verify_password_with_iterations(password, stored, PBKDF2_ITERATIONS)
}

/// Check `password` against a stored hash produced with `iterations` rounds.
///
/// Malformed stored values never match.
pub fn verify_password_with_iterations(password: &str, stored: &str, iterations: u32) -> bool {
    let Some((salt, expected_hex)) = stored.split_once('$') else {
        return false;
    };
    if expected_hex.contains('$') {
        return false;
    }
    let Ok(expected) = hex::decode(expected_hex) else {
        return false;
    };

    let derived = derive(password, salt, iterations);
    derived[..].ct_eq(&expected[..]).into()
}
