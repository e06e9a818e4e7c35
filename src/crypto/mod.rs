//! Thin wrappers over standard cryptographic primitives.
//!
//! Nothing here invents its own cryptography: tokens come from the OS CSPRNG,
//! digests and MACs from the RustCrypto `sha2`/`hmac` crates, and password
//! hashing from `pbkdf2`. Comparisons of secret material are constant-time.

mod digest;
mod password;
mod signature;
mod token;

pub use digest::{hash, sha256_hex, DigestAlgorithm};
pub use password::{
    hash_password, hash_password_with_iterations, verify_password,
    verify_password_with_iterations, PBKDF2_ITERATIONS,
};
pub use signature::{create_signature, verify_signature};
pub use token::{generate_secure_token, DEFAULT_TOKEN_LENGTH};
