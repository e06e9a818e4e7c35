//! Warden - Security Hardening Toolkit
//!
//! This crate bundles an in-memory sliding-window rate limiter with thin
//! wrappers over standard cryptographic primitives: secure tokens, digests,
//! HMAC signatures, password hashing and naive input sanitisation.

pub mod config;
pub mod crypto;
pub mod error;
pub mod ratelimit;
pub mod sanitize;
