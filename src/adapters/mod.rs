//! Adapter layer for concrete signing backends.
//!
//! Provides adapters for:
//! - OpenSSL private keys held in memory

pub mod openssl_signer;

pub use openssl_signer::{certificate_from_openssl, OpenSslModuleSigner};
