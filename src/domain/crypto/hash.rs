//! Hash algorithm domain type.
//!
//! The digest used for a module signature is never chosen by the caller; it
//! follows from the signing key (see [`KeyAlgorithm::digest_algorithm`]).
//!
//! [`KeyAlgorithm::digest_algorithm`]: super::KeyAlgorithm::digest_algorithm

use der::asn1::ObjectIdentifier;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;

use super::DigestBytes;
use crate::domain::constants;

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    #[must_use]
    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// OID placed in `digestAlgorithms` and `SignerInfo.digestAlgorithm`.
    #[must_use]
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            HashAlgorithm::Sha256 => constants::ID_SHA_256,
            HashAlgorithm::Sha384 => constants::ID_SHA_384,
            HashAlgorithm::Sha512 => constants::ID_SHA_512,
        }
    }

    #[must_use]
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        match *oid {
            constants::ID_SHA_256 => Some(HashAlgorithm::Sha256),
            constants::ID_SHA_384 => Some(HashAlgorithm::Sha384),
            constants::ID_SHA_512 => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Hash `data` in one pass.
    #[must_use]
    pub fn digest(&self, data: &[u8]) -> DigestBytes {
        let bytes = match self {
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        };
        DigestBytes::from_trusted(*self, bytes)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
