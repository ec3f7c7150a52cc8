use der::{Any, Decode, Tag, Tagged};
use std::fmt;

use super::{KeyAlgorithm, SignerCertificate};
use crate::infra::error::{SigningError, SigningResult};

const ED25519_SIGNATURE_LEN: usize = 64;

/// Raw signature value destined for `SignerInfo.signature`.
#[derive(Clone, Eq, PartialEq)]
pub struct CmsSignature {
    key: KeyAlgorithm,
    bytes: Box<[u8]>,
}

impl CmsSignature {
    #[must_use]
    pub fn new(key: KeyAlgorithm, bytes: Vec<u8>) -> Self {
        Self {
            key,
            bytes: bytes.into_boxed_slice(),
        }
    }
    #[must_use]
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        self.key
    }
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into()
    }

    /// Reject values no verifier could accept for `cert`'s key.
    pub fn check_plausible(&self, cert: &SignerCertificate) -> SigningResult<()> {
        if self.bytes.is_empty() {
            return Err(SigningError::SignatureFailed(
                "signer returned an empty signature".into(),
            ));
        }
        match self.key {
            KeyAlgorithm::Rsa => {
                if let Some(expected) = cert.rsa_modulus_len() {
                    if self.bytes.len() != expected {
                        return Err(SigningError::SignatureFailed(format!(
                            "RSA signature is {} bytes, modulus is {expected}",
                            self.bytes.len()
                        )));
                    }
                }
            }
            KeyAlgorithm::EcdsaP256 | KeyAlgorithm::EcdsaP384 | KeyAlgorithm::EcdsaP521 => {
                let value = Any::from_der(&self.bytes).map_err(|e| {
                    SigningError::SignatureFailed(format!("ECDSA signature is not DER: {e}"))
                })?;
                if value.tag() != Tag::Sequence {
                    return Err(SigningError::SignatureFailed(format!(
                        "ECDSA signature has tag {}, expected SEQUENCE",
                        value.tag()
                    )));
                }
            }
            KeyAlgorithm::Ed25519 => {
                if self.bytes.len() != ED25519_SIGNATURE_LEN {
                    return Err(SigningError::SignatureFailed(format!(
                        "Ed25519 signature is {} bytes, expected {ED25519_SIGNATURE_LEN}",
                        self.bytes.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CmsSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CmsSignature(key={}, len={})",
            self.key,
            self.bytes.len()
        )
    }
}
