//! The signing capability the core drives without ever seeing key material.

use super::{DigestBytes, HashAlgorithm, KeyAlgorithm};
use crate::infra::error::SigningResult;

/// What a [`ModuleSigner`] is asked to sign.
///
/// Without signed attributes the signature covers the module bytes directly:
/// hash-and-sign keys use [`digest`](Self::digest), Ed25519 signs
/// [`message`](Self::message).
#[derive(Debug)]
pub struct SignRequest<'a> {
    message: &'a [u8],
    digest: DigestBytes,
}

impl<'a> SignRequest<'a> {
    #[must_use]
    pub fn new(message: &'a [u8], digest: DigestBytes) -> Self {
        Self { message, digest }
    }

    #[must_use]
    pub fn message(&self) -> &'a [u8] {
        self.message
    }

    #[must_use]
    pub fn digest(&self) -> &DigestBytes {
        &self.digest
    }

    #[must_use]
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.digest.algorithm()
    }
}

/// Produces raw signatures with a private key held elsewhere (file, HSM,
/// token).
pub trait ModuleSigner {
    /// Type of the private key. Must match the certificate's public key.
    fn key_algorithm(&self) -> KeyAlgorithm;

    /// DER `SubjectPublicKeyInfo` of the signing key, compared byte for byte
    /// with the certificate's before anything is signed.
    ///
    /// # Errors
    ///
    /// Returns an error if the public half of the key cannot be exported.
    fn public_key_der(&self) -> SigningResult<Vec<u8>>;

    /// Sign the request, returning the raw signature value: the PKCS#1 v1.5
    /// block for RSA, a DER `Ecdsa-Sig-Value` for ECDSA, 64 bytes for Ed25519.
    ///
    /// # Errors
    ///
    /// Returns an error if the key refuses or fails to sign.
    fn sign(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>>;
}

impl<S: ModuleSigner + ?Sized> ModuleSigner for &S {
    fn key_algorithm(&self) -> KeyAlgorithm {
        (**self).key_algorithm()
    }

    fn public_key_der(&self) -> SigningResult<Vec<u8>> {
        (**self).public_key_der()
    }

    fn sign(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>> {
        (**self).sign(request)
    }
}

impl<S: ModuleSigner + ?Sized> ModuleSigner for Box<S> {
    fn key_algorithm(&self) -> KeyAlgorithm {
        (**self).key_algorithm()
    }

    fn public_key_der(&self) -> SigningResult<Vec<u8>> {
        (**self).public_key_der()
    }

    fn sign(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>> {
        (**self).sign(request)
    }
}
