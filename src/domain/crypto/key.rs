//! Public key algorithm of the signing key and the algorithm identifiers it
//! implies for the CMS `SignerInfo`.

use der::asn1::{Null, ObjectIdentifier};
use der::Any;
use serde::{Deserialize, Serialize};
use std::fmt;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use super::HashAlgorithm;
use crate::domain::constants;
use crate::infra::error::{SigningError, SigningResult};

/// Key types a module signer may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
    Ed25519,
}

/// Selects the `SignerInfo.signatureAlgorithm` OID for RSA keys.
///
/// The kernel's CMS parser only understands the bare `rsaEncryption` OID, so
/// that is the default. ECDSA and Ed25519 labels do not depend on the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureOidPolicy {
    /// `rsaEncryption` for every digest.
    #[default]
    KernelCompatible,
    /// `sha{256,384,512}WithRSAEncryption`, as most CMS libraries emit.
    HashSpecific,
}

impl KeyAlgorithm {
    /// Identify the key algorithm of a certificate's SubjectPublicKeyInfo.
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> SigningResult<Self> {
        match spki.algorithm.oid {
            constants::RSA_ENCRYPTION => Ok(KeyAlgorithm::Rsa),
            constants::ID_ED25519 => Ok(KeyAlgorithm::Ed25519),
            constants::ID_EC_PUBLIC_KEY => {
                let curve = spki
                    .algorithm
                    .parameters
                    .as_ref()
                    .ok_or_else(|| {
                        SigningError::InvalidCertificate(
                            "EC public key without named curve parameters".into(),
                        )
                    })?
                    .decode_as::<ObjectIdentifier>()
                    .map_err(|e| {
                        SigningError::InvalidCertificate(format!(
                            "EC public key parameters are not a named curve: {e}"
                        ))
                    })?;
                match curve {
                    constants::SECP256R1 => Ok(KeyAlgorithm::EcdsaP256),
                    constants::SECP384R1 => Ok(KeyAlgorithm::EcdsaP384),
                    constants::SECP521R1 => Ok(KeyAlgorithm::EcdsaP521),
                    other => Err(SigningError::InvalidCertificate(format!(
                        "unsupported EC curve {other}"
                    ))),
                }
            }
            other => Err(SigningError::InvalidCertificate(format!(
                "unsupported public key algorithm {other}"
            ))),
        }
    }

    /// Digest the CMS layer uses for this key type.
    #[must_use]
    pub fn digest_algorithm(&self) -> HashAlgorithm {
        match self {
            // Kernels virtually always build SHA-256 in; a wider RSA digest
            // would need CONFIG_CRYPTO_SHA512 and friends.
            KeyAlgorithm::Rsa | KeyAlgorithm::EcdsaP256 => HashAlgorithm::Sha256,
            KeyAlgorithm::EcdsaP384 => HashAlgorithm::Sha384,
            KeyAlgorithm::EcdsaP521 => HashAlgorithm::Sha512,
            // RFC 8419: Ed25519 SignerInfos name id-sha512.
            KeyAlgorithm::Ed25519 => HashAlgorithm::Sha512,
        }
    }

    /// Whether the signer consumes the message itself rather than its digest.
    #[must_use]
    pub fn signs_message(&self) -> bool {
        matches!(self, KeyAlgorithm::Ed25519)
    }

    /// OID labelling the `SignerInfo` signature under `policy`.
    #[must_use]
    pub fn signature_oid(
        &self,
        digest: HashAlgorithm,
        policy: SignatureOidPolicy,
    ) -> ObjectIdentifier {
        match (self, policy) {
            (KeyAlgorithm::Rsa, SignatureOidPolicy::KernelCompatible) => constants::RSA_ENCRYPTION,
            (KeyAlgorithm::Rsa, SignatureOidPolicy::HashSpecific) => match digest {
                HashAlgorithm::Sha256 => constants::SHA256_WITH_RSA_ENCRYPTION,
                HashAlgorithm::Sha384 => constants::SHA384_WITH_RSA_ENCRYPTION,
                HashAlgorithm::Sha512 => constants::SHA512_WITH_RSA_ENCRYPTION,
            },
            (KeyAlgorithm::EcdsaP256 | KeyAlgorithm::EcdsaP384 | KeyAlgorithm::EcdsaP521, _) => {
                match digest {
                    HashAlgorithm::Sha256 => constants::ECDSA_WITH_SHA256,
                    HashAlgorithm::Sha384 => constants::ECDSA_WITH_SHA384,
                    HashAlgorithm::Sha512 => constants::ECDSA_WITH_SHA512,
                }
            }
            (KeyAlgorithm::Ed25519, _) => constants::ID_ED25519,
        }
    }

    /// Full `signatureAlgorithm` AlgorithmIdentifier.
    ///
    /// RSA identifiers carry explicit NULL parameters (RFC 4055); ECDSA and
    /// Ed25519 identifiers have none.
    pub fn signature_algorithm_identifier(
        &self,
        digest: HashAlgorithm,
        policy: SignatureOidPolicy,
    ) -> der::Result<AlgorithmIdentifierOwned> {
        let parameters = match self {
            KeyAlgorithm::Rsa => Some(Any::encode_from(&Null)?),
            _ => None,
        };
        Ok(AlgorithmIdentifierOwned {
            oid: self.signature_oid(digest, policy),
            parameters,
        })
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::EcdsaP256 => "ECDSA-P256",
            KeyAlgorithm::EcdsaP384 => "ECDSA-P384",
            KeyAlgorithm::EcdsaP521 => "ECDSA-P521",
            KeyAlgorithm::Ed25519 => "Ed25519",
        };
        f.write_str(name)
    }
}
