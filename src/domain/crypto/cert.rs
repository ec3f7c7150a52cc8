use der::asn1::UintRef;
use der::{Decode, Sequence};
use std::fmt;
use x509_cert::Certificate;

use super::KeyAlgorithm;
use crate::infra::error::{SigningError, SigningResult};

/// PKCS#1 `RSAPublicKey`, only decoded to learn the modulus length.
#[derive(Sequence)]
struct RsaPublicKeyRef<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Certificate identifying the signer inside the `SignerInfo`.
///
/// Never embedded in the output; only its issuer, serial number and key
/// type are used.
#[derive(Clone)]
pub struct SignerCertificate {
    cert: Certificate,
    key_algorithm: KeyAlgorithm,
    rsa_modulus_len: Option<usize>,
}

impl SignerCertificate {
    pub fn new(cert: &Certificate) -> SigningResult<Self> {
        let spki = &cert.tbs_certificate.subject_public_key_info;
        let key_algorithm = KeyAlgorithm::from_spki(spki)?;

        let rsa_modulus_len = if key_algorithm == KeyAlgorithm::Rsa {
            let key_bytes = spki.subject_public_key.as_bytes().ok_or_else(|| {
                SigningError::InvalidCertificate("RSA public key has unused bits".into())
            })?;
            let key = RsaPublicKeyRef::from_der(key_bytes).map_err(|e| {
                SigningError::InvalidCertificate(format!("Malformed RSA public key: {e}"))
            })?;
            Some(key.modulus.as_bytes().len())
        } else {
            None
        };

        Ok(Self {
            cert: cert.clone(),
            key_algorithm,
            rsa_modulus_len,
        })
    }

    pub fn from_der(der: &[u8]) -> SigningResult<Self> {
        let cert = Certificate::from_der(der).map_err(|e| {
            SigningError::InvalidCertificate(format!("Failed to parse certificate: {e}"))
        })?;
        Self::new(&cert)
    }

    #[must_use]
    pub fn certificate(&self) -> &Certificate {
        &self.cert
    }

    #[must_use]
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        self.key_algorithm
    }

    /// RSA modulus length in bytes, which is also the exact signature length.
    #[must_use]
    pub fn rsa_modulus_len(&self) -> Option<usize> {
        self.rsa_modulus_len
    }
}

impl fmt::Debug for SignerCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignerCertificate(key={}, issuer={})",
            self.key_algorithm, self.cert.tbs_certificate.issuer
        )
    }
}
