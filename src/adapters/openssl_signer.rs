//! [`ModuleSigner`] backed by an in-memory OpenSSL private key.

use der::Decode;
use openssl::md::{Md, MdRef};
use openssl::nid::Nid;
use openssl::pkey::{Id, PKey, Private};
use openssl::pkey_ctx::PkeyCtx;
use openssl::rsa::Padding;
use openssl::sign::Signer;
use openssl::x509::X509Ref;
use x509_cert::Certificate;

use crate::domain::crypto::{HashAlgorithm, KeyAlgorithm, ModuleSigner, SignRequest};
use crate::infra::error::{SigningError, SigningResult};

/// Signs with an OpenSSL `PKey`: RSA PKCS#1 v1.5, ECDSA (DER output) or
/// pure Ed25519.
pub struct OpenSslModuleSigner {
    pkey: PKey<Private>,
    key_algorithm: KeyAlgorithm,
}

impl OpenSslModuleSigner {
    /// Wrap `pkey`, rejecting key types the kernel cannot verify.
    pub fn new(pkey: PKey<Private>) -> SigningResult<Self> {
        let key_algorithm = Self::detect_key_algorithm(&pkey)?;
        log::debug!("OpenSSL signer holds a {key_algorithm} key");
        Ok(Self {
            pkey,
            key_algorithm,
        })
    }

    fn detect_key_algorithm(pkey: &PKey<Private>) -> SigningResult<KeyAlgorithm> {
        let id = pkey.id();
        if id == Id::RSA {
            return Ok(KeyAlgorithm::Rsa);
        }
        if id == Id::ED25519 {
            return Ok(KeyAlgorithm::Ed25519);
        }
        if id == Id::EC {
            let ec_key = pkey.ec_key().map_err(|e| {
                SigningError::InvalidCertificate(format!("Failed to read EC key: {e}"))
            })?;
            return match ec_key.group().curve_name() {
                Some(Nid::X9_62_PRIME256V1) => Ok(KeyAlgorithm::EcdsaP256),
                Some(Nid::SECP384R1) => Ok(KeyAlgorithm::EcdsaP384),
                Some(Nid::SECP521R1) => Ok(KeyAlgorithm::EcdsaP521),
                other => Err(SigningError::InvalidCertificate(format!(
                    "unsupported EC curve (nid {:?})",
                    other.map(|nid| nid.as_raw())
                ))),
            };
        }
        Err(SigningError::InvalidCertificate(format!(
            "unsupported private key type (id {})",
            id.as_raw()
        )))
    }

    fn message_digest(algo: HashAlgorithm) -> &'static MdRef {
        match algo {
            HashAlgorithm::Sha256 => Md::sha256(),
            HashAlgorithm::Sha384 => Md::sha384(),
            HashAlgorithm::Sha512 => Md::sha512(),
        }
    }

    fn sign_digest(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>> {
        let mut ctx = PkeyCtx::new(&self.pkey)?;
        ctx.sign_init()?;
        if self.key_algorithm == KeyAlgorithm::Rsa {
            ctx.set_rsa_padding(Padding::PKCS1)?;
        }
        ctx.set_signature_md(Self::message_digest(request.hash_algorithm()))?;

        let mut signature = Vec::new();
        ctx.sign_to_vec(request.digest().as_slice(), &mut signature)?;
        Ok(signature)
    }

    fn sign_message(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>> {
        let mut signer = Signer::new_without_digest(&self.pkey)?;
        Ok(signer.sign_oneshot_to_vec(request.message())?)
    }
}

impl ModuleSigner for OpenSslModuleSigner {
    fn key_algorithm(&self) -> KeyAlgorithm {
        self.key_algorithm
    }

    fn public_key_der(&self) -> SigningResult<Vec<u8>> {
        self.pkey.public_key_to_der().map_err(|e| {
            SigningError::SignerSetupFailed(format!("Failed to export public key: {e}"))
        })
    }

    fn sign(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>> {
        if self.key_algorithm.signs_message() {
            self.sign_message(request)
        } else {
            self.sign_digest(request)
        }
    }
}

/// Convert an OpenSSL certificate into the parsed form the CMS builder takes.
pub fn certificate_from_openssl(cert: &X509Ref) -> SigningResult<Certificate> {
    let der = cert.to_der().map_err(|e| {
        SigningError::InvalidCertificate(format!("Failed to encode certificate: {e}"))
    })?;
    Certificate::from_der(&der).map_err(|e| {
        SigningError::InvalidCertificate(format!("Failed to parse certificate: {e}"))
    })
}
