//! CMS `SignedData` construction for appended module signatures.
//!
//! The produced structure has the shape the kernel's module verifier accepts:
//! - `encapContentInfo` is `id-data` with the content omitted (detached);
//! - no `certificates`, no `crls`;
//! - one `SignerInfo` identified by issuer and serial number, without signed
//!   or unsigned attributes, so the signature covers the module bytes
//!   directly;
//! - for RSA, `signatureAlgorithm` is plain `rsaEncryption` unless the caller
//!   picks [`SignatureOidPolicy::HashSpecific`].

use cms::cert::IssuerAndSerialNumber;
use cms::content_info::{CmsVersion, ContentInfo};
use cms::signed_data::{
    DigestAlgorithmIdentifiers, EncapsulatedContentInfo, SignatureValue, SignedData,
    SignerIdentifier, SignerInfo, SignerInfos,
};
use der::asn1::SetOfVec;
use der::{Any, Encode};
use x509_cert::spki::AlgorithmIdentifierOwned;
use x509_cert::Certificate;

use crate::domain::constants;
use crate::domain::crypto::{
    CmsSignature, HashAlgorithm, ModuleSigner, SignRequest, SignatureOidPolicy,
    SignerCertificate,
};
use crate::infra::error::{SigningError, SigningResult};

/// Builds and signs the detached CMS `SignedData` for one module.
///
/// Holds no state between calls; the OID policy is a per-builder option and
/// never touches process-wide tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmsSignedDataBuilder {
    oid_policy: SignatureOidPolicy,
}

impl CmsSignedDataBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_signature_oid_policy(mut self, policy: SignatureOidPolicy) -> Self {
        self.oid_policy = policy;
        self
    }

    #[must_use]
    pub fn signature_oid_policy(&self) -> SignatureOidPolicy {
        self.oid_policy
    }

    /// Sign `payload` and return the DER-encoded CMS `ContentInfo`.
    ///
    /// # Errors
    ///
    /// - `InvalidCertificate` if the certificate key is unsupported or is not
    ///   the signer's public key
    /// - `SignatureFailed` if the signer errors or returns an implausible value
    /// - `SignerSetupFailed` if the `SignedData` cannot be assembled
    /// - `EncodingFailed` if DER serialisation fails
    pub fn sign<S: ModuleSigner + ?Sized>(
        &self,
        payload: &[u8],
        cert: &Certificate,
        signer: &S,
    ) -> SigningResult<Vec<u8>> {
        let signer_cert = SignerCertificate::new(cert)?;
        let key = signer_cert.key_algorithm();
        if signer.key_algorithm() != key {
            return Err(SigningError::InvalidCertificate(format!(
                "certificate holds a {key} key but the signer uses {}",
                signer.key_algorithm()
            )));
        }
        Self::check_public_key(cert, signer)?;

        let digest_algorithm = key.digest_algorithm();
        log::debug!(
            "Signing {} byte payload with {key} key, digest {digest_algorithm}",
            payload.len()
        );

        let request = SignRequest::new(payload, digest_algorithm.digest(payload));
        let raw = signer.sign(&request).map_err(|e| match e {
            SigningError::SignatureFailed(_) => e,
            other => SigningError::SignatureFailed(other.to_string()),
        })?;
        let signature = CmsSignature::new(key, raw);
        signature.check_plausible(&signer_cert)?;
        log::debug!("Signer returned {:?}", signature);

        let signed_data = self.build_signed_data(&signer_cert, digest_algorithm, signature)?;
        Self::encode(&signed_data)
    }

    fn check_public_key<S: ModuleSigner + ?Sized>(
        cert: &Certificate,
        signer: &S,
    ) -> SigningResult<()> {
        let cert_spki = cert
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|e| {
                SigningError::InvalidCertificate(format!("Failed to encode public key: {e}"))
            })?;
        if signer.public_key_der()? != cert_spki {
            return Err(SigningError::InvalidCertificate(
                "certificate public key does not match the signing key".into(),
            ));
        }
        Ok(())
    }

    /// Assemble `SignedData` around an already computed signature.
    pub fn build_signed_data(
        &self,
        signer_cert: &SignerCertificate,
        digest_algorithm: HashAlgorithm,
        signature: CmsSignature,
    ) -> SigningResult<SignedData> {
        let cert = signer_cert.certificate();
        let digest_alg = AlgorithmIdentifierOwned {
            oid: digest_algorithm.oid(),
            parameters: None,
        };
        let signature_algorithm = signer_cert
            .key_algorithm()
            .signature_algorithm_identifier(digest_algorithm, self.oid_policy)
            .map_err(|e| setup_failed("signatureAlgorithm", e))?;
        log::debug!(
            "SignerInfo: digestAlgorithm={} signatureAlgorithm={}",
            digest_alg.oid,
            signature_algorithm.oid
        );

        let signer_info = SignerInfo {
            version: CmsVersion::V1,
            sid: SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
                issuer: cert.tbs_certificate.issuer.clone(),
                serial_number: cert.tbs_certificate.serial_number.clone(),
            }),
            digest_alg: digest_alg.clone(),
            signed_attrs: None,
            signature_algorithm,
            signature: SignatureValue::new(signature.into_vec())
                .map_err(|e| setup_failed("signature", e))?,
            unsigned_attrs: None,
        };

        Ok(SignedData {
            version: CmsVersion::V1,
            digest_algorithms: DigestAlgorithmIdentifiers::try_from(vec![digest_alg])
                .map_err(|e| setup_failed("digestAlgorithms", e))?,
            // Detached: the module travels next to the signature, not inside it.
            encap_content_info: EncapsulatedContentInfo {
                econtent_type: constants::ID_DATA,
                econtent: None,
            },
            certificates: None,
            crls: None,
            signer_infos: SignerInfos::from(
                SetOfVec::try_from(vec![signer_info])
                    .map_err(|e| setup_failed("signerInfos", e))?,
            ),
        })
    }

    /// Wrap `signed_data` in a `ContentInfo` and serialise it to DER.
    pub fn encode(signed_data: &SignedData) -> SigningResult<Vec<u8>> {
        let content_info = ContentInfo {
            content_type: constants::ID_SIGNED_DATA,
            content: Any::encode_from(signed_data)
                .map_err(|e| SigningError::EncodingFailed(format!("SignedData: {e}")))?,
        };
        let der = content_info
            .to_der()
            .map_err(|e| SigningError::EncodingFailed(format!("ContentInfo: {e}")))?;
        log::debug!("Encoded CMS ContentInfo: {} bytes", der.len());
        Ok(der)
    }
}

fn setup_failed(field: &str, error: der::Error) -> SigningError {
    SigningError::SignerSetupFailed(format!("{field}: {error}"))
}
