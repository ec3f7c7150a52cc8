//! High-level signing service: CMS signature plus trailer in one call.

use x509_cert::Certificate;

use crate::domain::crypto::ModuleSigner;
use crate::domain::modsig::is_signed;
use crate::infra::config::SigningOptions;
use crate::infra::error::SigningResult;
use crate::services::cms_builder::CmsSignedDataBuilder;
use crate::services::trailer;

/// Produces signed modules. Stateless apart from its options; one instance
/// may be shared across threads and calls.
#[derive(Debug, Clone, Default)]
pub struct ModuleSigningService {
    options: SigningOptions,
}

impl ModuleSigningService {
    #[must_use]
    pub fn new(options: SigningOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &SigningOptions {
        &self.options
    }

    /// Detached DER CMS signature over `payload`.
    pub fn sign_detached<S: ModuleSigner + ?Sized>(
        &self,
        signer: &S,
        cert: &Certificate,
        payload: &[u8],
    ) -> SigningResult<Vec<u8>> {
        CmsSignedDataBuilder::new()
            .with_signature_oid_policy(self.options.signature_oid_policy)
            .sign(payload, cert, signer)
    }

    /// `payload` followed by its signature, descriptor and magic.
    ///
    /// A payload that is already signed gets a second trailer appended, as
    /// `sign-file` does; the kernel only reads the outermost one.
    pub fn sign_attached<S: ModuleSigner + ?Sized>(
        &self,
        signer: &S,
        cert: &Certificate,
        payload: &[u8],
    ) -> SigningResult<Vec<u8>> {
        if self.options.warn_on_resign && is_signed(payload) {
            log::warn!("Module already carries a signature; appending another one");
        }

        let signature = self.sign_detached(signer, cert, payload)?;
        let signed = trailer::finalize(payload, &signature)?;
        log::info!(
            "Signed module: {} payload bytes, {} signature bytes, {} total",
            payload.len(),
            signature.len(),
            signed.len()
        );
        Ok(signed)
    }
}

/// Sign `payload` with default options (kernel-compatible OIDs).
///
/// # Errors
///
/// See [`CmsSignedDataBuilder::sign`] and [`trailer::finalize`].
pub fn sign_module_attached<S: ModuleSigner + ?Sized>(
    signer: &S,
    cert: &Certificate,
    payload: &[u8],
) -> SigningResult<Vec<u8>> {
    ModuleSigningService::default().sign_attached(signer, cert, payload)
}
