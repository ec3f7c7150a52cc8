//! Appends the signature trailer the kernel looks for at the end of a module:
//! `payload || signature || descriptor(sig_len) || magic`.

use crate::domain::constants::{MODULE_SIG_MAGIC, MODULE_SIG_TRAILER_LEN};
use crate::domain::modsig::ModuleSignatureDescriptor;
use crate::infra::error::{SigningError, SigningResult};

/// Build the signed module from `payload` and a DER CMS signature.
///
/// # Errors
///
/// `SignatureTooLarge` if the signature length does not fit in `u32`.
pub fn finalize(payload: &[u8], signature_der: &[u8]) -> SigningResult<Vec<u8>> {
    let descriptor = ModuleSignatureDescriptor::for_cms(sig_len(signature_der.len())?);

    let mut out =
        Vec::with_capacity(payload.len() + signature_der.len() + MODULE_SIG_TRAILER_LEN);
    out.extend_from_slice(payload);
    out.extend_from_slice(signature_der);
    out.extend_from_slice(&descriptor.to_bytes());
    out.extend_from_slice(MODULE_SIG_MAGIC);
    Ok(out)
}

fn sig_len(len: usize) -> SigningResult<u32> {
    u32::try_from(len).map_err(|_| SigningError::SignatureTooLarge(len))
}
