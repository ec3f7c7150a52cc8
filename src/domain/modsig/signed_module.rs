use cms::content_info::ContentInfo;
use cms::signed_data::SignedData;
use der::Decode;

use super::ModuleSignatureDescriptor;
use crate::domain::constants::{
    ID_SIGNED_DATA, MODULE_SIG_DESCRIPTOR_LEN, MODULE_SIG_MAGIC, MODULE_SIG_TRAILER_LEN,
};
use crate::infra::error::{SigningError, SigningResult};

/// Whether `module` ends with the signature magic.
#[must_use]
pub fn is_signed(module: &[u8]) -> bool {
    module.ends_with(MODULE_SIG_MAGIC)
}

/// A signed module split into its parts. Borrowed from the input buffer.
///
/// Only the structure is checked; the signature is not verified.
#[derive(Debug, Clone, Copy)]
pub struct SignedModule<'a> {
    payload: &'a [u8],
    signature: &'a [u8],
    descriptor: ModuleSignatureDescriptor,
}

impl<'a> SignedModule<'a> {
    /// Split `module` into payload, signature and descriptor.
    ///
    /// # Errors
    ///
    /// `NotSigned` if the magic is missing, `InvalidModuleSignature` if the
    /// descriptor is not a CMS descriptor or `sig_len` overruns the file.
    pub fn parse(module: &'a [u8]) -> SigningResult<Self> {
        if !is_signed(module) {
            return Err(SigningError::NotSigned);
        }
        if module.len() < MODULE_SIG_TRAILER_LEN {
            return Err(SigningError::InvalidModuleSignature(
                "too short for a signature descriptor".into(),
            ));
        }

        let descriptor_start = module.len() - MODULE_SIG_TRAILER_LEN;
        let mut raw = [0u8; MODULE_SIG_DESCRIPTOR_LEN];
        raw.copy_from_slice(&module[descriptor_start..descriptor_start + MODULE_SIG_DESCRIPTOR_LEN]);
        let descriptor = ModuleSignatureDescriptor::from_bytes(&raw);

        if !descriptor.is_cms() {
            return Err(SigningError::InvalidModuleSignature(format!(
                "unsupported descriptor {descriptor:?}"
            )));
        }

        let sig_len = usize::try_from(descriptor.sig_len).map_err(|_| {
            SigningError::InvalidModuleSignature("sig_len does not fit in memory".into())
        })?;
        let signature_start = descriptor_start.checked_sub(sig_len).ok_or_else(|| {
            SigningError::InvalidModuleSignature(format!(
                "sig_len {sig_len} exceeds the {descriptor_start} bytes before the descriptor"
            ))
        })?;

        Ok(Self {
            payload: &module[..signature_start],
            signature: &module[signature_start..descriptor_start],
            descriptor,
        })
    }

    /// Module bytes without the appended signature.
    #[must_use]
    pub fn unsigned_payload(&self) -> &'a [u8] {
        self.payload
    }

    /// DER-encoded CMS `ContentInfo`.
    #[must_use]
    pub fn signature_der(&self) -> &'a [u8] {
        self.signature
    }

    #[must_use]
    pub fn descriptor(&self) -> ModuleSignatureDescriptor {
        self.descriptor
    }

    /// Decode the signature region as CMS `SignedData`.
    pub fn signed_data(&self) -> SigningResult<SignedData> {
        let ci = ContentInfo::from_der(self.signature).map_err(|e| {
            SigningError::InvalidModuleSignature(format!("signature is not a ContentInfo: {e}"))
        })?;
        if ci.content_type != ID_SIGNED_DATA {
            return Err(SigningError::InvalidModuleSignature(format!(
                "content type {} is not signedData",
                ci.content_type
            )));
        }
        ci.content.decode_as::<SignedData>().map_err(|e| {
            SigningError::InvalidModuleSignature(format!("malformed SignedData: {e}"))
        })
    }
}
