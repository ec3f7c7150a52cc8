use crate::domain::constants::{MODULE_SIG_DESCRIPTOR_LEN, PKEY_ID_PKCS7};

/// `struct module_signature` as read by the kernel.
///
/// For CMS signatures every field except `id_type` and `sig_len` is zero;
/// signer and key identity live inside the CMS blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSignatureDescriptor {
    /// Public-key algorithm, always `0`
    pub algo: u8,
    /// Digest algorithm, always `0`
    pub hash: u8,
    /// Key identifier type, `PKEY_ID_PKCS7`
    pub id_type: u8,
    /// Length of signer's name, always `0`
    pub signer_len: u8,
    /// Length of key identifier, always `0`
    pub key_id_len: u8,
    pub pad: [u8; 3],
    /// Length of the signature data, big-endian on disk
    pub sig_len: u32,
}

impl ModuleSignatureDescriptor {
    /// Descriptor for a CMS signature of `sig_len` bytes.
    #[must_use]
    pub fn for_cms(sig_len: u32) -> Self {
        Self {
            algo: 0,
            hash: 0,
            id_type: PKEY_ID_PKCS7,
            signer_len: 0,
            key_id_len: 0,
            pad: [0; 3],
            sig_len,
        }
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; MODULE_SIG_DESCRIPTOR_LEN] {
        let mut out = [0u8; MODULE_SIG_DESCRIPTOR_LEN];
        out[0] = self.algo;
        out[1] = self.hash;
        out[2] = self.id_type;
        out[3] = self.signer_len;
        out[4] = self.key_id_len;
        out[5..8].copy_from_slice(&self.pad);
        out[8..12].copy_from_slice(&self.sig_len.to_be_bytes());
        out
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8; MODULE_SIG_DESCRIPTOR_LEN]) -> Self {
        Self {
            algo: bytes[0],
            hash: bytes[1],
            id_type: bytes[2],
            signer_len: bytes[3],
            key_id_len: bytes[4],
            pad: [bytes[5], bytes[6], bytes[7]],
            sig_len: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }

    /// Whether every fixed field holds the value a CMS signature requires.
    #[must_use]
    pub fn is_cms(&self) -> bool {
        self.algo == 0
            && self.hash == 0
            && self.id_type == PKEY_ID_PKCS7
            && self.signer_len == 0
            && self.key_id_len == 0
            && self.pad == [0; 3]
    }
}
