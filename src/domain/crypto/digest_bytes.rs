//! Module digest handed to a [`ModuleSigner`](super::ModuleSigner).

use std::fmt;

use super::HashAlgorithm;

/// Digest of the unsigned module, tagged with the algorithm recorded in the
/// `SignerInfo` digestAlgorithm field.
///
/// The length always equals `algo.digest_size()`, so a signer never sees a
/// SHA-256 sized value labelled SHA-384.
#[derive(Clone, Eq, PartialEq)]
pub struct DigestBytes {
    algo: HashAlgorithm,
    bytes: Box<[u8]>,
}

impl DigestBytes {
    /// Wrap an externally computed digest, e.g. one produced by a remote
    /// signing service.
    pub fn new(algo: HashAlgorithm, bytes: Vec<u8>) -> Result<Self, DigestBytesError> {
        if bytes.len() != algo.digest_size() {
            return Err(DigestBytesError::LengthMismatch {
                expected: algo.digest_size(),
                actual: bytes.len(),
            });
        }
        Ok(Self::from_trusted(algo, bytes))
    }

    // Only for output of `HashAlgorithm::digest`, which always has the right length.
    pub(crate) fn from_trusted(algo: HashAlgorithm, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), algo.digest_size());
        Self {
            algo,
            bytes: bytes.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algo
    }
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into()
    }
}

// Only the first bytes are printed; enough to correlate log lines.
impl fmt::Debug for DigestBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigestBytes({}:", self.algo)?;
        for b in self.bytes.iter().take(8) {
            write!(f, "{b:02x}")?;
        }
        write!(f, "..)")
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DigestBytesError {
    #[error("digest length mismatch (expected {expected}, actual {actual})")]
    LengthMismatch { expected: usize, actual: usize },
}
