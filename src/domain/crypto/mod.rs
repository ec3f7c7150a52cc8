//! Foundational cryptographic domain types.
//!
//! Provides strongly-typed wrappers for cryptographic artifacts including:
//! - Hash and public key algorithms, and the OIDs they map to
//! - Digest values with size validation
//! - The signer certificate and the signer capability
//! - Raw signature values with plausibility checks

mod cert;
mod digest_bytes;
mod hash;
mod key;
mod signature;
mod signer;

pub use cert::SignerCertificate;
pub use digest_bytes::{DigestBytes, DigestBytesError};
pub use hash::HashAlgorithm;
pub use key::{KeyAlgorithm, SignatureOidPolicy};
pub use signature::CmsSignature;
pub use signer::{ModuleSigner, SignRequest};
