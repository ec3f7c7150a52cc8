//! Signing options.
//!
//! Options are plain data so callers can embed them in their own configuration
//! files; the TOML helpers cover the common case of a standalone file.

use crate::domain::crypto::SignatureOidPolicy;
use crate::infra::error::{SigningError, SigningResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-call options threaded through the CMS builder and trailer assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SigningOptions {
    /// How the `SignerInfo` signatureAlgorithm OID is chosen for RSA keys.
    pub signature_oid_policy: SignatureOidPolicy,

    /// Log a warning when the payload already ends with a signature trailer.
    pub warn_on_resign: bool,
}

impl Default for SigningOptions {
    fn default() -> Self {
        Self {
            signature_oid_policy: SignatureOidPolicy::KernelCompatible,
            warn_on_resign: true,
        }
    }
}

impl SigningOptions {
    /// Parse options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> SigningResult<Self> {
        toml::from_str(content).map_err(|e| {
            SigningError::ConfigurationError(format!("Failed to parse signing options: {e}"))
        })
    }

    pub fn to_toml_string(&self) -> SigningResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            SigningError::ConfigurationError(format!("Failed to serialize signing options: {e}"))
        })
    }

    /// Load options from a TOML file.
    ///
    /// Read failures are `IoError`, malformed content `ConfigurationError`.
    pub fn load<P: AsRef<Path>>(path: P) -> SigningResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading signing options from: {}", path.display());

        let content = fs::read_to_string(path)?;

        Self::from_toml_str(&content)
    }
}
