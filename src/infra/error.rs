//! Error types for module signing operations.

use thiserror::Error;

/// Result type for signing operations
pub type SigningResult<T> = Result<T, SigningError>;

/// Errors surfaced while producing or inspecting a signed module.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum SigningError {
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    #[error("CMS SignedData setup failed: {0}")]
    SignerSetupFailed(String),

    #[error("Signature creation failed: {0}")]
    SignatureFailed(String),

    #[error("DER encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Signature of {0} bytes does not fit the 32-bit sig_len field")]
    SignatureTooLarge(usize),

    #[error("Module carries no appended signature")]
    NotSigned,

    #[error("Malformed module signature: {0}")]
    InvalidModuleSignature(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<openssl::error::ErrorStack> for SigningError {
    fn from(error: openssl::error::ErrorStack) -> Self {
        SigningError::SignatureFailed(error.to_string())
    }
}

impl From<std::io::Error> for SigningError {
    fn from(error: std::io::Error) -> Self {
        SigningError::IoError(error.to_string())
    }
}
