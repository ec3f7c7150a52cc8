//! Kernel Module Signer Library
//!
//! Produces Linux kernel modules with an appended CMS signature in the layout
//! the kernel's module signature check expects, equivalent to the CMS variant
//! of `scripts/sign-file`:
//!
//! ```text
//! <module bytes><CMS SignedData, DER><struct module_signature><"~Module signature appended~\n">
//! ```
//!
//! The private key never passes through this crate; callers supply a
//! [`ModuleSigner`] (an in-memory OpenSSL key via [`OpenSslModuleSigner`], or
//! their own HSM/token implementation) plus the matching certificate.

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;

#[cfg(test)]
mod test_fixtures;

pub use adapters::{certificate_from_openssl, OpenSslModuleSigner};
pub use domain::constants::MODULE_SIG_MAGIC;
pub use domain::crypto::{
    CmsSignature, DigestBytes, HashAlgorithm, KeyAlgorithm, ModuleSigner, SignRequest,
    SignatureOidPolicy, SignerCertificate,
};
pub use domain::modsig::{is_signed, ModuleSignatureDescriptor, SignedModule};
pub use infra::config::SigningOptions;
pub use infra::error::{SigningError, SigningResult};
pub use services::{finalize, sign_module_attached, CmsSignedDataBuilder, ModuleSigningService};
