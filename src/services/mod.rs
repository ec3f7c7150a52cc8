//! Service layer: CMS `SignedData` construction, trailer assembly and the
//! one-call signing entry point.

pub mod cms_builder;
pub mod signing;
pub mod trailer;

pub use cms_builder::CmsSignedDataBuilder;
pub use signing::{sign_module_attached, ModuleSigningService};
pub use trailer::finalize;
