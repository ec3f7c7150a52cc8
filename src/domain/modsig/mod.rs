//! Appended module signature format: the 12-byte `struct module_signature`
//! descriptor and the layout of a signed module.

mod descriptor;
mod signed_module;

pub use descriptor::ModuleSignatureDescriptor;
pub use signed_module::{is_signed, SignedModule};
