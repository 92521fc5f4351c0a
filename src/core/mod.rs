//! Core validation types.

mod dynamic;
mod field;
mod interfaces;
mod loader;

#[cfg(feature = "validation")]
mod validation;

pub use dynamic::{DynamicValidators, KcliInterfaceCheck, PlatformValidator, validate_interfaces};
pub use field::FieldPath;
pub use interfaces::{Endpoint, FieldCheck, InterfaceLookup, InterfaceValidator};
pub use loader::PlatformLoader;

#[cfg(feature = "validation")]
pub use validation::Validate;
