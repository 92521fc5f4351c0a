//! Static configuration validation support.

use crate::core::FieldPath;
use crate::error::ValidationError;

/// Trait for checks that need nothing beyond the configuration value itself.
///
/// Unlike the inventory-backed interface checks, these never touch the network.
/// Implementations collect every failure instead of stopping at the first one.
///
/// # Examples
///
/// ```rust
/// use netif_validate::core::{FieldPath, Validate};
/// use netif_validate::error::ValidationError;
///
/// struct Bridge {
///     name: String,
/// }
///
/// impl Validate for Bridge {
///     fn validate(&self, path: &FieldPath) -> Vec<ValidationError> {
///         let mut errors = Vec::new();
///         if self.name.is_empty() {
///             errors.push(ValidationError::invalid_field(
///                 path.child("name"),
///                 "",
///                 "must not be empty",
///             ));
///         }
///         errors
///     }
/// }
///
/// let bridge = Bridge { name: String::new() };
/// assert_eq!(bridge.validate(&FieldPath::new("bridge")).len(), 1);
/// ```
pub trait Validate {
    /// Validate the value located at `path`.
    ///
    /// Returns every failure found; an empty list means the value is valid.
    fn validate(&self, path: &FieldPath) -> Vec<ValidationError>;
}
