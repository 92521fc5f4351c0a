//! # netif-validate
//!
//! Pre-provisioning validation of the network interfaces a platform configuration
//! depends on.
//!
//! ## Overview
//!
//! Before installing onto a virtualization host, the bridges named in the platform
//! configuration must already exist there. `netif-validate`:
//! - Lists the host's networks once per validation pass over gRPC
//! - Checks every declared interface name against that snapshot (exact match)
//! - Reports failures as field-addressed errors that point back into the document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netif_validate::prelude::*;
//!
//! # async fn example() -> netif_validate::error::Result<()> {
//! let platform: BaremetalPlatform = PlatformLoader::new()
//!     .with_file("config/platform.yaml")
//!     .with_env_overrides("NETIF", "__")
//!     .load()?;
//!
//! let path = FieldPath::new("platform").child("baremetal");
//! let validator = InterfaceValidator::new(GrpcInventoryClient::new(platform.inventory.clone()));
//!
//! validate_interfaces(&validator, &platform, &path)
//!     .await
//!     .into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! An unreachable or failing inventory service yields exactly one internal error on
//! the `libvirtURI` field and no per-field results. Otherwise each declared name
//! yields at most one error: "no interfaces found" when the host reports nothing,
//! or a not-found error listing the valid names.
//!
//! ## Feature Flags
//!
//! - `validation` (default): static [`core::Validate`] checks for settings and platforms
//! - `tls`: TLS transport security for the inventory client

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod inventory;
pub mod platform;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        DynamicValidators, Endpoint, FieldCheck, FieldPath, InterfaceValidator, PlatformLoader,
        PlatformValidator, validate_interfaces,
    };
    pub use crate::error::{
        ConfigError, InventoryError, Result, ValidationError, ValidationErrorKind,
        ValidationErrors,
    };
    pub use crate::inventory::{
        ClientSettings, GrpcInventoryClient, Inventory, InventoryClient, TransportSecurity,
    };
    pub use crate::platform::BaremetalPlatform;

    #[cfg(feature = "validation")]
    pub use crate::core::Validate;
}
