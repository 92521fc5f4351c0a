//! Remote network interface inventory.
//!
//! The [`InventoryClient`] trait is the seam between validation and the network:
//! production code uses [`GrpcInventoryClient`], tests inject in-memory fakes.

mod grpc;
pub mod proto;
mod settings;

pub use grpc::{GrpcInventoryClient, GrpcInventoryClientBuilder};
pub use settings::{ClientSettings, DEFAULT_TIMEOUT, TransportSecurity};

use crate::error::InventoryError;
use async_trait::async_trait;
use std::sync::Arc;

/// One named network interface as reported by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceRecord {
    /// Interface identifier; compared byte-for-byte
    pub name: String,
}

impl InterfaceRecord {
    /// Create a record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Snapshot of the interfaces reported by a single query, in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<InterfaceRecord>,
}

impl Inventory {
    /// Create an inventory from records in service order.
    pub fn new(records: Vec<InterfaceRecord>) -> Self {
        Self { records }
    }

    /// Interface names in service order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the service reported no interfaces.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Inventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(InterfaceRecord::new).collect())
    }
}

/// Capability to list the network interfaces exposed by a remote host.
///
/// Implementations must make a fresh, single attempt per call: no caching, no
/// connection reuse and no internal retries.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetch the current interface inventory from `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Connection`] if the service cannot be reached, and
    /// [`InventoryError::Request`] or [`InventoryError::Timeout`] if the listing fails.
    async fn fetch_interfaces(&self, endpoint: &str) -> Result<Inventory, InventoryError>;

    /// Get a human-readable name for this client (for logging/debugging).
    fn name(&self) -> String {
        "inventory".to_string()
    }
}

#[async_trait]
impl<C: InventoryClient + ?Sized> InventoryClient for Arc<C> {
    async fn fetch_interfaces(&self, endpoint: &str) -> Result<Inventory, InventoryError> {
        (**self).fetch_interfaces(endpoint).await
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
