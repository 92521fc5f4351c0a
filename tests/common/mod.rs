//! Shared fakes for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use netif_validate::error::InventoryError;
use netif_validate::inventory::{Inventory, InventoryClient};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory inventory backend that counts fetches and records dialed endpoints.
pub struct FakeInventory {
    names: Option<Vec<String>>,
    calls: AtomicUsize,
    endpoints: Mutex<Vec<String>>,
}

impl FakeInventory {
    /// Backend that always reports `names`.
    pub fn with_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
            endpoints: Mutex::new(Vec::new()),
        }
    }

    /// Backend that always refuses the connection.
    pub fn unreachable() -> Self {
        Self {
            names: None,
            calls: AtomicUsize::new(0),
            endpoints: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventoryClient for FakeInventory {
    async fn fetch_interfaces(&self, endpoint: &str) -> Result<Inventory, InventoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        match &self.names {
            Some(names) => Ok(names.iter().cloned().collect()),
            None => Err(InventoryError::Connection {
                endpoint: endpoint.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }

    fn name(&self) -> String {
        "fake".to_string()
    }
}
