//! Inventory-backed validation of declared interface names.

use crate::core::FieldPath;
use crate::error::ValidationError;
use crate::inventory::{Inventory, InventoryClient};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Address of the inventory service together with the field that declared it.
///
/// Failures to reach the service are attributed to `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Service address as written in the configuration
    pub address: String,
    /// Field the address was read from
    pub field: FieldPath,
}

impl Endpoint {
    /// Create an endpoint.
    pub fn new(address: impl Into<String>, field: FieldPath) -> Self {
        Self {
            address: address.into(),
            field,
        }
    }
}

/// A declared interface name and the field it was declared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    /// Where the name was declared
    pub field: FieldPath,
    /// The declared interface name
    pub name: String,
}

impl FieldCheck {
    /// Create a check.
    pub fn new(field: FieldPath, name: impl Into<String>) -> Self {
        Self {
            field,
            name: name.into(),
        }
    }
}

/// Name-presence lookup over one inventory snapshot.
pub struct InterfaceLookup<'a> {
    present: HashSet<&'a str>,
    known: String,
}

impl<'a> InterfaceLookup<'a> {
    /// Build a lookup from an inventory; duplicate names collapse.
    pub fn new(inventory: &'a Inventory) -> Self {
        Self {
            present: inventory.names().collect(),
            known: inventory.names().collect::<Vec<_>>().join(", "),
        }
    }

    /// Whether `name` is exactly one of the inventory names.
    pub fn contains(&self, name: &str) -> bool {
        self.present.contains(name)
    }

    /// Evaluate a single check, returning the error it produces, if any.
    pub fn check(&self, check: &FieldCheck) -> Option<ValidationError> {
        if self.present.is_empty() {
            return Some(ValidationError::empty_inventory(
                check.field.clone(),
                check.name.clone(),
            ));
        }

        if self.contains(&check.name) {
            return None;
        }

        Some(ValidationError::not_found(
            check.field.clone(),
            check.name.clone(),
            format!(
                "could not find interface {:?}, valid interfaces are {}",
                check.name, self.known
            ),
        ))
    }
}

/// Checks declared interface names against a live host inventory.
///
/// The inventory is fetched exactly once per [`validate`](Self::validate) call and
/// shared by every check in that call; nothing is cached between calls.
///
/// # Examples
///
/// ```rust,no_run
/// use netif_validate::core::{Endpoint, FieldCheck, FieldPath, InterfaceValidator};
/// use netif_validate::inventory::GrpcInventoryClient;
///
/// # async fn example() {
/// let path = FieldPath::new("platform").child("baremetal");
/// let validator = InterfaceValidator::new(GrpcInventoryClient::default());
///
/// let errors = validator
///     .validate(
///         &Endpoint::new("192.168.122.1:9000", path.child("libvirtURI")),
///         &[FieldCheck::new(path.child("externalBridge"), "br0")],
///     )
///     .await;
///
/// for err in &errors {
///     eprintln!("{}", err);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InterfaceValidator<C> {
    client: C,
}

impl<C: InventoryClient> InterfaceValidator<C> {
    /// Create a validator backed by `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The inventory client in use.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Validate `checks` against the inventory at `endpoint`.
    ///
    /// Returns errors in the order of `checks`. If the inventory cannot be fetched,
    /// returns a single internal error on `endpoint.field` and evaluates no checks.
    /// The fetch happens even when `checks` is empty.
    pub async fn validate(&self, endpoint: &Endpoint, checks: &[FieldCheck]) -> Vec<ValidationError> {
        let inventory = match self.client.fetch_interfaces(&endpoint.address).await {
            Ok(inventory) => inventory,
            Err(err) => {
                warn!(
                    client = %self.client.name(),
                    endpoint = %endpoint.address,
                    error = %err,
                    "interface inventory unavailable"
                );
                return vec![ValidationError::internal(endpoint.field.clone(), err)];
            }
        };

        let lookup = InterfaceLookup::new(&inventory);
        let errors: Vec<ValidationError> = checks
            .iter()
            .filter_map(|check| lookup.check(check))
            .collect();

        for err in &errors {
            debug!(field = %err.field, kind = ?err.kind, "interface check failed");
        }

        errors
    }
}
