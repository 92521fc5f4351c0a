//! Validators that consult live infrastructure rather than the document alone.

use crate::core::{FieldPath, InterfaceValidator};
use crate::error::ValidationError;
use crate::inventory::{GrpcInventoryClient, InventoryClient};
use crate::platform::BaremetalPlatform;
use async_trait::async_trait;
use tracing::debug;

/// A platform check that may reach out to the target host.
#[async_trait]
pub trait PlatformValidator: Send + Sync {
    /// Validate `platform`, attributing errors to fields under `path`.
    async fn validate_platform(
        &self,
        platform: &BaremetalPlatform,
        path: &FieldPath,
    ) -> Vec<ValidationError>;

    /// Get a human-readable name for this validator (for logging/debugging).
    fn name(&self) -> String;
}

/// Ensure the interfaces required by `platform` exist on its host.
///
/// The address comes from `libvirtURI`; failures to reach the host are reported on
/// that field.
pub async fn validate_interfaces<C: InventoryClient>(
    validator: &InterfaceValidator<C>,
    platform: &BaremetalPlatform,
    path: &FieldPath,
) -> Vec<ValidationError> {
    validator
        .validate(&platform.endpoint(path), &platform.interface_checks(path))
        .await
}

#[async_trait]
impl<C: InventoryClient> PlatformValidator for InterfaceValidator<C> {
    async fn validate_platform(
        &self,
        platform: &BaremetalPlatform,
        path: &FieldPath,
    ) -> Vec<ValidationError> {
        validate_interfaces(self, platform, path).await
    }

    fn name(&self) -> String {
        format!("interfaces:{}", self.client().name())
    }
}

/// Interface check over gRPC, using the platform's own `inventory` settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct KcliInterfaceCheck;

#[async_trait]
impl PlatformValidator for KcliInterfaceCheck {
    async fn validate_platform(
        &self,
        platform: &BaremetalPlatform,
        path: &FieldPath,
    ) -> Vec<ValidationError> {
        let validator = InterfaceValidator::new(GrpcInventoryClient::new(platform.inventory.clone()));
        validate_interfaces(&validator, platform, path).await
    }

    fn name(&self) -> String {
        "interfaces:grpc:kcli".to_string()
    }
}

/// Ordered registry of dynamic validators.
///
/// # Examples
///
/// ```rust,no_run
/// use netif_validate::core::{DynamicValidators, FieldPath};
/// use netif_validate::platform::BaremetalPlatform;
///
/// # async fn example() {
/// let validators = DynamicValidators::with_defaults();
/// let platform = BaremetalPlatform::new("192.168.122.1:9000");
///
/// let errors = validators
///     .validate(&platform, &FieldPath::new("platform").child("baremetal"))
///     .await;
/// # }
/// ```
#[derive(Default)]
pub struct DynamicValidators {
    validators: Vec<Box<dyn PlatformValidator>>,
}

impl DynamicValidators {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in interface check.
    pub fn with_defaults() -> Self {
        let mut validators = Self::new();
        validators.register(KcliInterfaceCheck);
        validators
    }

    /// Append a validator; validators run in registration order.
    pub fn register<V: PlatformValidator + 'static>(&mut self, validator: V) {
        self.validators.push(Box::new(validator));
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of the registered validators, in run order.
    pub fn names(&self) -> Vec<String> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator in turn and concatenate their errors.
    pub async fn validate(
        &self,
        platform: &BaremetalPlatform,
        path: &FieldPath,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for validator in &self.validators {
            let found = validator.validate_platform(platform, path).await;
            debug!(validator = %validator.name(), errors = found.len(), "dynamic validator finished");
            errors.extend(found);
        }
        errors
    }
}
