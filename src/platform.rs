//! Bare-metal platform configuration.

use crate::core::{Endpoint, FieldCheck, FieldPath};
use crate::inventory::ClientSettings;
use serde::Deserialize;

#[cfg(feature = "validation")]
use crate::core::Validate;
#[cfg(feature = "validation")]
use crate::error::ValidationError;

/// Document field holding the inventory service address.
pub const LIBVIRT_URI_FIELD: &str = "libvirtURI";
/// Document field holding the external bridge name.
pub const EXTERNAL_BRIDGE_FIELD: &str = "externalBridge";
/// Document field holding the provisioning bridge name.
pub const PROVISIONING_BRIDGE_FIELD: &str = "provisioningBridge";
/// Document field holding the inventory client settings.
pub const INVENTORY_FIELD: &str = "inventory";

/// Platform settings for installing onto a kcli-managed virtualization host.
///
/// Keys may be written either in the document's camelCase or in snake_case.
///
/// # Examples
///
/// ```rust
/// use netif_validate::core::FieldPath;
/// use netif_validate::platform::BaremetalPlatform;
///
/// let platform = BaremetalPlatform::new("192.168.122.1:9000");
/// let checks = platform.interface_checks(&FieldPath::new("platform").child("baremetal"));
///
/// assert_eq!(checks.len(), 2);
/// assert_eq!(checks[0].name, "baremetal");
/// assert_eq!(checks[1].name, "provisioning");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaremetalPlatform {
    /// Address of the host's inventory service
    #[serde(alias = "libvirtURI", alias = "libvirturi")]
    pub libvirt_uri: String,

    /// Bridge attached to the external network
    #[serde(
        default = "default_external_bridge",
        alias = "externalBridge",
        alias = "externalbridge"
    )]
    pub external_bridge: String,

    /// Bridge attached to the provisioning network
    #[serde(
        default = "default_provisioning_bridge",
        alias = "provisioningBridge",
        alias = "provisioningbridge"
    )]
    pub provisioning_bridge: String,

    /// How to reach the inventory service
    #[serde(default)]
    pub inventory: ClientSettings,
}

impl BaremetalPlatform {
    /// Create a platform with default bridge names.
    pub fn new(libvirt_uri: impl Into<String>) -> Self {
        Self {
            libvirt_uri: libvirt_uri.into(),
            external_bridge: default_external_bridge(),
            provisioning_bridge: default_provisioning_bridge(),
            inventory: ClientSettings::default(),
        }
    }

    /// The inventory endpoint, attributed to the `libvirtURI` field under `path`.
    pub fn endpoint(&self, path: &FieldPath) -> Endpoint {
        Endpoint::new(self.libvirt_uri.clone(), path.child(LIBVIRT_URI_FIELD))
    }

    /// Interface names this platform requires on the host, external bridge first.
    pub fn interface_checks(&self, path: &FieldPath) -> Vec<FieldCheck> {
        vec![
            FieldCheck::new(path.child(EXTERNAL_BRIDGE_FIELD), self.external_bridge.clone()),
            FieldCheck::new(
                path.child(PROVISIONING_BRIDGE_FIELD),
                self.provisioning_bridge.clone(),
            ),
        ]
    }
}

#[cfg(feature = "validation")]
impl Validate for BaremetalPlatform {
    fn validate(&self, path: &FieldPath) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let required = [
            (LIBVIRT_URI_FIELD, &self.libvirt_uri),
            (EXTERNAL_BRIDGE_FIELD, &self.external_bridge),
            (PROVISIONING_BRIDGE_FIELD, &self.provisioning_bridge),
        ];
        for (field, value) in required {
            if value.is_empty() {
                errors.push(ValidationError::invalid_field(
                    path.child(field),
                    value.clone(),
                    "must not be empty",
                ));
            }
        }

        errors.extend(self.inventory.validate(&path.child(INVENTORY_FIELD)));
        errors
    }
}

fn default_external_bridge() -> String {
    "baremetal".to_string()
}

fn default_provisioning_bridge() -> String {
    "provisioning".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_field() {
        let platform = BaremetalPlatform::new("10.0.0.1:9000");
        let endpoint = platform.endpoint(&FieldPath::new("platform").child("baremetal"));
        assert_eq!(endpoint.address, "10.0.0.1:9000");
        assert_eq!(endpoint.field.to_string(), "platform.baremetal.libvirtURI");
    }

    #[test]
    fn test_interface_checks_order() {
        let platform = BaremetalPlatform {
            external_bridge: "br0".into(),
            provisioning_bridge: "prov0".into(),
            ..BaremetalPlatform::new("10.0.0.1:9000")
        };
        let checks = platform.interface_checks(&FieldPath::new("platform"));
        let rendered: Vec<_> = checks
            .iter()
            .map(|c| (c.field.to_string(), c.name.as_str()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("platform.externalBridge".to_string(), "br0"),
                ("platform.provisioningBridge".to_string(), "prov0"),
            ]
        );
    }

    #[cfg(feature = "validation")]
    #[test]
    fn test_static_validation() {
        let path = FieldPath::new("platform").child("baremetal");
        assert!(BaremetalPlatform::new("10.0.0.1:9000").validate(&path).is_empty());

        let platform = BaremetalPlatform {
            provisioning_bridge: String::new(),
            ..BaremetalPlatform::new("")
        };
        let errors = platform.validate(&path);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, path.child(LIBVIRT_URI_FIELD));
        assert_eq!(errors[1].field, path.child(PROVISIONING_BRIDGE_FIELD));
    }
}
