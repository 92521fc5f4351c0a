//! Connection settings for the inventory client.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "validation")]
use crate::core::{FieldPath, Validate};
#[cfg(feature = "validation")]
use crate::error::ValidationError;

/// Bound applied to one fetch (connect plus request) when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport security policy used when dialing the inventory service.
///
/// Deserializes from a `mode`-tagged table:
///
/// ```yaml
/// transport:
///   mode: tls
///   domain: kcli.example.com
///   ca_certificate: /etc/pki/kcli-ca.pem
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TransportSecurity {
    /// Plaintext HTTP/2 with no server authentication.
    #[default]
    Insecure,
    /// TLS, optionally pinned to a CA bundle and an expected server name.
    ///
    /// Requires the `tls` feature.
    Tls {
        /// Server name to verify; defaults to the endpoint host
        #[serde(default)]
        domain: Option<String>,
        /// PEM file with the CA certificate(s) to trust
        #[serde(default)]
        ca_certificate: Option<PathBuf>,
    },
}

impl TransportSecurity {
    /// URI scheme to assume for addresses given without one.
    pub fn default_scheme(&self) -> &'static str {
        match self {
            Self::Insecure => "http",
            Self::Tls { .. } => "https",
        }
    }
}

/// Settings for reaching the inventory service.
///
/// # Examples
///
/// ```rust
/// use netif_validate::inventory::{ClientSettings, DEFAULT_TIMEOUT};
///
/// let settings = ClientSettings::default();
/// assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
/// assert_eq!(settings.connect_timeout(), DEFAULT_TIMEOUT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    /// Upper bound on one fetch, connect and request together; in seconds when deserialized
    #[serde(
        default = "default_timeout",
        rename = "timeout_secs",
        deserialize_with = "duration_from_secs"
    )]
    pub timeout: Duration,

    /// Upper bound on establishing the channel; falls back to `timeout` and is capped by it
    #[serde(
        default,
        rename = "connect_timeout_secs",
        deserialize_with = "optional_duration_from_secs"
    )]
    pub connect_timeout: Option<Duration>,

    /// Transport security policy
    #[serde(default)]
    pub transport: TransportSecurity,
}

impl ClientSettings {
    /// Effective connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout.unwrap_or(self.timeout)
    }

    /// Prefix `address` with a scheme if it has none.
    ///
    /// Addresses are otherwise passed through untouched; the transport rejects anything
    /// it cannot parse.
    pub fn normalize_endpoint(&self, address: &str) -> String {
        if address.contains("://") {
            address.to_string()
        } else {
            format!("{}://{}", self.transport.default_scheme(), address)
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            transport: TransportSecurity::default(),
        }
    }
}

#[cfg(feature = "validation")]
impl Validate for ClientSettings {
    fn validate(&self, path: &FieldPath) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.timeout.is_zero() {
            errors.push(ValidationError::invalid_field(
                path.child("timeout_secs"),
                "0",
                "must be greater than 0",
            ));
        }

        if self.connect_timeout.is_some_and(|t| t.is_zero()) {
            errors.push(ValidationError::invalid_field(
                path.child("connect_timeout_secs"),
                "0",
                "must be greater than 0",
            ));
        }

        if let TransportSecurity::Tls {
            domain: Some(domain),
            ..
        } = &self.transport
        {
            if domain.trim().is_empty() {
                errors.push(ValidationError::invalid_field(
                    path.child("transport").child("domain"),
                    domain.clone(),
                    "must not be empty when set",
                ));
            }
        }

        errors
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

fn optional_duration_from_secs<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(|secs| secs.map(Duration::from_secs))
}
