//! gRPC inventory client for kcli-managed hosts.

use super::proto::Empty;
use super::proto::kcli_client::KcliClient;
use super::{ClientSettings, Inventory, InventoryClient, TransportSecurity};
use crate::error::InventoryError;
use async_trait::async_trait;
use std::error::Error as StdError;
use std::time::Duration;
use tokio::time::Instant;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, warn};

/// Inventory client that lists networks over gRPC.
///
/// Every call dials a new channel, issues one `list_networks` request and drops the
/// channel before returning, whatever the outcome.
///
/// # Examples
///
/// ```rust,no_run
/// use netif_validate::inventory::{GrpcInventoryClient, InventoryClient};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), netif_validate::error::InventoryError> {
/// let client = GrpcInventoryClient::builder()
///     .with_timeout(Duration::from_secs(5))
///     .build();
///
/// let inventory = client.fetch_interfaces("192.168.122.1:9000").await?;
/// for name in inventory.names() {
///     println!("{}", name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrpcInventoryClient {
    settings: ClientSettings,
}

impl GrpcInventoryClient {
    /// Create a client from settings.
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    /// Create a new builder for constructing a gRPC inventory client.
    pub fn builder() -> GrpcInventoryClientBuilder {
        GrpcInventoryClientBuilder::new()
    }

    /// Settings in effect for this client.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Establish a fresh channel to `address`, giving up at `deadline`.
    async fn connect(&self, address: &str, deadline: Instant) -> Result<Channel, InventoryError> {
        let connection_error = |reason: String| InventoryError::Connection {
            endpoint: address.to_string(),
            reason,
        };

        let uri = self.settings.normalize_endpoint(address);
        let connect_deadline = deadline.min(Instant::now() + self.settings.connect_timeout());
        let endpoint = Endpoint::from_shared(uri)
            .map_err(|e| connection_error(error_chain(&e)))?;
        let endpoint = self.apply_transport(endpoint, address)?;

        debug!(endpoint = %address, "connecting to inventory service");

        match tokio::time::timeout_at(connect_deadline, endpoint.connect()).await {
            Ok(Ok(channel)) => Ok(channel),
            Ok(Err(e)) => Err(connection_error(error_chain(&e))),
            Err(_) => Err(connection_error("connect timed out".to_string())),
        }
    }

    fn apply_transport(
        &self,
        endpoint: Endpoint,
        address: &str,
    ) -> Result<Endpoint, InventoryError> {
        match &self.settings.transport {
            TransportSecurity::Insecure => {
                warn!(endpoint = %address, "dialing inventory service without transport security");
                Ok(endpoint)
            }
            TransportSecurity::Tls {
                domain,
                ca_certificate,
            } => configure_tls(endpoint, address, domain.as_deref(), ca_certificate.as_deref()),
        }
    }
}

#[async_trait]
impl InventoryClient for GrpcInventoryClient {
    async fn fetch_interfaces(&self, endpoint: &str) -> Result<Inventory, InventoryError> {
        // One bound covers both connect and request.
        let timeout = self.settings.timeout;
        let deadline = Instant::now() + timeout;
        let mut client = KcliClient::new(self.connect(endpoint, deadline).await?);

        let mut request = tonic::Request::new(Empty {});
        request.set_timeout(deadline.saturating_duration_since(Instant::now()));

        let response = tokio::time::timeout_at(deadline, client.list_networks(request))
            .await
            .map_err(|_| InventoryError::Timeout(timeout))?
            .map_err(|status| status_error(&status, timeout))?;

        let inventory: Inventory = response
            .into_inner()
            .networks
            .into_iter()
            .map(|network| network.network)
            .collect();

        debug!(endpoint = %endpoint, interfaces = inventory.len(), "fetched interface inventory");
        Ok(inventory)
    }

    fn name(&self) -> String {
        "grpc:kcli".to_string()
    }
}

#[cfg(feature = "tls")]
fn configure_tls(
    endpoint: Endpoint,
    address: &str,
    domain: Option<&str>,
    ca_certificate: Option<&std::path::Path>,
) -> Result<Endpoint, InventoryError> {
    use tonic::transport::{Certificate, ClientTlsConfig};

    let mut tls = ClientTlsConfig::new();
    if let Some(domain) = domain {
        tls = tls.domain_name(domain);
    }
    if let Some(path) = ca_certificate {
        let pem = std::fs::read(path).map_err(|e| InventoryError::Connection {
            endpoint: address.to_string(),
            reason: format!("failed to read CA certificate {}: {}", path.display(), e),
        })?;
        tls = tls.ca_certificate(Certificate::from_pem(pem));
    }

    endpoint
        .tls_config(tls)
        .map_err(|e| InventoryError::Connection {
            endpoint: address.to_string(),
            reason: error_chain(&e),
        })
}

#[cfg(not(feature = "tls"))]
fn configure_tls(
    _endpoint: Endpoint,
    _address: &str,
    _domain: Option<&str>,
    _ca_certificate: Option<&std::path::Path>,
) -> Result<Endpoint, InventoryError> {
    Err(InventoryError::FeatureNotEnabled(
        "TLS transport requires the 'tls' feature",
    ))
}

/// Map a non-OK status to an inventory error.
///
/// A server honoring the `grpc-timeout` header reports an expired deadline as either
/// `DeadlineExceeded` or `Cancelled`.
fn status_error(status: &tonic::Status, timeout: Duration) -> InventoryError {
    match status.code() {
        tonic::Code::DeadlineExceeded | tonic::Code::Cancelled => InventoryError::Timeout(timeout),
        code => InventoryError::Request(format!("{:?}: {}", code, status.message())),
    }
}

/// Render an error together with its sources; tonic keeps the useful detail in the chain.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Builder for constructing a `GrpcInventoryClient`.
///
/// # Examples
///
/// ```rust
/// use netif_validate::inventory::{GrpcInventoryClient, TransportSecurity};
/// use std::time::Duration;
///
/// let client = GrpcInventoryClient::builder()
///     .with_timeout(Duration::from_secs(3))
///     .with_transport(TransportSecurity::Insecure)
///     .build();
/// assert_eq!(client.settings().timeout, Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrpcInventoryClientBuilder {
    settings: ClientSettings,
}

impl GrpcInventoryClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall timeout for one fetch, connect included.
    ///
    /// Default is 5 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Set the connect timeout. Defaults to the request timeout and never extends
    /// past it: connect and request share one overall bound.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = Some(timeout);
        self
    }

    /// Set the transport security policy.
    pub fn with_transport(mut self, transport: TransportSecurity) -> Self {
        self.settings.transport = transport;
        self
    }

    /// Build the client.
    pub fn build(self) -> GrpcInventoryClient {
        GrpcInventoryClient::new(self.settings)
    }
}
