//! Integration tests for the gRPC inventory client against local sockets.

use netif_validate::inventory::proto::kcli_server::{Kcli, KcliServer};
use netif_validate::inventory::proto::{Empty, Network, Networkslist};
use netif_validate::prelude::*;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Code, Request, Response, Status};

/// In-process kcli service answering `list_networks` with a fixed reply.
struct StubKcli {
    reply: std::result::Result<Vec<&'static str>, Code>,
    delay: Duration,
}

impl StubKcli {
    fn networks(names: Vec<&'static str>) -> Self {
        Self {
            reply: Ok(names),
            delay: Duration::ZERO,
        }
    }

    fn failing(code: Code) -> Self {
        Self {
            reply: Err(code),
            delay: Duration::ZERO,
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            reply: Ok(vec!["br0"]),
            delay,
        }
    }
}

#[tonic::async_trait]
impl Kcli for StubKcli {
    async fn list_networks(
        &self,
        _request: Request<Empty>,
    ) -> std::result::Result<Response<Networkslist>, Status> {
        tokio::time::sleep(self.delay).await;
        match &self.reply {
            Ok(names) => Ok(Response::new(Networkslist {
                networks: names
                    .iter()
                    .map(|name| Network {
                        network: name.to_string(),
                    })
                    .collect(),
            })),
            Err(code) => Err(Status::new(*code, "libvirt unavailable")),
        }
    }
}

async fn serve(stub: StubKcli) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let handle = tokio::spawn(async move {
        let _ = tonic::transport::Server::builder()
            .add_service(KcliServer::new(stub))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await;
    });
    (address, handle)
}

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_fetch_preserves_response_order() {
    let (address, server) = serve(StubKcli::networks(vec!["br0", "provisioning"])).await;

    let inventory = GrpcInventoryClient::default()
        .fetch_interfaces(&address)
        .await
        .unwrap();

    assert_eq!(inventory.names().collect::<Vec<_>>(), vec!["br0", "provisioning"]);
    server.abort();
}

#[tokio::test]
async fn test_validate_against_live_service() {
    let (address, server) = serve(StubKcli::networks(vec!["br0", "provisioning"])).await;
    let validator = InterfaceValidator::new(GrpcInventoryClient::default());
    let checks = [
        FieldCheck::new(FieldPath::new("externalBridge"), "br0"),
        FieldCheck::new(FieldPath::new("provisioningBridge"), "prov0"),
    ];

    let errors = validator
        .validate(&Endpoint::new(address, FieldPath::new("libvirtURI")), &checks)
        .await;

    let rendered: Vec<_> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "provisioningBridge: Invalid value: \"prov0\": could not find interface \"prov0\", valid interfaces are br0, provisioning"
        ]
    );
    server.abort();
}

#[tokio::test]
async fn test_error_status_is_request_error() {
    let (address, server) = serve(StubKcli::failing(Code::Unavailable)).await;

    let err = GrpcInventoryClient::default()
        .fetch_interfaces(&address)
        .await
        .unwrap_err();

    match err {
        InventoryError::Request(msg) => assert!(msg.contains("libvirt unavailable"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
    server.abort();
}

#[tokio::test]
async fn test_slow_handler_is_timeout() {
    let (address, server) = serve(StubKcli::slow(Duration::from_secs(3))).await;
    let client = GrpcInventoryClient::builder()
        .with_timeout(Duration::from_secs(1))
        .build();

    let started = Instant::now();
    let err = client.fetch_interfaces(&address).await.unwrap_err();

    assert!(matches!(err, InventoryError::Timeout(_)), "unexpected error: {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(2));
    server.abort();
}

#[tokio::test]
async fn test_refused_connection() {
    let address = format!("127.0.0.1:{}", closed_port().await);
    let client = GrpcInventoryClient::builder()
        .with_timeout(Duration::from_secs(2))
        .build();

    let err = client.fetch_interfaces(&address).await.unwrap_err();

    assert!(err.is_connection(), "unexpected error: {:?}", err);
    assert!(err.to_string().contains(&address));
}

#[tokio::test]
async fn test_connect_timeout_capped_by_overall_timeout() {
    // TEST-NET-1 is never routed; the dial either hangs or fails fast.
    let client = GrpcInventoryClient::builder()
        .with_timeout(Duration::from_secs(1))
        .with_connect_timeout(Duration::from_secs(10))
        .build();

    let started = Instant::now();
    let err = client.fetch_interfaces("192.0.2.1:9000").await.unwrap_err();

    assert!(err.is_connection(), "unexpected error: {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_unreachable_endpoint_reports_on_uri_field() {
    let address = format!("127.0.0.1:{}", closed_port().await);
    let validator = InterfaceValidator::new(GrpcInventoryClient::default());
    let checks = [FieldCheck::new(FieldPath::new("externalBridge"), "br0")];

    let errors = validator
        .validate(&Endpoint::new(address, FieldPath::new("libvirtURI")), &checks)
        .await;

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.to_string(), "libvirtURI");
    assert_eq!(errors[0].kind, ValidationErrorKind::Internal);
    assert!(errors[0].message.contains("failed to connect"));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    // Accept connections and never answer.
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = GrpcInventoryClient::builder()
        .with_timeout(Duration::from_secs(1))
        .build();

    let started = Instant::now();
    let err = client.fetch_interfaces(&address).await.unwrap_err();

    assert!(err.to_string().contains("timed out"), "unexpected error: {}", err);
    assert!(started.elapsed() < Duration::from_secs(3));
    server.abort();
}
