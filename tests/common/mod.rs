//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use console_availability::{HttpServer, ServiceConfig, Shutdown};

/// Start the availability service on an ephemeral port.
///
/// Returns the bound address and the shutdown handle that stops it.
pub async fn spawn_service() -> (SocketAddr, Arc<Shutdown>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the accept loop a moment to come up.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// An address nothing is listening on, for transport-failure tests.
#[allow(dead_code)]
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
