//! Start/stop behaviour of the nameserver.

#[path = "../common/mod.rs"]
mod common;
use common::{TestClient, TestServer};

use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tenant_dns_application::services::ZoneSettings;
use tenant_dns_domain::config::ZoneConfig;
use tenant_dns_infrastructure::dns::{AuthoritativeHandler, NameServer};
use tenant_dns_infrastructure::repositories::SqliteSiteDirectory;
use tokio::net::UdpSocket;

#[tokio::test]
async fn test_start_reports_bound_ephemeral_port() {
    let server = TestServer::start().await.expect("Failed to start server");

    assert_ne!(server.addr().port(), 0);
    assert!(server.addr().ip().is_loopback());

    server.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_queries_are_answered_independently() {
    let server = TestServer::start().await.expect("Failed to start server");
    let addr = server.addr();

    let mut handles = Vec::new();
    for i in 0..12 {
        handles.push(tokio::spawn(async move {
            let client = TestClient::new(addr);
            let name = if i % 2 == 0 { "shop.example.com." } else { "nope.example.com." };
            client.query(name, RecordType::A).await.response_code()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 { ResponseCode::NoError } else { ResponseCode::NXDomain };
        assert_eq!(handle.await.unwrap(), expected);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_stop_releases_listen_port() {
    let server = TestServer::start().await.expect("Failed to start server");
    let addr = server.addr();

    server.shutdown().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let rebound = UdpSocket::bind(addr).await;
    assert!(rebound.is_ok(), "port should be free after stop");
}

#[tokio::test]
async fn test_start_fails_when_address_is_taken() {
    let holder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let taken: SocketAddr = holder.local_addr().unwrap();

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let zone = ZoneConfig {
        nameservers: vec!["ns1.hosting.test".to_string()],
        ..Default::default()
    };
    let settings = Arc::new(ZoneSettings::from_config(&zone, "hosting.test").unwrap());
    let handler = AuthoritativeHandler::new(Arc::new(SqliteSiteDirectory::new(pool)), settings);

    let result = NameServer::start(&[taken], handler, Duration::from_secs(5)).await;

    assert!(result.is_err());
}
