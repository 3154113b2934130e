//! Queries sent over the wire to a running nameserver.

#[path = "../common/mod.rs"]
mod common;
use common::{TestClient, TestServer};

use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{RData, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};

// ============================================================================
// Hosted sites
// ============================================================================

#[tokio::test]
async fn test_hosted_site_answers_over_udp() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let a = client.query("example.com.", RecordType::A).await;
    let aaaa = client.query("EXAMPLE.com.", RecordType::AAAA).await;

    assert_eq!(a.response_code(), ResponseCode::NoError);
    assert!(a.authoritative());
    assert_eq!(a.answers().len(), 1);
    assert_eq!(a.answers()[0].data(), &RData::A(Ipv4Addr::new(203, 0, 113, 7).into()));
    assert_eq!(
        aaaa.answers()[0].data(),
        &RData::AAAA("2001:db8::7".parse::<Ipv6Addr>().unwrap().into())
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_child_site_keeps_its_own_mail_server() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let shop = client.query("shop.example.com.", RecordType::MX).await;
    let parent = client.query("example.com.", RecordType::MX).await;

    let exchange = |message: &hickory_proto::op::Message| match message.answers()[0].data() {
        RData::MX(mx) => (mx.preference(), mx.exchange().to_ascii()),
        other => panic!("unexpected rdata {:?}", other),
    };
    assert_eq!(exchange(&shop), (20, "mail.shop.example.com.".to_string()));
    assert_eq!(exchange(&parent), (20, "mx.hosting.test.".to_string()));

    server.shutdown().await;
}

#[tokio::test]
async fn test_any_returns_every_synthesized_record() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let response = client.query("shop.example.com.", RecordType::ANY).await;

    let types: Vec<RecordType> = response.answers().iter().map(|r| r.record_type()).collect();
    assert_eq!(types, vec![RecordType::A, RecordType::AAAA, RecordType::MX]);

    server.shutdown().await;
}

// ============================================================================
// Aliasing
// ============================================================================

#[tokio::test]
async fn test_bare_domain_is_cname_to_www() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let bare = client.query("aliased.test.", RecordType::A).await;
    let www = client.query("www.aliased.test.", RecordType::A).await;

    assert_eq!(bare.response_code(), ResponseCode::NoError);
    assert_eq!(bare.answers().len(), 1);
    assert_eq!(bare.answers()[0].record_type(), RecordType::CNAME);
    assert_eq!(www.answers()[0].record_type(), RecordType::A);

    server.shutdown().await;
}

#[tokio::test]
async fn test_www_of_bare_site_is_cname_to_bare() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let response = client.query("www.example.com.", RecordType::A).await;

    assert_eq!(response.answers().len(), 1);
    match response.answers()[0].data() {
        RData::CNAME(target) => assert_eq!(target.0.to_ascii(), "example.com."),
        other => panic!("unexpected rdata {:?}", other),
    }

    server.shutdown().await;
}

// ============================================================================
// Negative answers
// ============================================================================

#[tokio::test]
async fn test_unknown_sibling_is_nxdomain_with_soa() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let response = client.query("other.example.com.", RecordType::A).await;

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
    assert!(response.authoritative());
    assert_eq!(response.name_servers().len(), 1);
    assert_eq!(response.name_servers()[0].record_type(), RecordType::SOA);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unhosted_domain_is_refused() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let foreign = client.query("example.org.", RecordType::A).await;
    let single = client.query("localhost.", RecordType::A).await;

    assert_eq!(foreign.response_code(), ResponseCode::Refused);
    assert_eq!(single.response_code(), ResponseCode::Refused);

    server.shutdown().await;
}

// ============================================================================
// Zone metadata
// ============================================================================

#[tokio::test]
async fn test_soa_over_tcp_reflects_latest_change() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let response = client.query_tcp("example.com.", RecordType::SOA).await;

    assert_eq!(response.response_code(), ResponseCode::NoError);
    match response.answers()[0].data() {
        RData::SOA(soa) => {
            assert_eq!(soa.serial(), 1_709_296_200);
            assert_eq!(soa.expire(), 86400);
        }
        other => panic!("unexpected rdata {:?}", other),
    }

    // an edit under the zone moves the serial forward
    sqlx::query("UPDATE sites SET updated_at = '2025-06-01 00:00:00' WHERE domain_name = 'shop.example.com'")
        .execute(server.pool())
        .await
        .unwrap();
    let response = client.query("example.com.", RecordType::SOA).await;
    match response.answers()[0].data() {
        RData::SOA(soa) => assert_eq!(soa.serial(), 1_748_736_000),
        other => panic!("unexpected rdata {:?}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_ns_at_apex() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = TestClient::new(server.addr());

    let response = client.query("shop.example.com.", RecordType::NS).await;
    let apex = client.query("example.com.", RecordType::NS).await;

    // shop is not the zone apex, so it has no NS data of its own
    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert!(response.answers().is_empty());
    assert_eq!(apex.answers().len(), 2);

    server.shutdown().await;
}
