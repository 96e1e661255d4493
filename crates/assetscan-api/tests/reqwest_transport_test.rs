//! `ReqwestTransport` against a minimal local HTTP server.

use assetscan_api::{ApiRequest, AssetClient, HttpTransport, ReqwestTransport, SessionClient};
use assetscan_auth::{LogRecovery, MemorySessionStore, Session};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_transport_reports_status_and_body() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let base_url = format!("http://{}/api/", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.expect("read request");
        let body = r#"{"message":"Scan job not found"}"#;
        let response = format!(
            "HTTP/1.1 404 Not Found\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        String::from_utf8_lossy(&buf[..n]).to_string()
    });

    let transport = ReqwestTransport::new(base_url, 5).expect("create transport");
    let mut request = ApiRequest::get("scan/jobs/missing");
    request.authorization = Some("Bearer tok-1".to_string());

    let response = transport.execute(request).await.expect("round trip");
    assert_eq!(response.status, 404);
    assert_eq!(response.error_message(), "Scan job not found");

    let raw = server.await.expect("server task");
    assert!(raw.starts_with("GET /api/scan/jobs/missing HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer tok-1"));
}

#[tokio::test]
async fn test_asset_client_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.expect("read request");
        let body = r#"[{"id":"a-1","ipAddress":"10.0.0.7","online":true}]"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        String::from_utf8_lossy(&buf[..n]).to_string()
    });

    let session = Arc::new(SessionClient::new(
        Arc::new(ReqwestTransport::new(base_url, 5).expect("create transport")),
        Arc::new(MemorySessionStore::with_session(Session::new(
            "tok-2",
            "u-1",
            "operator",
            "",
            Vec::new(),
        ))),
        Arc::new(LogRecovery),
    ));

    let assets = AssetClient::new(session)
        .by_online(true)
        .await
        .expect("list online assets");
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].ip_address, "10.0.0.7");

    let raw = server.await.expect("server task");
    assert!(raw.starts_with("GET /api/assets/online/true HTTP/1.1"));
}
