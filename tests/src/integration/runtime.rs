//! # Runtime
//!
//! Boots `NodeRuntime` on a real socket and talks raw HTTP/1.1 to it.

#[cfg(test)]
mod tests {
    use node_runtime::{NodeConfig, NodeRuntime};
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn free_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_node_serves_and_shuts_down() {
        let mut config = NodeConfig::default();
        config.http.port = free_port();
        config
            .identity
            .static_sessions
            .insert("dev-alice".into(), "alice".into());

        let mut runtime = NodeRuntime::new(config).await.unwrap();
        let addr = runtime.start().await.unwrap();

        let health = raw_request(
            addr,
            "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(health.starts_with("HTTP/1.1 200"));
        assert!(health.contains(r#"{"status":"ok"}"#));

        let body = r#"{"itemId":"item-1"}"#;
        let like = raw_request(
            addr,
            &format!(
                "POST /interactions/like HTTP/1.1\r\nHost: localhost\r\n\
                 Authorization: Bearer dev-alice\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            ),
        )
        .await;
        assert!(like.starts_with("HTTP/1.1 200"));
        assert!(like.contains(r#""action":"liked""#));

        runtime.shutdown().await.unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_binding() {
        // No session resolver configured.
        let err = NodeRuntime::new(NodeConfig::default()).await;
        assert!(err.is_err());
    }
}
