//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Issue one raw HTTP/1.0 GET and return the entire raw response.
///
/// The server closes the connection after responding (no keep-alive), so
/// reading to EOF yields the complete response.
pub async fn http_get(addr: SocketAddr, target: &str) -> String {
    http_request(addr, &format!("GET {} HTTP/1.0\r\n\r\n", target)).await
}

/// Send raw request bytes and return the entire raw response.
pub async fn http_request(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
