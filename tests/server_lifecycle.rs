//! Live-server integration: requests flow end to end and a triggered
//! shutdown terminates `run` cleanly.

mod common;

use std::time::Duration;

use tokio::time::timeout;

use staticd::config::ServerConfig;
use staticd::Server;

const DEADLINE: Duration = Duration::from_secs(5);

fn test_config(serve_dir: &std::path::Path, workers: usize, queue_capacity: usize) -> ServerConfig {
    ServerConfig {
        serve_dir: serve_dir.to_path_buf(),
        bind_address: "127.0.0.1".to_string(),
        // Port 0: the OS picks a free port, read back via local_addr.
        port: 0,
        workers,
        queue_capacity,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn serves_files_and_shuts_down_on_trigger() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hello.txt"), b"hello from staticd").unwrap();

    let server = Server::bind(test_config(dir.path(), 2, 4)).await.unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let running = tokio::spawn(server.run());

    let ok = common::http_get(addr, "/hello.txt").await;
    assert!(ok.starts_with("HTTP/1.0 200 OK\r\n"), "got: {ok}");
    assert!(ok.contains("Content-Type: text/plain\r\n"));
    assert!(ok.ends_with("hello from staticd"));

    let missing = common::http_get(addr, "/absent.txt").await;
    assert!(missing.starts_with("HTTP/1.0 404 Not Found\r\n"), "got: {missing}");

    let bad_method = common::http_request(addr, "POST /hello.txt HTTP/1.0\r\n\r\n").await;
    assert!(bad_method.starts_with("HTTP/1.0 405 "), "got: {bad_method}");

    // Clean interrupt-style shutdown: run() returns Ok.
    shutdown.trigger();
    timeout(DEADLINE, running)
        .await
        .expect("server must stop within the deadline")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn handles_more_concurrent_requests_than_queue_capacity() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"<p>ok</p>").unwrap();

    // A tiny queue and a single worker force the acceptor to block on
    // enqueue; every request must still be answered.
    let server = Server::bind(test_config(dir.path(), 1, 2)).await.unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let running = tokio::spawn(server.run());

    let clients: Vec<_> = (0..8)
        .map(|_| tokio::spawn(async move { common::http_get(addr, "/page.html").await }))
        .collect();
    for client in clients {
        let response = timeout(DEADLINE, client).await.unwrap().unwrap();
        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(response.ends_with("<p>ok</p>"));
    }

    shutdown.trigger();
    timeout(DEADLINE, running).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn trigger_before_any_request_still_stops_cleanly() {
    let dir = tempfile::tempdir().unwrap();

    let server = Server::bind(test_config(dir.path(), 3, 4)).await.unwrap();
    let shutdown = server.shutdown_handle();
    let running = tokio::spawn(server.run());

    // Triggering twice must be as safe as once.
    shutdown.trigger();
    shutdown.trigger();

    timeout(DEADLINE, running).await.unwrap().unwrap().unwrap();
}
