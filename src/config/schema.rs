//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::Deserialize;

/// Root configuration for the file server.
///
/// Built once at startup and shared via `Arc`; no component reads ambient
/// global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory whose files are served. Set from the CLI.
    pub serve_dir: PathBuf,

    /// Address to bind (without port).
    pub bind_address: String,

    /// TCP port to listen on. Set from the CLI.
    pub port: u16,

    /// Number of worker tasks; fixed for the whole run.
    pub workers: usize,

    /// Capacity of the bounded connection queue; fixed at construction.
    pub queue_capacity: usize,

    /// Maximum accepted length of one request head line, in bytes.
    /// Longer lines are rejected with 414 instead of being truncated.
    pub max_request_line: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            serve_dir: PathBuf::from("."),
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            workers: 5,
            queue_capacity: 16,
            max_request_line: 8192,
        }
    }
}

impl ServerConfig {
    /// Full `address:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
