//! HTTP/1.0 request handling subsystem.
//!
//! # Data Flow
//! ```text
//! Dequeued connection
//!     → request.rs (bounded head read, request-line parse, path resolve)
//!     → response.rs (status + headers, streamed file body)
//!     → Connection dropped by the worker (socket closed)
//! ```
//!
//! This is the request-handler collaborator of the core: it borrows the
//! connection for one request/response exchange and always hands it back to
//! the worker for closing, whether it succeeded or failed.

pub mod request;
pub mod response;

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::config::ServerConfig;
use crate::net::Connection;

/// Per-connection handler failure.
///
/// These never propagate past the worker that hit them: the connection is
/// closed, the failure is logged, and the worker moves on.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    BadRequest(&'static str),

    #[error("request line exceeds configured limit")]
    LineTooLong,

    #[error("method {0} not supported")]
    UnsupportedMethod(String),
}

impl HandlerError {
    /// The error response to send before closing, if one applies.
    fn response_status(&self) -> Option<(u16, &'static str)> {
        match self {
            HandlerError::BadRequest(_) => Some((400, "Bad Request")),
            HandlerError::LineTooLong => Some((414, "URI Too Long")),
            HandlerError::UnsupportedMethod(_) => Some((405, "Method Not Allowed")),
            // Nothing sensible to write if the socket itself failed.
            HandlerError::Io(_) => None,
        }
    }
}

/// Serve one request on the given connection.
///
/// The connection is only borrowed; the calling worker closes it by dropping
/// the handle regardless of the outcome here.
pub async fn handle(conn: &mut Connection, config: &ServerConfig) -> Result<(), HandlerError> {
    let id = conn.id();
    let (read_half, mut write_half) = conn.stream_mut().split();
    let mut reader = BufReader::new(read_half);

    match serve(&mut reader, &mut write_half, config).await {
        Ok(status) => {
            tracing::debug!(connection_id = %id, status, "Request served");
            Ok(())
        }
        Err(err) => {
            if let Some((status, reason)) = err.response_status() {
                // Best effort; the connection may already be unusable.
                let _ = response::send_status(&mut write_half, status, reason).await;
            }
            Err(err)
        }
    }
}

async fn serve<R, W>(
    reader: &mut R,
    writer: &mut W,
    config: &ServerConfig,
) -> Result<u16, HandlerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let head = request::read_request_head(reader, config.max_request_line).await?;
    if head.method != "GET" {
        return Err(HandlerError::UnsupportedMethod(head.method));
    }
    let path = request::resolve_target(&config.serve_dir, &head.target)?;
    response::send_file(writer, &path).await
}
