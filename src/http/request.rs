//! Request-head reading and parsing.
//!
//! # Responsibilities
//! - Read the request head line by line with a hard per-line length bound
//! - Parse the request line into method and target
//! - Resolve the target against the serving root, rejecting traversal
//!
//! # Design Decisions
//! - Lines are read through a length-limited reader; an over-long line is an
//!   error rather than a truncation, so no fixed buffer can be overrun
//! - Headers are consumed through the blank line and discarded (HTTP/1.0 GET
//!   needs none of them)

use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::HandlerError;

/// Parsed request line of an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
}

/// Read the full request head and return the parsed request line.
///
/// Consumes header lines until the terminating blank line (or EOF, which
/// some minimal HTTP/1.0 clients send instead).
pub async fn read_request_head<R>(
    reader: &mut R,
    max_line: usize,
) -> Result<RequestLine, HandlerError>
where
    R: AsyncBufRead + Unpin,
{
    let first = read_line(reader, max_line)
        .await?
        .ok_or(HandlerError::BadRequest("connection closed before request line"))?;
    let request_line = parse_request_line(&first)?;

    // Drain the remaining header lines; their contents are irrelevant for
    // an HTTP/1.0 GET but must be consumed before responding.
    loop {
        match read_line(reader, max_line).await? {
            None => break,
            Some(line) if line.is_empty() => break,
            Some(_) => {}
        }
    }

    Ok(request_line)
}

/// Split a request line into method and target.
pub fn parse_request_line(line: &str) -> Result<RequestLine, HandlerError> {
    let mut parts = line.split_ascii_whitespace();
    let method = parts
        .next()
        .ok_or(HandlerError::BadRequest("empty request line"))?;
    let target = parts
        .next()
        .ok_or(HandlerError::BadRequest("request line has no target"))?;
    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
    })
}

/// Resolve a request target to a path under the serving root.
///
/// The target must be absolute and must not contain `..` components or NUL
/// bytes; anything else would let a request escape the serving root.
pub fn resolve_target(serve_dir: &Path, target: &str) -> Result<PathBuf, HandlerError> {
    if !target.starts_with('/') {
        return Err(HandlerError::BadRequest("request target must be absolute"));
    }
    if target.contains('\0') {
        return Err(HandlerError::BadRequest("request target contains NUL"));
    }
    if target.split('/').any(|segment| segment == "..") {
        return Err(HandlerError::BadRequest("request target escapes serve root"));
    }
    Ok(serve_dir.join(target.trim_start_matches('/')))
}

/// Read one CRLF-terminated line, enforcing the length bound.
///
/// Returns `None` at EOF. The trailing CR/LF is stripped.
async fn read_line<R>(reader: &mut R, max_line: usize) -> Result<Option<String>, HandlerError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut limited = (&mut *reader).take(max_line as u64 + 1);
    let n = limited.read_until(b'\n', &mut line).await?;
    if n == 0 {
        return Ok(None);
    }
    if line.len() > max_line {
        return Err(HandlerError::LineTooLong);
    }
    while matches!(line.last(), Some(b'\n') | Some(b'\r')) {
        line.pop();
    }
    let line = String::from_utf8(line)
        .map_err(|_| HandlerError::BadRequest("request head is not valid UTF-8"))?;
    Ok(Some(line))
}
