//! HTTP/1.0 response generation.
//!
//! # Responsibilities
//! - Map file extensions to MIME types
//! - Write status line, `Content-Type`, and `Content-Length` headers
//! - Stream file bodies in fixed-size chunks instead of buffering them

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::HandlerError;

/// Map a file extension to its MIME type.
///
/// Unknown extensions fall back to `application/octet-stream` so any file in
/// the serving directory can be delivered.
pub fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => "text/plain",
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Serve the file at `path`, returning the status code that was sent.
///
/// A missing file or a directory target gets a `404` with an empty body.
pub async fn send_file<W>(writer: &mut W, path: &Path) -> Result<u16, HandlerError>
where
    W: AsyncWrite + Unpin,
{
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => {
            send_status(writer, 404, "Not Found").await?;
            return Ok(404);
        }
    };

    let mut file = match File::open(path).await {
        Ok(file) => file,
        // The file can disappear between the metadata check and the open.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            send_status(writer, 404, "Not Found").await?;
            return Ok(404);
        }
        Err(e) => return Err(HandlerError::Io(e)),
    };

    let header = format!(
        "HTTP/1.0 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        mime_type(path),
        metadata.len()
    );
    writer.write_all(header.as_bytes()).await?;

    // Chunked copy; the body never lives in memory all at once.
    tokio::io::copy(&mut file, writer).await?;
    writer.flush().await?;

    Ok(200)
}

/// Write a bodyless status response.
pub async fn send_status<W>(writer: &mut W, status: u16, reason: &str) -> Result<(), HandlerError>
where
    W: AsyncWrite + Unpin,
{
    let header = format!("HTTP/1.0 {} {}\r\nContent-Length: 0\r\n\r\n", status, reason);
    writer.write_all(header.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(mime_type(Path::new("a.txt")), "text/plain");
        assert_eq!(mime_type(Path::new("a.html")), "text/html");
        assert_eq!(mime_type(Path::new("pics/b.jpeg")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.pdf")), "application/pdf");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(mime_type(Path::new("a.bin")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("no_extension")), "application/octet-stream");
    }

    #[tokio::test]
    async fn serves_existing_file_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"hello world").unwrap();

        let mut out = Vec::new();
        let status = send_file(&mut out, &path).await.unwrap();
        assert_eq!(status, 200);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 11\r\n"));
        assert!(text.ends_with("\r\n\r\nhello world"));
    }

    #[tokio::test]
    async fn missing_file_gets_404() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let status = send_file(&mut out, &dir.path().join("absent.txt"))
            .await
            .unwrap();
        assert_eq!(status, 404);
        assert!(String::from_utf8(out).unwrap().starts_with("HTTP/1.0 404 Not Found\r\n"));
    }

    #[tokio::test]
    async fn directory_target_gets_404() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let status = send_file(&mut out, dir.path()).await.unwrap();
        assert_eq!(status, 404);
    }
}
