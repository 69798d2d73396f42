//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the serve directory actually exists and is a directory
//! - Validate value ranges (worker count, queue capacity, line limit)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before any core component is constructed

use std::path::PathBuf;

use crate::config::schema::ServerConfig;

/// A single semantic configuration problem.
#[derive(Debug)]
pub enum ValidationError {
    /// The serve directory does not exist.
    ServeDirMissing(PathBuf),
    /// The serve directory path exists but is not a directory.
    ServeDirNotADirectory(PathBuf),
    /// Worker count must be at least one.
    NoWorkers,
    /// Queue capacity must be at least one.
    ZeroQueueCapacity,
    /// Request-line limit too small to hold any real request line.
    RequestLineLimitTooSmall(usize),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ServeDirMissing(p) => {
                write!(f, "serve directory does not exist: {}", p.display())
            }
            ValidationError::ServeDirNotADirectory(p) => {
                write!(f, "serve directory is not a directory: {}", p.display())
            }
            ValidationError::NoWorkers => write!(f, "workers must be at least 1"),
            ValidationError::ZeroQueueCapacity => {
                write!(f, "queue_capacity must be at least 1")
            }
            ValidationError::RequestLineLimitTooSmall(n) => {
                write!(f, "max_request_line of {} bytes is too small (minimum 64)", n)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check all semantic constraints, collecting every violation.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match std::fs::metadata(&config.serve_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => errors.push(ValidationError::ServeDirNotADirectory(
            config.serve_dir.clone(),
        )),
        Err(_) => errors.push(ValidationError::ServeDirMissing(config.serve_dir.clone())),
    }

    if config.workers == 0 {
        errors.push(ValidationError::NoWorkers);
    }
    if config.queue_capacity == 0 {
        errors.push(ValidationError::ZeroQueueCapacity);
    }
    if config.max_request_line < 64 {
        errors.push(ValidationError::RequestLineLimitTooSmall(
            config.max_request_line,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
