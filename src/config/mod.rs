//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI arguments (+ optional TOML file)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides applied
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to acceptor, workers, and request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no component mutates or re-reads it
//! - All fields have defaults so a minimal config works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ServerConfig;
pub use validation::{validate_config, ValidationError};
