//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LocalApiConfig (validated, immutable)
//!     → handed to LocalApiClient by the host
//! ```
//!
//! # Design Decisions
//! - Config is owned by the host; callers of `dispatch` cannot change the deadline
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_toml_str, load_config, ConfigError};
pub use schema::{ClientConfig, LocalApiConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
