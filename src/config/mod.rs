//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → loader.rs build_collection → Collection<String>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → routing::SharedRouter swaps in the rebuilt collection
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal route files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{build_collection, load_config, parse_config, ConfigError};
pub use schema::{LogFormat, LoggingConfig, MatchingConfig, MethodsConfig, ParameterConfig, RouteConfig, RouterConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
