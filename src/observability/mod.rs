//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / config produce:
//!     → tracing events (registration, match, reload)
//!     → logging.rs (filter + formatter)
//!     → stdout (pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Per-entry skip reasons at `trace`, match outcomes at `debug`,
//!   reloads at `info`

pub mod logging;

pub use logging::{init_logging, LoggingError};
