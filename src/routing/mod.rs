//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup or reload):
//!     Route::new(methods, template, constraints)
//!     → collection.rs (ordered, named entries)
//!     → router.rs (published behind an atomic pointer)
//!
//! Incoming Request (method, uri)
//!     → collection.rs (scan entries in registration order)
//!         → method filter → host filter → pattern.rs (path regex)
//!     → Return: MatchResult { name, target, parameters } or NotFound
//!
//! URL generation:
//!     route.rs render_url(values)
//!     → validate each value against its constraint
//!     → substitute placeholders in host and path
//! ```
//!
//! # Design Decisions
//! - Deterministic: same registry and input always match the same route
//! - First match wins (registration order, not specificity)
//! - Patterns compile lazily and are cached by source text
//! - Published collections are immutable; reloads swap the whole set

pub mod collection;
pub mod error;
pub mod method;
pub mod params;
pub mod pattern;
pub mod route;
pub mod router;
pub mod uri;

pub use collection::{target_name, Collection, Entry, MatchResult};
pub use error::{RouteError, RouteResult};
pub use method::{MethodSet, STANDARD_METHODS};
pub use params::{ParamSource, Params};
pub use route::Route;
pub use router::SharedRouter;
pub use uri::{Uri, UriError};
