//! Route table: ordered request routing with templated URLs.
//!
//! Maps `(method, uri)` to a registered handler target, extracting named
//! path parameters validated by per-parameter regular expressions, and
//! renders URLs back from a route template.
//!
//! ```
//! use route_table::{Collection, Route};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut routes = Collection::new();
//! routes.add_route(
//!     Route::new(["GET"], "/users/{id}", [("id", "[0-9]+")])?,
//!     "Users::show",
//!     "user",
//! );
//!
//! let matched = routes.match_request("GET", "/users/42")?;
//! assert_eq!(*matched.target, "Users::show");
//! assert_eq!(matched.parameters.get("id"), Some("42"));
//!
//! assert_eq!(routes.url_for("user", &[("id", "7")])?, "/users/7");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use routing::{Collection, MatchResult, Route, RouteError, SharedRouter};
