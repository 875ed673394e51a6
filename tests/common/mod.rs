//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use route_table::{Collection, Route};

pub const ROUTE_METHODS: [&str; 3] = ["GET", "POST", "HEAD"];
pub const ROUTE_URI: &str = "/path/to/the/{resource}";
pub const ROUTE_NAME: &str = "r1";

/// Handler reference used as an opaque target.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Action {
    pub controller: &'static str,
    pub action: &'static str,
}

pub const ACTION: Action = Action {
    controller: "C",
    action: "A",
};

/// The single-route collection used by the scenario tests.
pub fn resource_collection(resource_pattern: &str) -> Collection<Action> {
    let mut routes = Collection::new();
    routes.add_route(resource_route(resource_pattern), ACTION, ROUTE_NAME);
    routes
}

pub fn resource_route(resource_pattern: &str) -> Route {
    Route::new(ROUTE_METHODS, ROUTE_URI, [("resource", resource_pattern)]).unwrap()
}

/// Unique scratch file path under the system temp dir.
pub fn scratch_file(stem: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("route-table-{}-{}-{}", stem, std::process::id(), n));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join("routes.toml")
}
