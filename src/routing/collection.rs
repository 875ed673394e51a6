//! Ordered route registry and request matching.
//!
//! # Responsibilities
//! - Register, look up and remove named routes
//! - Match (method, host, path) against routes in registration order
//! - Extract parameter values in declaration order
//! - Render URLs for named routes
//!
//! # Design Decisions
//! - First match wins; registration order is the only precedence rule
//! - Re-registering a name replaces the entry in place (last write wins)
//! - A malformed parameter pattern aborts matching with `InvalidPattern`
//!   instead of being treated as "no match"
//! - Compiled patterns are cached by source; disable with `with_pattern_cache(false)`

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::params::{ParamSource, Params};
use crate::routing::pattern::{self, PatternCache};
use crate::routing::route::Route;
use crate::routing::uri::Uri;

/// A registered route together with its name and handler target.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub name: String,
    pub route: Route,
    pub target: Arc<T>,
}

/// Outcome of a successful match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<T> {
    pub name: String,
    pub target: Arc<T>,
    pub parameters: Params,
}

/// Ordered, named registry of routes.
#[derive(Clone)]
pub struct Collection<T> {
    entries: Vec<Entry<T>>,
    index: HashMap<String, usize>,
    patterns: PatternCache,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            patterns: PatternCache::new(),
        }
    }

    /// Enable or disable caching of compiled patterns.
    pub fn with_pattern_cache(mut self, enabled: bool) -> Self {
        self.patterns.set_enabled(enabled);
        self
    }

    pub fn pattern_cache(&self) -> &PatternCache {
        &self.patterns
    }

    /// Register `route` under `name`. An existing entry with the same name is
    /// replaced and keeps its position.
    pub fn add_route(&mut self, route: Route, target: T, name: impl Into<String>) -> &Route {
        let name = name.into();
        let entry = Entry {
            name: name.clone(),
            route,
            target: Arc::new(target),
        };

        let position = match self.index.get(&name) {
            Some(&position) => {
                tracing::debug!(route = %name, position, "Route replaced");
                self.entries[position] = entry;
                self.patterns.clear();
                position
            }
            None => {
                let position = self.entries.len();
                tracing::debug!(
                    route = %name,
                    methods = %entry.route.methods(),
                    template = %entry.route.uri(),
                    position,
                    "Route registered"
                );
                self.entries.push(entry);
                self.index.insert(name, position);
                position
            }
        };

        &self.entries[position].route
    }

    pub fn has_route(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get_route(&self, name: &str) -> RouteResult<&Route> {
        self.entry(name).map(|e| &e.route)
    }

    /// Mutable access to a route. Cached patterns are dropped since the
    /// route may change under the handle.
    pub fn get_route_mut(&mut self, name: &str) -> RouteResult<&mut Route> {
        match self.index.get(name) {
            Some(&position) => {
                self.patterns.clear();
                Ok(&mut self.entries[position].route)
            }
            None => Err(lookup_error(name)),
        }
    }

    pub fn get_target(&self, name: &str) -> RouteResult<&Arc<T>> {
        self.entry(name).map(|e| &e.target)
    }

    pub fn entry(&self, name: &str) -> RouteResult<&Entry<T>> {
        self.index
            .get(name)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| lookup_error(name))
    }

    /// Remove a route. Removing an unknown name is a no-op.
    pub fn remove_route(&mut self, name: &str) -> Option<Entry<T>> {
        let position = self.index.remove(name)?;
        let removed = self.entries.remove(position);
        for (i, entry) in self.entries.iter().enumerate().skip(position) {
            self.index.insert(entry.name.clone(), i);
        }
        self.patterns.clear();
        tracing::debug!(route = %name, "Route removed");
        Some(removed)
    }

    /// Entries in match order. Each call starts from the first entry.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match a request given as a URI string.
    pub fn match_request(&self, method: &str, uri: &str) -> RouteResult<MatchResult<T>> {
        let parsed = Uri::parse(uri).map_err(|source| RouteError::InvalidUri {
            uri: uri.to_string(),
            source,
        })?;
        self.match_uri(method, &parsed)
    }

    /// Match an HTTP request by its method and URI. Origin-form requests
    /// take their host from the `Host` header.
    pub fn match_http<B>(&self, request: &axum::http::Request<B>) -> RouteResult<MatchResult<T>> {
        self.match_uri(request.method().as_str(), &Uri::from_request(request))
    }

    /// Return the first route accepting `method`, the URI's host and its path.
    pub fn match_uri(&self, method: &str, uri: &Uri) -> RouteResult<MatchResult<T>> {
        let request_path = uri.path();

        for entry in &self.entries {
            let route = &entry.route;

            if !route.methods().is_empty() && !route.has_method(method) {
                tracing::trace!(route = %entry.name, method, "Skipped: method");
                continue;
            }

            if let Some(host) = route.host() {
                if uri.host() != Some(host) {
                    tracing::trace!(route = %entry.name, host, "Skipped: host");
                    continue;
                }
            }

            let source = pattern::path_pattern(route.path(), route.parameters());
            let regex = self.patterns.get_or_compile(&source)?;

            let parameters = match regex.captures(request_path) {
                Some(captures) => {
                    let mut parameters = Params::with_capacity(route.parameters().len());
                    for (index, name) in route.parameters().names().enumerate() {
                        if let Some(value) = captures.name(&pattern::group_name(index)) {
                            parameters.insert(name, value.as_str());
                        }
                    }
                    parameters
                }
                None if request_path == route.path() => Params::new(),
                None => {
                    tracing::trace!(route = %entry.name, path = request_path, "Skipped: path");
                    continue;
                }
            };

            tracing::debug!(route = %entry.name, method, path = request_path, "Route matched");
            return Ok(MatchResult {
                name: entry.name.clone(),
                target: Arc::clone(&entry.target),
                parameters,
            });
        }

        tracing::debug!(method, uri = %uri, routes = self.entries.len(), "No route matched");
        Err(RouteError::NotFound {
            method: method.to_string(),
            uri: uri.to_string(),
        })
    }

    /// Render the URL of a named route.
    pub fn url_for<S>(&self, name: &str, values: &S) -> RouteResult<String>
    where
        S: ParamSource + ?Sized,
    {
        self.get_route(name)?.render_url_cached(values, &self.patterns)
    }
}

impl<T: Serialize> Collection<T> {
    /// Register `route` under a name derived from `target`.
    ///
    /// The name is the hex SHA-256 of the target's JSON form, so two unnamed
    /// routes with equal targets share a name and the second replaces the
    /// first. Prefer [`Collection::add_route`] with an explicit name.
    pub fn add_unnamed(&mut self, route: Route, target: T) -> RouteResult<&Route> {
        let name = target_name(&target)?;
        if self.has_route(&name) {
            tracing::warn!(route = %name, "Unnamed route collides with an existing target; replacing");
        }
        Ok(self.add_route(route, target, name))
    }
}

/// Stable route name for a target: hex SHA-256 of its JSON serialization.
pub fn target_name<T: Serialize + ?Sized>(target: &T) -> RouteResult<String> {
    let bytes = serde_json::to_vec(target)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

fn lookup_error(name: &str) -> RouteError {
    RouteError::RouteLookup {
        name: name.to_string(),
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("routes", &self.names().collect::<Vec<_>>())
            .field("cached_patterns", &self.patterns.len())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
