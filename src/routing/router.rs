//! Shared, hot-swappable route collection.
//!
//! # Responsibilities
//! - Serve matches to many concurrent readers
//! - Replace the whole collection atomically on reload
//!
//! # Design Decisions
//! - A published collection is never mutated; writers build a new one and swap it
//! - Readers take a snapshot (`Arc`) and never block on writers
//! - A rejected reload keeps the previous collection in service

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{build_collection, RouterConfig};
use crate::routing::collection::{Collection, MatchResult};
use crate::routing::error::RouteResult;
use crate::routing::params::ParamSource;
use crate::routing::uri::Uri;

/// Route collection shared between request handlers and a reloader.
#[derive(Debug)]
pub struct SharedRouter<T> {
    current: ArcSwap<Collection<T>>,
}

impl<T> SharedRouter<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(collection),
        }
    }

    /// The collection currently in service.
    pub fn snapshot(&self) -> Arc<Collection<T>> {
        self.current.load_full()
    }

    /// Publish a new collection. Matches already running finish on the old one.
    pub fn replace(&self, collection: Collection<T>) -> Arc<Collection<T>> {
        let routes = collection.len();
        let previous = self.current.swap(Arc::new(collection));
        tracing::info!(routes, previous = previous.len(), "Route collection replaced");
        previous
    }

    pub fn match_request(&self, method: &str, uri: &str) -> RouteResult<MatchResult<T>> {
        self.current.load().match_request(method, uri)
    }

    pub fn match_uri(&self, method: &str, uri: &Uri) -> RouteResult<MatchResult<T>> {
        self.current.load().match_uri(method, uri)
    }

    pub fn match_http<B>(&self, request: &axum::http::Request<B>) -> RouteResult<MatchResult<T>> {
        self.current.load().match_http(request)
    }

    pub fn url_for<S>(&self, name: &str, values: &S) -> RouteResult<String>
    where
        S: ParamSource + ?Sized,
    {
        self.current.load().url_for(name, values)
    }
}

impl SharedRouter<String> {
    /// Apply configuration updates from `updates` until the channel closes.
    pub fn spawn_reload(
        self: Arc<Self>,
        mut updates: mpsc::UnboundedReceiver<RouterConfig>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(config) = updates.recv().await {
                match build_collection(&config) {
                    Ok(collection) => {
                        self.replace(collection);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to rebuild routes: {}. Keeping current routes.",
                            e
                        );
                    }
                }
            }
            tracing::debug!("Route reload channel closed");
        })
    }
}
