//! Configuration loading from disk, and turning a config into routes.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{Collection, Route, RouteResult};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a route collection from configuration, in file order.
pub fn build_collection(config: &RouterConfig) -> RouteResult<Collection<String>> {
    let mut collection = Collection::new().with_pattern_cache(config.matching.cache_patterns);

    for route_config in &config.routes {
        let route = build_route(route_config)?;
        let target = route_config.target.clone();
        match &route_config.name {
            Some(name) => {
                collection.add_route(route, target, name.as_str());
            }
            None => {
                collection.add_unnamed(route, target)?;
            }
        }
    }

    tracing::info!(routes = collection.len(), "Route collection built");
    Ok(collection)
}

fn build_route(config: &RouteConfig) -> RouteResult<Route> {
    Route::new(
        config.methods.tokens(),
        &config.path,
        config
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.pattern.as_str())),
    )
}
