//! Configuration schema definitions.
//!
//! This module defines the route file structure.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::MethodSet;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Matching engine settings.
    pub matching: MatchingConfig,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g. "info", "route_table=debug"). `RUST_LOG` wins when set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Matching engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Cache compiled path and constraint patterns.
    pub cache_patterns: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            cache_patterns: true,
        }
    }
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route name. When omitted the name is derived from `target`.
    #[serde(default)]
    pub name: Option<String>,

    /// Accepted methods: a list or a `|`-delimited string. Omitted = all.
    #[serde(default)]
    pub methods: MethodsConfig,

    /// URI template, e.g. `/users/{id}` or `https://{tenant}.example.com/`.
    pub path: String,

    /// Opaque handler identifier returned on match.
    pub target: String,

    /// Placeholder constraints, in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

/// Methods as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MethodsConfig {
    /// `methods = "GET|POST"`
    Delimited(String),
    /// `methods = ["GET", "POST"]`
    List(Vec<String>),
}

impl Default for MethodsConfig {
    fn default() -> Self {
        MethodsConfig::List(Vec::new())
    }
}

impl MethodsConfig {
    /// Raw tokens before normalization.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            MethodsConfig::Delimited(s) => s
                .split(crate::routing::method::METHOD_SEPARATOR)
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            MethodsConfig::List(list) => list.clone(),
        }
    }

    pub fn to_method_set(&self) -> MethodSet {
        MethodSet::new(self.tokens())
    }
}

/// Named constraint for one placeholder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParameterConfig {
    /// Placeholder name, without braces.
    pub name: String,

    /// Regular expression the value must fully match.
    pub pattern: String,
}
