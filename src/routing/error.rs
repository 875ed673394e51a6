//! Routing error taxonomy.

use thiserror::Error;

use crate::routing::uri::UriError;

/// Errors produced by route registration, lookup, matching and rendering.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No registered route accepts the request.
    #[error("no route found for {method} {uri}")]
    NotFound { method: String, uri: String },

    /// A route name was looked up but never registered.
    #[error("route \"{name}\" not found")]
    RouteLookup { name: String },

    /// URL rendering was missing a value for a declared parameter.
    #[error("missing parameter \"{parameter}\"")]
    MissingParameter { parameter: String },

    /// A supplied value does not satisfy its parameter's pattern.
    #[error("parameter \"{parameter}\" value {value:?} does not match /{pattern}/")]
    ParameterConstraint {
        parameter: String,
        value: String,
        pattern: String,
    },

    /// A parameter pattern failed to compile.
    #[error("invalid pattern /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A route template could not be parsed as a URI.
    #[error("invalid route template {template:?}: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: UriError,
    },

    /// A request URI string could not be parsed.
    #[error("invalid request uri {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: UriError,
    },

    /// The target could not be serialized to derive a route name.
    #[error("cannot derive route name from target: {0}")]
    TargetSerialization(#[from] serde_json::Error),
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

impl RouteError {
    /// Whether the error means "nothing matched" rather than a misconfiguration.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::RouteLookup { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::NotFound {
            method: "POST".into(),
            uri: "/nope".into(),
        };
        assert_eq!(err.to_string(), "no route found for POST /nope");
        assert!(err.is_not_found());

        let err = RouteError::MissingParameter {
            parameter: "id".into(),
        };
        assert_eq!(err.to_string(), "missing parameter \"id\"");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = RouteError::InvalidPattern {
            pattern: "(".into(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid pattern /(/"));
    }
}
