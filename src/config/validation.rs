//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that templates parse and constraints compile
//! - Check that every declared parameter appears in its template
//! - Detect duplicate route and parameter names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the routing core itself
//!   still compiles lazily

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::method::is_known_method;
use crate::routing::pattern;
use crate::routing::uri::Uri;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Route name, or `routes[i]` when unnamed.
    pub route: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.route, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate the whole configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (i, route) in config.routes.iter().enumerate() {
        let label = route
            .name
            .clone()
            .unwrap_or_else(|| format!("routes[{}]", i));

        if let Some(name) = &route.name {
            if name.is_empty() {
                errors.push(error(&label, "name must not be empty".to_string()));
            } else if !names.insert(name.as_str()) {
                errors.push(error(&label, "duplicate route name".to_string()));
            }
        }

        validate_route(&label, route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(label: &str, route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    if route.path.is_empty() {
        errors.push(error(label, "path must not be empty".to_string()));
    }

    for method in route.methods.tokens() {
        if !is_known_method(&method) {
            errors.push(error(label, format!("unknown method {:?}", method)));
        }
    }

    let uri = match Uri::parse(&route.path) {
        Ok(uri) => Some(uri),
        Err(e) => {
            errors.push(error(label, format!("invalid path {:?}: {}", route.path, e)));
            None
        }
    };

    let mut seen = HashSet::new();
    for param in &route.parameters {
        if !seen.insert(param.name.as_str()) {
            errors.push(error(label, format!("duplicate parameter {:?}", param.name)));
        }

        if let Some(uri) = &uri {
            let in_path = pattern::placeholders(uri.path()).any(|p| p == param.name);
            let in_host = uri
                .host()
                .map(|h| pattern::placeholders(h).any(|p| p == param.name))
                .unwrap_or(false);
            if !in_path && !in_host {
                errors.push(error(
                    label,
                    format!("parameter {:?} does not appear in the template", param.name),
                ));
            }
        }

        if let Err(e) = pattern::compile(&pattern::constraint_pattern(&param.pattern)) {
            errors.push(error(label, format!("parameter {:?}: {}", param.name, e)));
        }
    }
}

fn error(route: &str, message: String) -> ValidationError {
    ValidationError {
        route: route.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{MethodsConfig, ParameterConfig};

    fn route(name: Option<&str>, path: &str, params: &[(&str, &str)]) -> RouteConfig {
        RouteConfig {
            name: name.map(str::to_string),
            methods: MethodsConfig::default(),
            path: path.to_string(),
            target: "T".to_string(),
            parameters: params
                .iter()
                .map(|(n, p)| ParameterConfig {
                    name: n.to_string(),
                    pattern: p.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.routes.push(route(Some("a"), "/a/{id}", &[("id", "[0-9]+")]));
        config.routes.push(route(None, "//{t}.example.com/", &[("t", "[a-z]+")]));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routes.push(route(Some("a"), "/a", &[]));
        config.routes.push(route(Some("a"), "", &[]));
        config.routes.push(route(
            None,
            "/b/{x}",
            &[("x", "("), ("x", ".+"), ("unused", ".+")],
        ));
        let mut bad_method = route(Some("m"), "/m", &[]);
        bad_method.methods = MethodsConfig::Delimited("GET|FETCH".into());
        config.routes.push(bad_method);

        let errors = validate_config(&config).unwrap_err();
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

        assert!(messages.contains(&"a: duplicate route name".to_string()));
        assert!(messages.contains(&"a: path must not be empty".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("routes[2]: parameter \"x\": invalid pattern")));
        assert!(messages.contains(&"routes[2]: duplicate parameter \"x\"".to_string()));
        assert!(messages
            .contains(&"routes[2]: parameter \"unused\" does not appear in the template".to_string()));
        assert!(messages.contains(&"m: unknown method \"FETCH\"".to_string()));
    }
}
