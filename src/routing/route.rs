//! Route definition: accepted methods, URI template and parameter constraints.
//!
//! # Responsibilities
//! - Normalize accepted methods
//! - Hold the template as a structured [`Uri`]
//! - Render concrete URLs from parameter values
//!
//! # Design Decisions
//! - Parameter patterns are not compiled at construction; a malformed
//!   pattern surfaces as `InvalidPattern` on first use
//! - Rendering never mutates the route; it works on copies of host and path

use std::sync::Arc;

use regex::Regex;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::method::MethodSet;
use crate::routing::params::{ParamSource, Params};
use crate::routing::pattern::{self, PatternCache};
use crate::routing::uri::Uri;

/// A URI template bound to a method set and per-parameter constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    methods: MethodSet,
    uri: Uri,
    parameters: Params,
}

impl Route {
    /// Build a route from a method list, a template and `name → pattern` constraints.
    pub fn new<M, S, P, K, V>(methods: M, template: &str, parameters: P) -> RouteResult<Self>
    where
        M: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let uri = Uri::parse(template).map_err(|source| RouteError::InvalidTemplate {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            methods: MethodSet::new(methods),
            uri,
            parameters: parameters.into_iter().collect(),
        })
    }

    /// Like [`Route::new`] with methods written as `"GET|POST"`.
    pub fn parse<P, K, V>(methods: &str, template: &str, parameters: P) -> RouteResult<Self>
    where
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut route = Self::new(Vec::<String>::new(), template, parameters)?;
        route.methods = MethodSet::parse(methods);
        Ok(route)
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    /// Case-insensitive method check.
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn set_methods(&mut self, methods: MethodSet) {
        self.methods = methods;
    }

    pub fn with_methods(&self, methods: MethodSet) -> Self {
        let mut route = self.clone();
        route.set_methods(methods);
        route
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = uri;
    }

    pub fn with_uri(&self, uri: Uri) -> Self {
        let mut route = self.clone();
        route.set_uri(uri);
        route
    }

    /// Template host, if any.
    pub fn host(&self) -> Option<&str> {
        self.uri.host()
    }

    /// Template path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Declared constraints in declaration order.
    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    /// Render a URL, compiling each constraint afresh.
    pub fn render_url<S>(&self, values: &S) -> RouteResult<String>
    where
        S: ParamSource + ?Sized,
    {
        self.render_with(values, |source| pattern::compile(source).map(Arc::new))
    }

    /// Render a URL using `cache` for the constraint regexes.
    pub fn render_url_cached<S>(&self, values: &S, cache: &PatternCache) -> RouteResult<String>
    where
        S: ParamSource + ?Sized,
    {
        self.render_with(values, |source| cache.get_or_compile(source))
    }

    fn render_with<S, C>(&self, values: &S, compile: C) -> RouteResult<String>
    where
        S: ParamSource + ?Sized,
        C: Fn(&str) -> RouteResult<Arc<Regex>>,
    {
        for (name, constraint) in self.parameters.iter() {
            let value = values
                .lookup(name)
                .ok_or_else(|| RouteError::MissingParameter {
                    parameter: name.to_string(),
                })?;

            let regex = compile(&pattern::constraint_pattern(constraint))?;
            if !regex.is_match(value) {
                return Err(RouteError::ParameterConstraint {
                    parameter: name.to_string(),
                    value: value.to_string(),
                    pattern: constraint.to_string(),
                });
            }
        }

        let declared = |name: &str| {
            if self.parameters.contains(name) {
                values.lookup(name)
            } else {
                None
            }
        };

        let mut rendered = self.uri.with_path(pattern::substitute(self.uri.path(), declared));
        rendered.set_host(
            self.uri
                .host()
                .map(|host| pattern::substitute(host, declared)),
        );
        Ok(rendered.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resource_route() -> Route {
        Route::new(
            ["GET", "POST", "HEAD"],
            "/path/to/the/{resource}",
            [("resource", "[a-z0-9-]+")],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let route = resource_route();
        assert_eq!(route.path(), "/path/to/the/{resource}");
        assert_eq!(route.host(), None);
        assert!(route.has_method("post"));
        assert!(!route.has_method("DELETE"));
        assert_eq!(route.parameters().get("resource"), Some("[a-z0-9-]+"));
    }

    #[test]
    fn test_render_url() {
        let route = resource_route();
        let url = route.render_url(&[("resource", "file-name")]).unwrap();
        assert_eq!(url, "/path/to/the/file-name");
    }

    #[test]
    fn test_render_missing_parameter() {
        let route = resource_route();
        let err = route.render_url(&HashMap::<String, String>::new()).unwrap_err();
        assert!(matches!(err, RouteError::MissingParameter { parameter } if parameter == "resource"));
    }

    #[test]
    fn test_render_constraint_violation() {
        let route = resource_route();
        let err = route.render_url(&[("resource", "no/slashes")]).unwrap_err();
        assert!(matches!(err, RouteError::ParameterConstraint { .. }));
    }

    #[test]
    fn test_render_host_and_path() {
        let route = Route::new(
            ["GET"],
            "https://{tenant}.example.com/users/{id}",
            [("tenant", "[a-z]+"), ("id", "[0-9]+")],
        )
        .unwrap();
        let url = route
            .render_url(&[("id", "42"), ("tenant", "acme")])
            .unwrap();
        assert_eq!(url, "https://acme.example.com/users/42");
    }

    #[test]
    fn test_render_leaves_undeclared_placeholders() {
        let route = Route::new(["GET"], "/a/{x}/{y}", [("x", ".+")]).unwrap();
        let url = route.render_url(&[("x", "1"), ("y", "2")]).unwrap();
        assert_eq!(url, "/a/1/{y}");
    }

    #[test]
    fn test_render_malformed_pattern() {
        let route = Route::new(["GET"], "/a/{x}", [("x", "[unclosed")]).unwrap();
        let err = route.render_url(&[("x", "1")]).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let route = resource_route();
        route.render_url(&[("resource", "abc")]).unwrap();
        assert_eq!(route.path(), "/path/to/the/{resource}");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = resource_route();
        let mut copy = original.clone();
        copy.set_uri(copy.uri().with_path(format!("/sub/prefix{}", copy.path())));

        assert_eq!(copy.path(), "/sub/prefix/path/to/the/{resource}");
        assert_eq!(original.path(), "/path/to/the/{resource}");

        let moved = original.with_uri(Uri::from_path("/elsewhere"));
        assert_eq!(moved.path(), "/elsewhere");
        assert_eq!(original.path(), "/path/to/the/{resource}");
    }

    #[test]
    fn test_parse_methods_string() {
        let route = Route::parse("get|put", "/x", Vec::<(String, String)>::new()).unwrap();
        assert!(route.has_method("PUT"));
        assert!(!route.has_method("POST"));

        let any = Route::parse("any", "/x", Vec::<(String, String)>::new()).unwrap();
        assert!(any.has_method("CONNECT"));
    }

    #[test]
    fn test_invalid_template() {
        let err = Route::new(["GET"], "http://host:bad/", Vec::<(String, String)>::new()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidTemplate { .. }));
    }
}
