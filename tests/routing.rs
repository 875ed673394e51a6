//! End-to-end routing behaviour: registration, matching and URL rendering.

use std::collections::HashMap;

use route_table::routing::{MethodSet, Params, STANDARD_METHODS};
use route_table::{Collection, Route, RouteError};

mod common;

use common::{resource_collection, resource_route, ACTION, ROUTE_NAME};

#[test]
fn test_collection_lookup() {
    let routes = resource_collection("[a-z0-9]+");

    assert!(routes.has_route(ROUTE_NAME));
    assert!(!routes.has_route("Unknown\\Route\\Name"));
    assert_eq!(routes.get_route(ROUTE_NAME).unwrap().path(), "/path/to/the/{resource}");
}

#[test]
fn test_match_scenario() {
    let routes = resource_collection("[a-z0-9]+");

    let matched = routes.match_request("POST", "/path/to/the/resourcename").unwrap();
    assert_eq!(matched.name, ROUTE_NAME);
    assert_eq!(*matched.target, ACTION);
    assert_eq!(
        matched.parameters.iter().collect::<Vec<_>>(),
        vec![("resource", "resourcename")]
    );
}

#[test]
fn test_match_scenario_not_found() {
    let routes = resource_collection("[a-z0-9]+");

    let err = routes.match_request("POST", "/this/is/not/foundable").unwrap_err();
    match err {
        RouteError::NotFound { method, uri } => {
            assert_eq!(method, "POST");
            assert_eq!(uri, "/this/is/not/foundable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_render_scenario() {
    let route = resource_route("[a-z0-9-]+");

    let url = route.render_url(&[("resource", "file-name")]).unwrap();
    assert_eq!(url, "/path/to/the/file-name");

    let err = route.render_url(&HashMap::<&str, &str>::new()).unwrap_err();
    assert!(matches!(err, RouteError::MissingParameter { ref parameter } if parameter == "resource"));
}

#[test]
fn test_method_normalization() {
    for methods in [Vec::<&str>::new(), vec!["ANY"], vec!["any"]] {
        let route = Route::new(methods, "/", Params::new()).unwrap();
        for method in STANDARD_METHODS {
            assert!(route.has_method(method), "{method} should be accepted");
            assert!(route.has_method(&method.to_lowercase()));
        }
        assert!(!route.has_method("PROPFIND"));
        assert!(!route.has_method("ANY"));
    }
}

#[test]
fn test_first_registered_wins() {
    let mut routes = Collection::new();
    routes.add_route(
        Route::new(["GET"], "/files/{rest}", [("rest", ".+")]).unwrap(),
        "catch-all",
        "generic",
    );
    routes.add_route(
        Route::new(["GET"], "/files/readme", Params::new()).unwrap(),
        "readme",
        "specific",
    );

    let matched = routes.match_request("GET", "/files/readme").unwrap();
    assert_eq!(matched.name, "generic");

    routes.remove_route("generic");
    let matched = routes.match_request("GET", "/files/readme").unwrap();
    assert_eq!(matched.name, "specific");
}

#[test]
fn test_render_then_match_round_trip() {
    let mut routes = Collection::new();
    routes.add_route(
        Route::new(
            ["GET"],
            "/archive/{year}/{slug}",
            [("year", "[0-9]{4}"), ("slug", "[a-z][a-z0-9-]*")],
        )
        .unwrap(),
        (),
        "archive",
    );

    let mut input = HashMap::new();
    input.insert("slug", "rust-routing");
    input.insert("year", "2026");

    let url = routes.url_for("archive", &input).unwrap();
    assert_eq!(url, "/archive/2026/rust-routing");

    let matched = routes.match_request("GET", &url).unwrap();
    assert_eq!(
        matched.parameters.iter().collect::<Vec<_>>(),
        vec![("year", "2026"), ("slug", "rust-routing")]
    );
}

#[test]
fn test_constraint_enforcement() {
    let route = resource_route("[a-z0-9]+");
    let err = route.render_url(&[("resource", "file-name")]).unwrap_err();
    assert!(matches!(
        err,
        RouteError::ParameterConstraint { ref parameter, ref value, .. }
            if parameter == "resource" && value == "file-name"
    ));

    // A failing segment falls through to the next route
    let mut routes = resource_collection("[a-z0-9]+");
    routes.add_route(
        Route::new(["POST"], "/path/to/the/{resource}", [("resource", ".+")]).unwrap(),
        ACTION,
        "fallback",
    );
    let matched = routes.match_request("POST", "/path/to/the/file-name").unwrap();
    assert_eq!(matched.name, "fallback");

    routes.remove_route("fallback");
    assert!(matches!(
        routes.match_request("POST", "/path/to/the/file-name"),
        Err(RouteError::NotFound { .. })
    ));
}

#[test]
fn test_unknown_route() {
    let routes: Collection<()> = Collection::new();
    assert!(matches!(
        routes.get_route("missing"),
        Err(RouteError::RouteLookup { ref name }) if name == "missing"
    ));
    assert!(matches!(
        routes.match_request("GET", "/nope"),
        Err(RouteError::NotFound { .. })
    ));

    let routes = resource_collection("[a-z0-9]+");
    assert!(routes.get_route("missing").is_err());
    assert!(routes.match_request("GET", "/nope").is_err());
}

#[test]
fn test_matching_is_case_insensitive() {
    let routes = resource_collection("[a-z0-9]+");
    let matched = routes.match_request("post", "/PATH/to/the/ResourceName").unwrap();
    assert_eq!(matched.parameters.get("resource"), Some("ResourceName"));
}

#[test]
fn test_undeclared_placeholder_matches_literally() {
    let mut routes = Collection::new();
    routes.add_route(
        Route::new(["GET"], "/users/{id}/{tab}", [("id", "[0-9]+")]).unwrap(),
        (),
        "user",
    );

    assert!(routes.match_request("GET", "/users/5/{tab}").is_ok());
    assert!(routes.match_request("GET", "/users/5/profile").is_err());
}

#[test]
fn test_host_template_matches_exactly() {
    let mut routes = Collection::new();
    routes.add_route(
        Route::new(["GET"], "http://admin.example.com/dashboard", Params::new()).unwrap(),
        (),
        "admin",
    );

    assert!(routes.match_request("GET", "http://admin.example.com/dashboard").is_ok());
    assert!(routes.match_request("GET", "http://example.com/dashboard").is_err());
    assert!(routes.match_request("GET", "/dashboard").is_err());
}

#[test]
fn test_iteration_is_restartable() {
    let mut routes = Collection::new();
    for name in ["a", "b", "c"] {
        routes.add_route(
            Route::new(MethodSet::any().iter(), &format!("/{name}"), Params::new()).unwrap(),
            (),
            name,
        );
    }

    let first: Vec<_> = routes.iter().map(|e| e.name.clone()).collect();
    let second: Vec<_> = (&routes).into_iter().map(|e| e.name.clone()).collect();
    assert_eq!(first, vec!["a", "b", "c"]);
    assert_eq!(first, second);
}

#[test]
fn test_parameter_names_beyond_identifiers() {
    let route = Route::new(
        ["GET"],
        "/users/{user-id}/{file.ext}",
        [("user-id", "[0-9]+"), ("file.ext", "[a-z]+")],
    )
    .unwrap();
    assert_eq!(
        route.render_url(&[("user-id", "42"), ("file.ext", "txt")]).unwrap(),
        "/users/42/txt"
    );

    let mut routes = Collection::new();
    routes.add_route(route, (), "user-file");
    let matched = routes.match_request("GET", "/users/42/txt").unwrap();
    assert_eq!(
        matched.parameters.iter().collect::<Vec<_>>(),
        vec![("user-id", "42"), ("file.ext", "txt")]
    );
}
