mod tracing_util;

use http::Method;
use serde_json::json;
use tracing_util::TestTracing;
use turnout::{
    Args, ControllerResult, Outcome, Request, RouteOptions, Router, RouterError, Signature,
};

fn reply(text: &'static str) -> (Signature, impl Fn(Args) -> ControllerResult) {
    (Signature::new(), move |_args: Args| Ok(text.into()))
}

fn echo(param: &str) -> (Signature, impl Fn(Args) -> ControllerResult) {
    let name = param.to_string();
    let sig = Signature::new().value(name.clone());
    (sig, move |args: Args| {
        Ok(args.str(&name).unwrap_or("-").to_string().into())
    })
}

#[test]
fn test_static_route_dispatch() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/ping", reply("pong"));
    let outcome = router.dispatch(Request::get("/ping")).unwrap();
    assert_eq!(outcome, Outcome::from("pong"));
}

#[test]
fn test_root_route() {
    let mut router = Router::new();
    router.get("/", reply("home"));
    assert_eq!(router.dispatch(Request::get("/")).unwrap(), Outcome::from("home"));
    assert!(router.dispatch(Request::get("")).is_err());
}

#[test]
fn test_path_parameter_extraction() {
    let mut router = Router::new();
    router.get("/users/{id}", echo("id"));
    let outcome = router.dispatch(Request::get("/users/42")).unwrap();
    assert_eq!(outcome, Outcome::from("42"));
}

#[test]
fn test_multiple_parameters() {
    let mut router = Router::new();
    router.get(
        "/users/{user}/posts/{post}",
        (
            Signature::new().value("user").value("post"),
            |args: Args| {
                let user = args.str("user").unwrap_or("-");
                let post = args.str("post").unwrap_or("-");
                Ok(format!("{user}:{post}").into())
            },
        ),
    );
    let outcome = router.dispatch(Request::get("/users/7/posts/99")).unwrap();
    assert_eq!(outcome, Outcome::from("7:99"));
}

#[test]
fn test_unmatched_path_is_not_found() {
    let mut router = Router::new();
    router.get("/ping", reply("pong"));
    let err = router.dispatch(Request::get("/pong")).unwrap_err();
    assert_eq!(
        err,
        RouterError::RouteNotFound {
            method: Method::GET,
            path: "/pong".to_string(),
        }
    );
}

#[test]
fn test_unmatched_method_is_not_found() {
    let mut router = Router::new();
    router.post("/submit", reply("ok"));
    assert!(matches!(
        router.dispatch(Request::get("/submit")),
        Err(RouterError::RouteNotFound { .. })
    ));
    assert!(router.dispatch(Request::post("/submit")).is_ok());
}

#[test]
fn test_last_registered_route_shadows_earlier() {
    let mut router = Router::new();
    router.get("/ping", reply("old"));
    router.get("/ping", reply("new"));
    assert_eq!(router.dispatch(Request::get("/ping")).unwrap(), Outcome::from("new"));
}

#[test]
fn test_exact_verb_beats_wildcard_regardless_of_order() {
    let mut router = Router::new();
    router.get("/thing", reply("via-get"));
    router.any("/thing", reply("via-any"));
    assert_eq!(
        router.dispatch(Request::get("/thing")).unwrap(),
        Outcome::from("via-get")
    );
    assert_eq!(
        router.dispatch(Request::post("/thing")).unwrap(),
        Outcome::from("via-any")
    );
}

#[test]
fn test_pattern_constrains_and_older_route_catches_the_rest() {
    let mut router = Router::new();
    router.pattern("id", r"\d+");
    router.get("/users/{name}", echo("name"));
    router.get("/users/{id}", echo("id"));
    // the digit-constrained route shadows, everything else falls through
    assert_eq!(router.dispatch(Request::get("/users/42")).unwrap(), Outcome::from("42"));
    assert_eq!(
        router.dispatch(Request::get("/users/ana")).unwrap(),
        Outcome::from("ana")
    );
}

#[test]
fn test_optional_parameter_with_default() {
    let mut router = Router::new();
    router.get(
        "/pages/{page?}",
        (
            Signature::new().value_or("page", "home"),
            |args: Args| match args.value("page") {
                Some(v) => Ok(v.as_str().unwrap_or("-").to_string().into()),
                None => Ok("none".into()),
            },
        ),
    );
    assert_eq!(
        router.dispatch(Request::get("/pages/about")).unwrap(),
        Outcome::from("about")
    );
    assert_eq!(router.dispatch(Request::get("/pages")).unwrap(), Outcome::from("home"));
}

#[test]
fn test_domain_restricts_host() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.map_with(
        Method::GET,
        "/dash",
        reply("tenant dash"),
        RouteOptions::new().domain(r"(.*)\.example\.com"),
    );
    router.get("/open", reply("anywhere"));

    let hit = Request::new(Method::GET, "shop.example.com", "/dash");
    assert_eq!(router.dispatch(hit).unwrap(), Outcome::from("tenant dash"));

    let miss = Request::new(Method::GET, "example.com", "/dash");
    assert!(matches!(
        router.dispatch(miss),
        Err(RouterError::RouteNotFound { .. })
    ));

    // routes without a domain rule ignore the host entirely
    let any_host = Request::new(Method::GET, "whatever.test", "/open");
    assert_eq!(router.dispatch(any_host).unwrap(), Outcome::from("anywhere"));
}

#[test]
fn test_domain_captures_never_become_parameters() {
    let mut router = Router::new();
    router.map_with(
        Method::GET,
        "/dash/{page}",
        (Signature::new().route("r"), |args: Args| {
            let params = args.route().map(|r| r.params().len()).unwrap_or(0);
            Ok(json!(params).into())
        }),
        RouteOptions::new().domain("{account}.example.com"),
    );
    let outcome = router
        .dispatch(Request::new(Method::GET, "acme.example.com", "/dash/stats"))
        .unwrap();
    assert_eq!(outcome, Outcome::Json(json!(1)));
}

#[test]
fn test_current_route_tracks_the_last_match() {
    let mut router = Router::new();
    router.map_with(
        Method::GET,
        "/users/{id}",
        echo("id"),
        RouteOptions::new().name("users.show"),
    );

    assert!(router.current_route().is_none());
    router.dispatch(Request::get("/users/7")).unwrap();

    let current = router.current_route().expect("route bound after dispatch");
    assert!(current.is_bound());
    assert_eq!(current.uri(), Some("/users/7"));
    assert_eq!(current.param("id"), Some("7"));
    assert_eq!(current.name.as_deref(), Some("users.show"));

    let _ = router.dispatch(Request::get("/missing"));
    assert!(router.current_route().is_none());
}

#[test]
fn test_routes_snapshot_in_registration_order() {
    let mut router = Router::new();
    router.get("/a", reply("a"));
    router.post("/b", reply("b"));
    router.any("/c", reply("c"));
    let paths: Vec<String> = router.routes().iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, vec!["/a", "/b", "/c"]);
}
