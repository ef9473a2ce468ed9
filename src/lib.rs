//! # turnout
//!
//! **turnout** is a code-first request router: routes are declared in code
//! against a [`Router`], organized with nested groups, wrapped in
//! continuation-passing middleware, and reverse-routed by name. It is
//! transport-agnostic; embedding it in an HTTP server, a test harness, or a
//! message bus is the caller's choice.
//!
//! ## Overview
//!
//! A dispatch runs in four steps:
//!
//! 1. **Match** - candidates for the request verb are tried newest-first
//!    (exact verb before wildcard); the first whose compiled template and
//!    host rule accept the request wins and is bound as a per-request clone.
//! 2. **Chain** - the route's middleware runs as a chain; each layer may
//!    pass the request on (possibly derived), stop with its own outcome, or
//!    fail.
//! 3. **Controller** - the controller's declared signature is resolved to
//!    arguments (path captures, the request, container services, ...) and
//!    the controller runs.
//! 4. **Publish** - a successful outcome is handed to the configured
//!    [`Publisher`] exactly once.
//!
//! ## Architecture
//!
//! - **[`router`]** - registration surface, template compilation, matching,
//!   dispatch orchestration
//! - **[`registry`]** - ordered route storage with verb buckets and the
//!   name index
//! - **[`group`]** - group state derivation (prefix, middleware, domain,
//!   staged names)
//! - **[`middleware`]** - the `Middleware` trait, entry forms, and the
//!   chain runner
//! - **[`controller`]** - controller shapes: closures, `(class, action)`,
//!   `"Class@action"`
//! - **[`resolver`]** - ordered first-match-wins parameter binding
//! - **[`container`]** - instance lookup boundary for classes and services
//! - **[`url`]** - reverse routing from route names
//! - **[`request`]**, **[`response`]**, **[`publisher`]** - the value types
//!   flowing through a dispatch
//!
//! ## Quick Start
//!
//! ```no_run
//! use turnout::{Args, GroupAttributes, MiddlewareEntry, Request, Router, Signature};
//!
//! # fn main() -> Result<(), turnout::RouterError> {
//! let mut router = Router::new();
//! router.pattern("id", r"\d+");
//!
//! router.group(
//!     GroupAttributes::new()
//!         .prefix("/api")
//!         .middleware(MiddlewareEntry::func(|req, next| next.run(req))),
//!     |api| {
//!         api.name("products.show").get(
//!             "/products/{id}",
//!             (Signature::new().value("id"), |args: Args| {
//!                 let id = args.str("id").unwrap_or("?");
//!                 Ok(format!("product {id}").into())
//!             }),
//!         );
//!     },
//! );
//!
//! let outcome = router.dispatch(Request::get("/api/products/42"))?;
//! assert_eq!(outcome.status(), 200);
//! assert_eq!(router.url("products.show", &[("id", &7)])?, "/api/products/7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! The dispatch hot path avoids avoidable work: compiled templates are
//! memoized, extracted parameters live in a `SmallVec`, and the
//! current-route slot is an `ArcSwap` read without locking. Registration is
//! the slow path and takes the registry write lock.

pub mod container;
pub mod controller;
pub mod error;
pub mod group;
pub mod ids;
pub mod middleware;
pub mod publisher;
pub mod registry;
pub mod request;
pub mod resolver;
pub mod response;
pub mod route;
pub mod router;
pub mod url;

pub use container::{BasicContainer, Container, NullContainer};
pub use controller::{Controller, ControllerRef, ControllerResult, IntoController};
pub use error::RouterError;
pub use group::{GroupAttributes, GroupState};
pub use ids::RequestId;
pub use middleware::{Chain, Middleware, MiddlewareEntry, Next, TraceMiddleware};
pub use publisher::Publisher;
pub use registry::RouteRegistry;
pub use request::Request;
pub use resolver::{Arg, Args, ParamResolver, ParamSource, ParamSpec, Signature};
pub use response::{HeaderVec, Outcome, Response};
pub use route::{ParamVec, Route, RouteMethod};
pub use router::{RouteOptions, Router};
pub use url::UrlGenerator;
