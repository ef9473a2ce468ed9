//! Router core - registration surface and dispatch hot path.

use std::fmt;
use std::sync::{Arc, RwLock};

use arc_swap::ArcSwapOption;
use http::Method;
use tracing::{debug, info, warn};

use crate::container::{Container, NullContainer};
use crate::controller::{split_reference, ControllerRef, ControllerResult, IntoController};
use crate::error::RouterError;
use crate::group::{GroupAttributes, GroupState};
use crate::middleware::{Chain, MiddlewareEntry};
use crate::publisher::Publisher;
use crate::registry::RouteRegistry;
use crate::request::Request;
use crate::resolver::{Args, BindContext, ParamResolver, Signature};
use crate::response::Outcome;
use crate::route::{Route, RouteMethod};
use crate::url::UrlGenerator;

use super::template::PatternTable;

/// Per-route extras accepted by [`Router::map_with`].
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub(crate) middleware: Vec<MiddlewareEntry>,
    pub(crate) domain: Option<String>,
    pub(crate) name: Option<String>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// One middleware entry, appended after the group-accumulated ones.
    pub fn middleware(mut self, entry: impl Into<MiddlewareEntry>) -> Self {
        self.middleware.push(entry.into());
        self
    }

    /// Host rule for this route, overriding any group domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

struct Shared {
    registry: Arc<RwLock<RouteRegistry>>,
    templates: PatternTable,
    resolver: ParamResolver,
    current: ArcSwapOption<Route>,
}

/// Registration surface and dispatcher in one handle.
///
/// A `Router` is a cheap clone over shared state. Clones share the route
/// table, the pattern table, and the current-route slot; each clone carries
/// its own [`GroupState`], which is what keeps group nesting local to the
/// handle that declared it. Dispatch takes `&self`, so a configured router
/// can be handed to worker threads as-is.
#[derive(Clone)]
pub struct Router {
    shared: Arc<Shared>,
    container: Arc<dyn Container>,
    publisher: Option<Arc<dyn Publisher>>,
    group: GroupState,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes().len())
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Router with no container and no publisher. Class-name controllers
    /// and named middleware fail until a real container is attached.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Arc::new(RwLock::new(RouteRegistry::new())),
                templates: PatternTable::new(),
                resolver: ParamResolver::standard(),
                current: ArcSwapOption::empty(),
            }),
            container: Arc::new(NullContainer),
            publisher: None,
            group: GroupState::default(),
        }
    }

    pub fn with_container(mut self, container: Arc<dyn Container>) -> Self {
        self.container = container;
        self
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Register a route under one verb constraint.
    pub fn map(
        &mut self,
        method: impl Into<RouteMethod>,
        path: &str,
        controller: impl IntoController,
    ) -> &mut Self {
        self.add(
            method.into(),
            path,
            controller.into_controller(),
            RouteOptions::default(),
        );
        self
    }

    /// Register a route with per-route middleware, domain, or name.
    pub fn map_with(
        &mut self,
        method: impl Into<RouteMethod>,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.add(method.into(), path, controller.into_controller(), options);
        self
    }

    pub fn get(&mut self, path: &str, controller: impl IntoController) -> &mut Self {
        self.map(Method::GET, path, controller)
    }

    pub fn post(&mut self, path: &str, controller: impl IntoController) -> &mut Self {
        self.map(Method::POST, path, controller)
    }

    pub fn put(&mut self, path: &str, controller: impl IntoController) -> &mut Self {
        self.map(Method::PUT, path, controller)
    }

    pub fn patch(&mut self, path: &str, controller: impl IntoController) -> &mut Self {
        self.map(Method::PATCH, path, controller)
    }

    pub fn delete(&mut self, path: &str, controller: impl IntoController) -> &mut Self {
        self.map(Method::DELETE, path, controller)
    }

    /// Route matching every verb. An exact-verb route for the same path
    /// always wins over it.
    pub fn any(&mut self, path: &str, controller: impl IntoController) -> &mut Self {
        self.map(RouteMethod::Any, path, controller)
    }

    pub fn get_with(
        &mut self,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.map_with(Method::GET, path, controller, options)
    }

    pub fn post_with(
        &mut self,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.map_with(Method::POST, path, controller, options)
    }

    pub fn put_with(
        &mut self,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.map_with(Method::PUT, path, controller, options)
    }

    pub fn patch_with(
        &mut self,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.map_with(Method::PATCH, path, controller, options)
    }

    pub fn delete_with(
        &mut self,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.map_with(Method::DELETE, path, controller, options)
    }

    pub fn any_with(
        &mut self,
        path: &str,
        controller: impl IntoController,
        options: RouteOptions,
    ) -> &mut Self {
        self.map_with(RouteMethod::Any, path, controller, options)
    }

    /// Stage a name for the next registration. Entering a group drops an
    /// unconsumed staged name.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.group.pending_name = Some(name.into());
        self
    }

    /// Register or replace the regex fragment for a parameter name.
    ///
    /// Takes effect for templates compiled from now on; matches already
    /// made against the old fragment are not revisited.
    pub fn pattern(&mut self, name: &str, fragment: &str) -> &mut Self {
        self.shared.templates.set_fragment(name, fragment);
        self
    }

    /// Run `body` with this handle's group state derived through `attrs`.
    /// The previous state is restored when `body` ends, unwinding included.
    pub fn group<F>(&mut self, attrs: GroupAttributes, body: F)
    where
        F: FnOnce(&mut Router),
    {
        // A staged name is dropped outright, not suspended for the body.
        self.group.pending_name = None;
        let derived = self.group.derive(&attrs);
        let saved = std::mem::replace(&mut self.group, derived);
        let guard = GroupGuard {
            router: self,
            saved: Some(saved),
        };
        body(&mut *guard.router);
    }

    fn add(
        &mut self,
        method: RouteMethod,
        path: &str,
        controller: ControllerRef,
        options: RouteOptions,
    ) {
        let mut route = Route::new(
            method,
            format!("{}{}", self.group.prefix, path),
            controller,
        );
        let mut middleware = self.group.middleware.clone();
        middleware.extend(options.middleware);
        route.middleware = middleware;
        route.domain = options.domain.or_else(|| self.group.domain.clone());
        let pending = self.group.take_pending_name();
        route.name = options.name.or(pending);
        self.shared
            .registry
            .write()
            .expect("route registry lock poisoned")
            .save(route);
    }

    /// Match one request, run its middleware chain and controller, publish
    /// the outcome.
    ///
    /// The bound route is exposed through [`current_route`](Router::current_route)
    /// from the moment the match lands until the next dispatch begins. A
    /// failed dispatch never reaches the publisher.
    pub fn dispatch(&self, request: Request) -> Result<Outcome, RouterError> {
        self.shared.current.store(None);
        let route = Arc::new(self.match_route(&request)?);
        self.shared.current.store(Some(route.clone()));

        let request_id = request.id;
        let terminal = |req: Request| self.run_controller(&route, req);
        let chain = Chain::new(&route.middleware, self.container.as_ref(), &terminal);
        let outcome = chain.run(request)?;

        info!(
            request_id = %request_id,
            method = %route.method,
            route = %route.path,
            status = outcome.status(),
            "dispatch complete"
        );
        if let Some(publisher) = &self.publisher {
            publisher.publish(&outcome);
        }
        Ok(outcome)
    }

    /// Bound route of the most recent successful match, if any.
    #[must_use]
    pub fn current_route(&self) -> Option<Arc<Route>> {
        self.shared.current.load_full()
    }

    fn match_route(&self, request: &Request) -> Result<Route, RouterError> {
        let candidates = {
            let registry = self
                .shared
                .registry
                .read()
                .expect("route registry lock poisoned");
            registry.candidates(&request.method)
        };

        for route in candidates {
            debug!(
                method = %request.method,
                path = %request.path,
                route = %route.path,
                "route match attempt"
            );
            let template = self.shared.templates.compile_path(&route.path);
            let Some(params) = template.capture(&request.path) else {
                continue;
            };
            if let Some(domain) = &route.domain {
                let host_rule = self.shared.templates.compile_domain(domain);
                if !host_rule.is_match(&request.host) {
                    debug!(
                        host = %request.host,
                        domain = %domain,
                        route = %route.path,
                        "host rule rejected candidate"
                    );
                    continue;
                }
            }
            debug!(
                method = %request.method,
                path = %request.path,
                route = %route.path,
                params = params.len(),
                "route matched"
            );
            return Ok(route.bind(&request.path, params));
        }

        warn!(method = %request.method, path = %request.path, "no route matched");
        Err(RouterError::RouteNotFound {
            method: request.method.clone(),
            path: request.path.clone(),
        })
    }

    fn run_controller(&self, route: &Route, request: Request) -> ControllerResult {
        match &route.controller {
            ControllerRef::Function { signature, body } => {
                let args = self.resolve_args(signature, route, &request)?;
                body(args)
            }
            ControllerRef::Method { class, action } => {
                self.call_class(class, action, route, request)
            }
            ControllerRef::Named(reference) => {
                let (class, action) = split_reference(reference)?;
                self.call_class(class, action, route, request)
            }
        }
    }

    fn call_class(
        &self,
        class: &str,
        action: &str,
        route: &Route,
        request: Request,
    ) -> ControllerResult {
        let controller =
            self.container
                .controller(class)
                .ok_or_else(|| RouterError::InvalidController {
                    reference: format!("{class}@{action}"),
                    reason: format!("controller class '{class}' is not registered"),
                })?;
        let signature =
            controller
                .signature(action)
                .ok_or_else(|| RouterError::InvalidController {
                    reference: format!("{class}@{action}"),
                    reason: format!("action '{action}' is not exposed"),
                })?;
        let args = self.resolve_args(&signature, route, &request)?;
        controller.call(action, args)
    }

    fn resolve_args(
        &self,
        signature: &Signature,
        route: &Route,
        request: &Request,
    ) -> Result<Args, RouterError> {
        self.shared.resolver.resolve(
            signature,
            &BindContext {
                request,
                route,
                router: self,
                container: &self.container,
            },
        )
    }

    /// Generator bound to this router's route table.
    #[must_use]
    pub fn url_generator(&self) -> UrlGenerator {
        UrlGenerator::new(self.shared.registry.clone())
    }

    /// Reverse-route a named route. See [`UrlGenerator::make`].
    pub fn url(
        &self,
        name: &str,
        params: &[(&str, &dyn fmt::Display)],
    ) -> Result<String, RouterError> {
        self.url_generator().make(name, params)
    }

    /// Snapshot of every registered route, in registration order.
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.shared
            .registry
            .read()
            .expect("route registry lock poisoned")
            .routes()
            .cloned()
            .collect()
    }
}

struct GroupGuard<'a> {
    router: &'a mut Router,
    saved: Option<GroupState>,
}

impl Drop for GroupGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.router.group = saved;
        }
    }
}
