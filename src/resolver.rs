//! Parameter resolution: from a declared signature to concrete arguments.
//!
//! Controllers declare what they want as a [`Signature`] of named
//! [`ParamSpec`]s. At dispatch time the resolver walks an ordered rule list
//! per parameter; the first applicable rule binds it. The rules are plain
//! functions in a table, so a new binding source is one more entry, not a
//! rewrite of the resolution loop.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::container::Container;
use crate::error::RouterError;
use crate::request::Request;
use crate::route::Route;
use crate::router::Router;

/// Declared source of one controller parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// A plain value: a path capture with this name, or the default.
    Value,
    /// The current [`Request`].
    Request,
    /// The dispatching [`Router`] handle.
    Router,
    /// The router's [`Container`].
    Container,
    /// The matched, bound [`Route`].
    Route,
    /// A typed service resolved from the container.
    Service(TypeId),
}

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub source: ParamSource,
    pub default: Option<Value>,
}

/// Ordered parameter declarations of a controller action.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<ParamSpec>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plain value parameter, typically fed by a path capture.
    pub fn value(self, name: impl Into<String>) -> Self {
        self.param(name, ParamSource::Value, None)
    }

    /// A plain value parameter with a fallback when nothing captures it.
    pub fn value_or(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(name, ParamSource::Value, Some(default.into()))
    }

    pub fn request(self, name: impl Into<String>) -> Self {
        self.param(name, ParamSource::Request, None)
    }

    pub fn router(self, name: impl Into<String>) -> Self {
        self.param(name, ParamSource::Router, None)
    }

    pub fn container(self, name: impl Into<String>) -> Self {
        self.param(name, ParamSource::Container, None)
    }

    pub fn route(self, name: impl Into<String>) -> Self {
        self.param(name, ParamSource::Route, None)
    }

    /// A container service of type `T`.
    pub fn service<T: Any + Send + Sync>(self, name: impl Into<String>) -> Self {
        self.param(name, ParamSource::Service(TypeId::of::<T>()), None)
    }

    /// A container service of type `T`, with a plain-value fallback when the
    /// container does not know the type.
    pub fn service_or<T: Any + Send + Sync>(
        self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.param(
            name,
            ParamSource::Service(TypeId::of::<T>()),
            Some(default.into()),
        )
    }

    fn param(mut self, name: impl Into<String>, source: ParamSource, default: Option<Value>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            source,
            default,
        });
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

/// A resolved argument.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Request(Request),
    Router(Router),
    Container(Arc<dyn Container>),
    Route(Route),
    Service(Arc<dyn Any + Send + Sync>),
    /// No rule applied. Controllers treat this as "not provided".
    Absent,
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Request(r) => f.debug_tuple("Request").field(&r.id).finish(),
            Arg::Router(_) => f.write_str("Router(..)"),
            Arg::Container(_) => f.write_str("Container(..)"),
            Arg::Route(r) => f.debug_tuple("Route").field(&r.path).finish(),
            Arg::Service(_) => f.write_str("Service(..)"),
            Arg::Absent => f.write_str("Absent"),
        }
    }
}

/// Arguments in declaration order, looked up by parameter name.
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: Vec<(String, Arg)>,
}

impl Args {
    fn push(&mut self, name: String, arg: Arg) {
        self.values.push((name, arg));
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, arg)| arg)
    }

    /// Plain value of a parameter, when one was bound.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.get(name)? {
            Arg::Value(v) => Some(v),
            _ => None,
        }
    }

    /// String form of a plain value; path captures always land here.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name)?.as_str()
    }

    pub fn is_absent(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Arg::Absent) | None)
    }

    /// The request argument, wherever it was declared.
    pub fn request(&self) -> Option<&Request> {
        self.values.iter().find_map(|(_, arg)| match arg {
            Arg::Request(r) => Some(r),
            _ => None,
        })
    }

    pub fn route(&self) -> Option<&Route> {
        self.values.iter().find_map(|(_, arg)| match arg {
            Arg::Route(r) => Some(r),
            _ => None,
        })
    }

    pub fn router(&self) -> Option<&Router> {
        self.values.iter().find_map(|(_, arg)| match arg {
            Arg::Router(r) => Some(r),
            _ => None,
        })
    }

    pub fn container(&self) -> Option<&dyn Container> {
        self.values.iter().find_map(|(_, arg)| match arg {
            Arg::Container(c) => Some(c.as_ref()),
            _ => None,
        })
    }

    /// Typed service argument.
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        match self.get(name)? {
            Arg::Service(service) => service.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arg)> {
        self.values.iter().map(|(n, arg)| (n.as_str(), arg))
    }
}

/// Everything a binding rule may draw from.
pub struct BindContext<'a> {
    pub request: &'a Request,
    /// The bound route clone for this dispatch.
    pub route: &'a Route,
    pub router: &'a Router,
    pub container: &'a Arc<dyn Container>,
}

type BindRule = fn(&ParamSpec, &BindContext<'_>) -> Option<Result<Arg, RouterError>>;

/// Ordered first-match-wins binding rules.
pub struct ParamResolver {
    rules: Vec<(&'static str, BindRule)>,
}

impl Default for ParamResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl ParamResolver {
    /// The standard rule order. Path captures shadow every declared source,
    /// then each source binds its own kind, then defaults, then absent.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                ("path-capture", bind_capture),
                ("request", bind_request),
                ("router", bind_router),
                ("container", bind_container),
                ("route", bind_route),
                ("service", bind_service),
                ("default", bind_default),
            ],
        }
    }

    pub fn resolve(
        &self,
        signature: &Signature,
        cx: &BindContext<'_>,
    ) -> Result<Args, RouterError> {
        let mut args = Args::default();
        for spec in signature.params() {
            let mut bound = Arg::Absent;
            for (rule, bind) in &self.rules {
                if let Some(outcome) = bind(spec, cx) {
                    debug!(param = %spec.name, rule, "parameter bound");
                    bound = outcome?;
                    break;
                }
            }
            args.push(spec.name.clone(), bound);
        }
        Ok(args)
    }
}

fn bind_capture(spec: &ParamSpec, cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    cx.route
        .param(&spec.name)
        .map(|v| Ok(Arg::Value(Value::String(v.to_string()))))
}

fn bind_request(spec: &ParamSpec, cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    matches!(spec.source, ParamSource::Request)
        .then(|| Ok(Arg::Request(cx.request.clone())))
}

fn bind_router(spec: &ParamSpec, cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    matches!(spec.source, ParamSource::Router).then(|| Ok(Arg::Router(cx.router.clone())))
}

fn bind_container(spec: &ParamSpec, cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    matches!(spec.source, ParamSource::Container)
        .then(|| Ok(Arg::Container(cx.container.clone())))
}

fn bind_route(spec: &ParamSpec, cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    matches!(spec.source, ParamSource::Route).then(|| Ok(Arg::Route(cx.route.clone())))
}

fn bind_service(spec: &ParamSpec, cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    let ParamSource::Service(ty) = spec.source else {
        return None;
    };
    match cx.container.resolve(ty) {
        Some(service) => Some(Ok(Arg::Service(service))),
        // With a default declared, let the default rule take over.
        None if spec.default.is_some() => None,
        None => Some(Err(RouterError::InvalidController {
            reference: cx.route.controller.reference(),
            reason: format!("cannot resolve service parameter '{}'", spec.name),
        })),
    }
}

fn bind_default(spec: &ParamSpec, _cx: &BindContext<'_>) -> Option<Result<Arg, RouterError>> {
    spec.default.as_ref().map(|v| Ok(Arg::Value(v.clone())))
}
