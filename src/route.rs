//! Route records: what was registered, and what a match binds onto a copy.

use std::fmt;
use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;

use crate::controller::ControllerRef;
use crate::middleware::MiddlewareEntry;

/// Inline capacity for extracted path parameters. Real-world templates
/// rarely exceed three or four captures; eight keeps even deep REST nesting
/// off the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Verb constraint of a route: one concrete method, or any method at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMethod {
    /// Matches every verb. Loses to an exact-verb route for the same path.
    Any,
    /// Matches exactly one verb.
    Only(Method),
}

impl RouteMethod {
    #[must_use]
    pub fn accepts(&self, method: &Method) -> bool {
        match self {
            RouteMethod::Any => true,
            RouteMethod::Only(m) => m == method,
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, RouteMethod::Any)
    }
}

impl From<Method> for RouteMethod {
    fn from(m: Method) -> Self {
        RouteMethod::Only(m)
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMethod::Any => f.write_str("*"),
            RouteMethod::Only(m) => write!(f, "{m}"),
        }
    }
}

/// One registered route.
///
/// The registry stores routes unbound. Matching never mutates a stored
/// route; it produces a bound clone via [`Route::bind`] carrying the
/// concrete URI and extracted parameters, so concurrent dispatches cannot
/// see each other's bindings.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: RouteMethod,
    /// Path template as registered, group prefix already applied.
    pub path: String,
    pub controller: ControllerRef,
    /// Effective middleware: group-accumulated entries first, then the
    /// route's own, in declaration order.
    pub middleware: Vec<MiddlewareEntry>,
    /// Host rule, literal or regex. `None` matches any host.
    pub domain: Option<String>,
    /// Reverse-routing name, unique within a registry.
    pub name: Option<String>,
    bound_uri: Option<String>,
    params: ParamVec,
}

impl Route {
    pub(crate) fn new(method: RouteMethod, path: String, controller: ControllerRef) -> Self {
        Self {
            method,
            path,
            controller,
            middleware: Vec::new(),
            domain: None,
            name: None,
            bound_uri: None,
            params: ParamVec::new(),
        }
    }

    /// Bound clone for one matched request.
    pub(crate) fn bind(&self, uri: &str, params: ParamVec) -> Route {
        let mut bound = self.clone();
        bound.bound_uri = Some(uri.to_string());
        bound.params = params;
        bound
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound_uri.is_some()
    }

    /// Concrete URI this clone was bound to, if it came out of a match.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.bound_uri.as_deref()
    }

    /// Extracted path parameter. Uses `rfind` so a duplicated capture name
    /// resolves to the last written value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn params(&self) -> &ParamVec {
        &self.params
    }
}
