use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::controller::ControllerResult;
use crate::error::RouterError;
use crate::request::Request;

use super::chain::Next;

/// One layer of the dispatch chain.
///
/// Implementations own the decision to continue: call `next.run(request)` to
/// proceed (possibly with a derived request), or return an outcome directly
/// to stop the chain before the controller.
pub trait Middleware: Send + Sync {
    fn handle(&self, request: Request, next: Next<'_>) -> ControllerResult;
}

/// Closure form of [`Middleware`].
pub type MiddlewareFn = Arc<dyn for<'a> Fn(Request, Next<'a>) -> ControllerResult + Send + Sync>;

/// A middleware reference as written at registration.
///
/// Entries stay unresolved until the chain reaches them, so an unknown class
/// name in position N only fails dispatches that actually get past the first
/// N-1 layers.
#[derive(Clone)]
pub enum MiddlewareEntry {
    /// An inline closure.
    Func(MiddlewareFn),
    /// A pre-built instance, shared across dispatches.
    Instance(Arc<dyn Middleware>),
    /// A class name resolved through the container at execution time.
    Named(String),
}

impl MiddlewareEntry {
    pub fn func<F>(f: F) -> Self
    where
        F: for<'a> Fn(Request, Next<'a>) -> ControllerResult + Send + Sync + 'static,
    {
        MiddlewareEntry::Func(Arc::new(f))
    }

    pub fn instance<M: Middleware + 'static>(middleware: M) -> Self {
        MiddlewareEntry::Instance(Arc::new(middleware))
    }

    pub fn named(class: impl Into<String>) -> Self {
        MiddlewareEntry::Named(class.into())
    }

    pub(crate) fn materialize(
        &self,
        container: &dyn Container,
    ) -> Result<Arc<dyn Middleware>, RouterError> {
        match self {
            MiddlewareEntry::Func(f) => Ok(Arc::new(FnMiddleware(f.clone()))),
            MiddlewareEntry::Instance(m) => Ok(m.clone()),
            MiddlewareEntry::Named(class) => {
                container
                    .middleware(class)
                    .ok_or_else(|| RouterError::InvalidMiddleware {
                        reference: class.clone(),
                    })
            }
        }
    }
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareEntry::Func(_) => f.write_str("Func(..)"),
            MiddlewareEntry::Instance(_) => f.write_str("Instance(..)"),
            MiddlewareEntry::Named(class) => f.debug_tuple("Named").field(class).finish(),
        }
    }
}

impl From<&str> for MiddlewareEntry {
    fn from(class: &str) -> Self {
        MiddlewareEntry::named(class)
    }
}

impl From<String> for MiddlewareEntry {
    fn from(class: String) -> Self {
        MiddlewareEntry::Named(class)
    }
}

impl From<Arc<dyn Middleware>> for MiddlewareEntry {
    fn from(middleware: Arc<dyn Middleware>) -> Self {
        MiddlewareEntry::Instance(middleware)
    }
}

struct FnMiddleware(MiddlewareFn);

impl Middleware for FnMiddleware {
    fn handle(&self, request: Request, next: Next<'_>) -> ControllerResult {
        (self.0)(request, next)
    }
}
