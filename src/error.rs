//! Dispatch failure kinds.
//!
//! Every fallible routing operation funnels into [`RouterError`]. The four
//! variants are the complete public failure surface: callers embedding the
//! router map them onto whatever transport they serve (HTTP status codes,
//! test assertions, CLI exit codes).

use std::fmt;

use http::Method;

/// Errors produced while matching, dispatching, or reverse-routing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No registered route accepts the request's method, path, and host.
    RouteNotFound {
        /// Verb of the request that failed to match.
        method: Method,
        /// Path of the request that failed to match.
        path: String,
    },
    /// The matched route's controller reference cannot be invoked.
    InvalidController {
        /// How the controller was written at registration, e.g. `Shop@show`.
        reference: String,
        /// What made it uninvokable (unknown class, unknown action, ...).
        reason: String,
    },
    /// A middleware entry reached during chain execution is not callable
    /// and names no registered middleware class.
    InvalidMiddleware {
        /// The entry as written at registration.
        reference: String,
    },
    /// Reverse routing was asked for a route name nobody registered.
    UndefinedRoute {
        /// The name that was looked up.
        name: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::RouteNotFound { method, path } => {
                write!(f, "no route matches {method} {path}")
            }
            RouterError::InvalidController { reference, reason } => {
                write!(f, "controller '{reference}' cannot be invoked: {reason}")
            }
            RouterError::InvalidMiddleware { reference } => {
                write!(f, "middleware '{reference}' is not callable or registered")
            }
            RouterError::UndefinedRoute { name } => {
                write!(f, "no route named '{name}' is registered")
            }
        }
    }
}

impl std::error::Error for RouterError {}
