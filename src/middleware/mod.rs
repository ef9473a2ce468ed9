//! Middleware: continuation-passing request interception.
//!
//! A route's effective middleware runs as a chain around its controller.
//! Each middleware receives the request and a [`Next`] continuation; calling
//! the continuation hands the request deeper into the chain, not calling it
//! short-circuits the dispatch with the middleware's own outcome.

mod chain;
mod core;
mod trace;

pub use chain::{Chain, Next};
pub use core::{Middleware, MiddlewareEntry, MiddlewareFn};
pub use trace::TraceMiddleware;
