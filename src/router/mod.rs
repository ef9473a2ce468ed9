//! # Router Module
//!
//! Registration surface, template compilation, and request matching.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Collecting route declarations, with group nesting folded in at
//!   registration time
//! - Compiling path templates (e.g. `/products/{id}`) into anchored regexes
//! - Matching incoming requests to candidates in precedence order
//! - Driving the middleware chain, controller invocation, and publishing
//!
//! ## Architecture
//!
//! Matching runs in two phases:
//!
//! 1. **Compilation**: a template is compiled to a regex on first use and
//!    memoized. Changing a pattern fragment clears the memo, so new matches
//!    see the new fragment while past matches stay as they were.
//!
//! 2. **Matching**: candidates for the request verb are tested newest-first,
//!    exact verb before wildcard; the first path-and-host hit wins and is
//!    bound as a per-request route clone.
//!
//! ## Performance
//!
//! - Compiled templates are cached; steady-state matching does no regex
//!   construction
//! - Extracted parameters live in a `SmallVec`, off the heap for typical
//!   routes
//! - The current-route slot is an `ArcSwap`, read lock-free

mod core;
mod template;
#[cfg(test)]
mod tests;

pub use core::{RouteOptions, Router};
