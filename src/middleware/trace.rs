use std::time::Instant;

use tracing::{debug, info, warn};

use crate::controller::ControllerResult;
use crate::request::Request;

use super::chain::Next;
use super::core::Middleware;

/// Stock middleware that logs each dispatch with its latency.
///
/// Emits `debug` on entry, `info` on success, `warn` on failure, all keyed
/// by the request id. Useful as the outermost layer of a group.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceMiddleware;

impl Middleware for TraceMiddleware {
    fn handle(&self, request: Request, next: Next<'_>) -> ControllerResult {
        let started = Instant::now();
        let id = request.id;
        let method = request.method.clone();
        let path = request.path.clone();
        debug!(request_id = %id, method = %method, path = %path, "request entering chain");

        let result = next.run(request);

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(outcome) => {
                info!(
                    request_id = %id,
                    method = %method,
                    path = %path,
                    status = outcome.status(),
                    latency_ms,
                    "request completed"
                );
            }
            Err(err) => {
                warn!(
                    request_id = %id,
                    method = %method,
                    path = %path,
                    error = %err,
                    latency_ms,
                    "request failed"
                );
            }
        }
        result
    }
}
