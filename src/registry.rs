//! Route storage and match-candidate ordering.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use tracing::{info, warn};

use crate::route::{Route, RouteMethod};

/// Ordered route store partitioned for verb-first lookup.
///
/// Routes are kept in registration order twice over: a master list for
/// diagnostics, and per-verb buckets (plus one wildcard bucket) that
/// [`candidates`](RouteRegistry::candidates) walks newest-first, so the most
/// recently registered route shadows earlier ones for the same shape.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    order: Vec<Arc<Route>>,
    verbs: HashMap<Method, Vec<Arc<Route>>>,
    wildcard: Vec<Arc<Route>>,
    names: HashMap<String, Arc<Route>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished route. Reusing a name reassigns it to the new route
    /// with a warning, mirroring how later routes shadow earlier ones.
    pub fn save(&mut self, route: Route) -> Arc<Route> {
        let route = Arc::new(route);
        match &route.method {
            RouteMethod::Any => self.wildcard.push(route.clone()),
            RouteMethod::Only(m) => self.verbs.entry(m.clone()).or_default().push(route.clone()),
        }
        if let Some(name) = &route.name {
            if self.names.insert(name.clone(), route.clone()).is_some() {
                warn!(name = %name, path = %route.path, "route name reassigned");
            }
        }
        self.order.push(route.clone());
        info!(
            method = %route.method,
            path = %route.path,
            total = self.order.len(),
            "route registered"
        );
        route
    }

    /// Match candidates for one verb: exact-verb routes before wildcard
    /// routes, each bucket in reverse registration order.
    #[must_use]
    pub fn candidates(&self, method: &Method) -> Vec<Arc<Route>> {
        let exact = self.verbs.get(method);
        let mut out = Vec::with_capacity(exact.map_or(0, Vec::len) + self.wildcard.len());
        if let Some(bucket) = exact {
            out.extend(bucket.iter().rev().cloned());
        }
        out.extend(self.wildcard.iter().rev().cloned());
        out
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Route>> {
        self.names.get(name).cloned()
    }

    /// Every route in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.order.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
