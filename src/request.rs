//! The request value handed to `Router::dispatch`.
//!
//! `turnout` is transport-agnostic: nothing here reads sockets or parses
//! wire bytes. A [`Request`] is the minimal routing fact set - verb, host,
//! path - plus an attribute bag middleware can use to pass values down the
//! chain (an authenticated user, a tenant id) without threading extra
//! arguments through every layer.

use std::collections::HashMap;

use http::Method;
use serde_json::Value;

use crate::ids::RequestId;

/// One request travelling through the router.
#[derive(Debug, Clone)]
pub struct Request {
    /// Correlation id stamped at construction and preserved by
    /// [`with_attribute`](Request::with_attribute).
    pub id: RequestId,
    /// Request verb, matched against each route's method constraint.
    pub method: Method,
    /// Host the request was addressed to. Routes without a domain rule
    /// ignore it entirely, so `""` is fine when no host is known.
    pub host: String,
    /// Decoded request path, e.g. `/products/42`. Matched verbatim.
    pub path: String,
    attributes: HashMap<String, Value>,
}

impl Request {
    pub fn new(method: Method, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            method,
            host: host.into(),
            path: path.into(),
            attributes: HashMap::new(),
        }
    }

    /// GET request with no host, the common shape in tests and examples.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, "", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, "", path)
    }

    /// Derived copy carrying one more attribute. The id is kept so the copy
    /// still correlates with the original in logs.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derived_copy_keeps_id_and_adds_attribute() {
        let req = Request::get("/orders");
        let id = req.id;
        let derived = req.with_attribute("user", json!({"id": 7}));
        assert_eq!(derived.id, id);
        assert_eq!(derived.attribute("user"), Some(&json!({"id": 7})));
        assert!(derived.attribute("missing").is_none());
    }
}
