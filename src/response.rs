//! Controller outcomes and the structured response they normalize into.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use smallvec::SmallVec;

/// Inline capacity for response headers. Sixteen covers typical responses
/// without reaching for the heap.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// A structured response: status code, headers, JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// HTTP-style status code.
    pub status: u16,
    /// Response headers. Not serialized; transports emit them natively.
    #[serde(skip)]
    pub headers: HeaderVec,
    /// Response body as a JSON value.
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body,
        }
    }

    /// 200 response with a JSON body.
    pub fn json(body: Value) -> Self {
        Self::new(200, body)
    }

    /// Error response with a `{"error": message}` body.
    pub fn error(status: u16, message: &str) -> Self {
        Self::new(status, json!({ "error": message }))
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.push((Arc::from(name), value.into()));
    }

    /// Case-insensitive header lookup; the last written value wins.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rfind(|(k, _)| k.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a controller (or a short-circuiting middleware) produced.
///
/// Controllers are free to return a scalar, a bare JSON value, nothing, or a
/// full [`Response`]; the variants keep those shapes distinct until the
/// embedding transport normalizes them via [`Outcome::into_response`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A fully specified response, passed through as-is.
    Response(Response),
    /// A plain text body with an implicit success status.
    Text(String),
    /// A JSON body with an implicit success status.
    Json(Value),
    /// Success with nothing to say.
    Empty,
}

impl Outcome {
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Outcome::Response(r) => r.status,
            Outcome::Text(_) | Outcome::Json(_) => 200,
            Outcome::Empty => 204,
        }
    }

    /// Normalize into a [`Response`]. Text becomes `text/plain`, JSON
    /// becomes `application/json`, empty carries no body at all.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            Outcome::Response(r) => r,
            Outcome::Text(s) => {
                let mut r = Response::new(200, Value::String(s));
                r.set_header("content-type", "text/plain");
                r
            }
            Outcome::Json(v) => {
                let mut r = Response::new(200, v);
                r.set_header("content-type", "application/json");
                r
            }
            Outcome::Empty => Response::new(204, Value::Null),
        }
    }
}

impl From<Response> for Outcome {
    fn from(r: Response) -> Self {
        Outcome::Response(r)
    }
}

impl From<Value> for Outcome {
    fn from(v: Value) -> Self {
        Outcome::Json(v)
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        Outcome::Text(s)
    }
}

impl From<&str> for Outcome {
    fn from(s: &str) -> Self {
        Outcome::Text(s.to_string())
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::Empty
    }
}
