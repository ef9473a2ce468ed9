//! Route-group state: what nesting accumulates onto registrations.

use crate::middleware::MiddlewareEntry;

/// Registration-time context a router handle carries.
///
/// Entering a group derives a child value from the parent; leaving restores
/// the parent wholesale. Nothing in here is shared, so a panicking group
/// body can never leave half-merged state behind.
#[derive(Debug, Clone, Default)]
pub struct GroupState {
    /// Concatenated path prefix of every enclosing group.
    pub prefix: String,
    /// Accumulated middleware, outermost group first.
    pub middleware: Vec<MiddlewareEntry>,
    /// Host rule; the innermost group to set one wins.
    pub domain: Option<String>,
    /// Name staged by `Router::name`, consumed by the next registration
    /// and dropped on group entry.
    pub pending_name: Option<String>,
}

impl GroupState {
    pub(crate) fn derive(&self, attrs: &GroupAttributes) -> GroupState {
        let mut prefix = self.prefix.clone();
        if let Some(p) = &attrs.prefix {
            prefix.push_str(p);
        }
        let mut middleware = self.middleware.clone();
        middleware.extend(attrs.middleware.iter().cloned());
        GroupState {
            prefix,
            middleware,
            domain: attrs.domain.clone().or_else(|| self.domain.clone()),
            pending_name: None,
        }
    }

    pub(crate) fn take_pending_name(&mut self) -> Option<String> {
        self.pending_name.take()
    }
}

/// Attributes of one `group` call.
#[derive(Debug, Clone, Default)]
pub struct GroupAttributes {
    pub(crate) prefix: Option<String>,
    pub(crate) middleware: Vec<MiddlewareEntry>,
    pub(crate) domain: Option<String>,
}

impl GroupAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path prefix appended verbatim to the enclosing prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// One middleware entry; call repeatedly to add several in order.
    pub fn middleware(mut self, entry: impl Into<MiddlewareEntry>) -> Self {
        self.middleware.push(entry.into());
        self
    }

    /// Host rule for every route declared inside the group.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}
