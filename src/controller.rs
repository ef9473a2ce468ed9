//! Controller references and the contract for container-built controllers.

use std::fmt;
use std::sync::Arc;

use crate::error::RouterError;
use crate::resolver::{Args, Signature};
use crate::response::Outcome;

/// What controllers and middleware return.
pub type ControllerResult = Result<Outcome, RouterError>;

/// Closure form of a controller body.
pub type ControllerFn = Arc<dyn Fn(Args) -> ControllerResult + Send + Sync>;

/// A controller as written at registration.
///
/// Three shapes are accepted: an inline closure with a declared parameter
/// [`Signature`], a `(class, action)` pair, and the compact
/// `"Class@action"` string. The class-based shapes stay unresolved until a
/// request actually hits the route; only then is the class pulled from the
/// container.
#[derive(Clone)]
pub enum ControllerRef {
    /// Inline closure plus the signature driving argument resolution.
    Function {
        signature: Signature,
        body: ControllerFn,
    },
    /// Container class and action name.
    Method { class: String, action: String },
    /// `"Class@action"` reference, parsed at dispatch time.
    Named(String),
}

impl ControllerRef {
    pub fn function<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(Args) -> ControllerResult + Send + Sync + 'static,
    {
        ControllerRef::Function {
            signature,
            body: Arc::new(body),
        }
    }

    pub fn method(class: impl Into<String>, action: impl Into<String>) -> Self {
        ControllerRef::Method {
            class: class.into(),
            action: action.into(),
        }
    }

    pub fn named(reference: impl Into<String>) -> Self {
        ControllerRef::Named(reference.into())
    }

    /// How this controller shows up in logs and error messages.
    pub fn reference(&self) -> String {
        match self {
            ControllerRef::Function { .. } => "closure".to_string(),
            ControllerRef::Method { class, action } => format!("{class}@{action}"),
            ControllerRef::Named(reference) => reference.clone(),
        }
    }
}

impl fmt::Debug for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerRef::Function { signature, .. } => f
                .debug_struct("Function")
                .field("signature", signature)
                .finish_non_exhaustive(),
            ControllerRef::Method { class, action } => f
                .debug_struct("Method")
                .field("class", class)
                .field("action", action)
                .finish(),
            ControllerRef::Named(reference) => f.debug_tuple("Named").field(reference).finish(),
        }
    }
}

/// Split a `"Class@action"` reference into its parts.
pub(crate) fn split_reference(reference: &str) -> Result<(&str, &str), RouterError> {
    match reference.split_once('@') {
        Some((class, action)) if !class.is_empty() && !action.is_empty() => Ok((class, action)),
        _ => Err(RouterError::InvalidController {
            reference: reference.to_string(),
            reason: "expected 'Class@action' form".to_string(),
        }),
    }
}

/// A controller class living in the container.
///
/// `signature` declares how arguments for an action should be resolved;
/// returning `None` marks the action as unknown and fails the dispatch.
pub trait Controller: Send + Sync {
    fn signature(&self, action: &str) -> Option<Signature>;
    fn call(&self, action: &str, args: Args) -> ControllerResult;
}

/// Conversion into [`ControllerRef`] for the registration surface.
pub trait IntoController {
    fn into_controller(self) -> ControllerRef;
}

impl IntoController for ControllerRef {
    fn into_controller(self) -> ControllerRef {
        self
    }
}

impl<F> IntoController for (Signature, F)
where
    F: Fn(Args) -> ControllerResult + Send + Sync + 'static,
{
    fn into_controller(self) -> ControllerRef {
        ControllerRef::function(self.0, self.1)
    }
}

impl IntoController for (&str, &str) {
    fn into_controller(self) -> ControllerRef {
        ControllerRef::method(self.0, self.1)
    }
}

impl IntoController for (String, String) {
    fn into_controller(self) -> ControllerRef {
        ControllerRef::method(self.0, self.1)
    }
}

impl IntoController for &str {
    fn into_controller(self) -> ControllerRef {
        ControllerRef::named(self)
    }
}

impl IntoController for String {
    fn into_controller(self) -> ControllerRef {
        ControllerRef::named(self)
    }
}
