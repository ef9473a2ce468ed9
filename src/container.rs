//! Service container boundary.
//!
//! The router never constructs user classes itself. Controller classes,
//! named middleware, and typed services all come out of a [`Container`], so
//! applications keep whatever wiring style they already have. How a class's
//! constructor dependencies get assembled is the container's business; the
//! router only asks for finished instances.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::controller::Controller;
use crate::middleware::Middleware;

/// Instance lookup contract consumed by dispatch.
pub trait Container: Send + Sync {
    /// A shared service by type. `None` means the container does not know
    /// the type, which lets parameter defaults kick in.
    fn resolve(&self, ty: TypeId) -> Option<Arc<dyn Any + Send + Sync>>;

    /// A controller class by registered name.
    fn controller(&self, class: &str) -> Option<Arc<dyn Controller>>;

    /// A middleware class by registered name.
    fn middleware(&self, class: &str) -> Option<Arc<dyn Middleware>>;
}

impl dyn Container {
    /// Typed convenience over [`Container::resolve`].
    pub fn resolve_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.resolve(TypeId::of::<T>())
            .and_then(|service| service.downcast::<T>().ok())
    }
}

/// Minimal map-backed container: pre-built instances keyed by type or name.
#[derive(Default)]
pub struct BasicContainer {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    controllers: HashMap<String, Arc<dyn Controller>>,
    middleware: HashMap<String, Arc<dyn Middleware>>,
}

impl BasicContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared service instance under its concrete type.
    pub fn insert<T: Any + Send + Sync>(&mut self, service: T) -> &mut Self {
        self.insert_arc(Arc::new(service))
    }

    pub fn insert_arc<T: Any + Send + Sync>(&mut self, service: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), service);
        self
    }

    pub fn register_controller(
        &mut self,
        class: impl Into<String>,
        controller: Arc<dyn Controller>,
    ) -> &mut Self {
        let class = class.into();
        debug!(%class, "controller class registered");
        self.controllers.insert(class, controller);
        self
    }

    pub fn register_middleware(
        &mut self,
        class: impl Into<String>,
        middleware: Arc<dyn Middleware>,
    ) -> &mut Self {
        let class = class.into();
        debug!(%class, "middleware class registered");
        self.middleware.insert(class, middleware);
        self
    }
}

impl Container for BasicContainer {
    fn resolve(&self, ty: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.get(&ty).cloned()
    }

    fn controller(&self, class: &str) -> Option<Arc<dyn Controller>> {
        self.controllers.get(class).cloned()
    }

    fn middleware(&self, class: &str) -> Option<Arc<dyn Middleware>> {
        self.middleware.get(class).cloned()
    }
}

/// Container that knows nothing. Backs routers built without one; every
/// class-name controller or named middleware then fails as unregistered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullContainer;

impl Container for NullContainer {
    fn resolve(&self, _ty: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }

    fn controller(&self, _class: &str) -> Option<Arc<dyn Controller>> {
        None
    }

    fn middleware(&self, _class: &str) -> Option<Arc<dyn Middleware>> {
        None
    }
}
