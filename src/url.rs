//! Reverse routing: from a route name back to a concrete path.

use std::fmt::Display;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RouterError;
use crate::registry::RouteRegistry;

/// `/?` marker immediately before an optional token, normalized to a plain
/// slash before substitution so both spellings generate identically.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\?(\{[A-Za-z_][A-Za-z0-9_]*\?\})").expect("marker regex")
});

/// An optional token nobody supplied, together with its preceding slash.
static LEFTOVER_OPTIONAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/?\{[A-Za-z_][A-Za-z0-9_]*\?\}").expect("optional token regex")
});

/// Generates concrete paths from named route templates.
///
/// Bound to one route table; a generator taken from a router keeps seeing
/// routes registered after it was created.
#[derive(Clone)]
pub struct UrlGenerator {
    registry: Arc<RwLock<RouteRegistry>>,
}

impl UrlGenerator {
    pub(crate) fn new(registry: Arc<RwLock<RouteRegistry>>) -> Self {
        Self { registry }
    }

    /// Build the path for a named route.
    ///
    /// Supplied parameters replace their `{name}`/`{name?}` tokens in
    /// stringified form. Unsupplied optional tokens vanish along with their
    /// preceding slash; an unsupplied required token is left in place for
    /// the caller to notice. A template reduced to nothing yields `/`.
    pub fn make(
        &self,
        name: &str,
        params: &[(&str, &dyn Display)],
    ) -> Result<String, RouterError> {
        let route = self
            .registry
            .read()
            .expect("route registry lock poisoned")
            .find_by_name(name)
            .ok_or_else(|| RouterError::UndefinedRoute {
                name: name.to_string(),
            })?;

        let mut url = MARKER_RE.replace_all(&route.path, "/$1").into_owned();
        for (key, value) in params {
            let value = value.to_string();
            url = url.replace(&format!("{{{key}}}"), &value);
            url = url.replace(&format!("{{{key}?}}"), &value);
        }
        let url = LEFTOVER_OPTIONAL_RE.replace_all(&url, "").into_owned();
        let url = url.replace("/?", "/");
        if url.is_empty() {
            Ok("/".to_string())
        } else {
            Ok(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerRef;
    use crate::route::{Route, RouteMethod};
    use http::Method;

    fn generator(routes: &[(&str, &str)]) -> UrlGenerator {
        let mut registry = RouteRegistry::new();
        for (name, path) in routes {
            let mut route = Route::new(
                RouteMethod::Only(Method::GET),
                path.to_string(),
                ControllerRef::named("Pages@show"),
            );
            route.name = Some(name.to_string());
            registry.save(route);
        }
        UrlGenerator::new(Arc::new(RwLock::new(registry)))
    }

    #[test]
    fn substitutes_required_tokens() {
        let gen = generator(&[("products.show", "/products/{product}")]);
        assert_eq!(
            gen.make("products.show", &[("product", &42)]).unwrap(),
            "/products/42"
        );
    }

    #[test]
    fn optional_token_vanishes_with_its_slash() {
        let gen = generator(&[("pages.show", "/pages/{page}/{section?}")]);
        assert_eq!(
            gen.make("pages.show", &[("page", &"intro")]).unwrap(),
            "/pages/intro"
        );
        assert_eq!(
            gen.make("pages.show", &[("page", &"intro"), ("section", &"usage")])
                .unwrap(),
            "/pages/intro/usage"
        );
    }

    #[test]
    fn marker_form_generates_like_the_plain_form() {
        let gen = generator(&[("docs", "/docs/?{page?}")]);
        assert_eq!(gen.make("docs", &[]).unwrap(), "/docs");
        assert_eq!(gen.make("docs", &[("page", &"api")]).unwrap(), "/docs/api");
    }

    #[test]
    fn fully_optional_template_reduces_to_root() {
        let gen = generator(&[("home", "/{page?}")]);
        assert_eq!(gen.make("home", &[]).unwrap(), "/");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let gen = generator(&[]);
        assert_eq!(
            gen.make("nope", &[]).unwrap_err(),
            RouterError::UndefinedRoute {
                name: "nope".to_string()
            }
        );
    }
}
