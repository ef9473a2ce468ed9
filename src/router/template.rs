//! Path-template compilation.
//!
//! Templates like `/users/{id}/posts/{post?}` compile to anchored regexes.
//! Each `{name}` token becomes a named capture using the fragment registered
//! for that name (default `[^/]+`); `{name?}` makes the segment optional
//! together with its preceding slash. Compiled artifacts are memoized per
//! table revision: changing a fragment clears the caches, so existing route
//! templates pick the new fragment up on their next match, never
//! retroactively.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::route::ParamVec;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(\?)?\}").expect("token regex"));

/// Fragment used for parameters with no registered pattern: one path
/// segment.
pub(crate) const DEFAULT_FRAGMENT: &str = "[^/]+";

/// One template compiled to an anchored regex plus its capture plan.
///
/// Capture groups are uniquified (`p0`, `p1`, ...) rather than named after
/// the parameter, so duplicate parameter names never collide; `groups` maps
/// them back to declared names in template order. The p-numbered names are
/// reserved: `set_fragment` rejects fragments that define one, and a domain
/// pattern that reuses one next to `{tokens}` fails to compile at first
/// match.
pub(crate) struct CompiledTemplate {
    regex: Regex,
    groups: Vec<(String, Arc<str>)>,
}

impl CompiledTemplate {
    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Match a path and extract its parameters, or `None` on mismatch.
    /// Optional segments that did not participate yield no entry at all.
    pub(crate) fn capture(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        for (group, name) in &self.groups {
            if let Some(m) = caps.name(group) {
                params.push((name.clone(), m.as_str().to_string()));
            }
        }
        Some(params)
    }
}

/// Per-router pattern fragments plus compiled-template caches.
pub(crate) struct PatternTable {
    fragments: RwLock<HashMap<String, String>>,
    paths: DashMap<String, Arc<CompiledTemplate>>,
    domains: DashMap<String, Arc<CompiledTemplate>>,
}

impl PatternTable {
    pub(crate) fn new() -> Self {
        Self {
            fragments: RwLock::new(HashMap::new()),
            paths: DashMap::new(),
            domains: DashMap::new(),
        }
    }

    /// Register or replace the fragment for one parameter name. Malformed
    /// fragments, and fragments defining a reserved `p<digits>` capture
    /// group, are a programming error and panic immediately rather than at
    /// first match.
    pub(crate) fn set_fragment(&self, name: &str, fragment: &str) {
        let anchored = match Regex::new(&format!("^(?:{fragment})$")) {
            Ok(re) => re,
            Err(err) => panic!("route pattern '{name}' is not a valid regex: {err}"),
        };
        if let Some(group) = anchored.capture_names().flatten().find(|g| is_reserved_group(g)) {
            panic!("route pattern '{name}' defines reserved capture group '{group}'");
        }
        self.fragments
            .write()
            .expect("pattern table lock poisoned")
            .insert(name.to_string(), fragment.to_string());
        self.paths.clear();
        self.domains.clear();
        debug!(name, fragment, "route pattern updated, template caches cleared");
    }

    /// Compiled form of a path template, cached until the table changes.
    pub(crate) fn compile_path(&self, template: &str) -> Arc<CompiledTemplate> {
        if let Some(hit) = self.paths.get(template) {
            return hit.clone();
        }
        let compiled = Arc::new(self.compile(template, true));
        self.paths.insert(template.to_string(), compiled.clone());
        compiled
    }

    /// Compiled form of a domain pattern. Domains are raw regexes after
    /// token substitution; literals are not escaped.
    pub(crate) fn compile_domain(&self, pattern: &str) -> Arc<CompiledTemplate> {
        if let Some(hit) = self.domains.get(pattern) {
            return hit.clone();
        }
        let compiled = Arc::new(self.compile(pattern, false));
        self.domains.insert(pattern.to_string(), compiled.clone());
        compiled
    }

    fn fragment_for(&self, name: &str) -> String {
        self.fragments
            .read()
            .expect("pattern table lock poisoned")
            .get(name)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FRAGMENT.to_string())
    }

    fn compile(&self, template: &str, escape_literals: bool) -> CompiledTemplate {
        let mut body = String::with_capacity(template.len() + 16);
        let mut groups = Vec::new();
        let mut last = 0;

        for (index, caps) in TOKEN_RE.captures_iter(template).enumerate() {
            let token = caps.get(0).expect("whole-token group");
            let name = &caps[1];
            let optional = caps.get(2).is_some();
            let mut literal = &template[last..token.start()];
            last = token.end();

            // An optional segment absorbs one preceding slash, written
            // either `/{x?}` or the explicit marker form `/?{x?}`.
            let slash = if optional {
                if let Some(stripped) = literal.strip_suffix("/?") {
                    literal = stripped;
                    true
                } else if let Some(stripped) = literal.strip_suffix('/') {
                    literal = stripped;
                    true
                } else {
                    false
                }
            } else {
                false
            };

            if escape_literals {
                body.push_str(&regex::escape(literal));
            } else {
                body.push_str(literal);
            }

            let group = format!("p{index}");
            let fragment = self.fragment_for(name);
            if optional {
                if slash {
                    body.push_str(&format!("(?:/(?P<{group}>{fragment}))?"));
                } else {
                    body.push_str(&format!("(?:(?P<{group}>{fragment}))?"));
                }
            } else {
                body.push_str(&format!("(?P<{group}>{fragment})"));
            }
            groups.push((group, Arc::from(name)));
        }

        let tail = &template[last..];
        if escape_literals {
            body.push_str(&regex::escape(tail));
        } else {
            body.push_str(tail);
        }

        let regex = Regex::new(&format!("^{body}$"))
            .unwrap_or_else(|err| panic!("route template '{template}' does not compile: {err}"));

        // A path template whose segments are all optional must still answer
        // the bare root, since dropping every segment reverse-routes to `/`.
        let regex = if escape_literals && regex.is_match("") {
            Regex::new(&format!("^(?:{body}|/)$"))
                .unwrap_or_else(|err| panic!("route template '{template}' does not compile: {err}"))
        } else {
            regex
        };

        CompiledTemplate { regex, groups }
    }
}

// Generated capture names are `p` + token index; user fragments may not
// define them.
fn is_reserved_group(name: &str) -> bool {
    name.strip_prefix('p')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
