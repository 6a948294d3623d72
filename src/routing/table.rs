//! Route storage.
//!
//! # Responsibilities
//! - Hold routes per method, split into literal and pattern keys
//! - Replace handlers on re-registration
//! - Expose a read-only view for diagnostics
//!
//! # Design Decisions
//! - Literal keys live in a HashMap (O(1) exact lookup)
//! - Pattern keys live in a Vec and are tried in registration order
//! - A replaced pattern keeps its original position

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::Dispatch;

use crate::routing::handler::Handler;
use crate::routing::method::Method;
use crate::routing::pattern::RouteKey;

/// A registered route.
#[derive(Clone)]
pub struct RouteEntry {
    path: String,
    key: RouteKey,
    handler: Arc<dyn Handler>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, key: RouteKey, handler: Arc<dyn Handler>) -> Self {
        Self {
            path: path.into(),
            key,
            handler,
        }
    }

    /// The path as registered, e.g. `/users/{id}`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Segment depth → placeholder name. `None` for literal routes.
    pub fn param_depths(&self) -> Option<&BTreeMap<usize, String>> {
        match &self.key {
            RouteKey::Literal(_) => None,
            RouteKey::Pattern(pattern) => Some(pattern.depths()),
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("key", &self.key.as_str())
            .finish_non_exhaustive()
    }
}

/// Routes registered under one method.
#[derive(Debug, Clone, Default)]
pub struct MethodRoutes {
    literals: HashMap<String, RouteEntry>,
    patterns: Vec<RouteEntry>,
}

impl MethodRoutes {
    /// Exact lookup by literal path.
    pub fn literal(&self, path: &str) -> Option<&RouteEntry> {
        self.literals.get(path)
    }

    /// Pattern routes, in registration order.
    pub fn patterns(&self) -> &[RouteEntry] {
        &self.patterns
    }

    pub fn literals(&self) -> impl Iterator<Item = &RouteEntry> {
        self.literals.values()
    }

    /// Look up an entry by its key string.
    pub fn get(&self, key: &str) -> Option<&RouteEntry> {
        self.literals
            .get(key)
            .or_else(|| self.patterns.iter().find(|e| e.key.as_str() == key))
    }

    pub fn len(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if an existing entry was replaced.
    fn insert(&mut self, entry: RouteEntry) -> bool {
        match &entry.key {
            RouteKey::Literal(path) => self.literals.insert(path.clone(), entry).is_some(),
            RouteKey::Pattern(pattern) => {
                let existing = self
                    .patterns
                    .iter_mut()
                    .find(|e| e.key.as_str() == pattern.as_str());
                match existing {
                    Some(slot) => {
                        *slot = entry;
                        true
                    }
                    None => {
                        self.patterns.push(entry);
                        false
                    }
                }
            }
        }
    }
}

/// Method → route key → route entry.
#[derive(Clone)]
pub struct RouteTable {
    routes: HashMap<Method, MethodRoutes>,
    log: Dispatch,
}

impl RouteTable {
    /// An empty table that logs nothing.
    pub fn new() -> Self {
        Self::with_logger(Dispatch::none())
    }

    /// An empty table that logs registrations to `log`.
    pub fn with_logger(log: Dispatch) -> Self {
        Self {
            routes: HashMap::new(),
            log,
        }
    }

    /// Store `entry` under `method`, replacing any entry with the same key.
    pub fn insert(&mut self, method: Method, entry: RouteEntry) {
        let path = entry.path.clone();
        let key = entry.key.as_str().to_string();
        let replaced = self.routes.entry(method).or_default().insert(entry);

        tracing::dispatcher::with_default(&self.log, || {
            tracing::debug!(method = %method, path = %path, key = %key, replaced, "Route registered");
        });
    }

    /// Routes for `method`, if any were registered.
    pub fn routes_for(&self, method: Method) -> Option<&MethodRoutes> {
        self.routes.get(&method)
    }

    /// Methods with at least one route, sorted.
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.routes.keys().copied().collect();
        methods.sort();
        methods
    }

    /// Every route, grouped by method. Literals come before patterns within a method.
    pub fn iter(&self) -> impl Iterator<Item = (Method, &RouteEntry)> {
        self.methods().into_iter().flat_map(move |method| {
            let routes = &self.routes[&method];
            let mut literals: Vec<&RouteEntry> = routes.literals().collect();
            literals.sort_by(|a, b| a.path.cmp(&b.path));
            literals
                .into_iter()
                .chain(routes.patterns.iter())
                .map(move |entry| (method, entry))
        })
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(MethodRoutes::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(m, e)| (m, e.key.as_str())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RouteRequest;
    use axum::response::{IntoResponse, Response};

    fn entry(path: &str, body: &'static str) -> RouteEntry {
        let handler = move |_: &RouteRequest| -> Response { body.into_response() };
        RouteEntry::new(path, RouteKey::compile(path).unwrap(), Arc::new(handler))
    }

    #[test]
    fn test_literal_and_pattern_split() {
        let mut table = RouteTable::new();
        table.insert(Method::Get, entry("/users", "list"));
        table.insert(Method::Get, entry("/users/{id}", "show"));

        let routes = table.routes_for(Method::Get).unwrap();
        assert!(routes.literal("/users").is_some());
        assert_eq!(routes.patterns().len(), 1);
        assert_eq!(routes.patterns()[0].key().as_str(), "^/users/([a-z0-9-_]+)$");
        assert!(routes.get("^/users/([a-z0-9-_]+)$").is_some());
        assert_eq!(table.len(), 2);
        assert!(table.routes_for(Method::Post).is_none());
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut table = RouteTable::new();
        table.insert(Method::Get, entry("/a/{x}", "first"));
        table.insert(Method::Get, entry("/b/{y}", "second"));
        table.insert(Method::Get, entry("/a/{z}", "third"));

        let patterns = table.routes_for(Method::Get).unwrap().patterns();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].path(), "/a/{z}");
        assert_eq!(patterns[1].path(), "/b/{y}");
    }

    #[test]
    fn test_param_depths() {
        let e = entry("/posts/{postId}/comments/{commentId}", "c");
        let depths = e.param_depths().unwrap();
        assert_eq!(depths.get(&1).map(String::as_str), Some("postId"));
        assert_eq!(depths.get(&3).map(String::as_str), Some("commentId"));
        assert!(entry("/posts", "p").param_depths().is_none());
    }

    #[test]
    fn test_iter_is_grouped_by_method() {
        let mut table = RouteTable::new();
        table.insert(Method::Post, entry("/resource", "b"));
        table.insert(Method::Get, entry("/resource", "a"));
        table.insert(Method::Delete, entry("/resource", "c"));

        let methods: Vec<Method> = table.iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![Method::Get, Method::Delete, Method::Post]);
        assert_eq!(table.methods(), methods);
    }
}
