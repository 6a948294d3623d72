//! Route key compilation.
//!
//! # Responsibilities
//! - Scan a registered path for `{name}` placeholders
//! - Record the path depth of each placeholder
//! - Build an anchored, case-insensitive pattern for paths with placeholders
//!
//! # Design Decisions
//! - Paths without placeholders stay literal and are looked up by string equality
//! - Literal text around placeholders is escaped, so `.` in `/{name}.json` is a dot
//! - Placeholder names are opaque; the charset applies to the captured value only
//! - Patterns are compiled once, at registration

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use crate::routing::error::RouteError;
use crate::routing::params::PathParams;

/// Capture group substituted for every placeholder.
pub const PARAM_CAPTURE: &str = "([a-z0-9-_]+)";

/// A `{name}` span found in a registered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Text between the braces.
    pub name: String,
    /// Zero-based index of the `/`-delimited segment holding the placeholder.
    pub depth: usize,
    start: usize,
    end: usize,
}

/// The key a route is stored under.
#[derive(Debug, Clone)]
pub enum RouteKey {
    /// Path without placeholders, matched verbatim.
    Literal(String),
    /// Path with placeholders, matched by an anchored expression.
    Pattern(PathPattern),
}

impl RouteKey {
    /// Compile a registered path into its key.
    pub fn compile(path: &str) -> Result<Self, RouteError> {
        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath(path.to_string()));
        }

        let placeholders = scan_placeholders(path)?;
        if placeholders.is_empty() {
            return Ok(RouteKey::Literal(path.to_string()));
        }

        PathPattern::build(path, placeholders).map(RouteKey::Pattern)
    }

    /// The string form of the key.
    pub fn as_str(&self) -> &str {
        match self {
            RouteKey::Literal(path) => path,
            RouteKey::Pattern(pattern) => pattern.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, RouteKey::Pattern(_))
    }
}

/// Compiled form of a path with placeholders.
#[derive(Debug, Clone)]
pub struct PathPattern {
    key: String,
    regex: Regex,
    names: Vec<String>,
    depths: BTreeMap<usize, String>,
}

impl PathPattern {
    fn build(path: &str, placeholders: Vec<Placeholder>) -> Result<Self, RouteError> {
        let mut key = String::with_capacity(path.len() + placeholders.len() * PARAM_CAPTURE.len() + 2);
        key.push('^');

        let mut last = 0;
        for placeholder in &placeholders {
            key.push_str(&regex::escape(&path[last..placeholder.start]));
            key.push_str(PARAM_CAPTURE);
            last = placeholder.end + 1;
        }
        key.push_str(&regex::escape(&path[last..]));
        key.push('$');

        let regex = RegexBuilder::new(&key)
            .case_insensitive(true)
            .build()
            .map_err(|source| RouteError::Pattern {
                path: path.to_string(),
                source,
            })?;

        // Two placeholders in one segment share a depth; the rightmost name is kept.
        let depths = placeholders
            .iter()
            .map(|p| (p.depth, p.name.clone()))
            .collect();
        let names = placeholders.into_iter().map(|p| p.name).collect();

        Ok(Self {
            key,
            regex,
            names,
            depths,
        })
    }

    /// The anchored expression, e.g. `^/users/([a-z0-9-_]+)$`.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Placeholder names, in capture order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Segment depth → placeholder name.
    pub fn depths(&self) -> &BTreeMap<usize, String> {
        &self.depths
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and bind each capture to its placeholder name.
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let mut params = PathParams::new();
        for (name, value) in self.names.iter().zip(caps.iter().skip(1)) {
            if let Some(value) = value {
                params.push(name.as_str(), value.as_str());
            }
        }
        Some(params)
    }
}

/// Find every `{name}` span in `path`, left to right.
pub fn scan_placeholders(path: &str) -> Result<Vec<Placeholder>, RouteError> {
    let malformed = |position, reason| RouteError::MalformedPlaceholder {
        path: path.to_string(),
        position,
        reason,
    };

    let mut placeholders = Vec::new();
    let mut separators = 0usize;
    let mut open: Option<usize> = None;

    for (i, c) in path.char_indices() {
        match c {
            '/' => separators += 1,
            '{' => {
                if open.is_some() {
                    return Err(malformed(i, "nested '{'"));
                }
                open = Some(i);
            }
            '}' => {
                let start = open.take().ok_or_else(|| malformed(i, "'}' without '{'"))?;
                placeholders.push(Placeholder {
                    name: path[start + 1..i].to_string(),
                    depth: separators.saturating_sub(1),
                    start,
                    end: i,
                });
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        return Err(malformed(start, "unterminated '{'"));
    }

    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(path: &str) -> PathPattern {
        match RouteKey::compile(path).unwrap() {
            RouteKey::Pattern(p) => p,
            RouteKey::Literal(_) => panic!("expected a pattern key for {path}"),
        }
    }

    #[test]
    fn test_literal_key() {
        let key = RouteKey::compile("/users").unwrap();
        assert!(!key.is_pattern());
        assert_eq!(key.as_str(), "/users");
    }

    #[test]
    fn test_pattern_key_is_anchored() {
        let p = pattern("/users/{id}");
        assert_eq!(p.as_str(), "^/users/([a-z0-9-_]+)$");
        assert_eq!(p.names(), ["id".to_string()]);
    }

    #[test]
    fn test_depths() {
        let p = pattern("/posts/{postId}/comments/{commentId}");
        let expected: BTreeMap<usize, String> =
            [(1, "postId".to_string()), (3, "commentId".to_string())].into();
        assert_eq!(p.depths(), &expected);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_anchored() {
        let p = pattern("/users/{id}");
        assert!(p.is_match("/users/abc"));
        assert!(p.is_match("/users/ABC"));
        assert!(p.is_match("/USERS/user_1-a"));
        assert!(!p.is_match("/users/"));
        assert!(!p.is_match("/users/1/2"));
        assert!(!p.is_match("/users/a.b"));
        assert!(!p.is_match("/api/users/1"));
    }

    #[test]
    fn test_captures_keep_input_casing() {
        let p = pattern("/posts/{postId}/comments/{commentId}");
        let params = p.captures("/posts/AbC/comments/7").unwrap();
        assert_eq!(params.get("postId"), Some("AbC"));
        assert_eq!(params.get("commentId"), Some("7"));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let p = pattern("/files/{name}.json");
        assert!(p.is_match("/files/readme.json"));
        assert!(!p.is_match("/files/readmeXjson"));
    }

    #[test]
    fn test_malformed_placeholders() {
        assert!(matches!(
            RouteKey::compile("/users/{id"),
            Err(RouteError::MalformedPlaceholder { position: 7, .. })
        ));
        assert!(matches!(
            RouteKey::compile("/users/id}"),
            Err(RouteError::MalformedPlaceholder { .. })
        ));
        assert!(matches!(
            RouteKey::compile("/users/{{id}}"),
            Err(RouteError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_invalid_path() {
        assert!(matches!(RouteKey::compile(""), Err(RouteError::InvalidPath(_))));
        assert!(matches!(RouteKey::compile("users"), Err(RouteError::InvalidPath(_))));
    }
}
