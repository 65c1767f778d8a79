//! # Hash Router
//!
//! Matches the location fragment (`#/s/SAMSUNG`) against path patterns made
//! of literal segments, `:name` parameters and a `*` wildcard. The first
//! pattern that matches, in declaration order, wins.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .map(|s| {
                if s == "*" {
                    Segment::Wildcard
                } else if let Some(name) = s.strip_prefix(':') {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn ends_with_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// Binds parameters if `path` matches. The wildcard captures the
    /// unmatched tail, without its leading `/`.
    pub fn matches(&self, path: &str) -> Option<(Params, Option<String>)> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() && !self.ends_with_wildcard() {
            return None;
        }

        let mut params = Params::default();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => {
                    let rest = parts.get(i..).map(|p| p.join("/")).unwrap_or_default();
                    return Some((params, Some(rest)));
                }
                Segment::Param(name) => {
                    params.0.insert(name.clone(), parts.get(i)?.to_string());
                }
                Segment::Literal(lit) => {
                    if parts.get(i) != Some(&lit.as_str()) {
                        return None;
                    }
                }
            }
        }
        Some((params, None))
    }
}

/// Named segments bound by a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug)]
pub struct RouteMatch<'r, R> {
    pub route: &'r R,
    pub pattern: &'r Pattern,
    pub params: Params,
    /// Tail captured by a `*` segment
    pub rest: Option<String>,
}

/// Ordered route table.
#[derive(Debug, Clone)]
pub struct Router<R> {
    routes: Vec<(Pattern, R)>,
}

impl<R> Default for Router<R> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<R> Router<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, route: R) -> Self {
        self.routes.push((Pattern::parse(pattern), route));
        self
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, R>> {
        self.routes.iter().find_map(|(pattern, route)| {
            pattern.matches(path).map(|(params, rest)| RouteMatch {
                route,
                pattern,
                params,
                rest,
            })
        })
    }
}

/// `"#/s/SAMSUNG"` -> `"/s/SAMSUNG"`; an empty fragment is the root.
pub fn path_from_hash(hash: &str) -> String {
    let path = hash.strip_prefix('#').unwrap_or(hash);
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Link target for a path.
pub fn href(path: &str) -> String {
    format!("#{path}")
}

/// The current location. Navigating replaces the fragment; history is left
/// to whatever owns the real location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: String,
}

impl Navigator {
    pub fn from_hash(hash: &str) -> Self {
        Self {
            current: path_from_hash(hash),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn navigate(&mut self, path: &str) {
        tracing::debug!(from = %self.current, to = path, "navigate");
        self.current = path_from_hash(path);
    }

    pub fn resolve<'r, R>(&self, router: &'r Router<R>) -> Option<RouteMatch<'r, R>> {
        router.resolve(&self.current)
    }
}
