//! Route pattern matching
//!
//! A pattern has a path part and an optional query part:
//!
//! ```text
//! vault_add_edit_item/{vault_add_edit_type}?vault_edit_id={vault_edit_id}?...
//! ```
//!
//! Path segments are literals or `{placeholder}`s and must all be present.
//! Query parts are `key={placeholder}` pairs joined by `?`; each one is
//! optional in a received route. Argument values are percent-encoded when a
//! route is built and decoded when it is matched, so a value may contain the
//! `/` and `?` separators.

use std::borrow::Cow;

use super::{ArgBundle, NavError};

/// Literal the navigation layer writes for an unset nullable argument
pub const NULL_ARGUMENT: &str = "null";

/// Percent-encode an argument value for use inside a route
pub fn encode_argument(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// A destination's route pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePattern {
    pattern: &'static str,
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Placeholder(name),
            None => Segment::Literal(raw),
        }
    }
}

impl RoutePattern {
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    pub fn as_str(&self) -> &'static str {
        self.pattern
    }

    /// Leading literal path segment, used for back stack lookups
    pub fn prefix(&self) -> &'static str {
        let path = self.split().0;
        path.split('/').next().unwrap_or(path)
    }

    fn split(&self) -> (&'static str, Option<&'static str>) {
        match self.pattern.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.pattern, None),
        }
    }

    /// Match `route` against this pattern and collect its arguments.
    ///
    /// A query value equal to [`NULL_ARGUMENT`] is read as absent, so an id
    /// whose text is literally `null` does not survive a route round trip.
    pub fn match_route(&self, route: &str) -> Result<ArgBundle, NavError> {
        let mismatch = || NavError::RouteMismatch {
            route: route.to_string(),
            pattern: self.pattern.to_string(),
        };

        let (pattern_path, pattern_query) = self.split();
        let (route_path, route_query) = match route.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (route, None),
        };

        let mut bundle = ArgBundle::new();

        let pattern_segments: Vec<&str> = pattern_path.split('/').collect();
        let route_segments: Vec<&str> = route_path.split('/').collect();
        if pattern_segments.len() != route_segments.len() {
            return Err(mismatch());
        }
        for (raw, actual) in pattern_segments.iter().zip(&route_segments) {
            match Segment::parse(raw) {
                Segment::Literal(expected) if expected == *actual => {}
                Segment::Literal(_) => return Err(mismatch()),
                Segment::Placeholder(_) if actual.is_empty() => return Err(mismatch()),
                Segment::Placeholder(name) => {
                    let value = urlencoding::decode(actual).map_err(|_| mismatch())?;
                    bundle.insert(name, Some(value.into_owned()));
                }
            }
        }

        let Some(pattern_query) = pattern_query else {
            if route_query.is_some_and(|q| !q.is_empty()) {
                return Err(mismatch());
            }
            return Ok(bundle);
        };

        let received: Vec<(&str, &str)> = route_query
            .map(|q| q.split('?').filter_map(|part| part.split_once('=')).collect())
            .unwrap_or_default();

        for part in pattern_query.split('?') {
            let Some((key, raw)) = part.split_once('=') else {
                continue;
            };
            let Segment::Placeholder(name) = Segment::parse(raw) else {
                continue;
            };
            let value = received
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .filter(|v| *v != NULL_ARGUMENT)
                .map(urlencoding::decode)
                .transpose()
                .map_err(|_| mismatch())?;
            bundle.insert(name, value.map(Cow::into_owned));
        }

        Ok(bundle)
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pattern)
    }
}
