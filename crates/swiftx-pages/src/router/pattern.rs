//! Path pattern matching.
//!
//! Patterns and paths are split on `/` with empty segments discarded, so
//! `/users/`, `users` and `/users` are the same path. A pattern matches
//! only a path with the same number of segments; `:name` segments capture
//! the path segment at the same position, every other segment must match
//! literally.

use std::collections::HashMap;

/// Parameters captured by a match, keyed by name.
pub type Params = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param(String),
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
	path.split('/').filter(|segment| !segment.is_empty())
}

/// A compiled path pattern such as `/users/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
	source: String,
	segments: Vec<Segment>,
}

impl PathPattern {
	pub fn new(pattern: impl Into<String>) -> Self {
		let source = pattern.into();
		let segments = segments(&source)
			.map(|segment| match segment.strip_prefix(':') {
				Some(name) => Segment::Param(name.to_string()),
				None => Segment::Literal(segment.to_string()),
			})
			.collect();
		Self { source, segments }
	}

	/// The pattern as written.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Names of the captured parameters, in order.
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Param(name) => Some(name.as_str()),
				Segment::Literal(_) => None,
			})
			.collect()
	}

	/// Matches `path`, returning the captured parameters on success.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let parts: Vec<&str> = segments(path).collect();
		if parts.len() != self.segments.len() {
			return None;
		}
		let mut params = Params::new();
		for (segment, part) in self.segments.iter().zip(parts) {
			match segment {
				Segment::Literal(literal) if literal == part => {}
				Segment::Literal(_) => return None,
				Segment::Param(name) => {
					params.insert(name.clone(), part.to_string());
				}
			}
		}
		Some(params)
	}

	/// Builds a path from `params`. Returns `None` when a parameter is missing.
	pub fn reverse(&self, params: &Params) -> Option<String> {
		let mut path = String::new();
		for segment in &self.segments {
			path.push('/');
			match segment {
				Segment::Literal(literal) => path.push_str(literal),
				Segment::Param(name) => path.push_str(params.get(name)?),
			}
		}
		if path.is_empty() {
			path.push('/');
		}
		Some(path)
	}
}

/// Result of [`match_path`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathMatch {
	pub matches: bool,
	pub params: Params,
}

/// One-shot match of `pattern` against `path`.
pub fn match_path(pattern: &str, path: &str) -> PathMatch {
	match PathPattern::new(pattern).matches(path) {
		Some(params) => PathMatch {
			matches: true,
			params,
		},
		None => PathMatch::default(),
	}
}
