//! Normalized router model.
//!
//! The rule-list router ([`RouterStack`](super::RouterStack)) is described
//! by a [`RouterModel`]: a root group holding its rules in order, plus any
//! nested groups. [`match_route_group`] resolves a path against one group
//! the way every router does: first structural match in declaration order,
//! then the group's not-found rule.

use super::group::RouteGroup;
use super::pattern::Params;
use super::route::Route;

/// Result of matching a path against a group.
#[derive(Debug, Clone, Default)]
pub struct RouteMatch {
	pub route: Option<Route>,
	pub params: Params,
}

impl RouteMatch {
	pub fn is_match(&self) -> bool {
		self.route.is_some()
	}
}

/// A router described as a root group plus nested groups.
#[derive(Debug, Clone)]
pub struct RouterModel {
	root_path: String,
	root_group: RouteGroup,
	groups: Vec<RouteGroup>,
}

impl RouterModel {
	/// Builds the model of a rule-list router rooted at `root_path`.
	pub fn from_rules(root_path: impl Into<String>, rules: Vec<Route>) -> Self {
		let root_path = root_path.into();
		Self {
			root_group: RouteGroup::new(root_path.clone(), rules).mark_root(),
			root_path,
			groups: Vec::new(),
		}
	}

	pub fn with_group(mut self, group: RouteGroup) -> Self {
		self.groups.push(group);
		self
	}

	pub fn root_path(&self) -> &str {
		&self.root_path
	}

	pub fn root_group(&self) -> &RouteGroup {
		&self.root_group
	}

	/// Matches `path` against the root group, then the nested groups, and
	/// returns the owning group with the match. The first not-found rule is
	/// used only when no group matches, and is owned by the root group.
	pub fn resolve(&self, path: &str) -> (&RouteGroup, RouteMatch) {
		let groups = || std::iter::once(&self.root_group).chain(&self.groups);
		for group in groups() {
			let matched = match_route_group(group, path);
			if matched.route.as_ref().is_some_and(|route| !route.is_not_found()) {
				return (group, matched);
			}
		}
		let not_found = groups()
			.flat_map(RouteGroup::routes)
			.find(|route| route.is_not_found())
			.cloned();
		(
			&self.root_group,
			RouteMatch {
				route: not_found,
				params: Params::new(),
			},
		)
	}
}

/// Resolves `path` within `group`, falling back to its not-found rule.
pub fn match_route_group(group: &RouteGroup, path: &str) -> RouteMatch {
	for route in group.routes() {
		if let Some(params) = route.matches(path) {
			return RouteMatch {
				route: Some(route.clone()),
				params,
			};
		}
	}
	RouteMatch {
		route: group.routes().iter().find(|route| route.is_not_found()).cloned(),
		params: Params::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn model() -> RouterModel {
		RouterModel::from_rules(
			"/",
			vec![
				Route::on("/").render(|_| "home"),
				Route::on("/users/:id").render(|_| "user"),
				Route::on_not_found().render(|_| "missing"),
			],
		)
	}

	#[rstest]
	fn test_from_rules_builds_root_group() {
		let model = model();
		assert!(model.root_group().is_root());
		assert_eq!(model.root_group().routes().len(), 3);
		assert_eq!(model.root_path(), "/");
	}

	#[rstest]
	#[case("/", "/")]
	#[case("/users/9", "/users/:id")]
	#[case("/nowhere", "__swiftx_not_found__")]
	fn test_match_route_group(#[case] path: &str, #[case] expected: &str) {
		let model = model();
		let matched = match_route_group(model.root_group(), path);
		assert_eq!(matched.route.map(|r| r.path().to_string()).as_deref(), Some(expected));
	}

	#[rstest]
	fn test_no_match_without_not_found() {
		let group = RouteGroup::new("/", vec![Route::on("/").render(|_| "home")]);
		let matched = match_route_group(&group, "/missing");
		assert!(!matched.is_match());
		assert!(matched.params.is_empty());
	}

	#[rstest]
	fn test_nested_match_wins_over_root_not_found() {
		let model = model()
			.with_group(RouteGroup::new("/admin", vec![Route::on("/admin/:page").render(|_| "admin")]));
		let (group, matched) = model.resolve("/admin/users");
		assert_eq!(group.root_path(), "/admin");
		assert_eq!(matched.params.get("page").map(String::as_str), Some("users"));

		let (group, matched) = model.resolve("/elsewhere");
		assert!(group.is_root());
		assert!(matched.route.is_some_and(|r| r.is_not_found()));
	}

	#[rstest]
	fn test_resolve_checks_nested_groups() {
		let model = model()
			.with_group(RouteGroup::new("/admin", vec![Route::on("/admin").render(|_| "admin")]));
		let (group, matched) = model.resolve("/admin");
		assert_eq!(group.root_path(), "/admin");
		assert_eq!(matched.route.map(|r| r.path().to_string()).as_deref(), Some("/admin"));
	}
}
