//! Route definitions.
//!
//! A [`Route`] pairs a path pattern with what to do when it matches: render
//! a view, or run a side effect (`then`) without rendering. Two special
//! kinds never take part in pattern matching. The not-found route is used
//! when nothing else matches, the forbidden route when navigation is sent
//! to [`NavTarget::Forbidden`].
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::router::{Route, RouteProps};
//!
//! let routes = vec![
//!     Route::root(|_| View::text("Home")),
//!     Route::new("/users/:id", |props: RouteProps| {
//!         View::text(format!("User {}", props.param("id").unwrap_or_default()))
//!     }),
//!     Route::not_found(|_| View::text("Not found")),
//! ];
//! ```

use std::fmt;
use std::rc::Rc;

use super::context::RouterContext;
use super::navigation::Navigation;
use super::pattern::{Params, PathPattern};
use crate::component::{IntoView, View};

/// Sentinel path of the not-found route.
pub const NOT_FOUND_PATH: &str = "__swiftx_not_found__";

/// Sentinel path of the forbidden route.
pub const FORBIDDEN_PATH: &str = "__swiftx_forbidden__";

/// Whether `path` is the not-found sentinel, with or without a leading `/`.
pub fn is_not_found_path(path: &str) -> bool {
	path.strip_prefix('/').unwrap_or(path) == NOT_FOUND_PATH
}

/// Whether `path` is, or ends with, the forbidden sentinel.
pub fn is_forbidden_path(path: &str) -> bool {
	path.ends_with(FORBIDDEN_PATH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
	Normal,
	NotFound,
	Forbidden,
}

/// Props handed to a route's render function.
#[derive(Debug, Clone)]
pub struct RouteProps {
	pub params: Params,
	pub navigation: Navigation,
	pub context: RouterContext,
}

impl RouteProps {
	pub fn param(&self, name: &str) -> Option<String> {
		self.params.get(name).cloned()
	}
}

pub(crate) type RenderFn = Rc<dyn Fn(RouteProps) -> View>;
pub(crate) type ThenFn = Rc<dyn Fn(&Navigation, &Params)>;

/// What a matched route does.
#[derive(Clone)]
pub enum RouteAction {
	/// Renders a view.
	Render(RenderFn),
	/// Runs a side effect in a microtask and renders nothing new.
	Then(ThenFn),
	/// Renders nothing.
	Empty,
}

impl fmt::Debug for RouteAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Render(_) => f.write_str("Render(..)"),
			Self::Then(_) => f.write_str("Then(..)"),
			Self::Empty => f.write_str("Empty"),
		}
	}
}

fn render_fn<F, V>(component: F) -> RouteAction
where
	F: Fn(RouteProps) -> V + 'static,
	V: IntoView,
{
	RouteAction::Render(Rc::new(move |props| component(props).into_view()))
}

/// A single route.
#[derive(Debug, Clone)]
pub struct Route {
	kind: RouteKind,
	pattern: PathPattern,
	action: RouteAction,
}

impl Route {
	pub const NOT_FOUND: &'static str = NOT_FOUND_PATH;
	pub const FORBIDDEN: &'static str = FORBIDDEN_PATH;

	/// A route rendering `component` at `path`.
	pub fn new<F, V>(path: impl Into<String>, component: F) -> Self
	where
		F: Fn(RouteProps) -> V + 'static,
		V: IntoView,
	{
		Self::with_action(RouteKind::Normal, path.into(), render_fn(component))
	}

	/// A route at `/`.
	pub fn root<F, V>(component: F) -> Self
	where
		F: Fn(RouteProps) -> V + 'static,
		V: IntoView,
	{
		Self::new("/", component)
	}

	/// The route shown when no other route matches.
	pub fn not_found<F, V>(component: F) -> Self
	where
		F: Fn(RouteProps) -> V + 'static,
		V: IntoView,
	{
		Self::with_action(RouteKind::NotFound, NOT_FOUND_PATH.to_string(), render_fn(component))
	}

	/// The route shown after navigating to [`NavTarget::Forbidden`].
	pub fn forbidden<F, V>(component: F) -> Self
	where
		F: Fn(RouteProps) -> V + 'static,
		V: IntoView,
	{
		Self::with_action(RouteKind::Forbidden, FORBIDDEN_PATH.to_string(), render_fn(component))
	}

	/// A route at `path` that renders nothing.
	pub fn empty(path: impl Into<String>) -> Self {
		Self::with_action(RouteKind::Normal, path.into(), RouteAction::Empty)
	}

	/// Starts a rule for `path`, finished with [`RouteBuilder::render`] or
	/// [`RouteBuilder::then`].
	pub fn on(path: impl Into<String>) -> RouteBuilder {
		RouteBuilder {
			kind: RouteKind::Normal,
			path: path.into(),
		}
	}

	/// Starts a not-found rule.
	pub fn on_not_found() -> RouteBuilder {
		RouteBuilder {
			kind: RouteKind::NotFound,
			path: NOT_FOUND_PATH.to_string(),
		}
	}

	/// Starts a forbidden rule.
	pub fn on_forbidden() -> RouteBuilder {
		RouteBuilder {
			kind: RouteKind::Forbidden,
			path: FORBIDDEN_PATH.to_string(),
		}
	}

	fn with_action(kind: RouteKind, path: String, action: RouteAction) -> Self {
		Self {
			kind,
			pattern: PathPattern::new(path),
			action,
		}
	}

	pub fn kind(&self) -> RouteKind {
		self.kind
	}

	pub fn path(&self) -> &str {
		self.pattern.as_str()
	}

	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	pub fn action(&self) -> &RouteAction {
		&self.action
	}

	pub fn is_not_found(&self) -> bool {
		self.kind == RouteKind::NotFound
	}

	pub fn is_forbidden(&self) -> bool {
		self.kind == RouteKind::Forbidden
	}

	/// Matches `path` against this route. Special routes never match.
	pub fn matches(&self, path: &str) -> Option<Params> {
		match self.kind {
			RouteKind::Normal => self.pattern.matches(path),
			RouteKind::NotFound | RouteKind::Forbidden => None,
		}
	}
}

/// Rule builder returned by [`Route::on`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
	kind: RouteKind,
	path: String,
}

impl RouteBuilder {
	pub fn render<F, V>(self, component: F) -> Route
	where
		F: Fn(RouteProps) -> V + 'static,
		V: IntoView,
	{
		Route::with_action(self.kind, self.path, render_fn(component))
	}

	/// Runs `handler` with the navigation and the matched params instead of
	/// rendering.
	pub fn then<F>(self, handler: F) -> Route
	where
		F: Fn(&Navigation, &Params) + 'static,
	{
		Route::with_action(self.kind, self.path, RouteAction::Then(Rc::new(handler)))
	}
}

/// Where to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
	Path(String),
	NotFound,
	Forbidden,
}

impl NavTarget {
	/// The location path this target navigates to.
	pub fn to_path(&self) -> String {
		match self {
			Self::Path(path) => path.clone(),
			Self::NotFound => format!("/{NOT_FOUND_PATH}"),
			Self::Forbidden => format!("/{FORBIDDEN_PATH}"),
		}
	}
}

impl From<&str> for NavTarget {
	fn from(path: &str) -> Self {
		if is_not_found_path(path) {
			Self::NotFound
		} else if path.strip_prefix('/').unwrap_or(path) == FORBIDDEN_PATH {
			Self::Forbidden
		} else {
			Self::Path(path.to_string())
		}
	}
}

impl From<String> for NavTarget {
	fn from(path: String) -> Self {
		Self::from(path.as_str())
	}
}

impl From<&String> for NavTarget {
	fn from(path: &String) -> Self {
		Self::from(path.as_str())
	}
}
