//! Route groups, policies and layouts.
//!
//! A [`RouteGroup`] collects routes under a root path. Its policies run
//! before any of its routes renders and may redirect; its layout wraps the
//! routes and stays mounted while navigation moves between them.

use std::fmt;
use std::rc::Rc;

use super::context::RouterContext;
use super::navigation::Navigation;
use super::pattern::Params;
use super::route::{Route, RouteProps};
use crate::component::{IntoView, View};
use crate::dom::Node;

/// Arguments passed to a [`RoutePolicy`].
#[derive(Debug, Clone)]
pub struct PolicyContext {
	pub context: RouterContext,
	pub navigation: Navigation,
}

/// A guard run before a group's route renders.
///
/// Calling `navigation.replace(..)` or `navigation.push(..)` from the
/// handler redirects and stops the remaining policies.
#[derive(Clone)]
pub struct RoutePolicy {
	handler: Rc<dyn Fn(&PolicyContext)>,
}

impl fmt::Debug for RoutePolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("RoutePolicy(..)")
	}
}

impl RoutePolicy {
	pub fn new(handler: impl Fn(&PolicyContext) + 'static) -> Self {
		Self {
			handler: Rc::new(handler),
		}
	}

	pub fn run(&self, context: &PolicyContext) {
		(self.handler)(context)
	}
}

/// Placeholder for the routed content inside a layout.
#[derive(Debug, Clone)]
pub struct RouterOutlet {
	fragment: Node,
}

impl RouterOutlet {
	pub(crate) fn new(fragment: Node) -> Self {
		Self { fragment }
	}
}

impl IntoView for RouterOutlet {
	fn into_view(self) -> View {
		View::Node(self.fragment)
	}
}

/// Props handed to a group layout.
#[derive(Debug, Clone)]
pub struct LayoutProps {
	pub outlet: RouterOutlet,
	pub navigation: Navigation,
	pub context: RouterContext,
	/// Params of the route matched when the layout was mounted.
	pub params: Params,
}

pub(crate) type LayoutFn = Rc<dyn Fn(LayoutProps) -> View>;

/// A set of routes sharing a root path, policies and an optional layout.
#[derive(Clone)]
pub struct RouteGroup {
	root_path: String,
	routes: Vec<Route>,
	policies: Vec<RoutePolicy>,
	layout: Option<LayoutFn>,
	is_root: bool,
}

impl fmt::Debug for RouteGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteGroup")
			.field("root_path", &self.root_path)
			.field("routes", &self.routes)
			.field("policies", &self.policies.len())
			.field("layout", &self.layout.is_some())
			.field("is_root", &self.is_root)
			.finish()
	}
}

impl RouteGroup {
	pub fn new(root_path: impl Into<String>, routes: Vec<Route>) -> Self {
		Self {
			root_path: root_path.into(),
			routes,
			policies: Vec::new(),
			layout: None,
			is_root: false,
		}
	}

	/// The group at `/` whose policies apply to every route of a router.
	pub fn root(routes: Vec<Route>) -> Self {
		Self {
			is_root: true,
			..Self::new("/", routes)
		}
	}

	/// Adds a route at the group's root path, ahead of the other routes.
	pub fn component<F, V>(mut self, component: F) -> Self
	where
		F: Fn(RouteProps) -> V + 'static,
		V: IntoView,
	{
		self.routes
			.insert(0, Route::new(self.root_path.clone(), component));
		self
	}

	pub fn route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	pub fn policy(mut self, policy: RoutePolicy) -> Self {
		self.policies.push(policy);
		self
	}

	pub fn policies(mut self, policies: impl IntoIterator<Item = RoutePolicy>) -> Self {
		self.policies.extend(policies);
		self
	}

	pub fn layout<F, V>(mut self, layout: F) -> Self
	where
		F: Fn(LayoutProps) -> V + 'static,
		V: IntoView,
	{
		self.layout = Some(Rc::new(move |props| layout(props).into_view()));
		self
	}

	pub fn root_path(&self) -> &str {
		&self.root_path
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	pub(crate) fn routes_mut(&mut self) -> &mut Vec<Route> {
		&mut self.routes
	}

	pub fn policy_list(&self) -> &[RoutePolicy] {
		&self.policies
	}

	pub fn has_layout(&self) -> bool {
		self.layout.is_some()
	}

	pub(crate) fn layout_fn(&self) -> Option<LayoutFn> {
		self.layout.clone()
	}

	pub fn is_root(&self) -> bool {
		self.is_root
	}

	pub(crate) fn mark_root(mut self) -> Self {
		self.is_root = true;
		self
	}
}
