//! The router root and its navigation engine.
//!
//! [`RouterRoot`] resolves the host location against a root route or group
//! plus any number of extra routes and groups, declared in priority order.
//! Each location change runs one resolution pass:
//!
//! 1. A pending forced route (after `replace(NavTarget::Forbidden)`) wins.
//! 2. Otherwise the not-found sentinel is checked, then every group and
//!    top-level route in declaration order; the first structural match wins.
//! 3. A path ending with the forbidden sentinel falls back to the forbidden
//!    route, anything else to the not-found route, or to nothing.
//! 4. The navigation handle and its params are updated.
//! 5. The root group's policies run, then the matched group's. A policy that
//!    navigates ends the pass; the navigation starts a new one.
//! 6. The group layout is mounted when the active group changes, and the
//!    route content replaces the previous content inside the outlet.
//!
//! Every content mount is stamped with a render version. A pass superseded
//! while its content was being built drops that content.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::router::{Route, RouteGroup, RoutePolicy, RouterRoot};
//!
//! let app = RouterRoot::new(Route::root(|_| "Home"))
//!     .group(
//!         RouteGroup::new("/admin", vec![Route::new("/admin", |_| "Admin")])
//!             .policy(RoutePolicy::new(|ctx| {
//!                 if ctx.context.get::<Session>().is_none() {
//!                     ctx.navigation.replace("/login");
//!                 }
//!             }))
//!             .layout(|props| View::element("main").child(props.outlet)),
//!     )
//!     .route(Route::not_found(|_| "Not found"));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use swiftx_core::reactive::{Effect, RenderVersion, queue_microtask};
use thiserror::Error;

use super::context::{HistoryMode, RouterContext, RouterOptions, with_router_context};
use super::group::{LayoutProps, PolicyContext, RouteGroup, RouterOutlet};
use super::history::{NavigationType, RouteRegistry, normalize_path};
use super::navigation::{Navigation, Navigator, RouterPhase};
use super::outlet::Region;
use super::pattern::Params;
use super::route::{
	NavTarget, Route, RouteAction, RouteProps, is_forbidden_path, is_not_found_path,
};
use crate::component::{ComponentView, IntoView, MountError, View, to_live_tree};
use crate::dom::Node;

/// Router errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// The router was given neither a route nor a route group as its root.
	#[error("[Swiftx] RouterRoot requires a root Route or RouteGroup.")]
	MissingRoot,

	/// Router options could not be parsed.
	#[error("[Swiftx] Invalid router options: {0}")]
	InvalidOptions(String),

	/// Route content failed to mount.
	#[error("[Swiftx] Failed to mount route content: {0}")]
	Mount(#[from] MountError),
}

/// A route or a group, as accepted by [`RouterRoot`].
#[derive(Debug, Clone)]
pub enum RouteEntry {
	Route(Route),
	Group(RouteGroup),
}

impl From<Route> for RouteEntry {
	fn from(route: Route) -> Self {
		Self::Route(route)
	}
}

impl From<RouteGroup> for RouteEntry {
	fn from(group: RouteGroup) -> Self {
		Self::Group(group)
	}
}

/// Router built from a root route or group plus extra entries.
pub struct RouterRoot {
	root: RouteEntry,
	entries: Vec<RouteEntry>,
	context: RouterContext,
	options: RouterOptions,
	registry: Option<RouteRegistry>,
}

impl fmt::Debug for RouterRoot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterRoot")
			.field("root", &self.root)
			.field("entries", &self.entries)
			.field("context", &self.context)
			.field("options", &self.options)
			.finish()
	}
}

impl RouterRoot {
	pub fn new(root: impl Into<RouteEntry>) -> Self {
		Self {
			root: root.into(),
			entries: Vec::new(),
			context: RouterContext::empty(),
			options: RouterOptions::default(),
			registry: None,
		}
	}

	/// Builds a router whose first entry is the root.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MissingRoot`] when `entries` is empty.
	pub fn from_entries(entries: Vec<RouteEntry>) -> Result<Self, RouterError> {
		let mut entries = entries.into_iter();
		let root = entries.next().ok_or(RouterError::MissingRoot)?;
		Ok(Self::new(root).entries(entries))
	}

	pub fn route(mut self, route: Route) -> Self {
		self.entries.push(RouteEntry::Route(route));
		self
	}

	pub fn group(mut self, group: RouteGroup) -> Self {
		self.entries.push(RouteEntry::Group(group));
		self
	}

	pub fn entries(mut self, entries: impl IntoIterator<Item = RouteEntry>) -> Self {
		self.entries.extend(entries);
		self
	}

	pub fn context(mut self, context: RouterContext) -> Self {
		self.context = context;
		self
	}

	pub fn options(mut self, options: RouterOptions) -> Self {
		self.options = options;
		self
	}

	/// Uses `registry` instead of [`RouteRegistry::global`].
	pub fn registry(mut self, registry: RouteRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Mounts the router, returning its view and navigation handle.
	///
	/// The current location is resolved immediately; later changes are
	/// followed until the view is disposed.
	pub fn mount(self) -> Result<(View, Navigation), RouterError> {
		let registry = self.registry.unwrap_or_else(RouteRegistry::global);
		registry.register_router();

		let (root_region, fragment) = Region::new("swiftx-router-root")?;
		let routes = RouteTable::new(self.root, self.entries);
		let navigation = Navigation::new(registry.clone(), routes.root_group.root_path());

		let engine = Rc::new(RouterEngine {
			routes,
			context: self.context,
			history_mode: self.options.history_mode,
			registry: registry.clone(),
			navigation: navigation.clone(),
			outlet: RefCell::new(root_region.clone()),
			root_region,
			active_group: RefCell::new(None),
			version: RenderVersion::new(),
			forced: Cell::new(false),
			applied_seq: Cell::new(None),
			group_history: RefCell::new(HashMap::new()),
		});
		let driver: Weak<dyn Navigator> = Rc::<RouterEngine>::downgrade(&engine);
		navigation.set_driver(driver);

		let observer = Rc::clone(&engine);
		match Effect::new(registry.route_state(), move |_| observer.apply_match()) {
			Ok(effect) => engine.root_region.start().on_cleanup(move || effect.dispose()),
			Err(err) => crate::error_log!("Router: failed to observe the route state: {}", err),
		}

		Ok((View::Node(fragment), navigation))
	}
}

impl IntoView for RouterRoot {
	fn into_view(self) -> View {
		View::Component(ComponentView::lazy("RouterRoot", move || match self.mount() {
			Ok((view, _)) => view,
			Err(err) => {
				crate::error_log!("{}", err);
				View::empty()
			}
		}))
	}
}

enum Entry {
	Group(Rc<RouteGroup>),
	Route(Route),
}

/// Normalized entries plus the special routes pulled out of them.
struct RouteTable {
	entries: Vec<Entry>,
	root_group: Rc<RouteGroup>,
	not_found: Option<Route>,
	forbidden: Option<Route>,
}

impl RouteTable {
	fn new(root: RouteEntry, extra: Vec<RouteEntry>) -> Self {
		let mut root_group = match root {
			RouteEntry::Group(group) => group.mark_root(),
			RouteEntry::Route(route) => {
				RouteGroup::new(route.path().to_string(), vec![route]).mark_root()
			}
		};

		let mut not_found = None;
		let mut forbidden = None;
		let mut take_special = |group: &mut RouteGroup| {
			group.routes_mut().retain(|route| {
				if route.is_not_found() && not_found.is_none() {
					not_found = Some(route.clone());
					return false;
				}
				if route.is_forbidden() && forbidden.is_none() {
					forbidden = Some(route.clone());
					return false;
				}
				true
			});
		};

		take_special(&mut root_group);
		let mut entries = Vec::new();
		let mut top_level = Vec::new();
		for entry in extra {
			match entry {
				RouteEntry::Group(mut group) => {
					take_special(&mut group);
					entries.push(Entry::Group(Rc::new(group)));
				}
				RouteEntry::Route(route) => {
					top_level.push(route.clone());
					entries.push(Entry::Route(route));
				}
			}
		}
		let not_found = not_found.or_else(|| top_level.iter().find(|r| r.is_not_found()).cloned());
		let forbidden = forbidden.or_else(|| top_level.iter().find(|r| r.is_forbidden()).cloned());

		let root_group = Rc::new(root_group);
		entries.insert(0, Entry::Group(Rc::clone(&root_group)));
		Self {
			entries,
			root_group,
			not_found,
			forbidden,
		}
	}

	fn resolve(&self, path: &str) -> Resolved {
		if is_not_found_path(path)
			&& let Some(route) = &self.not_found
		{
			return Resolved::special(route);
		}

		for entry in &self.entries {
			match entry {
				Entry::Group(group) => {
					for route in group.routes() {
						if let Some(params) = route.matches(path) {
							return Resolved {
								route: Some(route.clone()),
								group: Some(Rc::clone(group)),
								params,
							};
						}
					}
				}
				Entry::Route(route) => {
					if let Some(params) = route.matches(path) {
						return Resolved {
							route: Some(route.clone()),
							group: None,
							params,
						};
					}
				}
			}
		}

		if is_forbidden_path(path)
			&& let Some(route) = &self.forbidden
		{
			return Resolved::special(route);
		}
		match &self.not_found {
			Some(route) => Resolved::special(route),
			None => Resolved::default(),
		}
	}
}

#[derive(Default)]
struct Resolved {
	route: Option<Route>,
	group: Option<Rc<RouteGroup>>,
	params: Params,
}

impl Resolved {
	fn special(route: &Route) -> Self {
		Self {
			route: Some(route.clone()),
			group: None,
			params: Params::new(),
		}
	}
}

struct RouterEngine {
	routes: RouteTable,
	context: RouterContext,
	history_mode: HistoryMode,
	registry: RouteRegistry,
	navigation: Navigation,
	root_region: Region,
	outlet: RefCell<Region>,
	active_group: RefCell<Option<Rc<RouteGroup>>>,
	version: RenderVersion,
	forced: Cell<bool>,
	applied_seq: Cell<Option<u64>>,
	group_history: RefCell<HashMap<String, Vec<String>>>,
}

fn same_group(a: &Option<Rc<RouteGroup>>, b: &Option<Rc<RouteGroup>>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => Rc::ptr_eq(a, b),
		(None, None) => true,
		_ => false,
	}
}

impl RouterEngine {
	fn apply_match(&self) {
		let location = self.registry.location();
		let forced = self.forced.take();
		if !forced && self.applied_seq.get() == Some(location.seq) {
			return;
		}
		self.applied_seq.set(Some(location.seq));
		self.navigation.set_phase(RouterPhase::Resolving);

		let Resolved {
			route,
			group,
			params,
		} = match (&self.routes.forbidden, forced) {
			(Some(route), true) => Resolved::special(route),
			_ => self.routes.resolve(&location.path),
		};

		let group_root = group
			.as_ref()
			.map_or(self.routes.root_group.root_path(), |g| g.root_path())
			.to_string();
		self.navigation
			.set_resolved(&location.path, params.clone(), &group_root);
		crate::debug_log!("Router: resolving {} (group {})", location.path, group_root);

		if self.run_policies(&self.routes.root_group, location.seq) {
			return;
		}
		if let Some(group) = &group
			&& !Rc::ptr_eq(group, &self.routes.root_group)
			&& self.run_policies(group, location.seq)
		{
			return;
		}

		let Some(route) = route else {
			self.version.bump();
			self.current_outlet().clear();
			self.navigation.set_phase(RouterPhase::Mounted);
			return;
		};

		let group_changed = !same_group(&self.active_group.borrow(), &group);
		if group_changed {
			self.set_layout(group, &params);
			if self.registry.location().seq != location.seq {
				return;
			}
		}

		let token = self.version.bump();
		match route.action().clone() {
			RouteAction::Then(handler) => {
				let navigation = self.navigation.clone();
				queue_microtask(move || handler(&navigation, &params));
			}
			RouteAction::Empty => self.current_outlet().clear(),
			RouteAction::Render(render) => {
				let props = RouteProps {
					params,
					navigation: self.navigation.clone(),
					context: self.context.clone(),
				};
				let live = with_router_context(&self.context, || to_live_tree(render(props)));
				self.flush(live, token);
			}
		}
		if self.version.is_current(token) {
			self.navigation.set_phase(RouterPhase::Mounted);
		}
	}

	/// Runs `group`'s policies. Returns `true` when one of them navigated.
	fn run_policies(&self, group: &RouteGroup, seq: u64) -> bool {
		let context = PolicyContext {
			context: self.context.clone(),
			navigation: self.navigation.clone(),
		};
		for policy in group.policy_list() {
			policy.run(&context);
			if self.registry.location().seq != seq {
				return true;
			}
		}
		false
	}

	fn current_outlet(&self) -> Region {
		self.outlet.borrow().clone()
	}

	fn set_layout(&self, group: Option<Rc<RouteGroup>>, params: &Params) {
		let layout = group.as_ref().and_then(|g| g.layout_fn());
		*self.active_group.borrow_mut() = group;

		let Some(layout) = layout else {
			self.root_region.clear();
			*self.outlet.borrow_mut() = self.root_region.clone();
			return;
		};

		let (outlet, fragment) = match Region::new("swiftx-router-root:outlet") {
			Ok(region) => region,
			Err(err) => {
				crate::error_log!("Router: failed to create the layout outlet: {}", err);
				return;
			}
		};
		let props = LayoutProps {
			outlet: RouterOutlet::new(fragment),
			navigation: self.navigation.clone(),
			context: self.context.clone(),
			params: params.clone(),
		};
		let mounted = with_router_context(&self.context, || to_live_tree(layout(props)))
			.map_err(RouterError::from)
			.and_then(|live| {
				self.root_region
					.replace(&live)
					.map_err(|err| RouterError::Mount(err.into()))
			});
		match mounted {
			Ok(()) => *self.outlet.borrow_mut() = outlet,
			Err(err) => crate::error_log!("Router: failed to mount layout: {}", err),
		}
	}

	fn flush(&self, live: Result<Node, MountError>, token: u64) {
		let live = match live {
			Ok(live) => live,
			Err(err) => {
				crate::error_log!("Router: {}", RouterError::from(err));
				return;
			}
		};
		if !self.version.is_current(token) {
			crate::dev_warn!("Router: discarded a render superseded by a newer navigation");
			live.dispose();
			return;
		}
		if let Err(err) = self.current_outlet().replace(&live) {
			crate::error_log!("Router: failed to insert route content: {}", err);
		}
	}

	/// Navigating while a pass is resolving redirects it.
	fn mark_redirect(&self) {
		if self.navigation.phase() == RouterPhase::Resolving {
			self.navigation.set_phase(RouterPhase::Redirecting);
		}
	}

	fn record_history(&self, group_root: String, path: String) {
		let mut history = self.group_history.borrow_mut();
		let stack = history.entry(group_root).or_default();
		if stack.last() != Some(&path) {
			stack.push(path);
		}
	}
}

impl Navigator for RouterEngine {
	fn push(&self, target: NavTarget) {
		let path = normalize_path(&target.to_path());
		let current = self.navigation.path();
		if self.history_mode == HistoryMode::Group && !current.is_empty() && current != path {
			self.record_history(self.navigation.group_root_path(), current);
		}
		self.mark_redirect();
		self.registry.navigate(&path, NavigationType::Push);
	}

	fn replace(&self, target: NavTarget) {
		let path = normalize_path(&target.to_path());
		if path == self.navigation.path() {
			return;
		}
		if target == NavTarget::Forbidden && self.routes.forbidden.is_some() {
			self.forced.set(true);
		}
		self.mark_redirect();
		self.registry.navigate(&path, NavigationType::Replace);
	}

	fn back(&self, fallback: Option<String>) {
		let group_root = self.navigation.group_root_path();
		let fallback = fallback.unwrap_or_else(|| group_root.clone());
		self.mark_redirect();
		if self.history_mode == HistoryMode::Global {
			self.registry.back(&fallback);
			return;
		}
		let previous = self
			.group_history
			.borrow_mut()
			.get_mut(&group_root)
			.and_then(Vec::pop);
		let target = previous.unwrap_or(fallback);
		self.registry.navigate(&target, NavigationType::Replace);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::document;
	use rstest::rstest;

	fn mount_at(path: &str, router: RouterRoot) -> (Node, Navigation, RouteRegistry) {
		let registry = RouteRegistry::new(path);
		let (view, navigation) = router.registry(registry.clone()).mount().unwrap();
		let container = document().create_element("div");
		crate::component::render(view, &container).unwrap();
		(container, navigation, registry)
	}

	#[rstest]
	fn test_from_entries_requires_root() {
		assert!(matches!(
			RouterRoot::from_entries(Vec::new()),
			Err(RouterError::MissingRoot)
		));
		assert!(RouterRoot::from_entries(vec![Route::root(|_| "home").into()]).is_ok());
	}

	#[rstest]
	fn test_root_route_renders() {
		let (container, navigation, registry) = mount_at("/", RouterRoot::new(Route::root(|_| "Home")));
		assert_eq!(container.text_content(), "Home");
		assert_eq!(navigation.phase(), RouterPhase::Mounted);
		assert_eq!(registry.router_count(), 1);
	}

	#[rstest]
	fn test_params_reach_route_props() {
		let router = RouterRoot::new(Route::root(|_| "Home")).route(Route::new(
			"/users/:id",
			|props: RouteProps| format!("User {}", props.param("id").unwrap_or_default()),
		));
		let (container, navigation, _) = mount_at("/users/42", router);
		assert_eq!(container.text_content(), "User 42");
		assert_eq!(navigation.param("id").as_deref(), Some("42"));
	}

	#[rstest]
	fn test_forced_forbidden_route() {
		let router = RouterRoot::new(Route::root(|_| "Home")).route(Route::forbidden(|_| "Forbidden"));
		let (container, navigation, registry) = mount_at("/", router);
		navigation.replace(NavTarget::Forbidden);
		assert_eq!(container.text_content(), "Forbidden");
		assert_eq!(registry.current_path(), "/__swiftx_forbidden__");
	}

	#[rstest]
	fn test_replace_with_current_path_is_noop() {
		let (_, navigation, registry) = mount_at("/", RouterRoot::new(Route::root(|_| "Home")));
		let before = registry.location().seq;
		navigation.replace("/");
		assert_eq!(registry.location().seq, before);
	}

	#[rstest]
	fn test_special_routes_are_taken_from_groups() {
		let table = RouteTable::new(
			RouteGroup::root(vec![Route::root(|_| "home"), Route::not_found(|_| "nf")]).into(),
			Vec::new(),
		);
		assert!(table.not_found.is_some());
		assert_eq!(table.root_group.routes().len(), 1);
		assert!(table.resolve("/missing").route.is_some_and(|r| r.is_not_found()));
	}
}
