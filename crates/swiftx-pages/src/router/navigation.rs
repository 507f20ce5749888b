//! The navigation handle shared by a router's routes, layouts and policies.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use swiftx_core::reactive::{ReadState, State};

use super::history::{NavigationType, RouteRegistry};
use super::pattern::Params;
use super::route::NavTarget;

/// Lifecycle phase of a router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouterPhase {
	/// Not mounted yet.
	#[default]
	Idle,
	/// Computing the active route for the current path.
	Resolving,
	/// Showing a route's content.
	Mounted,
	/// A policy or navigation call changed the path mid-resolution.
	Redirecting,
}

/// Carries out navigation requests for a [`Navigation`] handle.
pub(crate) trait Navigator {
	fn push(&self, target: NavTarget);
	fn replace(&self, target: NavTarget);
	fn back(&self, fallback: Option<String>);
}

struct NavigationInner {
	registry: RouteRegistry,
	root_path: String,
	path: RefCell<String>,
	params: State<Params>,
	group_root_path: State<String>,
	current_path: ReadState<String>,
	phase: Cell<RouterPhase>,
	driver: RefCell<Option<Weak<dyn Navigator>>>,
}

/// Navigation handle of one router.
///
/// Cloning is cheap; all clones observe the same router.
#[derive(Clone)]
pub struct Navigation {
	inner: Rc<NavigationInner>,
}

impl fmt::Debug for Navigation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Navigation")
			.field("path", &self.path())
			.field("params", &self.params())
			.field("group_root_path", &self.group_root_path())
			.field("root_path", &self.inner.root_path)
			.field("phase", &self.phase())
			.finish()
	}
}

impl Navigation {
	pub(crate) fn new(registry: RouteRegistry, root_path: &str) -> Self {
		let current_path = registry.route_state().map(|location| location.path.clone());
		Self {
			inner: Rc::new(NavigationInner {
				path: RefCell::new(registry.current_path()),
				registry,
				root_path: root_path.to_string(),
				params: State::new(Params::new()),
				group_root_path: State::new(root_path.to_string()),
				current_path,
				phase: Cell::new(RouterPhase::Idle),
				driver: RefCell::new(None),
			}),
		}
	}

	pub(crate) fn set_driver(&self, driver: Weak<dyn Navigator>) {
		*self.inner.driver.borrow_mut() = Some(driver);
	}

	fn driver(&self) -> Option<Rc<dyn Navigator>> {
		self.inner.driver.borrow().as_ref()?.upgrade()
	}

	pub(crate) fn set_resolved(&self, path: &str, params: Params, group_root_path: &str) {
		*self.inner.path.borrow_mut() = path.to_string();
		self.inner.params.set(params);
		self.inner.group_root_path.set(group_root_path.to_string());
	}

	pub(crate) fn set_phase(&self, phase: RouterPhase) {
		self.inner.phase.set(phase);
	}

	pub fn phase(&self) -> RouterPhase {
		self.inner.phase.get()
	}

	/// The path the router last resolved.
	pub fn path(&self) -> String {
		self.inner.path.borrow().clone()
	}

	/// Params of the last resolved route.
	pub fn params(&self) -> Params {
		self.inner.params.get()
	}

	pub fn param(&self, name: &str) -> Option<String> {
		self.inner.params.with(|params| params.get(name).cloned())
	}

	/// Params of the last resolved route, as a reactive value.
	pub fn params_state(&self) -> ReadState<Params> {
		self.inner.params.read_only()
	}

	/// Root path of the active route group.
	pub fn group_root_path(&self) -> String {
		self.inner.group_root_path.get()
	}

	pub fn group_root_path_state(&self) -> ReadState<String> {
		self.inner.group_root_path.read_only()
	}

	/// Root path of the router.
	pub fn root_path(&self) -> &str {
		&self.inner.root_path
	}

	/// The host location path, as a reactive value.
	pub fn current_path(&self) -> ReadState<String> {
		self.inner.current_path.clone()
	}

	pub fn registry(&self) -> &RouteRegistry {
		&self.inner.registry
	}

	pub fn push(&self, target: impl Into<NavTarget>) {
		let target = target.into();
		match self.driver() {
			Some(driver) => driver.push(target),
			None => self
				.inner
				.registry
				.navigate(&target.to_path(), NavigationType::Push),
		}
	}

	pub fn replace(&self, target: impl Into<NavTarget>) {
		let target = target.into();
		match self.driver() {
			Some(driver) => driver.replace(target),
			None => self
				.inner
				.registry
				.navigate(&target.to_path(), NavigationType::Replace),
		}
	}

	/// Goes back, or to `fallback` (default: the active group's root path)
	/// when there is nothing to go back to.
	pub fn back(&self, fallback: Option<&str>) {
		let fallback = fallback.map(str::to_string);
		match self.driver() {
			Some(driver) => driver.back(fallback),
			None => {
				let fallback = fallback.unwrap_or_else(|| self.group_root_path());
				self.inner.registry.back(&fallback);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_detached_navigation_uses_registry() {
		let registry = RouteRegistry::new("/");
		let navigation = Navigation::new(registry.clone(), "/");
		let current = navigation.current_path();

		navigation.push("/a");
		navigation.replace("/b");
		assert_eq!(registry.current_path(), "/b");
		assert_eq!(current.get(), "/b");

		navigation.back(None);
		assert_eq!(registry.current_path(), "/");
	}

	#[rstest]
	fn test_set_resolved_publishes_params() {
		let navigation = Navigation::new(RouteRegistry::new("/"), "/");
		let mut params = Params::new();
		params.insert("id".to_string(), "3".to_string());
		navigation.set_resolved("/users/3", params, "/users");
		assert_eq!(navigation.path(), "/users/3");
		assert_eq!(navigation.param("id").as_deref(), Some("3"));
		assert_eq!(navigation.group_root_path_state().get(), "/users");
	}
}
