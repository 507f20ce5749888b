//! Rule-list router.
//!
//! [`RouterStack`] is the flat router: one root path, an ordered list of
//! rules built with [`Route::on`], and an optional layout mounted once
//! around the outlet. Nested groups contribute their routes and policies;
//! their layouts are not mounted. Navigation goes straight to the registry;
//! `back()` falls back to the matched group's root path.
//!
//! ## Example
//!
//! ```ignore
//! let stack = RouterStack::new("/", vec![
//!     Route::on("/").render(|_| "Home"),
//!     Route::on("/old").then(|nav, _| nav.replace("/new")),
//!     Route::on_not_found().render(|_| "Not found"),
//! ])
//! .layout(|props| View::element("main").child(props.outlet));
//! ```

use std::fmt;
use std::rc::Rc;

use swiftx_core::reactive::{Effect, RenderVersion, queue_microtask};

use super::context::{RouterContext, with_router_context};
use super::core::RouterError;
use super::group::{LayoutFn, LayoutProps, PolicyContext, RouteGroup, RouterOutlet};
use super::history::RouteRegistry;
use super::model::RouterModel;
use super::navigation::{Navigation, RouterPhase};
use super::outlet::Region;
use super::route::{Route, RouteAction, RouteProps};
use crate::component::{ComponentView, IntoView, View, to_live_tree};

/// Router over an ordered list of rules.
pub struct RouterStack {
	model: RouterModel,
	layout: Option<LayoutFn>,
	context: RouterContext,
	registry: Option<RouteRegistry>,
}

impl fmt::Debug for RouterStack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterStack")
			.field("model", &self.model)
			.field("layout", &self.layout.is_some())
			.finish()
	}
}

impl RouterStack {
	pub fn new(root_path: impl Into<String>, rules: Vec<Route>) -> Self {
		Self {
			model: RouterModel::from_rules(root_path, rules),
			layout: None,
			context: RouterContext::empty(),
			registry: None,
		}
	}

	pub fn layout<F, V>(mut self, layout: F) -> Self
	where
		F: Fn(LayoutProps) -> V + 'static,
		V: IntoView,
	{
		self.layout = Some(Rc::new(move |props| layout(props).into_view()));
		self
	}

	/// Adds a nested group, matched after the stack's own rules.
	pub fn group(mut self, group: RouteGroup) -> Self {
		self.model = self.model.with_group(group);
		self
	}

	pub fn context(mut self, context: RouterContext) -> Self {
		self.context = context;
		self
	}

	pub fn registry(mut self, registry: RouteRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	pub fn model(&self) -> &RouterModel {
		&self.model
	}

	/// Mounts the stack, returning its view and navigation handle.
	pub fn mount(self) -> Result<(View, Navigation), RouterError> {
		let registry = self.registry.unwrap_or_else(RouteRegistry::global);
		registry.register_router();

		let (outlet, fragment) = Region::new("swiftx-router")?;
		let navigation = Navigation::new(registry.clone(), self.model.root_path());
		let engine = Rc::new(StackEngine {
			model: self.model,
			context: self.context.clone(),
			registry: registry.clone(),
			navigation: navigation.clone(),
			outlet,
			version: RenderVersion::new(),
		});

		let observer = Rc::clone(&engine);
		match Effect::new(registry.route_state(), move |_| observer.apply_rules()) {
			Ok(effect) => engine.outlet.start().on_cleanup(move || effect.dispose()),
			Err(err) => crate::error_log!("RouterStack: failed to observe the route state: {}", err),
		}

		let view = match self.layout {
			Some(layout) => {
				let props = LayoutProps {
					outlet: RouterOutlet::new(fragment),
					navigation: navigation.clone(),
					context: self.context.clone(),
					params: navigation.params(),
				};
				with_router_context(&self.context, || layout(props))
			}
			None => View::Node(fragment),
		};
		Ok((view, navigation))
	}
}

impl IntoView for RouterStack {
	fn into_view(self) -> View {
		View::Component(ComponentView::lazy("RouterStack", move || match self.mount() {
			Ok((view, _)) => view,
			Err(err) => {
				crate::error_log!("{}", err);
				View::empty()
			}
		}))
	}
}

struct StackEngine {
	model: RouterModel,
	context: RouterContext,
	registry: RouteRegistry,
	navigation: Navigation,
	outlet: Region,
	version: RenderVersion,
}

impl StackEngine {
	fn apply_rules(&self) {
		let location = self.registry.location();
		let path = location.path;
		self.navigation.set_phase(RouterPhase::Resolving);
		let (group, matched) = self.model.resolve(&path);
		self.navigation
			.set_resolved(&path, matched.params.clone(), group.root_path());

		let context = PolicyContext {
			context: self.context.clone(),
			navigation: self.navigation.clone(),
		};
		for policy in group.policy_list() {
			policy.run(&context);
			if self.registry.location().seq != location.seq {
				return;
			}
		}

		let Some(route) = matched.route else {
			self.version.bump();
			self.outlet.clear();
			self.navigation.set_phase(RouterPhase::Mounted);
			return;
		};

		match route.action().clone() {
			RouteAction::Then(handler) => {
				let navigation = self.navigation.clone();
				let params = matched.params;
				queue_microtask(move || handler(&navigation, &params));
			}
			RouteAction::Empty => {
				self.version.bump();
				self.outlet.clear();
			}
			RouteAction::Render(render) => {
				let token = self.version.bump();
				let props = RouteProps {
					params: matched.params,
					navigation: self.navigation.clone(),
					context: self.context.clone(),
				};
				let live = match with_router_context(&self.context, || to_live_tree(render(props))) {
					Ok(live) => live,
					Err(err) => {
						crate::error_log!("RouterStack: failed to render route: {}", err);
						return;
					}
				};
				if !self.version.is_current(token) {
					crate::dev_warn!("RouterStack: discarded a render superseded by a newer navigation");
					live.dispose();
					return;
				}
				if let Err(err) = self.outlet.replace(&live) {
					crate::error_log!("RouterStack: failed to insert route content: {}", err);
				}
			}
		}
		self.navigation.set_phase(RouterPhase::Mounted);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::document;
	use rstest::rstest;
	use serial_test::serial;
	use swiftx_core::reactive::run_microtasks;

	#[rstest]
	#[serial(microtasks)]
	fn test_stack_follows_registry() {
		let registry = RouteRegistry::new("/");
		let (view, navigation) = RouterStack::new(
			"/",
			vec![
				Route::on("/").render(|_| "Home"),
				Route::on("/old").then(|nav, _| nav.replace("/new")),
				Route::on("/new").render(|_| "New"),
				Route::on_not_found().render(|_| "Missing"),
			],
		)
		.registry(registry.clone())
		.mount()
		.unwrap();
		let container = document().create_element("div");
		crate::component::render(view, &container).unwrap();
		assert_eq!(container.text_content(), "Home");

		navigation.push("/nowhere");
		assert_eq!(container.text_content(), "Missing");

		navigation.push("/old");
		run_microtasks();
		assert_eq!(registry.current_path(), "/new");
		assert_eq!(container.text_content(), "New");
	}

	#[rstest]
	fn test_stack_resolves_nested_groups() {
		use crate::router::RoutePolicy;

		let registry = RouteRegistry::new("/");
		let (view, navigation) = RouterStack::new(
			"/",
			vec![
				Route::on("/").render(|_| "Home"),
				Route::on("/login").render(|_| "Login"),
				Route::on_not_found().render(|_| "Missing"),
			],
		)
		.group(
			RouteGroup::new(
				"/docs",
				vec![
					Route::on("/docs/:page").render(|props: RouteProps| {
						format!("Docs {}", props.param("page").unwrap_or_default())
					}),
				],
			)
			.policy(RoutePolicy::new(|ctx| {
				if ctx.navigation.param("page").as_deref() == Some("admin") {
					ctx.navigation.replace("/login");
				}
			})),
		)
		.registry(registry.clone())
		.mount()
		.unwrap();
		let container = document().create_element("div");
		crate::component::render(view, &container).unwrap();

		navigation.push("/docs/intro");
		assert_eq!(container.text_content(), "Docs intro");
		assert_eq!(navigation.group_root_path(), "/docs");

		navigation.push("/docs/admin");
		assert_eq!(registry.current_path(), "/login");
		assert_eq!(container.text_content(), "Login");
		assert_eq!(navigation.group_root_path(), "/");

		navigation.push("/docs/a/b");
		assert_eq!(container.text_content(), "Missing");
	}
}
