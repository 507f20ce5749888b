//! Router components: [`Link`] and [`BrowserRouter`].

use super::history::{NavigationType, RouteRegistry};
use super::navigation::Navigation;
use super::route::NavTarget;
use crate::component::{AttrValue, ComponentView, IntoView, View};

/// An anchor that navigates without reloading the page.
///
/// Clicking it prevents the default action, then pushes (or replaces) the
/// target through the given [`Navigation`], or the global registry when
/// none is set.
///
/// # Example
///
/// ```ignore
/// Link::new("/about").class("nav-link").child("About")
/// ```
#[derive(Debug)]
pub struct Link {
	to: NavTarget,
	replace: bool,
	class: Option<AttrValue>,
	navigation: Option<Navigation>,
	children: Vec<View>,
}

impl Link {
	pub fn new(to: impl Into<NavTarget>) -> Self {
		Self {
			to: to.into(),
			replace: false,
			class: None,
			navigation: None,
			children: Vec::new(),
		}
	}

	/// Replaces the current history entry instead of pushing.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	pub fn class(mut self, class: impl Into<AttrValue>) -> Self {
		self.class = Some(class.into());
		self
	}

	pub fn navigation(mut self, navigation: Navigation) -> Self {
		self.navigation = Some(navigation);
		self
	}

	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}
}

impl IntoView for Link {
	fn into_view(self) -> View {
		let Self {
			to,
			replace,
			class,
			navigation,
			children,
		} = self;
		let href = to.to_path();
		let target = to.clone();

		let mut anchor = View::element("a").attr("href", href).on_click(move |event| {
			event.prevent_default();
			match (&navigation, replace) {
				(Some(navigation), false) => navigation.push(target.clone()),
				(Some(navigation), true) => navigation.replace(target.clone()),
				(None, false) => RouteRegistry::global().navigate(&target.to_path(), NavigationType::Push),
				(None, true) => {
					RouteRegistry::global().navigate(&target.to_path(), NavigationType::Replace)
				}
			}
		});
		if let Some(class) = class {
			anchor = anchor.class(class);
		}
		anchor.children(children).into_view()
	}
}

/// Connects the application to the host history.
///
/// Rendering it makes sure the global [`RouteRegistry`] exists (and, in the
/// browser, listens for back/forward navigation) before its child renders.
#[derive(Debug)]
pub struct BrowserRouter {
	child: View,
	initial_path: Option<String>,
}

impl BrowserRouter {
	pub fn new(child: impl IntoView) -> Self {
		Self {
			child: child.into_view(),
			initial_path: None,
		}
	}

	/// Starts from a fresh global registry at `path`. Browser hosts start
	/// from the page location instead.
	pub fn initial_path(mut self, path: impl Into<String>) -> Self {
		self.initial_path = Some(path.into());
		self
	}
}

impl IntoView for BrowserRouter {
	fn into_view(self) -> View {
		let Self {
			child,
			initial_path,
		} = self;
		View::Component(ComponentView::lazy("BrowserRouter", move || {
			let registry = match initial_path {
				Some(path) => RouteRegistry::reset(&path),
				None => RouteRegistry::global(),
			};
			registry.listen();
			child
		}))
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::component::to_live_tree;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[serial(router)]
	fn test_link_pushes_through_registry() {
		RouteRegistry::reset("/");
		let live = to_live_tree(Link::new("/about").class("nav").child("About")).unwrap();
		assert_eq!(live.get_attribute("href").as_deref(), Some("/about"));
		assert_eq!(live.get_attribute("class").as_deref(), Some("nav"));

		let proceeded = live.click();
		assert!(!proceeded);
		assert_eq!(RouteRegistry::global().current_path(), "/about");
		assert_eq!(RouteRegistry::global().history().len(), 2);
	}

	#[rstest]
	#[serial(router)]
	fn test_replace_link() {
		RouteRegistry::reset("/");
		let live = to_live_tree(Link::new("/x").replace(true).child("x")).unwrap();
		live.click();
		assert_eq!(RouteRegistry::global().history().len(), 1);
		assert_eq!(RouteRegistry::global().current_path(), "/x");
	}

	#[rstest]
	#[serial(router)]
	fn test_browser_router_resets_registry() {
		RouteRegistry::reset("/old");
		let live = to_live_tree(BrowserRouter::new("app").initial_path("/start")).unwrap();
		assert_eq!(live.text_content(), "app");
		assert_eq!(RouteRegistry::global().current_path(), "/start");
	}
}
