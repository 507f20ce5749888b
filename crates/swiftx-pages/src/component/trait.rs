//! Component trait definition.

use std::fmt;

use super::into_view::{Children, IntoView, View};

/// Trait for reusable UI components.
///
/// Props live in the implementing type; children arrive separately at
/// render time, so a component can use them or ignore them.
///
/// # Example
///
/// ```ignore
/// use swiftx_pages::component::{Children, Component, IntoView, View};
///
/// struct Card {
///     title: String,
/// }
///
/// impl Component for Card {
///     fn render(&self, children: Children) -> View {
///         View::element("section")
///             .class("card")
///             .child(View::element("h2").child(self.title.clone()))
///             .child(children)
///             .into_view()
///     }
///
///     fn name() -> &'static str {
///         "Card"
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Renders the component.
	fn render(&self, children: Children) -> View;

	/// Returns the component's name for diagnostics.
	fn name() -> &'static str
	where
		Self: Sized;
}

type RenderFn = Box<dyn FnOnce(Children) -> View>;

/// A component waiting to be rendered.
///
/// The render function runs when the view is mounted, with the children
/// collected through [`child`](Self::child) and [`children`](Self::children).
pub struct ComponentView {
	name: &'static str,
	render: RenderFn,
	children: Vec<View>,
}

impl fmt::Debug for ComponentView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentView")
			.field("name", &self.name)
			.field("children", &self.children.len())
			.finish()
	}
}

impl ComponentView {
	/// Wraps a render function.
	pub fn new<F>(name: &'static str, render: F) -> Self
	where
		F: FnOnce(Children) -> View + 'static,
	{
		Self {
			name,
			render: Box::new(render),
			children: Vec::new(),
		}
	}

	/// A component that ignores its children.
	pub fn lazy<F>(name: &'static str, render: F) -> Self
	where
		F: FnOnce() -> View + 'static,
	{
		Self::new(name, move |_| render())
	}

	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoView::into_view));
		self
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Runs the render function.
	pub fn render(self) -> View {
		(self.render)(Children::new(self.children))
	}
}
