//! Conditional rendering.
//!
//! [`show`] keeps at most one rendered subtree in front of a single marker
//! comment. Whenever the condition changes to a truthy value the content
//! is rendered again with that value; a falsy value removes it. Repeating
//! the last observed value does nothing.
//!
//! Each render is stamped with a [`RenderVersion`] token. If a newer change
//! arrives while content is still being built (for example because building
//! it flips the condition), the stale subtree is discarded instead of
//! inserted.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::component::show;
//!
//! let user = State::new(None::<String>);
//! let greeting = show(user.clone(), |name| {
//!     View::element("p").child(format!("Signed in as {}", name.unwrap_or_default())).into_view()
//! })?;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use swiftx_core::ValidationError;
use swiftx_core::reactive::{Dependency, RenderVersion};

use super::into_view::View;
use super::mount::to_live_tree;
use crate::dom::{Node, document};

/// Values usable as a [`show`] condition.
pub trait Truthy {
	fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
	fn is_truthy(&self) -> bool {
		*self
	}
}

impl Truthy for String {
	fn is_truthy(&self) -> bool {
		!self.is_empty()
	}
}

impl Truthy for &str {
	fn is_truthy(&self) -> bool {
		!self.is_empty()
	}
}

impl<T> Truthy for Option<T> {
	fn is_truthy(&self) -> bool {
		self.is_some()
	}
}

impl<T> Truthy for Vec<T> {
	fn is_truthy(&self) -> bool {
		!self.is_empty()
	}
}

macro_rules! truthy_number {
	($($ty:ty),*) => {$(
		impl Truthy for $ty {
			fn is_truthy(&self) -> bool {
				*self != 0
			}
		}
	)*};
}

truthy_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Truthy for f64 {
	fn is_truthy(&self) -> bool {
		*self != 0.0 && !self.is_nan()
	}
}

impl Truthy for f32 {
	fn is_truthy(&self) -> bool {
		*self != 0.0 && !self.is_nan()
	}
}

struct ShowNode<T> {
	marker: Node,
	mounted: RefCell<Vec<Node>>,
	last: RefCell<Option<T>>,
	version: RenderVersion,
	content: Box<dyn Fn(T) -> View>,
}

impl<T: Truthy + 'static> ShowNode<T> {
	fn update(self: &Rc<Self>, value: T) {
		let token = self.version.bump();
		self.unmount();
		if !value.is_truthy() {
			return;
		}

		let live = match to_live_tree((self.content)(value)) {
			Ok(live) => live,
			Err(err) => {
				crate::error_log!("Show: failed to render content: {}", err);
				return;
			}
		};
		if !self.version.is_current(token) {
			crate::dev_warn!("Show: discarded a render superseded by a newer update");
			live.dispose();
			return;
		}

		*self.mounted.borrow_mut() = if live.is_fragment() {
			live.children()
		} else {
			vec![live.clone()]
		};
		let this = Rc::clone(self);
		self.marker.when_attached(move || this.insert(&live, token));
	}

	fn insert(&self, live: &Node, token: u64) {
		if !self.version.is_current(token) {
			return;
		}
		let Some(parent) = self.marker.parent() else {
			return;
		};
		if let Err(err) = parent.insert_before(live, Some(&self.marker)) {
			crate::error_log!("Show: failed to insert content: {}", err);
		}
	}

	fn unmount(&self) {
		let nodes = std::mem::take(&mut *self.mounted.borrow_mut());
		for node in nodes {
			node.remove();
			node.dispose();
		}
	}
}

/// Renders `content` while `condition` is truthy.
///
/// Fails with a [`ValidationError`] when `condition` is not reactive.
pub fn show<D, F>(condition: D, content: F) -> Result<View, ValidationError>
where
	D: Dependency + 'static,
	D::Value: Truthy + PartialEq + Clone + 'static,
	F: Fn(D::Value) -> View + 'static,
{
	if !condition.is_reactive() {
		return Err(ValidationError::NotAState {
			context: "Show",
			received: condition.kind(),
		});
	}

	let marker = document().create_comment("swiftx:show");
	let node = Rc::new(ShowNode {
		marker: marker.clone(),
		mounted: RefCell::new(Vec::new()),
		last: RefCell::new(None),
		version: RenderVersion::new(),
		content: Box::new(content),
	});

	let initial = condition.sample();
	*node.last.borrow_mut() = Some(initial.clone());
	node.update(initial);

	let condition = Rc::new(condition);
	let source = Rc::clone(&condition);
	let observer = Rc::clone(&node);
	let subscription = condition.observe(Rc::new(move || {
		let value = source.sample();
		if observer.last.borrow().as_ref() == Some(&value) {
			return;
		}
		*observer.last.borrow_mut() = Some(value.clone());
		observer.update(value);
	}));
	if let Some(subscription) = subscription {
		marker.on_cleanup(move || subscription.unsubscribe());
	}

	Ok(View::Node(marker))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::IntoView;
	use rstest::rstest;
	use swiftx_core::reactive::{Plain, State};

	fn mount(view: View) -> Node {
		let root = document().create_element("div");
		root.append_child(&to_live_tree(view).unwrap()).unwrap();
		root
	}

	#[rstest]
	fn test_rejects_plain_condition() {
		let err = show(Plain(true), |_| View::empty()).unwrap_err();
		assert_eq!(err.context(), "Show");
		assert!(err.to_string().contains("Expected a State"));
	}

	#[rstest]
	fn test_toggles_content() {
		let visible = State::new(false);
		let root = mount(show(visible.clone(), |_| View::element("b").child("on").into_view()).unwrap());
		assert_eq!(root.to_html(), "<div><!--swiftx:show--></div>");

		visible.set(true);
		assert_eq!(root.to_html(), "<div><b>on</b><!--swiftx:show--></div>");

		visible.set(false);
		assert_eq!(root.to_html(), "<div><!--swiftx:show--></div>");
	}

	#[rstest]
	fn test_truthy_value_is_passed_to_content() {
		let user = State::new(Some("Ada".to_string()));
		let root = mount(
			show(user.clone(), |name: Option<String>| View::text(name.unwrap_or_default())).unwrap(),
		);
		assert_eq!(root.text_content(), "Ada");

		user.set(Some("Grace".to_string()));
		assert_eq!(root.text_content(), "Grace");

		user.set(None);
		assert_eq!(root.text_content(), "");
	}

	#[rstest]
	fn test_render_that_flips_condition_is_discarded() {
		let visible = State::new(false);
		let builds = Rc::new(std::cell::Cell::new(0));
		let flip = visible.clone();
		let counter = builds.clone();
		let view = show(visible.clone(), move |_| {
			counter.set(counter.get() + 1);
			flip.set(false);
			View::element("b").child("stale").into_view()
		})
		.unwrap();
		let root = mount(view);
		let marker = root.first_child().unwrap();

		visible.set(true);

		assert_eq!(builds.get(), 1);
		assert!(!visible.get());
		assert_eq!(marker.parent().unwrap().child_count(), 1);
		assert_eq!(root.to_html(), "<div><!--swiftx:show--></div>");

		visible.set(true);
		assert_eq!(builds.get(), 2);
		assert_eq!(root.to_html(), "<div><!--swiftx:show--></div>");
	}

	#[rstest]
	#[case(0, false)]
	#[case(3, true)]
	fn test_numeric_truthiness(#[case] value: i32, #[case] visible: bool) {
		let count = State::new(value);
		let root = mount(show(count, |n| View::text(n.to_string())).unwrap());
		assert_eq!(root.text_content().is_empty(), !visible);
	}
}
