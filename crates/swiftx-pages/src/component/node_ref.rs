//! Node references.
//!
//! A [`NodeRef`] is handed to application code through the `ref` prop. It
//! is read-only: only the renderer can assign it, through a crate-private
//! [`RefWriter`]. The assignment becomes visible one microtask after the
//! node is created, never within the same render pass, and an assignment
//! superseded by a newer one is dropped.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::component::NodeRef;
//! use swiftx_pages::reactive::Effect;
//!
//! let input = NodeRef::new();
//! let _focus = Effect::new(input.clone(), |node| {
//!     if let Some(node) = node {
//!         node.set_attribute("data-focused", "true");
//!     }
//! })?;
//! View::element("input").node_ref(&input)
//! ```

use std::fmt;
use std::rc::Rc;

use swiftx_core::ValidationError;
use swiftx_core::reactive::{
	Dependencies, Dependency, ReadState, RenderVersion, State, Subscription, queue_microtask,
};

use crate::dom::Node;

/// Read-only handle to a rendered node.
#[derive(Clone, Default)]
pub struct NodeRef {
	current: State<Option<Node>>,
	version: RenderVersion,
}

impl fmt::Debug for NodeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeRef")
			.field("current", &self.current.get())
			.finish()
	}
}

impl NodeRef {
	pub fn new() -> Self {
		Self::default()
	}

	/// The referenced node, once assigned.
	pub fn get(&self) -> Option<Node> {
		self.current.get()
	}

	pub fn subscribe(&self, callback: impl Fn(&Option<Node>) + 'static) -> Subscription {
		self.current.subscribe(callback)
	}

	pub fn map<U, F>(&self, f: F) -> ReadState<U>
	where
		U: PartialEq + 'static,
		F: Fn(&Option<Node>) -> U + 'static,
	{
		self.current.map(f)
	}

	pub(crate) fn writer(&self) -> RefWriter {
		RefWriter {
			current: self.current.clone(),
			version: self.version.clone(),
		}
	}
}

/// Write capability held by the renderer.
pub(crate) struct RefWriter {
	current: State<Option<Node>>,
	version: RenderVersion,
}

impl RefWriter {
	/// Publishes `node` on the next microtask unless a newer assignment
	/// happens first.
	pub(crate) fn assign(&self, node: &Node) {
		let token = self.version.bump();
		let version = self.version.clone();
		let current = self.current.clone();
		let node = node.clone();
		queue_microtask(move || {
			if version.is_current(token) {
				current.set(Some(node));
			}
		});
	}
}

impl Dependency for NodeRef {
	type Value = Option<Node>;

	fn sample(&self) -> Option<Node> {
		self.get()
	}

	fn observe(&self, notify: Rc<dyn Fn()>) -> Option<Subscription> {
		Some(self.current.subscribe(move |_| notify()))
	}

	fn kind(&self) -> &'static str {
		"NodeRef"
	}
}

impl Dependencies for NodeRef {
	type Values = Option<Node>;

	fn sample(&self) -> Option<Node> {
		self.get()
	}

	fn observe_all(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription> {
		Dependency::observe(self, notify).into_iter().collect()
	}

	fn check_reactive(&self, _context: &'static str) -> Result<(), ValidationError> {
		Ok(())
	}

	fn len(&self) -> usize {
		1
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::document;
	use rstest::rstest;
	use serial_test::serial;
	use swiftx_core::reactive::{clear_microtasks, run_microtasks};

	#[rstest]
	#[serial(microtasks)]
	fn test_assignment_is_deferred_to_microtask() {
		clear_microtasks();
		let node_ref = NodeRef::new();
		let node = document().create_element("input");

		node_ref.writer().assign(&node);
		assert_eq!(node_ref.get(), None);

		run_microtasks();
		assert_eq!(node_ref.get(), Some(node));
	}

	#[rstest]
	#[serial(microtasks)]
	fn test_superseded_assignment_is_dropped() {
		clear_microtasks();
		let node_ref = NodeRef::new();
		let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
		let sink = seen.clone();
		let _sub = node_ref.subscribe(move |node| sink.borrow_mut().push(node.clone()));

		let first = document().create_element("a");
		let second = document().create_element("b");
		let writer = node_ref.writer();
		writer.assign(&first);
		writer.assign(&second);
		run_microtasks();

		assert_eq!(*seen.borrow(), vec![Some(second)]);
	}
}
