//! Mounting views onto the live document.

use std::borrow::Cow;

use thiserror::Error;

use super::into_view::{AttrValue, IntoView, View};
use crate::dom::{DomError, Namespace, Node, document};

/// Error type for mounting views.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
	/// A tree mutation failed.
	#[error("Failed to mount view: {0}")]
	Dom(#[from] DomError),
}

/// Builds live nodes for `view` in the HTML namespace.
///
/// Elements become elements, text becomes text nodes, fragments and lists
/// become document fragments, components are invoked with their children.
pub fn to_live_tree(view: impl IntoView) -> Result<Node, MountError> {
	to_live_tree_in(view, false)
}

/// Builds live nodes for `view`; with `svg` set, elements are created in the
/// SVG namespace.
///
/// An element tagged `svg` switches to the SVG namespace for itself and all
/// of its descendants.
pub fn to_live_tree_in(view: impl IntoView, svg: bool) -> Result<Node, MountError> {
	let namespace = if svg { Namespace::Svg } else { Namespace::Html };
	build(view.into_view(), namespace)
}

/// Clears `container` (disposing its old content) and mounts `view` into it.
pub fn render(view: impl IntoView, container: &Node) -> Result<(), MountError> {
	container.clear_children();
	let live = to_live_tree(view)?;
	container.append_child(&live)?;
	Ok(())
}

fn build(view: View, namespace: Namespace) -> Result<Node, MountError> {
	let doc = document();
	match view {
		View::Text(text) => Ok(doc.create_text_node(&text)),
		View::Dynamic(state) => {
			let node = state.with(|text| doc.create_text_node(text));
			let weak = node.downgrade();
			let subscription = state.subscribe(move |text| {
				if let Some(node) = weak.upgrade() {
					node.set_data(text);
				}
			});
			node.on_cleanup(move || subscription.unsubscribe());
			Ok(node)
		}
		View::Fragment(children) => {
			let fragment = doc.create_document_fragment();
			for child in children {
				fragment.append_child(&build(child, namespace)?)?;
			}
			Ok(fragment)
		}
		View::Component(component) => build(component.render(), namespace),
		View::Node(node) => Ok(node),
		View::Empty => Ok(doc.create_document_fragment()),
		View::Element(element) => {
			let parts = element.into_parts();
			let namespace = if parts.tag == "svg" { Namespace::Svg } else { namespace };
			let node = doc.create_element_ns(namespace, &parts.tag);

			for (name, value) in parts.attrs {
				bind_attribute(&node, name, value);
			}
			for (property, value) in parts.styles {
				bind_style(&node, property, value);
			}
			for (event_type, handler) in parts.events {
				node.add_event_listener(event_type, handler);
			}
			for child in parts.children {
				node.append_child(&build(child, namespace)?)?;
			}
			if let Some(node_ref) = parts.node_ref {
				node_ref.writer().assign(&node);
			}
			Ok(node)
		}
	}
}

fn apply_flag(node: &Node, name: &str, on: bool) {
	if on {
		node.set_attribute(name, "");
	} else {
		node.remove_attribute(name);
	}
}

fn bind_attribute(node: &Node, name: Cow<'static, str>, value: AttrValue) {
	match value {
		AttrValue::Static(value) => node.set_attribute(&name, &value),
		AttrValue::Flag(on) => apply_flag(node, &name, on),
		AttrValue::Dynamic(state) => {
			state.with(|value| node.set_attribute(&name, value));
			let weak = node.downgrade();
			let subscription = state.subscribe(move |value| {
				if let Some(node) = weak.upgrade() {
					node.set_attribute(&name, value);
				}
			});
			node.on_cleanup(move || subscription.unsubscribe());
		}
		AttrValue::DynamicFlag(state) => {
			apply_flag(node, &name, state.get());
			let weak = node.downgrade();
			let subscription = state.subscribe(move |on| {
				if let Some(node) = weak.upgrade() {
					apply_flag(&node, &name, *on);
				}
			});
			node.on_cleanup(move || subscription.unsubscribe());
		}
	}
}

fn bind_style(node: &Node, property: Cow<'static, str>, value: AttrValue) {
	match value {
		AttrValue::Static(value) => node.set_style(&property, &value),
		AttrValue::Flag(_) | AttrValue::DynamicFlag(_) => {
			crate::dev_warn!("Style `{}` cannot take a boolean value", property);
		}
		AttrValue::Dynamic(state) => {
			state.with(|value| node.set_style(&property, value));
			let weak = node.downgrade();
			let subscription = state.subscribe(move |value| {
				if let Some(node) = weak.upgrade() {
					node.set_style(&property, value);
				}
			});
			node.on_cleanup(move || subscription.unsubscribe());
		}
	}
}
