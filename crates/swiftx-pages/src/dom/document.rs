//! Node factory.

use super::host::HostNode;
use super::node::{Namespace, Node, NodeKind};

/// Creates nodes for the live document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Document;

/// Returns the document factory.
pub fn document() -> Document {
	Document
}

impl Document {
	/// Creates an HTML element.
	pub fn create_element(&self, tag: &str) -> Node {
		self.create_element_ns(Namespace::Html, tag)
	}

	/// Creates an element in `namespace`.
	pub fn create_element_ns(&self, namespace: Namespace, tag: &str) -> Node {
		Node::from_parts(
			NodeKind::Element {
				tag: tag.to_string(),
				namespace,
			},
			HostNode::element(namespace, tag),
		)
	}

	pub fn create_text_node(&self, text: &str) -> Node {
		let node = Node::from_parts(NodeKind::Text, HostNode::text(text));
		node.set_data(text);
		node
	}

	pub fn create_comment(&self, text: &str) -> Node {
		let node = Node::from_parts(NodeKind::Comment, HostNode::comment(text));
		node.set_data(text);
		node
	}

	pub fn create_document_fragment(&self) -> Node {
		Node::from_parts(NodeKind::Fragment, HostNode::fragment())
	}

	/// The page's `<body>`, as a mount container.
	#[cfg(target_arch = "wasm32")]
	pub fn body(&self) -> Option<Node> {
		let body = web_sys::window()?.document()?.body()?;
		Some(adopt(body.into()))
	}

	/// An existing page element, as a mount container.
	#[cfg(target_arch = "wasm32")]
	pub fn get_element_by_id(&self, id: &str) -> Option<Node> {
		let element = web_sys::window()?.document()?.get_element_by_id(id)?;
		Some(adopt(element))
	}
}

/// Wraps a page element that swiftx did not create. Its existing browser
/// children are not part of the live tree; `render` clears them.
#[cfg(target_arch = "wasm32")]
fn adopt(element: web_sys::Element) -> Node {
	let namespace = match element.namespace_uri().as_deref() {
		Some(super::SVG_NAMESPACE) => Namespace::Svg,
		_ => Namespace::Html,
	};
	Node::from_parts(
		NodeKind::Element {
			tag: element.tag_name().to_ascii_lowercase(),
			namespace,
		},
		HostNode::from_web_sys(element.into()),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Namespace::Html, "div")]
	#[case(Namespace::Svg, "circle")]
	fn test_create_element_keeps_tag_and_namespace(#[case] namespace: Namespace, #[case] tag: &str) {
		let node = document().create_element_ns(namespace, tag);
		assert_eq!(node.tag_name().as_deref(), Some(tag));
		assert_eq!(node.namespace(), Some(namespace));
	}

	#[rstest]
	fn test_character_data_nodes() {
		let doc = document();
		assert_eq!(doc.create_text_node("hi").data(), "hi");
		assert!(doc.create_comment("marker").is_comment());
		assert!(doc.create_document_fragment().is_fragment());
	}
}
