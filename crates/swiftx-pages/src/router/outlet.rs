//! Marker-bounded regions of the live tree.
//!
//! Routers own their output as the nodes between two comment markers. A
//! region starts inside a fresh fragment; mounting the fragment moves the
//! markers (and anything between them) into place, after which the region
//! keeps working wherever the markers ended up.

use crate::component::MountError;
use crate::dom::{DomError, Node, document};

#[derive(Debug, Clone)]
pub(crate) struct Region {
	start: Node,
	end: Node,
}

impl Region {
	/// Creates a region named `label`, returned with the fragment holding
	/// its markers.
	pub(crate) fn new(label: &str) -> Result<(Self, Node), MountError> {
		let doc = document();
		let fragment = doc.create_document_fragment();
		let start = doc.create_comment(&format!("{label}:start"));
		let end = doc.create_comment(&format!("{label}:end"));
		fragment.append_child(&start)?;
		fragment.append_child(&end)?;
		Ok((Self { start, end }, fragment))
	}

	pub(crate) fn start(&self) -> &Node {
		&self.start
	}

	/// Nodes currently between the markers.
	pub(crate) fn nodes(&self) -> Vec<Node> {
		let mut nodes = Vec::new();
		let mut next = self.start.next_sibling();
		while let Some(node) = next {
			if node == self.end {
				break;
			}
			next = node.next_sibling();
			nodes.push(node);
		}
		nodes
	}

	/// Removes and disposes everything between the markers.
	pub(crate) fn clear(&self) {
		for node in self.nodes() {
			node.remove();
			node.dispose();
		}
	}

	/// Replaces the region's content with `live`.
	pub(crate) fn replace(&self, live: &Node) -> Result<(), DomError> {
		self.clear();
		let parent = self.end.parent().ok_or(DomError::NotFound)?;
		parent.insert_before(live, Some(&self.end))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_region_replaces_only_its_content() {
		let doc = document();
		let container = doc.create_element("div");
		let before = doc.create_text_node("before");
		container.append_child(&before).unwrap();
		let (region, fragment) = Region::new("test").unwrap();
		container.append_child(&fragment).unwrap();

		region.replace(&doc.create_text_node("one")).unwrap();
		region.replace(&doc.create_text_node("two")).unwrap();

		assert_eq!(container.text_content(), "beforetwo");
		assert_eq!(region.nodes().len(), 1);
		assert_eq!(container.child_count(), 4);

		region.clear();
		assert_eq!(container.text_content(), "before");
		assert!(region.start().is_attached());
	}
}
