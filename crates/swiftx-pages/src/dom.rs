//! Live document
//!
//! swiftx renders into a small retained document tree: elements in the HTML
//! or SVG namespace, text nodes, comments (used as region markers) and
//! fragments. The tree supports exactly what the renderer, directives and
//! router need: ordered child insertion that moves fragment contents,
//! sibling navigation, attributes and inline styles, bubbling events,
//! teardown hooks and a one-shot "attached" hook.
//!
//! On `wasm32` every node is backed by a browser node and mutations are
//! forwarded to it, so mounting into `Document::body()` renders into the
//! page. Native builds keep the tree in memory only.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::dom::document;
//!
//! let doc = document();
//! let list = doc.create_element("ul");
//! let item = doc.create_element("li");
//! item.append_child(&doc.create_text_node("first"))?;
//! list.append_child(&item)?;
//! assert_eq!(list.to_html(), "<ul><li>first</li></ul>");
//! ```

pub mod document;
pub mod event;
mod host;
pub mod node;

pub use document::{Document, document};
pub use event::{Event, EventHandler, EventType, ListenerId};
pub use node::{HTML_NAMESPACE, Namespace, Node, NodeKind, SVG_NAMESPACE, WeakNode};

use thiserror::Error;

/// Errors raised by tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// The insertion would create a cycle or targets a node that cannot have children.
	#[error("Hierarchy request error: {0}")]
	HierarchyRequest(String),

	/// The reference node is not a child of the target parent.
	#[error("Node not found: the reference node is not a child of this parent")]
	NotFound,

	/// The browser rejected a mutation.
	#[error("Host error: {0}")]
	Host(String),
}
