//! Live nodes.
//!
//! A [`Node`] is a cheap reference-counted handle; equality is identity.
//! Parents own their children, children hold a weak link back. On `wasm32`
//! each node is backed by a browser node that receives every mutation.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::DomError;
use super::event::{Event, EventHandler, EventType, ListenerId};
use super::host::{HostListener, HostNode};

/// Namespace URI of HTML elements.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
/// Namespace URI of SVG elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
	#[default]
	Html,
	Svg,
}

impl Namespace {
	pub fn uri(self) -> &'static str {
		match self {
			Self::Html => HTML_NAMESPACE,
			Self::Svg => SVG_NAMESPACE,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	Element { tag: String, namespace: Namespace },
	Text,
	Comment,
	Fragment,
}

type Hook = Box<dyn FnOnce()>;

struct Listener {
	id: ListenerId,
	event_type: EventType,
	handler: EventHandler,
	_host: HostListener,
}

struct NodeData {
	kind: NodeKind,
	host: HostNode,
	parent: Option<Weak<RefCell<NodeData>>>,
	children: Vec<Node>,
	attributes: Vec<(String, String)>,
	styles: Vec<(String, String)>,
	data: String,
	listeners: Vec<Listener>,
	next_listener: u64,
	cleanups: Vec<Hook>,
	on_attach: Vec<Hook>,
}

/// Handle to a node of the live document.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

/// Non-owning handle, used by subscriptions that must not keep a node alive.
#[derive(Clone)]
pub struct WeakNode(Weak<RefCell<NodeData>>);

impl WeakNode {
	pub fn upgrade(&self) -> Option<Node> {
		self.0.upgrade().map(Node)
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for Node {}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let data = self.0.borrow();
		match &data.kind {
			NodeKind::Element { tag, .. } => write!(f, "<{tag}> ({} children)", data.children.len()),
			NodeKind::Text => write!(f, "#text {:?}", data.data),
			NodeKind::Comment => write!(f, "<!--{}-->", data.data),
			NodeKind::Fragment => write!(f, "#fragment ({} children)", data.children.len()),
		}
	}
}

impl Node {
	pub(crate) fn from_parts(kind: NodeKind, host: HostNode) -> Self {
		Self(Rc::new(RefCell::new(NodeData {
			kind,
			host,
			parent: None,
			children: Vec::new(),
			attributes: Vec::new(),
			styles: Vec::new(),
			data: String::new(),
			listeners: Vec::new(),
			next_listener: 0,
			cleanups: Vec::new(),
			on_attach: Vec::new(),
		})))
	}

	pub(crate) fn host(&self) -> HostNode {
		self.0.borrow().host.clone()
	}

	/// The browser node behind this node.
	#[cfg(target_arch = "wasm32")]
	pub fn as_web_sys(&self) -> Option<web_sys::Node> {
		self.0.borrow().host.as_web_sys().cloned()
	}

	pub fn downgrade(&self) -> WeakNode {
		WeakNode(Rc::downgrade(&self.0))
	}

	pub fn kind(&self) -> NodeKind {
		self.0.borrow().kind.clone()
	}

	pub fn is_element(&self) -> bool {
		matches!(self.0.borrow().kind, NodeKind::Element { .. })
	}

	pub fn is_text(&self) -> bool {
		matches!(self.0.borrow().kind, NodeKind::Text)
	}

	pub fn is_comment(&self) -> bool {
		matches!(self.0.borrow().kind, NodeKind::Comment)
	}

	pub fn is_fragment(&self) -> bool {
		matches!(self.0.borrow().kind, NodeKind::Fragment)
	}

	/// Tag name of an element, `None` for other nodes.
	pub fn tag_name(&self) -> Option<String> {
		match &self.0.borrow().kind {
			NodeKind::Element { tag, .. } => Some(tag.clone()),
			_ => None,
		}
	}

	pub fn namespace(&self) -> Option<Namespace> {
		match &self.0.borrow().kind {
			NodeKind::Element { namespace, .. } => Some(*namespace),
			_ => None,
		}
	}

	pub fn namespace_uri(&self) -> Option<&'static str> {
		self.namespace().map(Namespace::uri)
	}

	// Tree navigation

	pub fn parent(&self) -> Option<Node> {
		self.0.borrow().parent.as_ref().and_then(Weak::upgrade).map(Node)
	}

	pub fn is_attached(&self) -> bool {
		self.parent().is_some()
	}

	pub fn children(&self) -> Vec<Node> {
		self.0.borrow().children.clone()
	}

	pub fn child_count(&self) -> usize {
		self.0.borrow().children.len()
	}

	pub fn first_child(&self) -> Option<Node> {
		self.0.borrow().children.first().cloned()
	}

	pub fn last_child(&self) -> Option<Node> {
		self.0.borrow().children.last().cloned()
	}

	fn index_in_parent(&self) -> Option<(Node, usize)> {
		let parent = self.parent()?;
		let index = parent.0.borrow().children.iter().position(|c| c == self)?;
		Some((parent, index))
	}

	pub fn next_sibling(&self) -> Option<Node> {
		let (parent, index) = self.index_in_parent()?;
		let sibling = parent.0.borrow().children.get(index + 1).cloned();
		sibling
	}

	pub fn previous_sibling(&self) -> Option<Node> {
		let (parent, index) = self.index_in_parent()?;
		let sibling = index
			.checked_sub(1)
			.and_then(|i| parent.0.borrow().children.get(i).cloned());
		sibling
	}

	/// Returns `true` if `other` is this node or one of its descendants.
	pub fn contains(&self, other: &Node) -> bool {
		let mut current = Some(other.clone());
		while let Some(node) = current {
			if &node == self {
				return true;
			}
			current = node.parent();
		}
		false
	}

	/// Walks up to the topmost ancestor.
	pub fn root(&self) -> Node {
		let mut current = self.clone();
		while let Some(parent) = current.parent() {
			current = parent;
		}
		current
	}

	// Mutation

	pub fn append_child(&self, child: &Node) -> Result<(), DomError> {
		self.insert_before(child, None)
	}

	/// Inserts `child` before `reference`, or at the end when `reference` is `None`.
	///
	/// A fragment moves its children and stays empty. A node that already
	/// has a parent is moved.
	pub fn insert_before(&self, child: &Node, reference: Option<&Node>) -> Result<(), DomError> {
		if !(self.is_element() || self.is_fragment()) {
			return Err(DomError::HierarchyRequest(format!(
				"{self:?} cannot have children"
			)));
		}
		if child.contains(self) {
			return Err(DomError::HierarchyRequest(
				"the new child is an ancestor of the parent".to_string(),
			));
		}

		// Inserting a node before itself keeps it where it is.
		let reference = match reference {
			Some(r) if r == child => child.next_sibling(),
			other => other.cloned(),
		};
		if let Some(r) = &reference
			&& r.parent().as_ref() != Some(self)
		{
			return Err(DomError::NotFound);
		}

		let host = self.host();
		let host_reference = reference.as_ref().map(Node::host);
		let incoming = if child.is_fragment() {
			child.children()
		} else {
			vec![child.clone()]
		};
		for node in &incoming {
			host.insert_before(&node.host(), host_reference.as_ref())?;
		}

		let nodes = if child.is_fragment() {
			let moved = std::mem::take(&mut child.0.borrow_mut().children);
			for node in &moved {
				node.0.borrow_mut().parent = None;
			}
			moved
		} else {
			child.unlink();
			vec![child.clone()]
		};

		{
			let mut data = self.0.borrow_mut();
			let index = match &reference {
				Some(r) => data
					.children
					.iter()
					.position(|c| c == r)
					.ok_or(DomError::NotFound)?,
				None => data.children.len(),
			};
			for (offset, node) in nodes.iter().enumerate() {
				node.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
				data.children.insert(index + offset, node.clone());
			}
		}

		for node in &nodes {
			node.fire_attached();
		}
		Ok(())
	}

	/// Drops the parent link without touching the host.
	fn unlink(&self) {
		if let Some((parent, index)) = self.index_in_parent() {
			parent.0.borrow_mut().children.remove(index);
		}
		self.0.borrow_mut().parent = None;
	}

	fn detach(&self) {
		self.unlink();
		if let Err(err) = self.host().remove() {
			crate::error_log!("swiftx: failed to detach {:?}: {}", self, err);
		}
	}

	/// Removes this node from its parent. Does nothing when detached.
	pub fn remove(&self) {
		self.detach();
	}

	pub fn remove_child(&self, child: &Node) -> Result<(), DomError> {
		if child.parent().as_ref() != Some(self) {
			return Err(DomError::NotFound);
		}
		child.detach();
		Ok(())
	}

	/// Puts `replacement` where this node is and detaches this node.
	pub fn replace_with(&self, replacement: &Node) -> Result<(), DomError> {
		let Some(parent) = self.parent() else {
			return Ok(());
		};
		parent.insert_before(replacement, Some(self))?;
		self.detach();
		Ok(())
	}

	/// Detaches and disposes every child.
	pub fn clear_children(&self) {
		let children = std::mem::take(&mut self.0.borrow_mut().children);
		for child in children {
			child.0.borrow_mut().parent = None;
			child.dispose();
		}
		self.host().clear();
	}

	// Attributes, styles and text

	pub fn set_attribute(&self, name: &str, value: &str) {
		{
			let mut data = self.0.borrow_mut();
			match data.attributes.iter_mut().find(|(n, _)| n == name) {
				Some((_, existing)) => *existing = value.to_string(),
				None => data.attributes.push((name.to_string(), value.to_string())),
			}
		}
		if let Err(err) = self.host().set_attribute(name, value) {
			crate::error_log!("swiftx: failed to set attribute {}: {}", name, err);
		}
	}

	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.0
			.borrow()
			.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.clone())
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.get_attribute(name).is_some()
	}

	pub fn remove_attribute(&self, name: &str) {
		self.0.borrow_mut().attributes.retain(|(n, _)| n != name);
		if let Err(err) = self.host().remove_attribute(name) {
			crate::error_log!("swiftx: failed to remove attribute {}: {}", name, err);
		}
	}

	pub fn attributes(&self) -> Vec<(String, String)> {
		self.0.borrow().attributes.clone()
	}

	pub fn set_style(&self, property: &str, value: &str) {
		{
			let mut data = self.0.borrow_mut();
			match data.styles.iter_mut().find(|(p, _)| p == property) {
				Some((_, existing)) => *existing = value.to_string(),
				None => data.styles.push((property.to_string(), value.to_string())),
			}
		}
		self.sync_host_style();
	}

	pub fn style(&self, property: &str) -> Option<String> {
		self.0
			.borrow()
			.styles
			.iter()
			.find(|(p, _)| p == property)
			.map(|(_, v)| v.clone())
	}

	pub fn remove_style(&self, property: &str) {
		self.0.borrow_mut().styles.retain(|(p, _)| p != property);
		self.sync_host_style();
	}

	/// Inline styles in `style` attribute syntax.
	pub fn style_text(&self) -> String {
		self.0
			.borrow()
			.styles
			.iter()
			.map(|(p, v)| format!("{p}: {v};"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	// The host only knows styles through its `style` attribute.
	fn sync_host_style(&self) {
		let style = self.style_text();
		let host = self.host();
		let result = if style.is_empty() {
			host.remove_attribute("style")
		} else {
			host.set_attribute("style", &style)
		};
		if let Err(err) = result {
			crate::error_log!("swiftx: failed to write inline styles: {}", err);
		}
	}

	/// Character data of a text or comment node.
	pub fn data(&self) -> String {
		self.0.borrow().data.clone()
	}

	pub fn set_data(&self, data: &str) {
		self.0.borrow_mut().data = data.to_string();
		self.host().set_data(data);
	}

	/// Concatenated text of this node and its descendants (comments excluded).
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		let data = self.0.borrow();
		match data.kind {
			NodeKind::Text => out.push_str(&data.data),
			NodeKind::Comment => {}
			_ => {
				for child in &data.children {
					child.collect_text(out);
				}
			}
		}
	}

	// Events

	pub fn add_event_listener(
		&self,
		event_type: impl Into<EventType>,
		handler: EventHandler,
	) -> ListenerId {
		let event_type = event_type.into();
		let host = self
			.host()
			.listen(&event_type, Rc::clone(&handler), self.downgrade())
			.unwrap_or_else(|err| {
				crate::error_log!("swiftx: failed to listen for {}: {}", event_type, err);
				HostListener::default()
			});
		let mut data = self.0.borrow_mut();
		let id = ListenerId(data.next_listener);
		data.next_listener += 1;
		data.listeners.push(Listener {
			id,
			event_type,
			handler,
			_host: host,
		});
		id
	}

	pub fn remove_event_listener(&self, id: ListenerId) {
		self.0.borrow_mut().listeners.retain(|l| l.id != id);
	}

	pub fn listener_count(&self) -> usize {
		self.0.borrow().listeners.len()
	}

	/// Dispatches `event` on this node, bubbling to ancestors when the event
	/// bubbles. Returns `false` when a listener called `prevent_default`.
	pub fn dispatch_event(&self, event: &Event) -> bool {
		event.set_target(self);
		let mut current = Some(self.clone());
		while let Some(node) = current {
			let handlers: Vec<EventHandler> = node
				.0
				.borrow()
				.listeners
				.iter()
				.filter(|l| &l.event_type == event.event_type())
				.map(|l| Rc::clone(&l.handler))
				.collect();
			event.set_current_target(Some(&node));
			for handler in handlers {
				handler(event);
			}
			if !event.bubbles() || event.propagation_stopped() {
				break;
			}
			current = node.parent();
		}
		event.set_current_target(None);
		!event.default_prevented()
	}

	/// Shorthand for dispatching a `click`.
	pub fn click(&self) -> bool {
		self.dispatch_event(&Event::new(EventType::Click))
	}

	// Lifecycle

	/// Registers teardown work run by [`dispose`](Self::dispose).
	pub fn on_cleanup(&self, cleanup: impl FnOnce() + 'static) {
		self.0.borrow_mut().cleanups.push(Box::new(cleanup));
	}

	/// Runs the teardown work of this node and all of its descendants.
	///
	/// The node stays usable; disposal only releases reactive bindings.
	pub fn dispose(&self) {
		let cleanups = std::mem::take(&mut self.0.borrow_mut().cleanups);
		for cleanup in cleanups {
			cleanup();
		}
		for child in self.children() {
			child.dispose();
		}
	}

	/// Runs `hook` once this node has a parent: now if it already has one,
	/// otherwise on its next insertion.
	pub fn when_attached(&self, hook: impl FnOnce() + 'static) {
		if self.is_attached() {
			hook();
		} else {
			self.0.borrow_mut().on_attach.push(Box::new(hook));
		}
	}

	fn fire_attached(&self) {
		let hooks = std::mem::take(&mut self.0.borrow_mut().on_attach);
		for hook in hooks {
			hook();
		}
	}

	// Queries

	/// First descendant matching a simple selector (`tag`, `#id` or `.class`).
	pub fn query_selector(&self, selector: &str) -> Option<Node> {
		let mut found = None;
		self.walk(&mut |node| {
			if found.is_none() && node.matches_selector(selector) {
				found = Some(node.clone());
			}
		});
		found
	}

	/// All descendants matching a simple selector, in document order.
	pub fn query_selector_all(&self, selector: &str) -> Vec<Node> {
		let mut found = Vec::new();
		self.walk(&mut |node| {
			if node.matches_selector(selector) {
				found.push(node.clone());
			}
		});
		found
	}

	fn walk(&self, visit: &mut dyn FnMut(&Node)) {
		for child in self.children() {
			visit(&child);
			child.walk(visit);
		}
	}

	fn matches_selector(&self, selector: &str) -> bool {
		let Some(tag) = self.tag_name() else {
			return false;
		};
		if let Some(id) = selector.strip_prefix('#') {
			self.get_attribute("id").as_deref() == Some(id)
		} else if let Some(class) = selector.strip_prefix('.') {
			self.get_attribute("class")
				.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
		} else {
			tag.eq_ignore_ascii_case(selector)
		}
	}

	// Serialization

	/// Serializes the node and its descendants as markup.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		let data = self.0.borrow();
		match &data.kind {
			NodeKind::Text => out.push_str(&escape(&data.data, false)),
			NodeKind::Comment => {
				out.push_str("<!--");
				out.push_str(&data.data);
				out.push_str("-->");
			}
			NodeKind::Fragment => {
				for child in &data.children {
					child.write_html(out);
				}
			}
			NodeKind::Element { tag, .. } => {
				out.push('<');
				out.push_str(tag);
				for (name, value) in &data.attributes {
					out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
				}
				if !data.styles.is_empty() {
					let style = self.style_text();
					out.push_str(&format!(" style=\"{}\"", escape(&style, true)));
				}
				out.push('>');
				for child in &data.children {
					child.write_html(out);
				}
				out.push_str("</");
				out.push_str(tag);
				out.push('>');
			}
		}
	}
}

fn escape(raw: &str, attribute: bool) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' if attribute => out.push_str("&quot;"),
			_ => out.push(c),
		}
	}
	out
}
