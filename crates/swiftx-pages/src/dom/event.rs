//! Events dispatched through the live document.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::node::Node;

/// Event handler stored on a node.
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// Identifies a registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// DOM event types understood by the element builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
	Click,
	DblClick,
	Input,
	Change,
	Submit,
	KeyDown,
	KeyUp,
	Focus,
	Blur,
	MouseEnter,
	MouseLeave,
	MouseDown,
	MouseUp,
	PopState,
	Custom(String),
}

impl EventType {
	const KNOWN: &'static [(&'static str, EventType)] = &[
		("click", EventType::Click),
		("dblclick", EventType::DblClick),
		("input", EventType::Input),
		("change", EventType::Change),
		("submit", EventType::Submit),
		("keydown", EventType::KeyDown),
		("keyup", EventType::KeyUp),
		("focus", EventType::Focus),
		("blur", EventType::Blur),
		("mouseenter", EventType::MouseEnter),
		("mouseleave", EventType::MouseLeave),
		("mousedown", EventType::MouseDown),
		("mouseup", EventType::MouseUp),
		("popstate", EventType::PopState),
	];

	pub fn as_str(&self) -> &str {
		match self {
			Self::Custom(name) => name,
			known => Self::KNOWN
				.iter()
				.find(|(_, ty)| ty == known)
				.map(|(name, _)| *name)
				.unwrap_or_default(),
		}
	}

	/// Recognizes an event prop name: `click`, `onclick` or `onClick`.
	///
	/// Returns `None` for names that are not known events, so that such
	/// props fall through to plain attributes.
	pub fn from_prop_name(name: &str) -> Option<Self> {
		let lower = name.to_ascii_lowercase();
		let bare = lower.strip_prefix("on").unwrap_or(&lower);
		Self::KNOWN
			.iter()
			.find(|(known, _)| *known == bare || *known == lower)
			.map(|(_, ty)| ty.clone())
	}

	/// Whether events of this type bubble to ancestors.
	pub fn bubbles(&self) -> bool {
		!matches!(
			self,
			Self::Focus | Self::Blur | Self::MouseEnter | Self::MouseLeave | Self::PopState
		)
	}
}

impl From<&str> for EventType {
	fn from(name: &str) -> Self {
		Self::KNOWN
			.iter()
			.find(|(known, _)| *known == name)
			.map(|(_, ty)| ty.clone())
			.unwrap_or_else(|| Self::Custom(name.to_string()))
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An event travelling through the tree.
pub struct Event {
	event_type: EventType,
	bubbles: bool,
	target: RefCell<Option<Node>>,
	current_target: RefCell<Option<Node>>,
	default_prevented: Cell<bool>,
	propagation_stopped: Cell<bool>,
	#[cfg(target_arch = "wasm32")]
	host: Option<web_sys::Event>,
}

impl fmt::Debug for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("type", &self.event_type)
			.field("bubbles", &self.bubbles)
			.field("default_prevented", &self.default_prevented.get())
			.finish()
	}
}

impl Event {
	pub fn new(event_type: impl Into<EventType>) -> Self {
		let event_type = event_type.into();
		Self {
			bubbles: event_type.bubbles(),
			event_type,
			target: RefCell::new(None),
			current_target: RefCell::new(None),
			default_prevented: Cell::new(false),
			propagation_stopped: Cell::new(false),
			#[cfg(target_arch = "wasm32")]
			host: None,
		}
	}

	/// Wraps an event delivered by the browser to `current`'s listener.
	///
	/// The browser does the bubbling, so `target` and `current_target` are
	/// both the listening node.
	#[cfg(target_arch = "wasm32")]
	pub(crate) fn from_host(raw: web_sys::Event, current: Option<Node>) -> Self {
		let mut event = Self::new(EventType::from(raw.type_().as_str())).with_bubbles(raw.bubbles());
		*event.target.get_mut() = current.clone();
		*event.current_target.get_mut() = current;
		event.default_prevented.set(raw.default_prevented());
		event.host = Some(raw);
		event
	}

	/// The browser event, for events that came from the page.
	#[cfg(target_arch = "wasm32")]
	pub fn as_web_sys(&self) -> Option<&web_sys::Event> {
		self.host.as_ref()
	}

	pub fn with_bubbles(mut self, bubbles: bool) -> Self {
		self.bubbles = bubbles;
		self
	}

	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	pub fn bubbles(&self) -> bool {
		self.bubbles
	}

	/// The node the event was dispatched on.
	pub fn target(&self) -> Option<Node> {
		self.target.borrow().clone()
	}

	/// The node whose listener is currently running.
	pub fn current_target(&self) -> Option<Node> {
		self.current_target.borrow().clone()
	}

	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
		#[cfg(target_arch = "wasm32")]
		if let Some(raw) = &self.host {
			raw.prevent_default();
		}
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	pub fn stop_propagation(&self) {
		self.propagation_stopped.set(true);
		#[cfg(target_arch = "wasm32")]
		if let Some(raw) = &self.host {
			raw.stop_propagation();
		}
	}

	pub(crate) fn propagation_stopped(&self) -> bool {
		self.propagation_stopped.get()
	}

	pub(crate) fn set_target(&self, node: &Node) {
		*self.target.borrow_mut() = Some(node.clone());
	}

	pub(crate) fn set_current_target(&self, node: Option<&Node>) {
		*self.current_target.borrow_mut() = node.cloned();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("click", Some(EventType::Click))]
	#[case("onClick", Some(EventType::Click))]
	#[case("onchange", Some(EventType::Change))]
	#[case("input", Some(EventType::Input))]
	#[case("class", None)]
	#[case("onboarding", None)]
	fn test_from_prop_name(#[case] name: &str, #[case] expected: Option<EventType>) {
		assert_eq!(EventType::from_prop_name(name), expected);
	}

	#[rstest]
	fn test_custom_event_round_trips_name() {
		let ty = EventType::from("swiftx:ready");
		assert_eq!(ty, EventType::Custom("swiftx:ready".to_string()));
		assert_eq!(ty.as_str(), "swiftx:ready");
	}

	#[rstest]
	fn test_focus_does_not_bubble() {
		assert!(!Event::new(EventType::Focus).bubbles());
		assert!(Event::new("click").bubbles());
	}
}
