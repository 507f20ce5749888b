//! Platform node backing.
//!
//! Every [`Node`](super::Node) carries a [`HostNode`]. On `wasm32` it wraps
//! the browser's `web_sys::Node` and each tree mutation, attribute, text
//! change and listener is forwarded to it, so the page's document follows
//! the live tree. On native hosts it is empty and the in-memory tree is the
//! whole document.

#[cfg(target_arch = "wasm32")]
pub(crate) use self::browser::{HostListener, HostNode};
#[cfg(not(target_arch = "wasm32"))]
pub(crate) use self::memory::{HostListener, HostNode};

#[cfg(not(target_arch = "wasm32"))]
mod memory {
	use super::super::DomError;
	use super::super::event::{EventHandler, EventType};
	use super::super::node::{Namespace, WeakNode};

	#[derive(Debug, Clone, Default)]
	pub(crate) struct HostNode;

	#[derive(Debug, Default)]
	pub(crate) struct HostListener;

	impl HostNode {
		pub(crate) fn element(_namespace: Namespace, _tag: &str) -> Self {
			Self
		}

		pub(crate) fn text(_data: &str) -> Self {
			Self
		}

		pub(crate) fn comment(_data: &str) -> Self {
			Self
		}

		pub(crate) fn fragment() -> Self {
			Self
		}

		pub(crate) fn insert_before(
			&self,
			_child: &HostNode,
			_reference: Option<&HostNode>,
		) -> Result<(), DomError> {
			Ok(())
		}

		pub(crate) fn remove(&self) -> Result<(), DomError> {
			Ok(())
		}

		pub(crate) fn clear(&self) {}

		pub(crate) fn set_attribute(&self, _name: &str, _value: &str) -> Result<(), DomError> {
			Ok(())
		}

		pub(crate) fn remove_attribute(&self, _name: &str) -> Result<(), DomError> {
			Ok(())
		}

		pub(crate) fn set_data(&self, _data: &str) {}

		pub(crate) fn listen(
			&self,
			_event_type: &EventType,
			_handler: EventHandler,
			_owner: WeakNode,
		) -> Result<HostListener, DomError> {
			Ok(HostListener)
		}
	}
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use std::fmt;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::JsValue;
	use wasm_bindgen::closure::Closure;

	use super::super::DomError;
	use super::super::event::{Event, EventHandler, EventType};
	use super::super::node::{Namespace, WeakNode};

	fn document() -> Option<web_sys::Document> {
		web_sys::window()?.document()
	}

	fn host_error(err: JsValue) -> DomError {
		DomError::Host(format!("{err:?}"))
	}

	/// A browser node, or nothing when no document is reachable (workers).
	#[derive(Clone, Default)]
	pub(crate) struct HostNode(Option<web_sys::Node>);

	impl fmt::Debug for HostNode {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.debug_tuple("HostNode").field(&self.0.is_some()).finish()
		}
	}

	impl HostNode {
		pub(crate) fn from_web_sys(node: web_sys::Node) -> Self {
			Self(Some(node))
		}

		pub(crate) fn as_web_sys(&self) -> Option<&web_sys::Node> {
			self.0.as_ref()
		}

		pub(crate) fn element(namespace: Namespace, tag: &str) -> Self {
			let created = document().and_then(|doc| match namespace {
				Namespace::Html => doc.create_element(tag).ok(),
				Namespace::Svg => doc.create_element_ns(Some(namespace.uri()), tag).ok(),
			});
			Self(created.map(Into::into))
		}

		pub(crate) fn text(data: &str) -> Self {
			Self(document().map(|doc| doc.create_text_node(data).into()))
		}

		pub(crate) fn comment(data: &str) -> Self {
			Self(document().map(|doc| doc.create_comment(data).into()))
		}

		pub(crate) fn fragment() -> Self {
			Self(document().map(|doc| doc.create_document_fragment().into()))
		}

		fn element_ref(&self) -> Option<&web_sys::Element> {
			self.0.as_ref()?.dyn_ref::<web_sys::Element>()
		}

		pub(crate) fn insert_before(
			&self,
			child: &HostNode,
			reference: Option<&HostNode>,
		) -> Result<(), DomError> {
			let (Some(parent), Some(child)) = (&self.0, &child.0) else {
				return Ok(());
			};
			let reference = reference.and_then(|r| r.0.as_ref());
			parent
				.insert_before(child, reference)
				.map(|_| ())
				.map_err(host_error)
		}

		pub(crate) fn remove(&self) -> Result<(), DomError> {
			let Some(node) = &self.0 else {
				return Ok(());
			};
			match node.parent_node() {
				Some(parent) => parent.remove_child(node).map(|_| ()).map_err(host_error),
				None => Ok(()),
			}
		}

		/// Removes every browser child, including ones the live tree never knew about.
		pub(crate) fn clear(&self) {
			let Some(node) = &self.0 else {
				return;
			};
			while let Some(child) = node.first_child() {
				if let Err(err) = node.remove_child(&child) {
					crate::error_log!("swiftx: failed to clear host node: {:?}", err);
					break;
				}
			}
		}

		pub(crate) fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
			match self.element_ref() {
				Some(element) => element.set_attribute(name, value).map_err(host_error),
				None => Ok(()),
			}
		}

		pub(crate) fn remove_attribute(&self, name: &str) -> Result<(), DomError> {
			match self.element_ref() {
				Some(element) => element.remove_attribute(name).map_err(host_error),
				None => Ok(()),
			}
		}

		pub(crate) fn set_data(&self, data: &str) {
			if let Some(node) = &self.0 {
				node.set_node_value(Some(data));
			}
		}

		pub(crate) fn listen(
			&self,
			event_type: &EventType,
			handler: EventHandler,
			owner: WeakNode,
		) -> Result<HostListener, DomError> {
			let Some(node) = self.0.clone() else {
				return Ok(HostListener(None));
			};
			let target: web_sys::EventTarget = node.into();
			let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
				let event = Event::from_host(raw, owner.upgrade());
				handler(&event);
			});
			let name = event_type.as_str().to_string();
			target
				.add_event_listener_with_callback(&name, closure.as_ref().unchecked_ref())
				.map_err(host_error)?;
			Ok(HostListener(Some(Registration {
				target,
				name,
				closure,
			})))
		}
	}

	struct Registration {
		target: web_sys::EventTarget,
		name: String,
		closure: Closure<dyn FnMut(web_sys::Event)>,
	}

	/// Browser listener registration, removed from the target when dropped.
	#[derive(Default)]
	pub(crate) struct HostListener(Option<Registration>);

	impl fmt::Debug for HostListener {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.debug_tuple("HostListener").field(&self.0.is_some()).finish()
		}
	}

	impl Drop for HostListener {
		fn drop(&mut self) {
			if let Some(registration) = self.0.take()
				&& let Err(err) = registration.target.remove_event_listener_with_callback(
					&registration.name,
					registration.closure.as_ref().unchecked_ref(),
				) {
				crate::error_log!("swiftx: failed to remove listener: {:?}", err);
			}
		}
	}
}
