//! Host history and the shared route state.
//!
//! A [`RouteRegistry`] owns the reactive route cell every router observes
//! and talks to the host's history. On `wasm32` that host is
//! `window.history`/`window.location`, with a `popstate` listener feeding
//! back/forward navigation into the cell. Native hosts use an in-memory
//! history with the same push/replace/back semantics, which is also what
//! the tests run against.
//!
//! The registry behind [`RouteRegistry::global`] is created lazily per
//! thread and can be replaced with [`RouteRegistry::reset`]. Routers may
//! also be handed an explicit registry.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use swiftx_core::reactive::{ReadState, State};

/// Kind of history update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	Push,
	Replace,
}

/// State stored with each history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	pub path: String,
}

/// The current route location.
///
/// `seq` increases with every navigation, so navigating to the path that is
/// already current still notifies observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
	pub path: String,
	pub seq: u64,
}

/// Prefixes `/` when missing.
pub fn normalize_path(path: &str) -> String {
	if path.starts_with('/') {
		path.to_string()
	} else {
		format!("/{path}")
	}
}

/// In-memory history used on native hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
	entries: Vec<String>,
	index: usize,
}

impl MemoryHistory {
	pub fn new(initial: &str) -> Self {
		Self {
			entries: vec![normalize_path(initial)],
			index: 0,
		}
	}

	pub fn current(&self) -> &str {
		&self.entries[self.index]
	}

	pub fn push(&mut self, path: &str) {
		self.entries.truncate(self.index + 1);
		self.entries.push(path.to_string());
		self.index += 1;
	}

	pub fn replace(&mut self, path: &str) {
		self.entries[self.index] = path.to_string();
	}

	/// Steps back, returning the new current path.
	pub fn back(&mut self) -> Option<String> {
		self.index = self.index.checked_sub(1)?;
		Some(self.entries[self.index].clone())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

struct RegistryInner {
	location: State<RouteLocation>,
	seq: Cell<u64>,
	router_count: Cell<usize>,
	#[cfg(not(target_arch = "wasm32"))]
	history: RefCell<MemoryHistory>,
	#[cfg(target_arch = "wasm32")]
	listening: Cell<bool>,
}

/// Shared route state plus the host history behind it.
#[derive(Clone)]
pub struct RouteRegistry {
	inner: Rc<RegistryInner>,
}

impl fmt::Debug for RouteRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteRegistry")
			.field("location", &self.location())
			.field("router_count", &self.router_count())
			.finish()
	}
}

thread_local! {
	static GLOBAL: RefCell<Option<RouteRegistry>> = const { RefCell::new(None) };
}

impl RouteRegistry {
	/// Creates a registry starting at `initial_path`.
	///
	/// On `wasm32` the browser location wins over `initial_path`.
	pub fn new(initial_path: &str) -> Self {
		let path = host::initial_path(initial_path);
		Self {
			inner: Rc::new(RegistryInner {
				location: State::new(RouteLocation {
					path: path.clone(),
					seq: 0,
				}),
				seq: Cell::new(0),
				router_count: Cell::new(0),
				#[cfg(not(target_arch = "wasm32"))]
				history: RefCell::new(MemoryHistory::new(&path)),
				#[cfg(target_arch = "wasm32")]
				listening: Cell::new(false),
			}),
		}
	}

	/// The thread's default registry, created on first use.
	pub fn global() -> Self {
		GLOBAL.with(|global| {
			global
				.borrow_mut()
				.get_or_insert_with(|| RouteRegistry::new("/"))
				.clone()
		})
	}

	/// Replaces the default registry with a fresh one at `initial_path`.
	///
	/// Routers mounted before the reset keep observing the old registry.
	pub fn reset(initial_path: &str) -> Self {
		let registry = RouteRegistry::new(initial_path);
		GLOBAL.with(|global| *global.borrow_mut() = Some(registry.clone()));
		registry
	}

	/// The route cell observed by routers.
	pub fn route_state(&self) -> ReadState<RouteLocation> {
		self.inner.location.read_only()
	}

	pub fn location(&self) -> RouteLocation {
		self.inner.location.get()
	}

	pub fn current_path(&self) -> String {
		self.inner.location.with(|location| location.path.clone())
	}

	/// Number of routers mounted against this registry.
	pub fn router_count(&self) -> usize {
		self.inner.router_count.get()
	}

	pub(crate) fn register_router(&self) {
		self.inner.router_count.set(self.inner.router_count.get() + 1);
		self.listen();
	}

	/// Updates the host location and publishes the new path.
	pub fn navigate(&self, path: &str, navigation_type: NavigationType) {
		let path = normalize_path(path);
		crate::debug_log!("Router: {:?} {}", navigation_type, path);
		self.write_host(&path, navigation_type);
		self.publish(path);
	}

	/// Steps back in the host history, or replaces with `fallback` when
	/// there is nothing to go back to.
	pub fn back(&self, fallback: &str) {
		#[cfg(not(target_arch = "wasm32"))]
		{
			let previous = self.inner.history.borrow_mut().back();
			match previous {
				Some(path) => self.publish(path),
				None => self.navigate(fallback, NavigationType::Replace),
			}
		}
		#[cfg(target_arch = "wasm32")]
		{
			if !host::back() {
				self.navigate(fallback, NavigationType::Replace);
			}
		}
	}

	/// Publishes a location change that already happened in the host
	/// (a `popstate`, or a test simulating one).
	pub fn sync_location(&self, path: &str) {
		let path = normalize_path(path);
		#[cfg(not(target_arch = "wasm32"))]
		self.inner.history.borrow_mut().replace(&path);
		self.publish(path);
	}

	/// Snapshot of the in-memory history.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn history(&self) -> MemoryHistory {
		self.inner.history.borrow().clone()
	}

	fn publish(&self, path: String) {
		let seq = self.inner.seq.get() + 1;
		self.inner.seq.set(seq);
		self.inner.location.set(RouteLocation { path, seq });
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn write_host(&self, path: &str, navigation_type: NavigationType) {
		let mut history = self.inner.history.borrow_mut();
		match navigation_type {
			NavigationType::Push => history.push(path),
			NavigationType::Replace => history.replace(path),
		}
	}

	#[cfg(target_arch = "wasm32")]
	fn write_host(&self, path: &str, navigation_type: NavigationType) {
		let state = HistoryState {
			path: path.to_string(),
		};
		if let Err(err) = host::write(&state, navigation_type) {
			crate::error_log!("Router: failed to update history: {}", err);
		}
	}

	/// Starts following back/forward navigation in the host. Native hosts
	/// have nothing to follow.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn listen(&self) {}

	/// Starts following back/forward navigation in the host.
	#[cfg(target_arch = "wasm32")]
	pub fn listen(&self) {
		if self.inner.listening.replace(true) {
			return;
		}
		let registry = self.clone();
		if let Err(err) = host::on_pop_state(move |path| registry.publish(path)) {
			crate::error_log!("Router: failed to listen for popstate: {}", err);
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
	use super::normalize_path;

	pub(super) fn initial_path(fallback: &str) -> String {
		normalize_path(fallback)
	}
}

#[cfg(target_arch = "wasm32")]
mod host {
	use super::{HistoryState, NavigationType, normalize_path};
	use wasm_bindgen::JsCast;
	use wasm_bindgen::JsValue;
	use wasm_bindgen::closure::Closure;

	fn describe(err: JsValue) -> String {
		err.as_string().unwrap_or_else(|| format!("{err:?}"))
	}

	pub(super) fn current_path() -> Option<String> {
		web_sys::window()?.location().pathname().ok()
	}

	pub(super) fn initial_path(fallback: &str) -> String {
		current_path().unwrap_or_else(|| normalize_path(fallback))
	}

	pub(super) fn write(state: &HistoryState, navigation_type: NavigationType) -> Result<(), String> {
		let window = web_sys::window().ok_or("no window")?;
		let history = window.history().map_err(describe)?;
		let json = serde_json::to_string(state).map_err(|err| err.to_string())?;
		let state_value = JsValue::from_str(&json);
		match navigation_type {
			NavigationType::Push => history.push_state_with_url(&state_value, "", Some(&state.path)),
			NavigationType::Replace => {
				history.replace_state_with_url(&state_value, "", Some(&state.path))
			}
		}
		.map_err(describe)
	}

	/// Returns `false` when there is no entry to go back to.
	pub(super) fn back() -> bool {
		let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
			return false;
		};
		if history.length().unwrap_or(0) <= 1 {
			return false;
		}
		history.back().is_ok()
	}

	pub(super) fn on_pop_state(callback: impl Fn(String) + 'static) -> Result<(), String> {
		let window = web_sys::window().ok_or("no window")?;
		let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
			if let Some(path) = current_path() {
				callback(path);
			}
		});
		window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(describe)?;
		// The listener lives as long as the page.
		closure.forget();
		Ok(())
	}
}
