//! Router context and options.
//!
//! [`RouterContext`] carries an application value (current user, feature
//! flags, ...) to every route component, layout and policy of a router.
//! While a router renders, the same context is also reachable through
//! [`use_router_context`].

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::core::RouterError;

/// Application context shared by a router's routes, layouts and policies.
#[derive(Clone, Default)]
pub struct RouterContext {
	value: Option<Rc<dyn Any>>,
}

impl fmt::Debug for RouterContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterContext")
			.field("has_value", &self.value.is_some())
			.finish()
	}
}

impl RouterContext {
	pub fn new<T: 'static>(value: T) -> Self {
		Self {
			value: Some(Rc::new(value)),
		}
	}

	pub fn empty() -> Self {
		Self::default()
	}

	/// Returns the value if it has type `T`.
	pub fn get<T: 'static>(&self) -> Option<&T> {
		self.value.as_ref()?.downcast_ref::<T>()
	}

	pub fn is_empty(&self) -> bool {
		self.value.is_none()
	}
}

/// Where `back()` takes its history from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
	/// Each route group keeps its own stack of visited paths.
	#[default]
	Group,
	/// `back()` uses the host's history.
	Global,
}

/// Router construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterOptions {
	#[serde(default)]
	pub history_mode: HistoryMode,
}

impl RouterOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn history_mode(mut self, mode: HistoryMode) -> Self {
		self.history_mode = mode;
		self
	}

	/// Parses options from JSON, e.g. `{"history_mode": "global"}`.
	pub fn from_json(json: &str) -> Result<Self, RouterError> {
		serde_json::from_str(json).map_err(|err| RouterError::InvalidOptions(err.to_string()))
	}
}

thread_local! {
	static CONTEXT_STACK: RefCell<Vec<RouterContext>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` with `context` as the active router context.
pub(crate) fn with_router_context<R>(context: &RouterContext, f: impl FnOnce() -> R) -> R {
	CONTEXT_STACK.with(|stack| stack.borrow_mut().push(context.clone()));
	let result = f();
	CONTEXT_STACK.with(|stack| stack.borrow_mut().pop());
	result
}

/// The context of the router that is currently rendering, if any.
pub fn use_router_context() -> Option<RouterContext> {
	CONTEXT_STACK.with(|stack| stack.borrow().last().cloned())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, PartialEq)]
	struct Session {
		user: &'static str,
	}

	#[rstest]
	fn test_context_downcasts_to_stored_type() {
		let context = RouterContext::new(Session { user: "ada" });
		assert_eq!(context.get::<Session>(), Some(&Session { user: "ada" }));
		assert_eq!(context.get::<String>(), None);
		assert!(RouterContext::empty().get::<Session>().is_none());
	}

	#[rstest]
	fn test_use_router_context_is_scoped() {
		assert!(use_router_context().is_none());
		let context = RouterContext::new(7_u32);
		let seen = with_router_context(&context, || {
			use_router_context().and_then(|c| c.get::<u32>().copied())
		});
		assert_eq!(seen, Some(7));
		assert!(use_router_context().is_none());
	}

	#[rstest]
	#[case(r#"{"history_mode": "global"}"#, HistoryMode::Global)]
	#[case(r#"{"history_mode": "group"}"#, HistoryMode::Group)]
	#[case("{}", HistoryMode::Group)]
	fn test_options_from_json(#[case] json: &str, #[case] expected: HistoryMode) {
		assert_eq!(RouterOptions::from_json(json).unwrap().history_mode, expected);
	}

	#[rstest]
	fn test_invalid_options_are_reported() {
		assert!(matches!(
			RouterOptions::from_json(r#"{"history_mode": "sideways"}"#),
			Err(RouterError::InvalidOptions(_))
		));
	}
}
