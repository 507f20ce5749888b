//! React-style hooks
//!
//! Thin constructors over the core primitives, named the way components
//! use them. Dependencies are explicit, as in the core.

use swiftx_core::ValidationError;
use swiftx_core::reactive::{
	Dependencies, Effect, ReadState, State, compute, compute_strict, queue_microtask,
};

use crate::component::NodeRef;

/// Creates a state cell.
///
/// # Example
///
/// ```ignore
/// let count = use_state(0);
/// count.set(count.get() + 1);
/// ```
pub fn use_state<T: 'static>(initial: T) -> State<T> {
	State::new(initial)
}

/// Registers an effect over `deps`.
///
/// The argument order follows the hook convention: callback first,
/// dependencies second.
///
/// # Errors
///
/// Returns a [`ValidationError`] when a dependency is not reactive.
///
/// # Example
///
/// ```ignore
/// let title = use_state(String::from("Home"));
/// let _effect = use_effect(|t| log(&t), title.clone())?;
/// ```
pub fn use_effect<D, F>(callback: F, deps: D) -> Result<Effect, ValidationError>
where
	D: Dependencies + 'static,
	F: Fn(D::Values) + 'static,
{
	Effect::new(deps, callback)
}

/// Memoizes a value derived from `deps`; plain values are allowed.
///
/// # Example
///
/// ```ignore
/// let search = use_state(String::from("A"));
/// let filtered = use_memo((search.clone(), Plain(data)), |(s, d)| filter(&d, &s));
/// ```
pub fn use_memo<D, U, F>(deps: D, f: F) -> ReadState<U>
where
	D: Dependencies + 'static,
	U: PartialEq + 'static,
	F: Fn(D::Values) -> U + 'static,
{
	compute(deps, f)
}

/// Like [`use_memo`], but rejects plain values.
pub fn use_memo_strict<D, U, F>(deps: D, f: F) -> Result<ReadState<U>, ValidationError>
where
	D: Dependencies + 'static,
	U: PartialEq + 'static,
	F: Fn(D::Values) -> U + 'static,
{
	compute_strict(deps, f)
}

/// Creates a handle for the `ref` prop.
pub fn use_ref() -> NodeRef {
	NodeRef::new()
}

/// Runs `callback` after the current render pass.
pub fn when_ready(callback: impl FnOnce() + 'static) {
	queue_microtask(callback);
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::Cell;
	use std::rc::Rc;
	use swiftx_core::reactive::{Plain, clear_microtasks, run_microtasks};

	#[rstest]
	fn test_use_effect_runs_with_state() {
		let count = use_state(1);
		let seen = Rc::new(Cell::new(0));
		let sink = seen.clone();
		let _effect = use_effect(move |v| sink.set(v), count.clone()).unwrap();
		count.set(3);
		assert_eq!(seen.get(), 3);
	}

	#[rstest]
	fn test_use_memo_strict_rejects_primitive() {
		assert!(use_memo_strict(Plain(123), |v| v + 1).is_err());
		assert_eq!(use_memo(Plain(123), |v| v + 1).get(), 124);
	}

	#[rstest]
	#[serial(microtasks)]
	fn test_when_ready_defers() {
		clear_microtasks();
		let ran = Rc::new(Cell::new(false));
		let flag = ran.clone();
		when_ready(move || flag.set(true));
		assert!(!ran.get());
		run_microtasks();
		assert!(ran.get());
	}
}
