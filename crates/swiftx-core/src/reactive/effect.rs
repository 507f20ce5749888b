//! Effect - side effects bound to explicit dependencies
//!
//! An `Effect` runs its callback once immediately and again after every
//! change of any dependency. The callback receives the sampled dependency
//! values: `()` for no dependencies, the value itself for a single
//! dependency, and a tuple (or `Vec`) for several.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_core::reactive::{Effect, State};
//!
//! let first = State::new("Ada".to_string());
//! let last = State::new("Lovelace".to_string());
//!
//! let effect = Effect::new((first.clone(), last.clone()), |(f, l)| {
//!     println!("{f} {l}");
//! })?;
//!
//! last.set("Byron".to_string()); // prints "Ada Byron"
//! effect.dispose();
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::dependency::Dependencies;
use super::state::Subscription;
use crate::error::ValidationError;

/// A registered side effect.
///
/// Dropping an `Effect` leaves it running; call [`dispose`](Self::dispose)
/// to unsubscribe from every dependency.
pub struct Effect {
	subscriptions: RefCell<Vec<Subscription>>,
	disposed: Cell<bool>,
}

impl fmt::Debug for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Effect")
			.field("subscriptions", &self.subscriptions.borrow().len())
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

impl Effect {
	/// Registers `callback` against `deps` and runs it once.
	///
	/// Every dependency must be reactive; plain values are rejected with a
	/// [`ValidationError`] naming their index.
	pub fn new<D, F>(deps: D, callback: F) -> Result<Self, ValidationError>
	where
		D: Dependencies + 'static,
		F: Fn(D::Values) + 'static,
	{
		deps.check_reactive("Effect")?;

		let deps = Rc::new(deps);
		let run: Rc<dyn Fn()> = {
			let deps = Rc::clone(&deps);
			Rc::new(move || callback(deps.sample()))
		};
		// Subscribe before the first run so changes made by the callback are seen.
		let subscriptions = deps.observe_all(Rc::clone(&run));
		run();

		Ok(Self {
			subscriptions: RefCell::new(subscriptions),
			disposed: Cell::new(false),
		})
	}

	/// Unsubscribes from every dependency. Later changes are ignored.
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
		for subscription in subscriptions {
			subscription.unsubscribe();
		}
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::{Plain, ReadState, State};
	use rstest::rstest;

	#[rstest]
	fn test_single_dependency_runs_eagerly_with_value() {
		let count = State::new(7);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();

		let _effect = Effect::new(count.clone(), move |value| sink.borrow_mut().push(value)).unwrap();
		assert_eq!(*seen.borrow(), vec![7]);

		count.set(8);
		assert_eq!(*seen.borrow(), vec![7, 8]);
	}

	#[rstest]
	fn test_multiple_dependencies_receive_tuple() {
		let first = State::new("Ada".to_string());
		let last = State::new("Lovelace".to_string());
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();

		let _effect = Effect::new((first.clone(), last.clone()), move |(f, l)| {
			sink.borrow_mut().push(format!("{f} {l}"));
		})
		.unwrap();

		last.set("Byron".to_string());
		first.set("Augusta".to_string());
		assert_eq!(
			*seen.borrow(),
			vec!["Ada Lovelace", "Ada Byron", "Augusta Byron"]
		);
	}

	#[rstest]
	fn test_no_dependencies_runs_once() {
		let runs = Rc::new(Cell::new(0));
		let counter = runs.clone();
		let _effect = Effect::new((), move |()| counter.set(counter.get() + 1)).unwrap();
		assert_eq!(runs.get(), 1);
	}

	#[rstest]
	fn test_plain_dependency_is_rejected() {
		let result = Effect::new(Plain(123), |_| {});
		let err = result.unwrap_err();
		assert_eq!(err.context(), "Effect");
		assert!(err.to_string().contains("Expected a State") || err.to_string().contains("not a State"));
	}

	#[rstest]
	fn test_mixed_tuple_rejected_with_index() {
		let state = State::new(1);
		let err = Effect::new((state, Plain("x")), |_| {}).unwrap_err();
		assert_eq!(err.index(), Some(1));
	}

	#[rstest]
	fn test_dispose_stops_reruns() {
		let count = State::new(0);
		let runs = Rc::new(Cell::new(0));
		let counter = runs.clone();
		let effect = Effect::new(count.clone(), move |_| counter.set(counter.get() + 1)).unwrap();

		effect.dispose();
		count.set(1);

		assert_eq!(runs.get(), 1);
		assert!(effect.is_disposed());
		assert_eq!(count.subscriber_count(), 0);
	}

	#[rstest]
	fn test_read_state_dependency() {
		let count = State::new(1);
		let doubled: ReadState<i32> = count.map(|v| v * 2);
		let seen = Rc::new(Cell::new(0));
		let sink = seen.clone();

		let _effect = Effect::new(doubled, move |v| sink.set(v)).unwrap();
		count.set(4);
		assert_eq!(seen.get(), 8);
	}
}
