//! Dependency capability
//!
//! Effects, computed values and directives declare what they read. Anything
//! that can be sampled and observed is a [`Dependency`]; [`Plain`] wraps a
//! value that can be sampled but never notifies. [`Dependencies`] lifts a
//! single dependency, a tuple or a `Vec` into one list.

use std::fmt;
use std::rc::Rc;

use super::state::{ReadState, State, Subscription};
use crate::error::ValidationError;

/// Something that can be read now and observed for changes.
pub trait Dependency {
	type Value;

	/// Reads the current value.
	fn sample(&self) -> Self::Value;

	/// Calls `notify` after every change. Non-reactive values return `None`.
	fn observe(&self, notify: Rc<dyn Fn()>) -> Option<Subscription>;

	/// Whether this dependency ever notifies.
	fn is_reactive(&self) -> bool {
		true
	}

	/// Human-readable kind, used in validation messages.
	fn kind(&self) -> &'static str {
		"State"
	}
}

impl<T: Clone + 'static> Dependency for State<T> {
	type Value = T;

	fn sample(&self) -> T {
		self.get()
	}

	fn observe(&self, notify: Rc<dyn Fn()>) -> Option<Subscription> {
		Some(self.subscribe(move |_| notify()))
	}
}

impl<T: Clone + 'static> Dependency for ReadState<T> {
	type Value = T;

	fn sample(&self) -> T {
		self.get()
	}

	fn observe(&self, notify: Rc<dyn Fn()>) -> Option<Subscription> {
		Some(self.subscribe(move |_| notify()))
	}
}

/// A plain value in a dependency list.
///
/// It is sampled every time the dependent value is evaluated, but changing
/// it never triggers an evaluation. Interior-mutable contents (`Rc<RefCell<_>>`)
/// therefore become visible on the next evaluation caused by a real state.
#[derive(Clone, PartialEq, Eq)]
pub struct Plain<V>(pub V);

impl<V: fmt::Debug> fmt::Debug for Plain<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Plain").field(&self.0).finish()
	}
}

impl<V: Clone> Dependency for Plain<V> {
	type Value = V;

	fn sample(&self) -> V {
		self.0.clone()
	}

	fn observe(&self, _notify: Rc<dyn Fn()>) -> Option<Subscription> {
		None
	}

	fn is_reactive(&self) -> bool {
		false
	}

	fn kind(&self) -> &'static str {
		"plain value"
	}
}

/// Checks one member of a dependency list.
pub fn check_dependency<D: Dependency + ?Sized>(
	dependency: &D,
	context: &'static str,
	index: usize,
) -> Result<(), ValidationError> {
	if dependency.is_reactive() {
		Ok(())
	} else {
		Err(ValidationError::DependencyNotAState {
			context,
			index,
			received: dependency.kind(),
		})
	}
}

/// A list of dependencies: `()`, a single dependency, a tuple or a `Vec`.
pub trait Dependencies {
	type Values;

	fn sample(&self) -> Self::Values;

	/// Observes every reactive member with the same `notify` callback.
	fn observe_all(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription>;

	/// Fails with the index of the first non-reactive member.
	fn check_reactive(&self, context: &'static str) -> Result<(), ValidationError>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Dependencies for () {
	type Values = ();

	fn sample(&self) {}

	fn observe_all(&self, _notify: Rc<dyn Fn()>) -> Vec<Subscription> {
		Vec::new()
	}

	fn check_reactive(&self, _context: &'static str) -> Result<(), ValidationError> {
		Ok(())
	}

	fn len(&self) -> usize {
		0
	}
}

// A single dependency is a one-element list.
macro_rules! single_dependency {
	($($ty:ident),* $(,)?) => {$(
		impl<T: Clone + 'static> $crate::reactive::Dependencies for $ty<T> {
			type Values = T;

			fn sample(&self) -> T {
				$crate::reactive::Dependency::sample(self)
			}

			fn observe_all(
				&self,
				notify: ::std::rc::Rc<dyn Fn()>,
			) -> Vec<$crate::reactive::Subscription> {
				$crate::reactive::Dependency::observe(self, notify).into_iter().collect()
			}

			fn check_reactive(
				&self,
				context: &'static str,
			) -> Result<(), $crate::ValidationError> {
				$crate::reactive::dependency::check_dependency(self, context, 0)
			}

			fn len(&self) -> usize {
				1
			}
		}
	)*};
}

single_dependency!(State, ReadState, Plain);

macro_rules! tuple_dependencies {
	($(($($name:ident : $idx:tt),+)),+ $(,)?) => {$(
		impl<$($name: Dependency),+> Dependencies for ($($name,)+) {
			type Values = ($($name::Value,)+);

			fn sample(&self) -> Self::Values {
				($(self.$idx.sample(),)+)
			}

			fn observe_all(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription> {
				let mut subscriptions = Vec::new();
				$(
					if let Some(subscription) = self.$idx.observe(Rc::clone(&notify)) {
						subscriptions.push(subscription);
					}
				)+
				subscriptions
			}

			fn check_reactive(&self, context: &'static str) -> Result<(), ValidationError> {
				$(check_dependency(&self.$idx, context, $idx)?;)+
				Ok(())
			}

			fn len(&self) -> usize {
				[$($idx),+].len()
			}
		}
	)+};
}

tuple_dependencies!(
	(A: 0),
	(A: 0, B: 1),
	(A: 0, B: 1, C: 2),
	(A: 0, B: 1, C: 2, D: 3),
	(A: 0, B: 1, C: 2, D: 3, E: 4),
	(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
);

impl<D: Dependency> Dependencies for Vec<D> {
	type Values = Vec<D::Value>;

	fn sample(&self) -> Self::Values {
		self.iter().map(Dependency::sample).collect()
	}

	fn observe_all(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription> {
		self.iter()
			.filter_map(|dependency| dependency.observe(Rc::clone(&notify)))
			.collect()
	}

	fn check_reactive(&self, context: &'static str) -> Result<(), ValidationError> {
		self.iter()
			.enumerate()
			.try_for_each(|(index, dependency)| check_dependency(dependency, context, index))
	}

	fn len(&self) -> usize {
		Vec::len(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_tuple_samples_in_order() {
		let a = State::new(1);
		let b = State::new("x".to_string());
		let deps = (a.clone(), Plain(3.5), b.read_only());

		assert_eq!(deps.sample(), (1, 3.5, "x".to_string()));
		assert_eq!(deps.len(), 3);
	}

	#[rstest]
	fn test_tuple_check_names_offending_index() {
		let deps = (State::new(1), State::new(2), Plain(0));
		let err = deps.check_reactive("Effect").unwrap_err();
		assert_eq!(err.index(), Some(2));
	}

	#[rstest]
	fn test_vec_check_names_offending_index() {
		let deps = vec![Plain(1), Plain(2)];
		let err = deps.check_reactive("Compute").unwrap_err();
		assert_eq!(err.index(), Some(0));
		assert!(err.to_string().contains("plain value"));
	}

	#[rstest]
	fn test_observe_all_skips_plain_values() {
		let a = State::new(0);
		let deps = (a.clone(), Plain(1));
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let subscriptions = deps.observe_all(Rc::new(move || counter.set(counter.get() + 1)));

		assert_eq!(subscriptions.len(), 1);
		a.set(5);
		assert_eq!(hits.get(), 1);
	}
}
