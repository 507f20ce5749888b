//! State cells
//!
//! A [`State`] holds a value and a list of subscribers. Writes that do not
//! change the value (under `PartialEq`) are ignored; every other write
//! notifies all active subscribers synchronously, in the order they
//! subscribed.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_core::reactive::State;
//!
//! let name = State::new(String::from("Ada"));
//! let greeting = name.map(|n| format!("Hello, {n}"));
//!
//! let sub = greeting.subscribe(|g| println!("{g}"));
//! name.set(String::from("Grace")); // prints "Hello, Grace"
//! sub.unsubscribe();
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

struct Subscriber<T> {
	id: u64,
	active: Cell<bool>,
	callback: Box<dyn Fn(&T)>,
}

struct Inner<T> {
	value: RefCell<Rc<T>>,
	subscribers: RefCell<Vec<Rc<Subscriber<T>>>>,
	next_id: Cell<u64>,
}

impl<T: 'static> Inner<T> {
	fn remove(&self, id: u64) {
		let mut subscribers = self.subscribers.borrow_mut();
		if let Some(pos) = subscribers.iter().position(|s| s.id == id) {
			// A notification pass may still hold this subscriber in its snapshot.
			subscribers[pos].active.set(false);
			subscribers.remove(pos);
		}
	}
}

/// A mutable reactive cell.
///
/// Cloning a `State` yields another handle to the same cell.
pub struct State<T: 'static> {
	inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for State<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for State<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("State")
			.field("value", &*self.inner.value.borrow())
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.finish()
	}
}

impl<T: Default + 'static> Default for State<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: 'static> State<T> {
	/// Creates a cell holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(Rc::new(value)),
				subscribers: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		(**self.inner.value.borrow()).clone()
	}

	/// Runs `f` with a reference to the current value.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		let value = Rc::clone(&self.inner.value.borrow());
		f(&*value)
	}

	/// Stores `value` and notifies subscribers, unless it equals the current value.
	pub fn set(&self, value: T)
	where
		T: PartialEq,
	{
		if **self.inner.value.borrow() == value {
			return;
		}
		self.store(value);
	}

	/// Mutates the value in place and always notifies subscribers.
	///
	/// Use this when the new value cannot be compared cheaply, or when a
	/// notification is wanted even though nothing observable changed.
	pub fn update(&self, f: impl FnOnce(&mut T))
	where
		T: Clone,
	{
		let mut next = self.get();
		f(&mut next);
		self.store(next);
	}

	fn store(&self, value: T) {
		*self.inner.value.borrow_mut() = Rc::new(value);
		self.notify();
	}

	fn notify(&self) {
		let value = Rc::clone(&self.inner.value.borrow());
		let snapshot: Vec<Rc<Subscriber<T>>> = self.inner.subscribers.borrow().clone();
		for subscriber in snapshot {
			if subscriber.active.get() {
				(subscriber.callback)(&*value);
			}
		}
	}

	/// Registers `callback` to run after every change.
	///
	/// The callback is not invoked for the current value.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		let id = self.inner.next_id.get();
		self.inner.next_id.set(id + 1);
		self.inner.subscribers.borrow_mut().push(Rc::new(Subscriber {
			id,
			active: Cell::new(true),
			callback: Box::new(callback),
		}));

		let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
		Subscription::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.remove(id);
			}
		})
	}

	/// Derives a read-only cell that follows this one through `f`.
	///
	/// The source owns the link: the derived cell keeps following (and stays
	/// allocated) even after every returned handle is dropped, and is only
	/// unsubscribed once the source is dropped too. Map from a source whose
	/// lifetime matches the view that reads the result.
	pub fn map<U, F>(&self, f: F) -> ReadState<U>
	where
		U: PartialEq + 'static,
		F: Fn(&T) -> U + 'static,
	{
		let derived = State::new(self.with(&f));
		let target = derived.clone();
		let _link = self.subscribe(move |value| target.set(f(value)));
		derived.read_only()
	}

	/// Returns a read-only view of this cell.
	pub fn read_only(&self) -> ReadState<T> {
		ReadState { state: self.clone() }
	}

	/// Number of active subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().len()
	}

	/// Returns `true` when both handles point at the same cell.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

/// A read-only view over a [`State`].
///
/// Values produced by [`State::map`] and [`compute`](super::compute) are
/// exposed this way so that only their source can drive them.
pub struct ReadState<T: 'static> {
	state: State<T>,
}

impl<T: 'static> Clone for ReadState<T> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for ReadState<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ReadState").field(&self.state).finish()
	}
}

impl<T: 'static> From<State<T>> for ReadState<T> {
	fn from(state: State<T>) -> Self {
		state.read_only()
	}
}

impl<T: 'static> ReadState<T> {
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.state.get()
	}

	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		self.state.with(f)
	}

	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		self.state.subscribe(callback)
	}

	/// Same ownership as [`State::map`]: the link lives as long as the source.
	pub fn map<U, F>(&self, f: F) -> ReadState<U>
	where
		U: PartialEq + 'static,
		F: Fn(&T) -> U + 'static,
	{
		self.state.map(f)
	}

	pub fn subscriber_count(&self) -> usize {
		self.state.subscriber_count()
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		self.state.ptr_eq(&other.state)
	}
}

/// Handle returned by `subscribe`.
///
/// Dropping it keeps the subscription alive; call
/// [`unsubscribe`](Self::unsubscribe) to detach.
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.release.is_some())
			.finish()
	}
}

impl Subscription {
	/// Wraps an arbitrary release function.
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// A subscription that releases nothing.
	pub fn empty() -> Self {
		Self { release: None }
	}

	/// Folds several subscriptions into one.
	pub fn combine(subscriptions: Vec<Subscription>) -> Self {
		Self::new(move || {
			for subscription in subscriptions {
				subscription.unsubscribe();
			}
		})
	}

	/// Detaches the subscriber.
	pub fn unsubscribe(mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_set_identical_value_is_noop() {
		let state = State::new(5);
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		let _sub = state.subscribe(move |_| counter.set(counter.get() + 1));

		state.set(5);
		assert_eq!(calls.get(), 0);

		state.set(6);
		assert_eq!(calls.get(), 1);
		assert_eq!(state.get(), 6);
	}

	#[rstest]
	fn test_subscribers_fire_in_subscription_order() {
		let state = State::new(0);
		let log = Rc::new(RefCell::new(Vec::new()));
		for name in ["first", "second", "third"] {
			let log = log.clone();
			let _ = state.subscribe(move |v| log.borrow_mut().push(format!("{name}:{v}")));
		}

		state.set(1);
		assert_eq!(*log.borrow(), vec!["first:1", "second:1", "third:1"]);
	}

	#[rstest]
	fn test_unsubscribe_stops_notifications() {
		let state = State::new("a".to_string());
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let sub = state.subscribe(move |v: &String| sink.borrow_mut().push(v.clone()));

		state.set("b".to_string());
		sub.unsubscribe();
		state.set("c".to_string());

		assert_eq!(*seen.borrow(), vec!["b".to_string()]);
		assert_eq!(state.subscriber_count(), 0);
	}

	#[rstest]
	fn test_unsubscribe_during_notification_skips_later_subscriber() {
		let state = State::new(0);
		let calls = Rc::new(Cell::new(0));
		let pending: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

		let slot = pending.clone();
		let _first = state.subscribe(move |_| {
			if let Some(sub) = slot.borrow_mut().take() {
				sub.unsubscribe();
			}
		});
		let counter = calls.clone();
		*pending.borrow_mut() = Some(state.subscribe(move |_| counter.set(counter.get() + 1)));

		state.set(1);
		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_update_always_notifies() {
		let state = State::new(vec![1, 2]);
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		let _sub = state.subscribe(move |_| counter.set(counter.get() + 1));

		state.update(|items| items.push(3));
		state.update(|_| {});

		assert_eq!(calls.get(), 2);
		assert_eq!(state.get(), vec![1, 2, 3]);
	}

	#[rstest]
	fn test_map_follows_source() {
		let count = State::new(2);
		let doubled = count.map(|v| v * 2);
		assert_eq!(doubled.get(), 4);

		count.set(10);
		assert_eq!(doubled.get(), 20);
	}

	#[rstest]
	fn test_map_link_is_owned_by_source() {
		let count = State::new(1);
		let doubled = count.map(|v| v * 2);
		assert_eq!(count.subscriber_count(), 1);

		drop(doubled);
		assert_eq!(count.subscriber_count(), 1);

		let weak = Rc::downgrade(&count.inner);
		drop(count);
		assert!(weak.upgrade().is_none());
	}

	#[rstest]
	fn test_map_chains() {
		let name = State::new("ada".to_string());
		let upper = name.map(|n| n.to_uppercase());
		let len = upper.map(|n| n.len());

		name.set("grace".to_string());
		assert_eq!(upper.get(), "GRACE");
		assert_eq!(len.get(), 5);
	}

	#[rstest]
	fn test_nested_set_runs_depth_first() {
		let a = State::new(0);
		let b = State::new(0);
		let log = Rc::new(RefCell::new(Vec::new()));

		let b_in = b.clone();
		let log_a = log.clone();
		let _ = a.subscribe(move |v| {
			log_a.borrow_mut().push(format!("a:{v}"));
			b_in.set(*v * 10);
			log_a.borrow_mut().push("a:done".to_string());
		});
		let log_b = log.clone();
		let _ = b.subscribe(move |v| log_b.borrow_mut().push(format!("b:{v}")));

		a.set(1);
		assert_eq!(*log.borrow(), vec!["a:1", "b:10", "a:done"]);
	}

	#[rstest]
	fn test_ptr_eq_distinguishes_cells() {
		let a = State::new(1);
		let b = State::new(1);
		assert!(a.ptr_eq(&a.clone()));
		assert!(!a.ptr_eq(&b));
	}
}
