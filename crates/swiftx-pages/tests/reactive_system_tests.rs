//! Integration tests for the reactive system
//!
//! These tests verify:
//! 1. Setting an equal value notifies nobody
//! 2. Effects run once immediately, then after every change
//! 3. Computed values follow reactive dependencies and sample plain ones
//! 4. Node refs become visible one microtask after mount

use std::cell::RefCell;
use std::rc::Rc;

use serial_test::serial;
use swiftx_core::ValidationError;
use swiftx_pages::builder::html::div;
use swiftx_pages::component::{IntoView, render};
use swiftx_pages::dom::document;
use swiftx_pages::reactive::{
	Effect, Plain, State, compute, compute_strict, run_microtasks, use_effect, use_memo, use_ref,
};

/// Success Criterion 1: `set` with the current value is a no-op
#[test]
fn test_set_equal_value_notifies_nobody() {
	let name = State::new(String::from("ada"));
	let calls = Rc::new(RefCell::new(0));
	let counter = calls.clone();
	let _sub = name.subscribe(move |_| *counter.borrow_mut() += 1);

	name.set(String::from("ada"));
	assert_eq!(*calls.borrow(), 0);

	name.set(String::from("grace"));
	assert_eq!(*calls.borrow(), 1);
}

/// Success Criterion 2: an effect with one dependency runs immediately
#[test]
fn test_effect_initial_invocation() {
	let count = State::new(3);
	let log = Rc::new(RefCell::new(Vec::new()));
	let sink = log.clone();

	let effect = Effect::new(count.clone(), move |value| sink.borrow_mut().push(value)).unwrap();
	assert_eq!(*log.borrow(), vec![3]);

	count.set(4);
	count.set(4);
	assert_eq!(*log.borrow(), vec![3, 4]);

	effect.dispose();
	count.set(5);
	assert_eq!(*log.borrow(), vec![3, 4]);
}

/// Success Criterion 2: subscribers fire in subscription order
#[test]
fn test_subscribers_fire_in_order() {
	let source = State::new(0);
	let order = Rc::new(RefCell::new(Vec::new()));
	let first = order.clone();
	let second = order.clone();
	let _a = use_effect(move |_| first.borrow_mut().push("a"), source.clone()).unwrap();
	let _b = use_effect(move |_| second.borrow_mut().push("b"), source.clone()).unwrap();
	order.borrow_mut().clear();

	source.set(1);
	assert_eq!(*order.borrow(), vec!["a", "b"]);
}

/// Success Criterion 2: effects reject plain values
#[test]
fn test_effect_rejects_plain_dependency() {
	let result = Effect::new((State::new(1), Plain(2)), |_| {});
	assert!(matches!(
		result,
		Err(ValidationError::DependencyNotAState { index: 1, .. })
	));
}

/// Success Criterion 3: mixed dependencies recompute only on state changes
#[test]
fn test_compute_mixed_dependencies() {
	let search = State::new(String::from("A"));
	let data = Rc::new(RefCell::new(vec!["Apple", "Banana", "Avocado"]));

	let filtered = compute((search.clone(), Plain(data.clone())), |(s, d)| {
		d.borrow()
			.iter()
			.filter(|item| item.starts_with(s.as_str()))
			.map(|item| item.to_string())
			.collect::<Vec<_>>()
	});
	assert_eq!(filtered.get(), vec!["Apple", "Avocado"]);

	search.set(String::from("B"));
	assert_eq!(filtered.get(), vec!["Banana"]);

	data.borrow_mut().push("Blueberry");
	assert_eq!(filtered.get(), vec!["Banana"]);
}

/// Success Criterion 3: the strict variant rejects plain values
#[test]
fn test_compute_strict_rejects_plain_values() {
	let result = compute_strict((State::new(1), Plain(1)), |(a, b)| a + b);
	assert!(result.is_err());

	let total = use_memo((State::new(1), State::new(2)), |(a, b)| a + b);
	assert_eq!(total.get(), 3);
}

/// Success Criterion 3: mapped values are read-only and follow their source
#[test]
fn test_map_derives_read_only_state() {
	let celsius = State::new(100.0_f64);
	let fahrenheit = celsius.map(|c| c * 9.0 / 5.0 + 32.0);
	assert_eq!(fahrenheit.get(), 212.0);

	celsius.set(0.0);
	assert_eq!(fahrenheit.get(), 32.0);
}

/// Success Criterion 4: ref assignment is deferred by one microtask
#[test]
#[serial(microtasks)]
fn test_node_ref_visible_after_microtask() {
	let node_ref = use_ref();
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = seen.clone();
	let _effect = Effect::new(node_ref.clone(), move |node| {
		sink.borrow_mut().push(node.and_then(|n| n.tag_name()));
	})
	.unwrap();

	let container = document().create_element("div");
	render(div().node_ref(&node_ref).into_view(), &container).unwrap();
	assert_eq!(*seen.borrow(), vec![None]);
	assert!(node_ref.get().is_none());

	run_microtasks();
	assert_eq!(*seen.borrow(), vec![None, Some("div".to_string())]);
}
