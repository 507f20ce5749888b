//! Microtask queue
//!
//! Work that must not run in the same synchronous pass (ref visibility,
//! route `then` handlers) is queued here. On `wasm32` the queue drains on the
//! browser event loop through `wasm_bindgen_futures::spawn_local`. Native
//! hosts drain it explicitly with [`run_microtasks`], which is also what
//! tests use to step past a microtask boundary.

use std::cell::RefCell;
use std::collections::VecDeque;

type Microtask = Box<dyn FnOnce()>;

thread_local! {
	static QUEUE: RefCell<VecDeque<Microtask>> = const { RefCell::new(VecDeque::new()) };
}

#[cfg(target_arch = "wasm32")]
thread_local! {
	static DRAIN_SCHEDULED: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

/// Queues `task` to run after the current synchronous pass.
pub fn queue_microtask<F>(task: F)
where
	F: FnOnce() + 'static,
{
	QUEUE.with(|queue| queue.borrow_mut().push_back(Box::new(task)));
	#[cfg(target_arch = "wasm32")]
	schedule_drain();
}

/// Runs queued tasks, including tasks queued while draining, until the
/// queue is empty. Returns how many tasks ran.
pub fn run_microtasks() -> usize {
	let mut ran = 0;
	// Pop one at a time so a task may queue more work without a borrow conflict.
	while let Some(task) = QUEUE.with(|queue| queue.borrow_mut().pop_front()) {
		task();
		ran += 1;
	}
	if ran > 0 {
		tracing::trace!(ran, "drained microtasks");
	}
	ran
}

/// Number of tasks waiting to run.
pub fn pending_microtasks() -> usize {
	QUEUE.with(|queue| queue.borrow().len())
}

/// Drops every queued task without running it.
pub fn clear_microtasks() {
	QUEUE.with(|queue| queue.borrow_mut().clear());
}

#[cfg(target_arch = "wasm32")]
fn schedule_drain() {
	if DRAIN_SCHEDULED.with(|flag| flag.replace(true)) {
		return;
	}
	wasm_bindgen_futures::spawn_local(async {
		DRAIN_SCHEDULED.with(|flag| flag.set(false));
		run_microtasks();
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[rstest]
	#[serial(microtasks)]
	fn test_tasks_run_in_fifo_order() {
		clear_microtasks();
		let log = Rc::new(RefCell::new(Vec::new()));
		for n in 0..3 {
			let log = log.clone();
			queue_microtask(move || log.borrow_mut().push(n));
		}
		assert!(log.borrow().is_empty());
		assert_eq!(pending_microtasks(), 3);

		assert_eq!(run_microtasks(), 3);
		assert_eq!(*log.borrow(), vec![0, 1, 2]);
	}

	#[rstest]
	#[serial(microtasks)]
	fn test_tasks_queued_while_draining_also_run() {
		clear_microtasks();
		let log = Rc::new(RefCell::new(Vec::new()));
		let outer = log.clone();
		queue_microtask(move || {
			outer.borrow_mut().push("outer");
			let inner = outer.clone();
			queue_microtask(move || inner.borrow_mut().push("inner"));
		});

		assert_eq!(run_microtasks(), 2);
		assert_eq!(*log.borrow(), vec!["outer", "inner"]);
		assert_eq!(pending_microtasks(), 0);
	}
}
