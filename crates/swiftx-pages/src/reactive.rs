//! Reactive system for swiftx-pages.
//!
//! Re-exports the primitives of `swiftx-core` and adds the hook-style
//! constructors used inside components.

pub mod hooks;

pub use hooks::{use_effect, use_memo, use_memo_strict, use_ref, use_state, when_ready};
pub use swiftx_core::reactive::{
	Dependencies, Dependency, Effect, Plain, ReadState, RenderVersion, State, Subscription, compute,
	compute_strict, pending_microtasks, queue_microtask, run_microtasks,
};
