//! Reactive primitives.
//!
//! Unlike auto-tracking signal systems, swiftx dependencies are declared
//! explicitly: an [`Effect`] or [`compute`] call lists the states it reads,
//! and every `set` notifies subscribers synchronously, in subscription
//! order, before returning. Deferred work (ref assignment, route handlers,
//! late list flushes) goes through the [`scheduler`] microtask queue.

pub mod compute;
pub mod dependency;
pub mod effect;
pub mod scheduler;
pub mod state;
pub mod version;

pub use compute::{compute, compute_strict};
pub use dependency::{Dependencies, Dependency, Plain};
pub use effect::Effect;
pub use scheduler::{clear_microtasks, pending_microtasks, queue_microtask, run_microtasks};
pub use state::{ReadState, State, Subscription};
pub use version::RenderVersion;
