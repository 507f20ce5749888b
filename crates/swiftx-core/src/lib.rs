//! # swiftx core
//!
//! Fine-grained reactive primitives shared by every swiftx crate.
//!
//! - [`reactive::State`]: a mutable cell with synchronous change notification
//! - [`reactive::ReadState`]: a read-only view, produced by `map` and `compute`
//! - [`reactive::Effect`]: a side effect bound to explicit dependencies
//! - [`reactive::compute`]: a derived value recomputed from its dependencies
//! - [`reactive::scheduler`]: the microtask queue used for deferred work
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_core::reactive::{Effect, State};
//!
//! let count = State::new(0);
//! let _effect = Effect::new(count.clone(), |value| {
//!     println!("count is {value}");
//! })?;
//! count.set(1);
//! ```

pub mod dev;
pub mod error;
pub mod reactive;

pub use error::ValidationError;
pub use reactive::{
	Dependencies, Dependency, Effect, Plain, ReadState, RenderVersion, State, Subscription, compute,
	compute_strict,
};
