//! Reactive primitives.
//!
//! Re-exports `swiftx-core`: [`State`](reactive::State),
//! [`ReadState`](reactive::ReadState), [`Effect`](reactive::Effect),
//! [`compute`](reactive::compute), the microtask scheduler and
//! development-mode configuration.
//!
//! # Examples
//!
//! ```rust,ignore
//! use swiftx::core::reactive::{State, compute};
//!
//! let price = State::new(10);
//! let doubled = compute(price.clone(), |p| p * 2);
//! price.set(21);
//! assert_eq!(doubled.get(), 42);
//! ```

pub use swiftx_core::*;
