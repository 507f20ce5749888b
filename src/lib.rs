//! # swiftx
//!
//! A small reactive UI framework: fine-grained state, a renderer that mounts
//! declarative views onto a live document, conditional and keyed-list
//! directives, and a client-side router with nested route groups, layouts,
//! per-group history and redirect policies.
//!
//! ## Crates
//!
//! - [`core`]: state cells, effects, computed values and the microtask queue
//! - [`pages`]: the live document, renderer, directives and router
//!
//! ## Example
//!
//! ```rust,ignore
//! use swiftx::prelude::*;
//!
//! let count = State::new(0);
//! let app = div()
//!     .child(button().on_click({
//!         let count = count.clone();
//!         move |_| count.update(|n| *n += 1)
//!     }).child("+1"))
//!     .child(count.map(|n| format!("Clicked {n} times")));
//!
//! let container = document().create_element("div");
//! render(app, &container)?;
//! ```

pub mod core;
pub mod pages;

/// Common imports for swiftx applications.
pub mod prelude {
	pub use swiftx_core::ValidationError;
	pub use swiftx_pages::prelude::*;
}
