//! swiftx pages - rendering, directives and routing
//!
//! Builds on the reactive primitives of `swiftx-core` to mount declarative
//! views onto a live document and keep them in sync with state.
//!
//! ## Architecture
//!
//! - [`dom`]: the live document (elements, text, comments, fragments, events)
//! - [`component`]: views, components, the renderer and the `show` / `for_each` directives
//! - [`builder`]: tag constructor functions
//! - [`reactive`]: core primitives plus hook-style constructors
//! - [`router`]: path matching, route groups, policies and the navigation engine
//! - [`logging`]: development-only logging macros
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::prelude::*;
//!
//! let todos = State::new(vec![Todo { id: 1, label: "Write docs".into() }]);
//! let list = ul().child(for_each(
//!     todos.clone(),
//!     ListKey::by(|todo: &Todo| Some(todo.id)),
//!     |todo, _| li().child(todo.label.clone()).into_view(),
//! ));
//!
//! let container = document().create_element("div");
//! render(list, &container)?;
//! ```

pub mod builder;
pub mod component;
pub mod dom;
pub mod logging;
pub mod reactive;
pub mod router;

pub use component::{
	Children, Component, ComponentView, ElementView, IntoView, MountError, NodeRef, View, for_each,
	render, show, to_live_tree,
};
pub use dom::{DomError, Event, EventType, Node, document};
pub use router::{
	BrowserRouter, Link, Navigation, Route, RouteGroup, RoutePolicy, RouterError, RouterRoot,
	RouterStack,
};

/// Items used by the exported macros.
#[doc(hidden)]
pub mod __private {
	pub use swiftx_core::dev::is_dev;
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}

/// Common imports for application code.
pub mod prelude {
	pub use crate::builder::html::*;
	pub use crate::component::{
		AttrValue, Children, Component, ComponentView, ElementView, IntoView, ListKey, NodeRef,
		Truthy, View, for_each, for_each_indexed, render, show, to_live_tree,
	};
	pub use crate::dom::{Event, EventType, Node, document};
	pub use crate::reactive::{
		Effect, Plain, ReadState, State, compute, use_effect, use_memo, use_ref, use_state,
		when_ready,
	};
	pub use crate::router::{
		BrowserRouter, LayoutProps, Link, NavTarget, Navigation, PolicyContext, Route, RouteGroup,
		RoutePolicy, RouteProps, RouterContext, RouterOptions, RouterRoot, RouterStack,
		use_router_context,
	};
}
