//! Component system and renderer.
//!
//! This module provides:
//!
//! - **View**: immutable description of UI ([`View`], [`ElementView`])
//! - **Component trait**: reusable units that render with their children
//! - **Renderer**: [`to_live_tree`] and [`render`] build live nodes from views
//! - **Directives**: [`show`] for conditional content, [`for_each`] for keyed lists
//! - **NodeRef**: read-only handles to rendered nodes
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::component::{render, show, IntoView, View};
//! use swiftx_pages::reactive::State;
//!
//! let open = State::new(false);
//! let app = View::element("div")
//!     .child(View::element("button").on_click({
//!         let open = open.clone();
//!         move |_| open.update(|o| *o = !*o)
//!     }).child("Toggle"))
//!     .child(show(open.clone(), |_| View::text("Hello"))?);
//!
//! render(app, &container)?;
//! ```

mod for_each;
mod into_view;
mod mount;
mod node_ref;
mod show;
mod r#trait;

pub use for_each::{EntryKey, ListKey, ListSource, for_each, for_each_indexed};
pub use into_view::{AttrValue, Children, ElementView, IntoView, Prop, View};
pub use mount::{MountError, render, to_live_tree, to_live_tree_in};
pub use node_ref::NodeRef;
pub use show::{Truthy, show};
pub use r#trait::{Component, ComponentView};
