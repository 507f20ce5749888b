//! Rendering, directives and routing
//!
//! This module provides access to `swiftx-pages`.
//!
//! ## Architecture
//!
//! - **Live document**: elements, text, comments and fragments with events
//! - **Renderer**: views and components mounted onto live nodes
//! - **Directives**: `show` and keyed `for_each`
//! - **Routing**: route groups, layouts, policies and host history
//!
//! ## Example
//!
//! ```rust,ignore
//! use swiftx::pages::router::{Route, RouterRoot};
//!
//! let (view, navigation) = RouterRoot::new(Route::root(|_| "Home"))
//!     .route(Route::new("/about", |_| "About"))
//!     .mount()?;
//! navigation.push("/about");
//! ```

pub use swiftx_pages::*;
