//! Client-side routing.
//!
//! This module provides:
//!
//! - **Matching**: [`PathPattern`] and [`match_path`] for `/users/:id` style patterns
//! - **Routes and groups**: [`Route`], [`RouteGroup`], [`RoutePolicy`] and group layouts
//! - **Routers**: [`RouterRoot`] (groups, policies, per-group history) and the
//!   rule-list [`RouterStack`]
//! - **Navigation**: the [`Navigation`] handle, [`Link`], and the host history
//!   behind [`RouteRegistry`]
//!
//! All routers observe the same [`RouteRegistry`]: navigating through one of
//! them updates the host location, and every router re-resolves.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::router::{BrowserRouter, Link, Route, RouteGroup, RouterRoot};
//!
//! let app = BrowserRouter::new(
//!     RouterRoot::new(Route::root(|_| Link::new("/settings").child("Settings")))
//!         .group(
//!             RouteGroup::new("/settings", Vec::new())
//!                 .component(|_| "Settings")
//!                 .route(Route::new("/settings/profile", |_| "Profile")),
//!         )
//!         .route(Route::not_found(|_| "Not found")),
//! );
//! render(app, &container)?;
//! ```

mod components;
mod context;
mod core;
mod group;
mod history;
mod model;
mod navigation;
mod outlet;
mod pattern;
mod route;
mod stack;

pub use self::core::{RouteEntry, RouterError, RouterRoot};
pub use components::{BrowserRouter, Link};
pub use context::{HistoryMode, RouterContext, RouterOptions, use_router_context};
pub use group::{LayoutProps, PolicyContext, RouteGroup, RoutePolicy, RouterOutlet};
pub use history::{HistoryState, MemoryHistory, NavigationType, RouteLocation, RouteRegistry, normalize_path};
pub use model::{RouteMatch, RouterModel, match_route_group};
pub use navigation::{Navigation, RouterPhase};
pub use pattern::{Params, PathMatch, PathPattern, match_path};
pub use route::{
	FORBIDDEN_PATH, NOT_FOUND_PATH, NavTarget, Route, RouteAction, RouteBuilder, RouteKind,
	RouteProps,
};
pub use stack::RouterStack;
