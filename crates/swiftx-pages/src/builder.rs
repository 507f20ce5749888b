//! Element builder API
//!
//! Explicit constructor functions for common tags, plus [`html::element`]
//! for any other tag name. Each returns an [`ElementView`](crate::component::ElementView)
//! ready for chaining.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::builder::html::{button, div, element};
//!
//! let count = State::new(0);
//! let view = div()
//!     .class("counter")
//!     .child(button().on_click({
//!         let count = count.clone();
//!         move |_| count.update(|n| *n += 1)
//!     }).child("Increment"))
//!     .child(element("my-widget").attr("mode", "compact"));
//! ```

pub mod html;
