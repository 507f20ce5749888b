//! Computed values
//!
//! [`compute`] derives a read-only value from a dependency list. Reactive
//! members trigger recomputation synchronously within the triggering `set`;
//! [`Plain`](super::Plain) members are re-read on each recomputation but
//! never cause one.
//!
//! ## Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use swiftx_core::reactive::{compute, Plain, State};
//!
//! let search = State::new("A".to_string());
//! let data = Rc::new(RefCell::new(vec!["Apple", "Banana", "Avocado"]));
//!
//! let filtered = compute((search.clone(), Plain(data.clone())), |(s, d)| {
//!     d.borrow().iter().filter(|x| x.starts_with(&s)).map(|x| x.to_string()).collect::<Vec<_>>()
//! });
//! ```

use std::rc::Rc;

use super::dependency::Dependencies;
use super::state::{ReadState, State};
use crate::error::ValidationError;

/// Derives a read-only value from `deps`, allowing plain members.
pub fn compute<D, U, F>(deps: D, f: F) -> ReadState<U>
where
	D: Dependencies + 'static,
	U: PartialEq + 'static,
	F: Fn(D::Values) -> U + 'static,
{
	let derived = State::new(f(deps.sample()));
	let target = derived.clone();
	let deps = Rc::new(deps);
	let sources = Rc::clone(&deps);
	let recompute: Rc<dyn Fn()> = Rc::new(move || target.set(f(sources.sample())));
	// The links live as long as the sources do.
	let _links = deps.observe_all(recompute);
	derived.read_only()
}

/// Like [`compute`], but every dependency must be reactive.
pub fn compute_strict<D, U, F>(deps: D, f: F) -> Result<ReadState<U>, ValidationError>
where
	D: Dependencies + 'static,
	U: PartialEq + 'static,
	F: Fn(D::Values) -> U + 'static,
{
	deps.check_reactive("Compute")?;
	Ok(compute(deps, f))
}
