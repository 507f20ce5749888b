//! Render version tokens.
//!
//! Every asynchronous render completion is stamped with the token returned
//! by [`RenderVersion::bump`]; when it completes it checks
//! [`RenderVersion::is_current`] and discards its result if a newer pass
//! started in the meantime.

use std::cell::Cell;
use std::rc::Rc;

/// Shared monotonically increasing counter.
#[derive(Debug, Clone, Default)]
pub struct RenderVersion {
	current: Rc<Cell<u64>>,
}

impl RenderVersion {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new pass and returns its token.
	pub fn bump(&self) -> u64 {
		let next = self.current.get() + 1;
		self.current.set(next);
		next
	}

	pub fn current(&self) -> u64 {
		self.current.get()
	}

	pub fn is_current(&self, token: u64) -> bool {
		self.current.get() == token
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_newer_bump_supersedes() {
		let version = RenderVersion::new();
		let first = version.bump();
		let shared = version.clone();
		let second = shared.bump();

		assert!(!version.is_current(first));
		assert!(version.is_current(second));
		assert_eq!(version.current(), 2);
	}
}
