//! Errors raised by the reactive layer.

use thiserror::Error;

/// Raised when a directive or hook receives something that is not a
/// reactive state.
///
/// The message names the call site (`Effect`, `Show`, `Compute`, ...) and
/// the kind of value that was received instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A single-argument call site received a non-reactive value.
	#[error(
		"[Swiftx] {context}: Expected a State object but received {received}. Primitives/Values are not supported."
	)]
	NotAState {
		context: &'static str,
		received: &'static str,
	},

	/// A dependency list contained a non-reactive value.
	#[error(
		"[Swiftx] {context}: Dependency at index {index} is not a State (received {received})."
	)]
	DependencyNotAState {
		context: &'static str,
		index: usize,
		received: &'static str,
	},
}

impl ValidationError {
	/// The call site that raised the error.
	pub fn context(&self) -> &'static str {
		match self {
			Self::NotAState { context, .. } | Self::DependencyNotAState { context, .. } => context,
		}
	}

	/// Index of the offending dependency, when the error came from a list.
	pub fn index(&self) -> Option<usize> {
		match self {
			Self::NotAState { .. } => None,
			Self::DependencyNotAState { index, .. } => Some(*index),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_not_a_state_message_names_context() {
		let err = ValidationError::NotAState {
			context: "Show",
			received: "plain value",
		};
		let message = err.to_string();
		assert!(message.contains("Show"));
		assert!(message.contains("Expected a State object"));
		assert_eq!(err.index(), None);
	}

	#[rstest]
	fn test_dependency_error_names_index() {
		let err = ValidationError::DependencyNotAState {
			context: "Effect",
			index: 2,
			received: "plain value",
		};
		assert!(err.to_string().contains("index 2"));
		assert_eq!(err.index(), Some(2));
		assert_eq!(err.context(), "Effect");
	}
}
