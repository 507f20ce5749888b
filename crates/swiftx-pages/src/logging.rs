//! Logging macros for swiftx-pages
//!
//! The macros work on both targets: on `wasm32` they write to the browser
//! console, elsewhere they emit `tracing` events. All of them compile to
//! nothing in release builds, which is what keeps directive and router
//! diagnostics development-only.
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-hooks` | `console.debug` | `tracing::debug!` |
//! | `info_log!` | Required | None | `console.info` | `tracing::info!` |
//! | `warn_log!` | Required | None | `console.warn` | `tracing::warn!` |
//! | `error_log!` | Required | None | `console.error` | `tracing::error!` |
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::{warn_log, error_log};
//!
//! warn_log!("ForEach: duplicate key {:?} at index {}", key, index);
//! error_log!("Router: failed to mount route: {}", err);
//! ```

/// Level dispatch shared by the public macros.
#[doc(hidden)]
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! __swiftx_log {
	(debug, $($arg:tt)*) => {
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into())
	};
	(info, $($arg:tt)*) => {
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into())
	};
	(warn, $($arg:tt)*) => {
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into())
	};
	(error, $($arg:tt)*) => {
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into())
	};
}

#[doc(hidden)]
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! __swiftx_log {
	($level:ident, $($arg:tt)*) => {
		$crate::__private::tracing::$level!(target: "swiftx", $($arg)*)
	};
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! __swiftx_log {
	($level:ident, $($arg:tt)*) => {
		()
	};
}

/// Logs a debug message (requires the `debug-hooks` feature)
#[macro_export]
#[cfg(feature = "debug-hooks")]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__swiftx_log!(debug, $($arg)*);
	}};
}

#[macro_export]
#[cfg(not(feature = "debug-hooks"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

#[macro_export]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__swiftx_log!(info, $($arg)*);
	}};
}

/// Logs a warning.
///
/// Used for recoverable diagnostics such as missing list keys or a render
/// that was superseded by a newer update.
#[macro_export]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__swiftx_log!(warn, $($arg)*);
	}};
}

#[macro_export]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__swiftx_log!(error, $($arg)*);
	}};
}

/// Emits a warning only when development mode is on.
///
/// `warn_log!` already disappears in release builds; this additionally
/// honors [`swiftx_core::dev::set_dev_mode`] and `SWIFTX_DEV`.
#[macro_export]
macro_rules! dev_warn {
	($($arg:tt)*) => {{
		if $crate::__private::is_dev() {
			$crate::warn_log!($($arg)*);
		}
	}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	#[rstest]
	fn test_macros_expand_in_expression_position() {
		let value = 42;
		crate::debug_log!("debug {}", value);
		crate::info_log!("info {}", value);
		crate::warn_log!("warn {value}");
		crate::error_log!("error {:?}", Some(value));
		crate::dev_warn!("dev {}", value);
	}
}
