//! Development-mode switch.
//!
//! Diagnostic warnings (missing list keys, superseded renders) are only
//! emitted in development mode. It defaults to `cfg!(debug_assertions)`;
//! native hosts may override it with the `SWIFTX_DEV` environment variable
//! (`1`/`true`/`0`/`false`), and any host may call [`set_dev_mode`].

use std::cell::Cell;

thread_local! {
	static DEV_OVERRIDE: Cell<Option<bool>> = const { Cell::new(None) };
}

/// Name of the environment variable read on native hosts.
pub const DEV_ENV_VAR: &str = "SWIFTX_DEV";

/// Returns whether development diagnostics are enabled.
pub fn is_dev() -> bool {
	if let Some(forced) = DEV_OVERRIDE.with(Cell::get) {
		return forced;
	}
	env_override().unwrap_or(cfg!(debug_assertions))
}

/// Forces development mode on or off for the current thread.
///
/// Passing `None` restores the default resolution.
pub fn set_dev_mode(enabled: Option<bool>) {
	DEV_OVERRIDE.with(|cell| cell.set(enabled));
}

#[cfg(not(target_arch = "wasm32"))]
fn env_override() -> Option<bool> {
	std::env::var(DEV_ENV_VAR).ok().and_then(|raw| parse_flag(&raw))
}

#[cfg(target_arch = "wasm32")]
fn env_override() -> Option<bool> {
	None
}

fn parse_flag(raw: &str) -> Option<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("1", Some(true))]
	#[case("TRUE", Some(true))]
	#[case(" off ", Some(false))]
	#[case("0", Some(false))]
	#[case("maybe", None)]
	fn test_parse_flag(#[case] raw: &str, #[case] expected: Option<bool>) {
		assert_eq!(parse_flag(raw), expected);
	}

	#[rstest]
	fn test_override_wins() {
		set_dev_mode(Some(false));
		assert!(!is_dev());
		set_dev_mode(Some(true));
		assert!(is_dev());
		set_dev_mode(None);
	}
}
