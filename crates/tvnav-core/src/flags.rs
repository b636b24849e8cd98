#![forbid(unsafe_code)]

//! Feature-flag resolution.
//!
//! Flags follow a forced-on / forced-off / build-default precedence: an
//! explicit "off" env var always wins, an explicit "on" comes next, and
//! otherwise debug builds enable the flag and release builds do not.

use std::env;

/// Env var that forces the debug panel on.
pub const DEBUG_PANEL_ENV: &str = "TVNAV_DEBUG_PANEL";

/// Env var that forces the debug panel off.
pub const NO_DEBUG_PANEL_ENV: &str = "TVNAV_NO_DEBUG_PANEL";

/// Whether a flag value means "on".
///
/// Accepts `1`, `true`, `yes`, and `on`, case-insensitively and ignoring
/// surrounding whitespace. Everything else (including empty) is "off".
pub fn is_truthy_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Precedence rule shared by all flags: forced-off wins, then forced-on,
/// then the build default.
pub fn resolve_flag(forced_on: bool, forced_off: bool, default_on: bool) -> bool {
    if forced_off {
        return false;
    }
    if forced_on {
        return true;
    }
    default_on
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|value| is_truthy_flag(&value)).unwrap_or(false)
}

/// Whether the debug panel view is enabled for this process.
///
/// Defaults to on in debug builds, off in release, with
/// [`DEBUG_PANEL_ENV`] / [`NO_DEBUG_PANEL_ENV`] overrides.
pub fn debug_panel_enabled() -> bool {
    resolve_flag(
        env_flag(DEBUG_PANEL_ENV),
        env_flag(NO_DEBUG_PANEL_ENV),
        cfg!(debug_assertions),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values_parse_as_on() {
        for value in ["1", "true", "yes", "on", "TRUE", " Yes ", "ON"] {
            assert!(is_truthy_flag(value), "{value:?} should be truthy");
        }
    }

    #[test]
    fn everything_else_parses_as_off() {
        for value in ["", "0", "false", "no", "off", "2", "enabled"] {
            assert!(!is_truthy_flag(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn forced_off_beats_forced_on() {
        assert!(!resolve_flag(true, true, true));
    }

    #[test]
    fn forced_on_beats_the_default() {
        assert!(resolve_flag(true, false, false));
    }

    #[test]
    fn default_applies_when_nothing_is_forced() {
        assert!(resolve_flag(false, false, true));
        assert!(!resolve_flag(false, false, false));
    }
}
