#![forbid(unsafe_code)]

//! View kinds and panel-ordinal resolution.
//!
//! A [`ViewKind`] names one full-screen navigable view. The panel ordinal is
//! the integer position of that view inside the view-stacking container; it
//! is derived on demand and never stored. The optional debug panel is
//! inserted ahead of the details/player views when its feature flag is on,
//! which shifts their ordinals by one.

use core::fmt;

/// One full-screen navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Sign-in screen.
    Login,
    /// Landing screen with media rows.
    Home,
    /// Single-library browse screen.
    Library,
    /// Search screen.
    Search,
    /// Favorites screen.
    Favorites,
    /// Settings screen.
    Settings,
    /// Style/debug screen, only reachable when its feature flag is on.
    DebugPanel,
    /// Media details screen.
    Details,
    /// Playback screen.
    Player,
}

impl ViewKind {
    /// All view kinds, in panel order (debug-flag-off ordering).
    pub const ALL: [ViewKind; 9] = [
        Self::Login,
        Self::Home,
        Self::Library,
        Self::Search,
        Self::Favorites,
        Self::Settings,
        Self::DebugPanel,
        Self::Details,
        Self::Player,
    ];

    /// Stable lowercase name of this view kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::Library => "library",
            Self::Search => "search",
            Self::Favorites => "favorites",
            Self::Settings => "settings",
            Self::DebugPanel => "debug",
            Self::Details => "details",
            Self::Player => "player",
        }
    }

    /// Parse a view name produced by [`ViewKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "login" => Some(Self::Login),
            "home" => Some(Self::Home),
            "library" => Some(Self::Library),
            "search" => Some(Self::Search),
            "favorites" => Some(Self::Favorites),
            "settings" => Some(Self::Settings),
            "debug" => Some(Self::DebugPanel),
            "details" => Some(Self::Details),
            "player" => Some(Self::Player),
            _ => None,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the panel ordinal for a view.
///
/// Total and pure: every input resolves to an ordinal, never panics. The
/// debug panel occupies ordinal 6 only while enabled; details and player
/// shift from 6/7 to 7/8 to make room. A disabled debug panel resolves to 0
/// (the defensive fallback ordinal).
pub fn panel_index(view: ViewKind, debug_panel_enabled: bool) -> u8 {
    let details_index = if debug_panel_enabled { 7 } else { 6 };
    let player_index = if debug_panel_enabled { 8 } else { 7 };
    match view {
        ViewKind::Login => 0,
        ViewKind::Home => 1,
        ViewKind::Library => 2,
        ViewKind::Search => 3,
        ViewKind::Favorites => 4,
        ViewKind::Settings => 5,
        ViewKind::DebugPanel if debug_panel_enabled => 6,
        ViewKind::DebugPanel => 0,
        ViewKind::Details => details_index,
        ViewKind::Player => player_index,
    }
}

/// Resolve a panel ordinal from a raw view name.
///
/// Unrecognized names resolve to 0 rather than erroring, so a stale or
/// misspelled name degrades to the first panel instead of taking the app
/// down.
pub fn panel_index_for_name(name: &str, debug_panel_enabled: bool) -> u8 {
    ViewKind::from_name(name)
        .map(|view| panel_index(view, debug_panel_enabled))
        .unwrap_or(0)
}
