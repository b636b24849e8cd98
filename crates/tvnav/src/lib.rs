#![forbid(unsafe_code)]

//! tvnav public facade crate.
//!
//! Single entry point for applications embedding the navigation core: the
//! data types from `tvnav-core` and the lifecycle machinery from
//! `tvnav-runtime` under one roof, with a prelude carrying the handful of
//! names nearly every caller needs.

// --- Core re-exports -------------------------------------------------------

pub use tvnav_core::flags::{DEBUG_PANEL_ENV, NO_DEBUG_PANEL_ENV, debug_panel_enabled};
pub use tvnav_core::{
    HistoryStack, KeyedStateCache, NavDomain, NavSnapshot, NavState, STATE_CACHE_CAPACITY,
    ViewKind, panel_index, panel_index_for_name,
};

// --- Runtime re-exports ----------------------------------------------------

pub use tvnav_runtime::{
    BackHandler, BackHandlerGuard, BackHandlerRegistry, BackOutcome, DisclosureMap, FrameClock,
    HandlerId, PanelScrollOptions, PanelState, SCROLL_RESTORE_EPSILON, ScrollMemory,
    ScrollRequest, SessionConfig, SessionContext, ToastTimer, ToolbarBackSlot,
    compose_back_handler, normalize_scroll_top,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BackHandler, BackHandlerGuard, BackHandlerRegistry, BackOutcome, FrameClock,
        HistoryStack, NavDomain, NavSnapshot, NavState, PanelScrollOptions, ScrollMemory,
        ScrollRequest, SessionConfig, SessionContext, ToolbarBackSlot, ViewKind,
    };

    pub use crate::{core, runtime};
}

pub use tvnav_core as core;
pub use tvnav_runtime as runtime;
