#![forbid(unsafe_code)]

//! Pure data types for the screen-navigation core of a remote-control-driven
//! TV application.
//!
//! This crate holds everything that can be reasoned about without lifecycle
//! coupling: view kinds and their panel ordinals, immutable navigation
//! snapshots plus the back-history stack built from them, the bounded
//! per-view state cache, and feature-flag resolution. Lifecycle-coupled
//! machinery (back-handler registration, scroll restore, frame scheduling)
//! lives in `tvnav-runtime`.

pub mod flags;
pub mod history;
pub mod snapshot;
pub mod state_cache;
pub mod view;

pub use history::HistoryStack;
pub use snapshot::{NavDomain, NavSnapshot, NavState};
pub use state_cache::{KeyedStateCache, STATE_CACHE_CAPACITY};
pub use view::{ViewKind, panel_index, panel_index_for_name};
