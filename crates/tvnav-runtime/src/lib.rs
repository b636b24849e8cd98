#![forbid(unsafe_code)]

//! Lifecycle-coupled machinery for the screen-navigation core.
//!
//! Everything here runs on the UI thread in response to discrete events:
//! back-key presses, view activation changes, scroll-stop notifications,
//! and paint-boundary callbacks. There is no parallelism; the correctness
//! concerns are ordering relative to view lifecycle (a view may register a
//! back handler, deactivate, and be replaced by an overlapping-lifetime
//! instance before its teardown runs) and callbacks that outlive the state
//! they were scheduled against. Both are handled structurally: registrations
//! are identity-checked id tokens released by RAII guards, and deferred
//! callbacks hold weak handles and re-check their preconditions at fire
//! time.

pub mod back;
pub mod disclosure;
pub mod frame;
pub mod scroll;
pub mod session;
pub mod toast;
pub mod toolbar;

pub use back::{BackHandler, BackHandlerGuard, BackHandlerRegistry, HandlerId};
pub use disclosure::DisclosureMap;
pub use frame::FrameClock;
pub use scroll::{
    PanelScrollOptions, SCROLL_RESTORE_EPSILON, ScrollMemory, ScrollRequest, normalize_scroll_top,
};
pub use session::{BackOutcome, PanelState, SessionConfig, SessionContext};
pub use toast::ToastTimer;
pub use toolbar::{ToolbarBackSlot, compose_back_handler};
