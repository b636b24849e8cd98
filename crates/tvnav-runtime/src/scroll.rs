#![forbid(unsafe_code)]

//! Scroll-position memory and the restore protocol.
//!
//! Each scrollable view tracks three things: the *target* offset (the
//! authoritative desired position, seeded from the state cache or an
//! explicit setter), the *last-applied* offset (what has actually been
//! issued to the viewport), and the captured *scroll-to capability* (a
//! closure the concrete scrollable surface supplies once it exists — which
//! may be strictly after the view became active).
//!
//! Restores are scheduled on the [`FrameClock`] so the surface has
//! committed layout before an absolute offset is requested, and the
//! scheduled callback re-checks the active flag at fire time: if the view
//! deactivated in the interim the callback is a no-op. Cancellation is by
//! re-check, not by token.
//!
//! A restore is skipped when the target is within
//! [`SCROLL_RESTORE_EPSILON`] of the last-applied offset. The epsilon
//! exists to absorb sub-unit measurement jitter; the intent matters more
//! than the literal value, so it is a named constant and overridable per
//! instance.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;
use tvnav_core::ViewKind;

use crate::frame::FrameClock;

/// Offset delta below which a restore is considered redundant.
pub const SCROLL_RESTORE_EPSILON: f64 = 1.0;

/// What the captured scroll-to capability is asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    /// Align the viewport to the top (target at or above zero).
    AlignTop,
    /// Scroll to an absolute offset.
    Offset(f64),
}

/// Clamp a reported offset into the valid range.
///
/// Non-finite and non-positive values both normalize to 0.
pub fn normalize_scroll_top(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        0.0
    } else {
        value
    }
}

type ScrollToFn = Box<dyn FnMut(ScrollRequest)>;
type PersistFn = Box<dyn FnMut(f64)>;

struct ScrollMemoryState {
    active: bool,
    target: f64,
    last_applied: Option<f64>,
    scroll_to: Option<ScrollToFn>,
    persist: Option<PersistFn>,
    epsilon: f64,
}

/// Per-view scroll-offset tracker.
///
/// Cheaply cloneable handle; scheduled frame callbacks hold the state
/// weakly, so dropping every handle cancels anything still queued.
#[derive(Clone)]
pub struct ScrollMemory {
    clock: FrameClock,
    state: Rc<RefCell<ScrollMemoryState>>,
}

impl ScrollMemory {
    /// Tracker with the default [`SCROLL_RESTORE_EPSILON`].
    pub fn new(clock: FrameClock) -> Self {
        Self::with_epsilon(clock, SCROLL_RESTORE_EPSILON)
    }

    /// Tracker with a custom redundancy epsilon.
    pub fn with_epsilon(clock: FrameClock, epsilon: f64) -> Self {
        Self {
            clock,
            state: Rc::new(RefCell::new(ScrollMemoryState {
                active: false,
                target: 0.0,
                last_applied: None,
                scroll_to: None,
                persist: None,
                epsilon,
            })),
        }
    }

    /// Install the persistence callback invoked with every tracked-offset
    /// change (scroll stop or explicit setter).
    pub fn on_offset_persist(&self, persist: impl FnMut(f64) + 'static) {
        self.state.borrow_mut().persist = Some(Box::new(persist));
    }

    /// Flip the active flag.
    ///
    /// Activation schedules a restore; deactivation clears the
    /// last-applied memory so reactivation re-evaluates from scratch
    /// instead of trusting a stale comparison.
    pub fn set_active(&self, active: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.active == active {
                return;
            }
            state.active = active;
            if !active {
                state.last_applied = None;
                return;
            }
        }
        self.schedule_restore();
    }

    /// Set the target offset (normalized) and persist it.
    ///
    /// Schedules a restore when the view is active; while inactive the new
    /// target simply waits for the next activation.
    pub fn set_target(&self, offset: f64) {
        let normalized = normalize_scroll_top(offset);
        let active = {
            let mut state = self.state.borrow_mut();
            state.target = normalized;
            state.active
        };
        self.run_persist(normalized);
        if active {
            self.schedule_restore();
        }
    }

    /// Capture the scroll-to capability from the concrete surface.
    ///
    /// If the view is already active this immediately schedules a restore —
    /// the capability arriving after activation is the normal case, not a
    /// race to paper over.
    pub fn capture(&self, scroll_to: impl FnMut(ScrollRequest) + 'static) {
        let active = {
            let mut state = self.state.borrow_mut();
            state.scroll_to = Some(Box::new(scroll_to));
            state.active
        };
        if active {
            self.schedule_restore();
        }
    }

    /// Record a scroll-stop event from the surface.
    ///
    /// The reported offset is normalized, becomes both the last-applied
    /// and the target offset, and is forwarded to the persistence callback.
    pub fn on_scroll_stop(&self, offset: f64) {
        let normalized = normalize_scroll_top(offset);
        {
            let mut state = self.state.borrow_mut();
            state.last_applied = Some(normalized);
            state.target = normalized;
        }
        trace!(offset = normalized, "scroll stop");
        self.run_persist(normalized);
    }

    /// Apply the restore synchronously, bypassing the epsilon skip.
    pub fn restore_now(&self) {
        Self::apply_restore(&self.state, true);
    }

    /// Current target offset.
    pub fn target(&self) -> f64 {
        self.state.borrow().target
    }

    /// Whether the view is currently marked active.
    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    fn schedule_restore(&self) {
        let weak = Rc::downgrade(&self.state);
        self.clock.schedule(move || {
            if let Some(state) = Weak::upgrade(&weak) {
                ScrollMemory::apply_restore(&state, false);
            }
        });
    }

    fn apply_restore(state: &Rc<RefCell<ScrollMemoryState>>, force: bool) {
        let (mut scroll_to, request) = {
            let mut state = state.borrow_mut();
            // Re-check at fire time: the view may have deactivated since
            // this restore was scheduled.
            if !state.active {
                return;
            }
            let Some(scroll_to) = state.scroll_to.take() else {
                // No capability captured yet; the restore re-runs when
                // capture() supplies one.
                return;
            };
            let target = state.target;
            let redundant = matches!(
                state.last_applied,
                Some(last) if (target - last).abs() < state.epsilon
            );
            if !force && redundant {
                state.scroll_to = Some(scroll_to);
                return;
            }
            state.last_applied = Some(target);
            let request = if target <= 0.0 {
                ScrollRequest::AlignTop
            } else {
                ScrollRequest::Offset(target)
            };
            (scroll_to, request)
        };
        trace!(?request, "scroll restore");
        scroll_to(request);
        let mut state = state.borrow_mut();
        if state.scroll_to.is_none() {
            state.scroll_to = Some(scroll_to);
        }
    }

    fn run_persist(&self, offset: f64) {
        let persist = self.state.borrow_mut().persist.take();
        if let Some(mut persist) = persist {
            persist(offset);
            let mut state = self.state.borrow_mut();
            if state.persist.is_none() {
                state.persist = Some(persist);
            }
        }
    }
}

/// How a view binds its scroll memory to the keyed state cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelScrollOptions {
    /// View identity, used as the implicit cache key.
    pub view: ViewKind,
    /// Caller-supplied sub-key (e.g. a library identifier).
    pub cache_key: Option<String>,
    /// When true and no sub-key is known yet, skip persistence entirely
    /// rather than falling back to the view-identity key.
    pub require_cache_key: bool,
}

impl PanelScrollOptions {
    /// Persist under the view-identity key.
    pub fn for_view(view: ViewKind) -> Self {
        Self {
            view,
            cache_key: None,
            require_cache_key: false,
        }
    }

    /// Persist under a caller-supplied sub-key.
    pub fn keyed(view: ViewKind, key: impl Into<String>) -> Self {
        Self {
            view,
            cache_key: Some(key.into()),
            require_cache_key: false,
        }
    }

    /// Persist only once a sub-key is known; `None` opts out until then.
    pub fn keyed_required(view: ViewKind, key: Option<String>) -> Self {
        Self {
            view,
            cache_key: key,
            require_cache_key: true,
        }
    }

    /// The cache key this binding persists under, if any.
    pub fn effective_cache_key(&self) -> Option<String> {
        match &self.cache_key {
            Some(key) => Some(key.clone()),
            None if self.require_cache_key => None,
            None => Some(self.view.name().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    fn recording_capability(
        memory: &ScrollMemory,
    ) -> Rc<StdRefCell<Vec<ScrollRequest>>> {
        let calls = Rc::new(StdRefCell::new(Vec::new()));
        let log = Rc::clone(&calls);
        memory.capture(move |request| log.borrow_mut().push(request));
        calls
    }

    #[test]
    fn normalize_clamps_invalid_values_to_zero() {
        assert_eq!(normalize_scroll_top(-5.0), 0.0);
        assert_eq!(normalize_scroll_top(0.0), 0.0);
        assert_eq!(normalize_scroll_top(f64::NAN), 0.0);
        assert_eq!(normalize_scroll_top(f64::INFINITY), 0.0);
        assert_eq!(normalize_scroll_top(417.5), 417.5);
    }

    #[test]
    fn no_restore_while_inactive() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_target(5000.0);
        clock.run_frame();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn activation_restores_the_pending_target_once() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_target(5000.0);
        memory.set_active(true);
        clock.run_frame();
        assert_eq!(*calls.borrow(), vec![ScrollRequest::Offset(5000.0)]);
    }

    #[test]
    fn zero_target_requests_top_alignment() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_active(true);
        clock.run_frame();
        assert_eq!(*calls.borrow(), vec![ScrollRequest::AlignTop]);
    }

    #[test]
    fn capability_arriving_after_activation_still_restores() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());

        memory.set_target(250.0);
        memory.set_active(true);
        clock.run_frame(); // no capability yet; restore is a no-op

        let calls = recording_capability(&memory);
        clock.run_frame();
        assert_eq!(*calls.borrow(), vec![ScrollRequest::Offset(250.0)]);
    }

    #[test]
    fn deactivation_between_schedule_and_fire_cancels_the_restore() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_active(true);
        memory.set_target(800.0);
        memory.set_active(false);
        clock.run_frame();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn redundant_restore_within_epsilon_is_skipped() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_target(100.0);
        memory.set_active(true);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 1);

        // Within one unit of the last-applied offset: skipped.
        memory.set_target(100.5);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 1);

        // Outside the epsilon: applied.
        memory.set_target(102.0);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(calls.borrow()[1], ScrollRequest::Offset(102.0));
    }

    #[test]
    fn custom_epsilon_widens_the_skip_window() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::with_epsilon(clock.clone(), 10.0);
        let calls = recording_capability(&memory);

        memory.set_target(100.0);
        memory.set_active(true);
        clock.run_frame();
        memory.set_target(108.0);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn deactivation_clears_last_applied_memory() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_target(300.0);
        memory.set_active(true);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 1);

        // Same target across a deactivate/reactivate cycle must restore
        // again: the viewport was torn down in between.
        memory.set_active(false);
        memory.set_active(true);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn scroll_stop_normalizes_and_persists() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock);
        let persisted = Rc::new(StdRefCell::new(Vec::new()));
        let log = Rc::clone(&persisted);
        memory.on_offset_persist(move |offset| log.borrow_mut().push(offset));

        memory.on_scroll_stop(-5.0);
        memory.on_scroll_stop(640.0);
        assert_eq!(*persisted.borrow(), vec![0.0, 640.0]);
    }

    #[test]
    fn scroll_stop_updates_the_comparison_baseline() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        let calls = recording_capability(&memory);

        memory.set_target(100.0);
        memory.set_active(true);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 1);

        // The user scrolled to 500 on their own; restoring back to 500 is
        // redundant, restoring to 100 is not.
        memory.on_scroll_stop(500.0);
        memory.set_target(500.4);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 1);
        memory.set_target(100.0);
        clock.run_frame();
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn inline_clock_restores_synchronously() {
        let memory = ScrollMemory::new(FrameClock::inline());
        let calls = recording_capability(&memory);
        memory.set_target(75.0);
        memory.set_active(true);
        assert_eq!(*calls.borrow(), vec![ScrollRequest::Offset(75.0)]);
    }

    #[test]
    fn dropping_every_handle_cancels_queued_restores() {
        let clock = FrameClock::new();
        let memory = ScrollMemory::new(clock.clone());
        memory.capture(|_| panic!("restore must not fire after drop"));
        memory.set_active(true);
        drop(memory);
        clock.run_frame(); // weak upgrade fails; nothing runs
    }

    #[test]
    fn effective_cache_key_prefers_the_caller_key() {
        let options = PanelScrollOptions::keyed(ViewKind::Library, "lib-42");
        assert_eq!(options.effective_cache_key().as_deref(), Some("lib-42"));
    }

    #[test]
    fn effective_cache_key_falls_back_to_view_identity() {
        let options = PanelScrollOptions::for_view(ViewKind::Favorites);
        assert_eq!(options.effective_cache_key().as_deref(), Some("favorites"));
    }

    #[test]
    fn required_key_opts_out_until_known() {
        let options = PanelScrollOptions::keyed_required(ViewKind::Library, None);
        assert_eq!(options.effective_cache_key(), None);
        let options =
            PanelScrollOptions::keyed_required(ViewKind::Library, Some("lib-7".into()));
        assert_eq!(options.effective_cache_key().as_deref(), Some("lib-7"));
    }
}
