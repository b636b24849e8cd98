#![forbid(unsafe_code)]

//! Auto-hiding toast message timer.
//!
//! Views surface transient confirmations ("Marked as watched") through a
//! toast that hides itself after a fixed duration, optionally with a
//! fade-out lead. The deadlines are a scoped resource: showing a new
//! message or clearing the toast cancels every pending deadline, so no
//! callback can fire against a message that is no longer displayed. The
//! shell drives the timer by calling [`ToastTimer::tick`] with the current
//! time each frame; nothing here spawns threads or arms OS timers.

use std::time::{Duration, Instant};

use tracing::trace;

/// Default time a toast stays up.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Deadline-driven show/hide/clear state machine for one toast slot.
#[derive(Debug)]
pub struct ToastTimer {
    message: String,
    visible: bool,
    duration: Duration,
    fade_out: Duration,
    // Pending deadlines; all three are cancelled together on clear/replace.
    show_at: Option<Instant>,
    hide_at: Option<Instant>,
    clear_at: Option<Instant>,
}

impl ToastTimer {
    /// Timer with the default duration and no fade-out.
    pub fn new() -> Self {
        Self::with_timing(DEFAULT_TOAST_DURATION, Duration::ZERO)
    }

    /// Timer with explicit duration and fade-out lead time.
    ///
    /// With a non-zero `fade_out`, the toast becomes visible one tick after
    /// `show` (so a CSS-style transition has a frame to latch onto), hides
    /// `fade_out` before the duration elapses, and the message itself is
    /// cleared when the full duration is up.
    pub fn with_timing(duration: Duration, fade_out: Duration) -> Self {
        Self {
            message: String::new(),
            visible: false,
            duration,
            fade_out,
            show_at: None,
            hide_at: None,
            clear_at: None,
        }
    }

    /// Display a message, replacing (and cancelling the deadlines of) any
    /// current one. An empty message is equivalent to [`clear`].
    ///
    /// [`clear`]: Self::clear
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.cancel_deadlines();
        let message = message.into();
        if message.is_empty() {
            self.visible = false;
            self.message.clear();
            return;
        }
        trace!(len = message.len(), "toast shown");
        self.message = message;
        if self.fade_out > Duration::ZERO {
            self.visible = false;
            self.show_at = Some(now);
            self.hide_at = Some(now + self.duration.saturating_sub(self.fade_out));
            self.clear_at = Some(now + self.duration);
        } else {
            self.visible = true;
            self.clear_at = Some(now + self.duration);
        }
    }

    /// Dismiss immediately, cancelling every pending deadline.
    pub fn clear(&mut self) {
        self.cancel_deadlines();
        self.visible = false;
        self.message.clear();
    }

    /// Advance the timer to `now`, firing any due deadlines.
    ///
    /// Returns whether the observable state (visibility or message)
    /// changed, so callers know whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(at) = self.show_at
            && now >= at
        {
            self.show_at = None;
            self.visible = true;
            changed = true;
        }
        if let Some(at) = self.hide_at
            && now >= at
        {
            self.hide_at = None;
            self.visible = false;
            changed = true;
        }
        if let Some(at) = self.clear_at
            && now >= at
        {
            self.clear_at = None;
            self.visible = false;
            if !self.message.is_empty() {
                self.message.clear();
            }
            changed = true;
        }
        changed
    }

    /// The current message (empty when cleared).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the toast is currently visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether any deadline is still pending.
    pub fn has_pending_deadlines(&self) -> bool {
        self.show_at.is_some() || self.hide_at.is_some() || self.clear_at.is_some()
    }

    fn cancel_deadlines(&mut self) {
        self.show_at = None;
        self.hide_at = None;
        self.clear_at = None;
    }
}

impl Default for ToastTimer {
    fn default() -> Self {
        Self::new()
    }
}
