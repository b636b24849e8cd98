#![forbid(unsafe_code)]

//! Back-navigation history stack.
//!
//! A LIFO stack of [`NavSnapshot`]s supporting "return to where I was"
//! across several levels of drill-down. Depth is deliberately unbounded:
//! it grows only with forward navigations the user actually performs, which
//! keeps it small in practice without an arbitrary cap.

use tracing::{debug, trace};

use crate::snapshot::{NavDomain, NavSnapshot, NavState};

/// Ordered stack of immutable navigation snapshots.
pub struct HistoryStack<D: NavDomain> {
    entries: Vec<NavSnapshot<D>>,
}

impl<D: NavDomain> HistoryStack<D> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Capture the current state and append it to the stack tail.
    ///
    /// The capture is synchronous: the snapshot reflects `state` exactly as
    /// it is at the moment of the call, before any forward-navigation
    /// mutation the caller performs next.
    pub fn push(&mut self, state: &NavState<D>) {
        trace!(view = %state.view, depth = self.entries.len() + 1, "history push");
        self.entries.push(state.snapshot());
    }

    /// Pop the newest snapshot and restore it into `state`.
    ///
    /// Returns `false` with `state` untouched when the stack is empty.
    pub fn navigate_back(&mut self, state: &mut NavState<D>) -> bool {
        let Some(snapshot) = self.entries.pop() else {
            trace!("history pop on empty stack");
            return false;
        };
        trace!(view = %snapshot.view, depth = self.entries.len(), "history pop");
        state.restore(snapshot);
        true
    }

    /// Newest-first scan for the last item the user was looking at.
    ///
    /// Non-destructive: returns the `selected_item` of the most recent
    /// snapshot that has one, without consuming any history.
    pub fn fallback_item(&self) -> Option<&D::Item> {
        self.entries
            .iter()
            .rev()
            .find_map(|snapshot| snapshot.selected_item.as_ref())
    }

    /// Replace the tail snapshot without changing stack depth.
    ///
    /// Used to patch stale captured data (e.g. refreshed item metadata)
    /// into the snapshot the next back action will restore. The updater
    /// returns `None` to keep the stack untouched; returns `false` when the
    /// stack is empty or the updater declined.
    pub fn update_latest<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&NavSnapshot<D>) -> Option<NavSnapshot<D>>,
    {
        let next = match self.entries.last() {
            Some(current) => match updater(current) {
                Some(next) => next,
                None => return false,
            },
            None => return false,
        };
        if let Some(tail) = self.entries.last_mut() {
            trace!(view = %next.view, "history tail snapshot updated");
            *tail = next;
            true
        } else {
            false
        }
    }

    /// Drop all history, e.g. on sign-out.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!(dropped = self.entries.len(), "history cleared");
        }
        self.entries.clear();
    }

    /// Current stack depth.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D: NavDomain> Default for HistoryStack<D> {
    fn default() -> Self {
        Self::new()
    }
}
