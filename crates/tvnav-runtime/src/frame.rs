#![forbid(unsafe_code)]

//! Paint-boundary callback scheduling.
//!
//! Scroll restores must not run until the scrollable surface has committed
//! layout, so they are deferred to the next paint boundary. [`FrameClock`]
//! is that boundary: the shell drains it once per frame via
//! [`FrameClock::run_frame`]. When no frame loop exists (tests, headless
//! hosts) an inline clock runs callbacks synchronously instead — the same
//! fallback the scheduling helper applies when no animation-frame primitive
//! is available.

use std::cell::RefCell;
use std::rc::Rc;

type FrameCallback = Box<dyn FnOnce()>;

/// Cheaply cloneable handle to a shared frame-callback queue.
#[derive(Clone)]
pub struct FrameClock {
    queue: Rc<RefCell<Vec<FrameCallback>>>,
    inline: bool,
}

impl FrameClock {
    /// Deferred clock: callbacks wait for the next [`run_frame`].
    ///
    /// [`run_frame`]: Self::run_frame
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Vec::new())),
            inline: false,
        }
    }

    /// Inline clock: callbacks run synchronously inside [`schedule`].
    ///
    /// [`schedule`]: Self::schedule
    pub fn inline() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Vec::new())),
            inline: true,
        }
    }

    /// Queue a callback for the next frame (or run it now in inline mode).
    pub fn schedule(&self, callback: impl FnOnce() + 'static) {
        if self.inline {
            callback();
            return;
        }
        self.queue.borrow_mut().push(Box::new(callback));
    }

    /// Drain and run the queued callbacks.
    ///
    /// The queue is snapshotted first, so a callback scheduled during this
    /// frame lands in the next one. Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether this clock runs callbacks synchronously.
    pub fn is_inline(&self) -> bool {
        self.inline
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
