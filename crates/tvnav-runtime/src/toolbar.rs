#![forbid(unsafe_code)]

//! The shared toolbar back slot and the two-stage handler composition.
//!
//! Every view embeds the same toolbar widget, which needs its own chance to
//! consume a back press (to dismiss a library picker or user menu) before
//! the view navigates away. [`compose_back_handler`] enforces the ordering
//! invariant of the dispatch hierarchy: the view's local step runs first,
//! and only if it declines does the toolbar slot run. The composed handler
//! is what gets registered into the view's [`BackHandlerRegistry`] slot,
//! and only while the view is active.
//!
//! [`BackHandlerRegistry`]: crate::back::BackHandlerRegistry

use std::cell::RefCell;
use std::rc::Rc;

use tvnav_core::ViewKind;

use crate::back::{BackHandler, BackHandlerGuard, BackHandlerRegistry};

/// The single extra slot owned by a view's embedded toolbar.
#[derive(Default)]
pub struct ToolbarBackSlot {
    handler: Option<BackHandler>,
}

impl ToolbarBackSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a slot for sharing between a view and its toolbar widget.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Replace the slot content unconditionally.
    pub fn register(&mut self, handler: BackHandler) {
        self.handler = Some(handler);
    }

    /// Empty the slot (the `register(null)` path).
    pub fn clear(&mut self) {
        self.handler = None;
    }

    /// Run the toolbar handler if present; `false` means fall through.
    pub fn run(&mut self) -> bool {
        match self.handler.as_mut() {
            Some(handler) => handler(),
            None => false,
        }
    }

    /// Whether a toolbar handler is registered.
    pub fn is_registered(&self) -> bool {
        self.handler.is_some()
    }
}

/// Build a view's effective back handler from its optional local step and
/// its toolbar slot.
///
/// Evaluation order is the point: the local step first, and if (and only
/// if) it reports unhandled, the toolbar slot. This guarantees transient
/// toolbar overlays are dismissed by back before the view itself navigates.
pub fn compose_back_handler(
    local: Option<BackHandler>,
    toolbar: Rc<RefCell<ToolbarBackSlot>>,
) -> BackHandler {
    let mut local = local;
    Box::new(move || {
        if let Some(step) = local.as_mut()
            && step()
        {
            return true;
        }
        toolbar.borrow_mut().run()
    })
}

/// Register a view's composed back handler while the view is active.
///
/// Returns `None` (registering nothing) when `active` is false; callers
/// re-invoke on every activation change and drop the previous guard on
/// deactivation, which is what keeps slot ownership paired to the active
/// instance.
pub fn register_panel_back_handler(
    registry: &Rc<RefCell<BackHandlerRegistry>>,
    kind: ViewKind,
    local: Option<BackHandler>,
    toolbar: &Rc<RefCell<ToolbarBackSlot>>,
    active: bool,
) -> Option<BackHandlerGuard> {
    if !active {
        return None;
    }
    let handler = compose_back_handler(local, Rc::clone(toolbar));
    Some(BackHandlerGuard::register(registry, kind, handler))
}
