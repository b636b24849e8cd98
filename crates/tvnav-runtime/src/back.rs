#![forbid(unsafe_code)]

//! Back-handler registry: one slot per view kind, identity-checked release.
//!
//! A physical "back" press is routed to the handler registered for the
//! currently visible view. The contract is binary and non-exception-based:
//! a slot holds at most one handler, [`BackHandlerRegistry::run`] returns
//! `true` only when a handler is present *and* itself returns `true`, and
//! every other case means "not handled — fall through to the default back
//! behavior". Absence of a handler is the normal path, not an error.
//!
//! # Overlapping lifetimes
//!
//! Two instances of the same view kind can briefly coexist (the outgoing
//! one tearing down while the incoming one has already registered). An
//! unconditional clear in the outgoing instance's teardown would wipe the
//! incoming instance's handler. Registration therefore hands out a
//! [`HandlerId`] token, and [`BackHandlerRegistry::unregister`] only clears
//! the slot if it still holds that exact token. [`BackHandlerGuard`] pairs
//! the two calls by construction.
//!
//! Dispatch through a shared handle goes via
//! [`BackHandlerRegistry::dispatch`], which lifts the handler out of its
//! slot before invoking it so the handler can touch the registry (drop a
//! guard, register a replacement) without hitting an outstanding borrow.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};
use tvnav_core::ViewKind;

/// Callback invoked on a back event; returns whether it handled the event.
pub type BackHandler = Box<dyn FnMut() -> bool>;

/// Identity token for one registration, used for checked release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct Slot {
    id: HandlerId,
    // None only while the handler is lifted out for a dispatch in flight.
    handler: Option<BackHandler>,
}

/// One named handler slot per view kind.
#[derive(Default)]
pub struct BackHandlerRegistry {
    slots: HashMap<ViewKind, Slot>,
    next_id: u64,
}

impl BackHandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a registry for sharing with guards and the session context.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Put `handler` in the slot for `kind`, replacing any previous handler
    /// unconditionally (no queuing, no merging).
    ///
    /// Returns the token needed for an identity-checked [`unregister`].
    ///
    /// [`unregister`]: Self::unregister
    pub fn register(&mut self, kind: ViewKind, handler: BackHandler) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        let slot = Slot {
            id,
            handler: Some(handler),
        };
        let replaced = self.slots.insert(kind, slot).is_some();
        trace!(view = %kind, id = id.0, replaced, "back handler registered");
        id
    }

    /// Empty the slot for `kind` unconditionally.
    ///
    /// This is the `register(null)` path of the registration API; prefer
    /// [`BackHandlerGuard`] for lifecycle-paired teardown.
    pub fn clear(&mut self, kind: ViewKind) {
        if self.slots.remove(&kind).is_some() {
            trace!(view = %kind, "back handler cleared");
        }
    }

    /// Empty the slot for `kind` only if it still holds the registration
    /// identified by `id`.
    ///
    /// Returns whether the slot was cleared. A `false` return means a newer
    /// registration owns the slot (or it was already empty) and was left
    /// alone.
    pub fn unregister(&mut self, kind: ViewKind, id: HandlerId) -> bool {
        match self.slots.get(&kind) {
            Some(slot) if slot.id == id => {
                self.slots.remove(&kind);
                trace!(view = %kind, id = id.0, "back handler unregistered");
                true
            }
            Some(slot) => {
                trace!(
                    view = %kind,
                    stale = id.0,
                    current = slot.id.0,
                    "stale unregister ignored"
                );
                false
            }
            None => false,
        }
    }

    /// Dispatch a back event to the slot for `kind`.
    ///
    /// Synchronous and single-shot: the handler runs to completion on this
    /// call. Returns `true` only when the handler itself returned `true`.
    /// For a registry behind a shared `Rc<RefCell<..>>` handle use
    /// [`dispatch`] instead, which releases the borrow before invoking the
    /// handler.
    ///
    /// [`dispatch`]: Self::dispatch
    pub fn run(&mut self, kind: ViewKind) -> bool {
        let Some(slot) = self.slots.get_mut(&kind) else {
            trace!(view = %kind, "back event fell through: no handler");
            return false;
        };
        let Some(handler) = slot.handler.as_mut() else {
            return false;
        };
        let handled = handler();
        debug!(view = %kind, handled, "back handler dispatched");
        handled
    }

    /// Dispatch a back event through a shared registry handle.
    ///
    /// The handler is lifted out of its slot under a short borrow, invoked
    /// with the registry unborrowed, and reinstalled afterwards only if the
    /// slot still belongs to the same registration. A handler is therefore
    /// free to register, unregister, or drop guards (its own included)
    /// while it runs.
    pub fn dispatch(registry: &Rc<RefCell<Self>>, kind: ViewKind) -> bool {
        let taken = {
            let mut this = registry.borrow_mut();
            match this.slots.get_mut(&kind) {
                Some(slot) => slot.handler.take().map(|handler| (slot.id, handler)),
                None => None,
            }
        };
        let Some((id, mut handler)) = taken else {
            trace!(view = %kind, "back event fell through: no handler");
            return false;
        };
        let handled = handler();
        debug!(view = %kind, handled, "back handler dispatched");
        let mut this = registry.borrow_mut();
        if let Some(slot) = this.slots.get_mut(&kind)
            && slot.id == id
            && slot.handler.is_none()
        {
            slot.handler = Some(handler);
        }
        handled
    }

    /// Whether a handler is currently registered for `kind`.
    pub fn has_handler(&self, kind: ViewKind) -> bool {
        self.slots.contains_key(&kind)
    }
}

/// Scoped registration: register on construction, identity-checked
/// unregister on drop.
///
/// Holds the registry weakly so a guard outliving its session degrades to a
/// no-op instead of keeping the registry alive or panicking.
pub struct BackHandlerGuard {
    registry: Weak<RefCell<BackHandlerRegistry>>,
    kind: ViewKind,
    id: HandlerId,
}

impl BackHandlerGuard {
    /// Register `handler` for `kind` and return the releasing guard.
    pub fn register(
        registry: &Rc<RefCell<BackHandlerRegistry>>,
        kind: ViewKind,
        handler: BackHandler,
    ) -> Self {
        let id = registry.borrow_mut().register(kind, handler);
        Self {
            registry: Rc::downgrade(registry),
            kind,
            id,
        }
    }

    /// The token this guard releases on drop.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// The view kind this guard is registered for.
    pub fn kind(&self) -> ViewKind {
        self.kind
    }
}

impl Drop for BackHandlerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unregister(self.kind, self.id);
        }
    }
}
