#![forbid(unsafe_code)]

//! Session-scoped navigation context.
//!
//! One [`SessionContext`] owns the back-handler registry, the history
//! stack, the panel-state cache, and the frame clock for a signed-in
//! session. Everything hangs off the context instead of process-global
//! singletons, so two sessions (tests, or a sign-out/sign-in cycle) never
//! share registration or cache state by accident.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use tvnav_core::flags;
use tvnav_core::{
    HistoryStack, KeyedStateCache, NavDomain, NavState, STATE_CACHE_CAPACITY, ViewKind,
    panel_index,
};

use crate::back::{BackHandler, BackHandlerGuard, BackHandlerRegistry};
use crate::frame::FrameClock;
use crate::scroll::{PanelScrollOptions, SCROLL_RESTORE_EPSILON, ScrollMemory};
use crate::toolbar::{self, ToolbarBackSlot};

/// Tunables fixed at session construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Entry bound for the panel-state cache.
    pub state_cache_capacity: usize,
    /// Redundancy window for scroll restores.
    pub scroll_epsilon: f64,
    /// Whether the debug panel view participates in panel ordering.
    pub debug_panel: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_cache_capacity: STATE_CACHE_CAPACITY,
            scroll_epsilon: SCROLL_RESTORE_EPSILON,
            debug_panel: false,
        }
    }
}

impl SessionConfig {
    /// Defaults with the debug-panel flag resolved from the environment.
    pub fn from_env() -> Self {
        Self {
            debug_panel: flags::debug_panel_enabled(),
            ..Self::default()
        }
    }
}

/// How a back event was resolved by [`SessionContext::handle_back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The active view's registered handler consumed the event.
    HandledByView,
    /// No handler consumed it; a history snapshot was restored.
    RestoredHistory,
    /// Nothing consumed it and the history was empty. The shell decides
    /// what "back" means now (usually exit or minimize).
    Unhandled,
}

/// Cached per-panel UI state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelState {
    /// Last known scroll offset.
    pub scroll_top: f64,
}

/// Owner of the per-session navigation machinery.
pub struct SessionContext<D: NavDomain> {
    config: SessionConfig,
    registry: Rc<RefCell<BackHandlerRegistry>>,
    history: HistoryStack<D>,
    panel_state: Rc<RefCell<KeyedStateCache<PanelState>>>,
    clock: FrameClock,
}

impl<D: NavDomain> SessionContext<D> {
    /// Context with a fresh deferred frame clock.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, FrameClock::new())
    }

    /// Context driven by an externally owned clock (the shell's frame loop,
    /// or an inline clock in tests).
    pub fn with_clock(config: SessionConfig, clock: FrameClock) -> Self {
        let panel_state = Rc::new(RefCell::new(KeyedStateCache::with_capacity(
            config.state_cache_capacity,
        )));
        Self {
            config,
            registry: BackHandlerRegistry::shared(),
            history: HistoryStack::new(),
            panel_state,
            clock,
        }
    }

    /// The session's tunables.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The shared back-handler registry.
    pub fn registry(&self) -> &Rc<RefCell<BackHandlerRegistry>> {
        &self.registry
    }

    /// The frame clock scroll restores are scheduled on.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Read access to the history stack.
    pub fn history(&self) -> &HistoryStack<D> {
        &self.history
    }

    /// Mutable access to the history stack.
    pub fn history_mut(&mut self) -> &mut HistoryStack<D> {
        &mut self.history
    }

    /// Snapshot `state` onto the history stack before a forward navigation.
    pub fn push_history(&mut self, state: &NavState<D>) {
        self.history.push(state);
    }

    /// Register a back handler for `kind`, released when the guard drops.
    pub fn register_back_handler(&self, kind: ViewKind, handler: BackHandler) -> BackHandlerGuard {
        BackHandlerGuard::register(&self.registry, kind, handler)
    }

    /// Register a view's composed (local step + toolbar slot) back handler
    /// while the view is active. See
    /// [`toolbar::register_panel_back_handler`].
    pub fn register_panel_back_handler(
        &self,
        kind: ViewKind,
        local: Option<BackHandler>,
        toolbar: &Rc<RefCell<ToolbarBackSlot>>,
        active: bool,
    ) -> Option<BackHandlerGuard> {
        toolbar::register_panel_back_handler(&self.registry, kind, local, toolbar, active)
    }

    /// Dispatch a back event for the view `state` currently shows.
    ///
    /// The view's registered handler gets the first chance; if it is absent
    /// or declines, the newest history snapshot is restored into `state`;
    /// with no history left the event is reported unhandled. The registry
    /// is unborrowed while the handler runs, so handlers may register or
    /// release registrations from inside the dispatch.
    pub fn handle_back(&mut self, state: &mut NavState<D>) -> BackOutcome {
        if BackHandlerRegistry::dispatch(&self.registry, state.view) {
            return BackOutcome::HandledByView;
        }
        if self.history.navigate_back(state) {
            return BackOutcome::RestoredHistory;
        }
        debug!(view = %state.view, "back event unhandled");
        BackOutcome::Unhandled
    }

    /// Panel ordinal for `view` under this session's debug-panel flag.
    pub fn panel_index(&self, view: ViewKind) -> u8 {
        panel_index(view, self.config.debug_panel)
    }

    /// Store panel state under `key`.
    pub fn cache_panel_state(&self, key: impl Into<String>, state: PanelState) {
        self.panel_state.borrow_mut().upsert(key, Some(state));
    }

    /// Cached panel state for `key`, flattening the explicitly-cleared case.
    pub fn cached_panel_state(&self, key: &str) -> Option<PanelState> {
        self.panel_state.borrow().get(key).flatten().copied()
    }

    /// Drop the cached panel state for `key`. Returns whether an entry was
    /// removed.
    pub fn clear_panel_state(&self, key: &str) -> bool {
        self.panel_state.borrow_mut().clear(key)
    }

    /// Scroll memory for one view, wired to the panel-state cache.
    ///
    /// The target is seeded from the cached offset before the persistence
    /// callback is installed, so seeding does not echo back into the cache.
    /// With a required-but-unknown cache key the memory still works, it just
    /// neither seeds nor persists.
    pub fn panel_scroll(&self, options: PanelScrollOptions) -> ScrollMemory {
        let memory = ScrollMemory::with_epsilon(self.clock.clone(), self.config.scroll_epsilon);
        let Some(key) = options.effective_cache_key() else {
            return memory;
        };
        if let Some(cached) = self.cached_panel_state(&key) {
            memory.set_target(cached.scroll_top);
        }
        let cache = Rc::clone(&self.panel_state);
        memory.on_offset_persist(move |scroll_top| {
            cache
                .borrow_mut()
                .upsert(key.clone(), Some(PanelState { scroll_top }));
        });
        memory
    }

    /// Wipe session-accumulated navigation state (sign-out path): history
    /// and the panel-state cache. Registrations are left to their guards.
    pub fn reset(&mut self) {
        self.history.clear();
        self.panel_state.borrow_mut().clear_all();
        debug!("session navigation state reset");
    }
}
