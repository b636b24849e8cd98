#![forbid(unsafe_code)]

//! Keyed open/closed state for collapsible sections.
//!
//! Settings-style views hold several independently collapsible sections
//! (server picker, playback options, subtitle settings). The map tracks
//! which are open and reports whether each mutation actually changed
//! anything, so callers can skip redraws and so "close everything on back"
//! can double as a handled/unhandled signal for the back dispatch chain.

use std::collections::BTreeMap;

/// Open/closed flags keyed by section name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisclosureMap {
    open: BTreeMap<String, bool>,
}

impl DisclosureMap {
    /// Map with every section closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag for `key`. Returns whether the stored state changed.
    ///
    /// An empty key is rejected and reported as unchanged. A key never set
    /// before counts as changed even when set to `false`, since the entry
    /// itself is new.
    pub fn set(&mut self, key: impl Into<String>, open: bool) -> bool {
        let key = key.into();
        if key.is_empty() {
            return false;
        }
        match self.open.get(&key) {
            Some(current) if *current == open => false,
            _ => {
                self.open.insert(key, open);
                true
            }
        }
    }

    /// Open the section for `key`. Returns whether anything changed.
    pub fn open(&mut self, key: impl Into<String>) -> bool {
        self.set(key, true)
    }

    /// Close the section for `key`. Returns whether anything changed.
    pub fn close(&mut self, key: impl Into<String>) -> bool {
        self.set(key, false)
    }

    /// Close every open section. Returns whether any was open.
    pub fn close_all(&mut self) -> bool {
        let mut changed = false;
        for flag in self.open.values_mut() {
            if *flag {
                *flag = false;
                changed = true;
            }
        }
        changed
    }

    /// Close the listed sections. Returns whether any of them was open.
    pub fn close_keys(&mut self, keys: &[&str]) -> bool {
        let mut changed = false;
        for key in keys {
            if let Some(flag) = self.open.get_mut(*key)
                && *flag
            {
                *flag = false;
                changed = true;
            }
        }
        changed
    }

    /// Whether the section for `key` is open.
    pub fn is_open(&self, key: &str) -> bool {
        self.open.get(key).copied().unwrap_or(false)
    }

    /// Whether any section is open.
    pub fn any_open(&self) -> bool {
        self.open.values().any(|flag| *flag)
    }
}
