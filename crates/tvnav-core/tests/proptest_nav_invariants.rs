//! Property tests for the history-stack and state-cache invariants.

use proptest::prelude::*;

use tvnav_core::{HistoryStack, KeyedStateCache, NavDomain, NavState, ViewKind};

struct PropNav;

impl NavDomain for PropNav {
    type Item = String;
    type Library = String;
    type Playback = String;
}

fn arb_view() -> impl Strategy<Value = ViewKind> {
    prop::sample::select(ViewKind::ALL.to_vec())
}

proptest! {
    /// The cache never exceeds its capacity after any upsert sequence, and
    /// every surviving key maps to the last value written for it.
    #[test]
    fn cache_respects_capacity(
        capacity in 0usize..32,
        writes in prop::collection::vec((0u8..48, prop::option::of(0u32..1000)), 0..200),
    ) {
        let mut cache = KeyedStateCache::with_capacity(capacity);
        let mut last_written = std::collections::HashMap::new();
        for (key, value) in &writes {
            let key = key.to_string();
            cache.upsert(key.clone(), *value);
            last_written.insert(key, *value);
            prop_assert!(cache.len() <= capacity);
        }
        for key in cache.keys() {
            prop_assert_eq!(
                cache.get(key).map(|v| v.copied()),
                last_written.get(key).map(|v| *v)
            );
        }
    }

    /// Distinct keys survive in insertion order: after N distinct upserts
    /// only the newest `capacity` keys remain.
    #[test]
    fn cache_keeps_newest_distinct_keys(capacity in 1usize..32, count in 0usize..100) {
        let mut cache = KeyedStateCache::with_capacity(capacity);
        for i in 0..count {
            cache.upsert(i.to_string(), Some(i));
        }
        let survivors: Vec<_> = cache.keys().collect();
        let expected: Vec<_> = (count.saturating_sub(capacity)..count)
            .map(|i| i.to_string())
            .collect();
        prop_assert_eq!(survivors, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// N pushes followed by N pops always return the stack to empty, with
    /// each pop restoring the matching snapshot in LIFO order.
    #[test]
    fn history_is_lifo(views in prop::collection::vec(arb_view(), 0..32)) {
        let mut stack = HistoryStack::<PropNav>::new();
        let mut live = NavState::new(ViewKind::Home);
        for (i, view) in views.iter().enumerate() {
            live.view = *view;
            live.selected_item = Some(format!("item-{i}"));
            stack.push(&live);
        }
        prop_assert_eq!(stack.len(), views.len());

        for (i, view) in views.iter().enumerate().rev() {
            prop_assert!(stack.navigate_back(&mut live));
            prop_assert_eq!(live.view, *view);
            let expected = format!("item-{i}");
            prop_assert_eq!(live.selected_item.as_deref(), Some(expected.as_str()));
        }
        prop_assert!(stack.is_empty());

        let before = live.clone();
        prop_assert!(!stack.navigate_back(&mut live));
        prop_assert_eq!(live, before);
    }
}
