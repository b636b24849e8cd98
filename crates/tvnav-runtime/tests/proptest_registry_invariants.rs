//! Property tests for back-handler slot bookkeeping: stale guards, dropped
//! in any order, never remove a registration made after theirs.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use proptest::prelude::*;

use tvnav_core::ViewKind;
use tvnav_runtime::{BackHandlerGuard, BackHandlerRegistry};

fn arb_view() -> impl Strategy<Value = ViewKind> {
    prop::sample::select(ViewKind::ALL.to_vec())
}

/// A registration sequence plus a shuffled order to drop the guards in.
fn arb_scenario() -> impl Strategy<Value = (Vec<ViewKind>, Vec<usize>)> {
    prop::collection::vec(arb_view(), 1..24).prop_flat_map(|views| {
        let order: Vec<usize> = (0..views.len()).collect();
        (Just(views), Just(order).prop_shuffle())
    })
}

proptest! {
    /// After any interleaving of registrations and stale-guard drops, every
    /// slot is owned by the newest registration for its view kind, and
    /// dropping that newest guard empties the slot.
    #[test]
    fn stale_guard_drops_never_clobber_newer_registrations(
        (views, drop_order) in arb_scenario(),
    ) {
        let registry = BackHandlerRegistry::shared();
        let last_run = Rc::new(Cell::new(usize::MAX));

        let mut guards: Vec<Option<BackHandlerGuard>> = Vec::new();
        let mut newest: HashMap<ViewKind, usize> = HashMap::new();
        for (i, kind) in views.iter().enumerate() {
            let ran = Rc::clone(&last_run);
            let guard = BackHandlerGuard::register(
                &registry,
                *kind,
                Box::new(move || {
                    ran.set(i);
                    true
                }),
            );
            guards.push(Some(guard));
            newest.insert(*kind, i);
        }

        // Drop every superseded guard in the shuffled order, checking after
        // each drop that no live slot was taken down with it.
        for &i in &drop_order {
            if newest[&views[i]] != i {
                guards[i] = None;
                for (kind, &winner) in &newest {
                    prop_assert!(BackHandlerRegistry::dispatch(&registry, *kind));
                    prop_assert_eq!(last_run.get(), winner);
                }
            }
        }

        // Dropping the surviving (newest) guards releases their slots.
        for &i in &drop_order {
            if newest[&views[i]] == i {
                guards[i] = None;
                prop_assert!(!registry.borrow().has_handler(views[i]));
            }
        }
        prop_assert!(guards.iter().all(Option::is_none));
    }
}
