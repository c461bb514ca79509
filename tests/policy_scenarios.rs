//! Cross-policy properties and end-to-end policy scenarios.
//!
//! These tests drive policies through the public replay driver rather than
//! poking at policy internals.

use std::collections::{BTreeSet, HashMap};

use pagereplay::policy::{LookaheadAnchor, LookaheadPolicy, LruXPolicy, MruPolicy};
use pagereplay::simulation::{replay, Process};
use pagereplay::{pages, PageId, Policy, PolicyKind, ProcessId, WorkingSetBounds};
use proptest::prelude::*;

const TRACE: [u32; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

fn process(capacity: usize, ids: &[u32]) -> Process {
    Process::new(ProcessId::new(1), capacity, pages(ids))
}

/// Fewest faults any replacement choice can achieve.
fn optimal_faults(capacity: usize, sequence: &[PageId]) -> u64 {
    fn go(
        position: usize,
        resident: BTreeSet<PageId>,
        capacity: usize,
        sequence: &[PageId],
        memo: &mut HashMap<(usize, BTreeSet<PageId>), u64>,
    ) -> u64 {
        if position == sequence.len() {
            return 0;
        }
        let key = (position, resident.clone());
        if let Some(&faults) = memo.get(&key) {
            return faults;
        }

        let page = sequence[position];
        let faults = if resident.contains(&page) {
            go(position + 1, resident, capacity, sequence, memo)
        } else if resident.len() < capacity {
            let mut next = resident;
            next.insert(page);
            1 + go(position + 1, next, capacity, sequence, memo)
        } else {
            resident
                .iter()
                .map(|&victim| {
                    let mut next = resident.clone();
                    next.remove(&victim);
                    next.insert(page);
                    1 + go(position + 1, next, capacity, sequence, memo)
                })
                .min()
                .unwrap_or(0)
        };

        memo.insert(key, faults);
        faults
    }

    go(0, BTreeSet::new(), capacity, sequence, &mut HashMap::new())
}

fn reference_strings() -> impl Strategy<Value = (usize, Vec<u32>)> {
    (1usize..=4, prop::collection::vec(0u32..6, 0..20))
}

proptest! {
    #[test]
    fn test_fault_count_bounds((capacity, ids) in reference_strings(), param in 1usize..6) {
        let subject = process(capacity, &ids);
        let distinct = subject.distinct_pages() as u64;

        for kind in PolicyKind::ALL {
            let outcome = replay(&subject, &mut Policy::new(kind, param)).unwrap();
            prop_assert!(outcome.faults <= ids.len() as u64, "{}", kind);
            prop_assert!(outcome.faults >= distinct, "{}", kind);
            if capacity as u64 >= distinct {
                prop_assert_eq!(outcome.faults, distinct, "{}", kind);
            }
            prop_assert_eq!(outcome.faults + outcome.hits, ids.len() as u64);

            if !matches!(kind, PolicyKind::LruX | PolicyKind::WorkingSet) {
                prop_assert!(outcome.resident.len() <= capacity, "{}", kind);
                prop_assert_eq!(outcome.overflow_loads, 0);
            }
        }
    }

    #[test]
    fn test_lru_one_matches_mru((capacity, ids) in reference_strings()) {
        let subject = process(capacity, &ids);
        let lru = replay(&subject, &mut LruXPolicy::new(1)).unwrap();
        let mru = replay(&subject, &mut MruPolicy::new()).unwrap();

        prop_assert_eq!(lru.faults, mru.faults);
        prop_assert_eq!(lru.overflow_loads, 0);
        let lru_set: BTreeSet<_> = lru.resident.into_iter().collect();
        let mru_set: BTreeSet<_> = mru.resident.into_iter().collect();
        prop_assert_eq!(lru_set, mru_set);
    }

    #[test]
    fn test_full_lookahead_is_optimal((capacity, ids) in reference_strings()) {
        let subject = process(capacity, &ids);
        let mut policy =
            LookaheadPolicy::with_anchor(ids.len().max(1), LookaheadAnchor::CurrentReference);
        let outcome = replay(&subject, &mut policy).unwrap();

        prop_assert_eq!(outcome.faults, optimal_faults(capacity, &subject.references));
    }

    #[test]
    fn test_replay_is_deterministic((capacity, ids) in reference_strings(), param in 1usize..6) {
        let subject = process(capacity, &ids);
        for kind in PolicyKind::ALL {
            let first = replay(&subject, &mut Policy::new(kind, param)).unwrap();
            let second = replay(&subject, &mut Policy::new(kind, param)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn test_classic_trace_fault_counts() {
    let subject = process(3, &TRACE);
    let expected = [
        (PolicyKind::Lifo, 0, 8),
        (PolicyKind::Mru, 0, 10),
        (PolicyKind::OptLookahead, 4, 9),
        (PolicyKind::Lfu, 0, 10),
        (PolicyKind::LruX, 2, 7),
    ];

    for (kind, param, faults) in expected {
        let outcome = replay(&subject, &mut Policy::new(kind, param)).unwrap();
        assert_eq!(outcome.faults, faults, "{}", kind);
    }
}

#[test]
fn test_lifo_keeps_early_pages() {
    let outcome = replay(&process(3, &TRACE), &mut Policy::new(PolicyKind::Lifo, 0)).unwrap();
    assert_eq!(outcome.resident, pages(&[1, 2, 5]));
}

#[test]
fn test_single_frame_faults_on_every_change() {
    let ids = [1, 1, 2, 2, 1, 3, 3];
    for kind in [PolicyKind::Lifo, PolicyKind::Mru, PolicyKind::Lfu, PolicyKind::OptLookahead] {
        let outcome = replay(&process(1, &ids), &mut Policy::new(kind, 3)).unwrap();
        assert_eq!(outcome.faults, 4, "{}", kind);
        assert_eq!(outcome.resident, pages(&[3]), "{}", kind);
    }
}

#[test]
fn test_repeated_page_faults_once() {
    for kind in PolicyKind::ALL {
        let outcome = replay(&process(2, &[7; 10]), &mut Policy::new(kind, 2)).unwrap();
        assert_eq!(outcome.faults, 1, "{}", kind);
        assert_eq!(outcome.hits, 9, "{}", kind);
    }
}

#[test]
fn test_working_set_reports_bounds() {
    let outcome = replay(&process(3, &TRACE), &mut Policy::new(PolicyKind::WorkingSet, 3)).unwrap();

    // The window keeps ticks t-3..=t, so four distinct pages fit at t=4.
    assert_eq!(outcome.working_set, Some(WorkingSetBounds { min: 1, max: 4 }));
    assert!(outcome.overflow_loads > 0);
}

#[test]
fn test_working_set_grows_past_capacity_on_dense_window() {
    // Four distinct pages inside a window of 10 with only 2 frames: nothing
    // has aged out, so the loads overflow.
    let outcome =
        replay(&process(2, &[1, 2, 3, 4]), &mut Policy::new(PolicyKind::WorkingSet, 10)).unwrap();

    assert_eq!(outcome.faults, 4);
    assert_eq!(outcome.evictions, 0);
    assert_eq!(outcome.overflow_loads, 2);
    assert_eq!(outcome.working_set, Some(WorkingSetBounds { min: 1, max: 4 }));
}
