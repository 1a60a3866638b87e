//! Provider ordering for a single invocation

use super::config::FallbackMode;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Compute the index order in which providers are tried for one invocation
///
/// `Sequential` and `Priority` both return configured-list order starting at
/// index 0; providers carry no separate priority attribute. `RoundRobin`
/// starts at the current cursor and advances it by one (mod `count`) as a
/// side effect of planning, whether or not the plan is fully consumed.
pub(super) fn plan_indices(mode: FallbackMode, count: usize, cursor: &AtomicUsize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    match mode {
        FallbackMode::Sequential | FallbackMode::Priority => (0..count).collect(),
        FallbackMode::RoundRobin => {
            let start = advance(cursor, count);
            (0..count).map(|offset| (start + offset) % count).collect()
        }
    }
}

/// Advance the rotation cursor, returning the starting index for this call
///
/// The stored value stays within `0..count`; the extra modulo on the return
/// covers a cursor left over from a longer provider list.
fn advance(cursor: &AtomicUsize, count: usize) -> usize {
    let previous = cursor
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
            Some((current + 1) % count)
        })
        .unwrap_or(0);
    previous % count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_always_starts_at_zero() {
        let cursor = AtomicUsize::new(0);
        for _ in 0..3 {
            let plan = plan_indices(FallbackMode::Sequential, 3, &cursor);
            assert_eq!(plan, vec![0, 1, 2]);
        }
        assert_eq!(cursor.load(Ordering::Acquire), 0);
    }

    #[test]
    fn priority_matches_sequential() {
        let cursor = AtomicUsize::new(0);
        assert_eq!(
            plan_indices(FallbackMode::Priority, 4, &cursor),
            plan_indices(FallbackMode::Sequential, 4, &cursor)
        );
    }

    #[test]
    fn round_robin_rotates_and_wraps() {
        let cursor = AtomicUsize::new(0);
        assert_eq!(plan_indices(FallbackMode::RoundRobin, 3, &cursor), vec![0, 1, 2]);
        assert_eq!(plan_indices(FallbackMode::RoundRobin, 3, &cursor), vec![1, 2, 0]);
        assert_eq!(plan_indices(FallbackMode::RoundRobin, 3, &cursor), vec![2, 0, 1]);
        assert_eq!(plan_indices(FallbackMode::RoundRobin, 3, &cursor), vec![0, 1, 2]);
    }

    #[test]
    fn round_robin_advances_even_when_plan_is_unused() {
        let cursor = AtomicUsize::new(0);
        let _ = plan_indices(FallbackMode::RoundRobin, 2, &cursor);
        assert_eq!(cursor.load(Ordering::Acquire), 1);
    }

    #[test]
    fn stale_cursor_from_a_longer_list_is_tolerated() {
        // A provider was removed since the cursor last advanced.
        let cursor = AtomicUsize::new(5);
        let plan = plan_indices(FallbackMode::RoundRobin, 3, &cursor);
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|i| *i < 3));
    }

    #[test]
    fn empty_list_yields_empty_plan() {
        let cursor = AtomicUsize::new(0);
        assert!(plan_indices(FallbackMode::RoundRobin, 0, &cursor).is_empty());
        assert!(plan_indices(FallbackMode::Sequential, 0, &cursor).is_empty());
    }
}
