//! Expense id allocation.
//!
//! Ids are timestamp-like (epoch milliseconds) but strictly increasing within
//! a generator, so two calls in the same millisecond never collide.
//!
//! Only income and the expense list are persisted, so a restarted generator
//! is seeded from the largest surviving id. A deleted id above that floor is
//! skipped after a restart only because the wall clock has since passed it;
//! a restart within the same millisecond window (or with the clock set back)
//! can reissue it.

use crate::model::expense::ExpenseId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing expense id source.
///
/// Never reissues an id it handed out itself. Across restarts it relies on
/// the floor passed to `new` plus the clock; see the module docs.
#[derive(Debug, Clone)]
pub struct ExpenseIdGenerator {
    last: Option<i64>,
    clock: fn() -> i64,
}

impl ExpenseIdGenerator {
    /// Creates a generator that never returns an id at or below `floor`.
    pub fn new(floor: Option<ExpenseId>) -> Self {
        Self::with_clock(floor, now_epoch_ms)
    }

    /// Same as `new`, reading time from `clock`.
    pub fn with_clock(floor: Option<ExpenseId>, clock: fn() -> i64) -> Self {
        Self {
            last: floor.map(ExpenseId::value),
            clock,
        }
    }

    /// Returns `max(now_ms, last + 1)`.
    pub fn next_id(&mut self) -> ExpenseId {
        let now = (self.clock)();
        let next = match self.last {
            Some(last) => now.max(last.saturating_add(1)),
            None => now,
        };
        self.last = Some(next);
        ExpenseId(next)
    }
}

impl Default for ExpenseIdGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::ExpenseIdGenerator;
    use crate::model::expense::ExpenseId;

    fn frozen_clock() -> i64 {
        1_000
    }

    #[test]
    fn same_tick_calls_do_not_collide() {
        let mut generator = ExpenseIdGenerator::with_clock(None, frozen_clock);
        let ids: Vec<_> = (0..4).map(|_| generator.next_id()).collect();
        assert_eq!(
            ids,
            vec![
                ExpenseId(1_000),
                ExpenseId(1_001),
                ExpenseId(1_002),
                ExpenseId(1_003)
            ]
        );
    }

    #[test]
    fn floor_above_clock_is_respected() {
        let mut generator = ExpenseIdGenerator::with_clock(Some(ExpenseId(5_000)), frozen_clock);
        assert_eq!(generator.next_id(), ExpenseId(5_001));
    }

    fn later_clock() -> i64 {
        2_000
    }

    #[test]
    fn restart_with_advanced_clock_skips_deleted_ids() {
        let mut before_restart = ExpenseIdGenerator::with_clock(None, frozen_clock);
        let kept = before_restart.next_id();
        let deleted = before_restart.next_id();

        let mut after_restart = ExpenseIdGenerator::with_clock(Some(kept), later_clock);
        let fresh = after_restart.next_id();

        assert!(fresh > deleted);
    }

    #[test]
    fn wall_clock_ids_are_timestamp_like() {
        let mut generator = ExpenseIdGenerator::default();
        assert!(generator.next_id().value() > 1_600_000_000_000);
    }
}
