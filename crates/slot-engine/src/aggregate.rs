//! Merge per-unit availability into one result.
//!
//! A start time is offered to the customer when at least one performing unit
//! is free at it, so per-unit survivors are combined by set union.

use chrono::NaiveTime;
use rayon::prelude::*;

use crate::filter::filter_available;
use crate::generator::generate_slots;
use crate::model::{AvailabilityResult, PerformingUnit, ServiceDuration, WorkingWindow};

/// Compute the start times free for at least one of `units`.
///
/// The candidate grid is generated once from `window` and `duration` (both are
/// shared by every unit of a service) and filtered against each unit's own
/// bookings. An empty set of units yields an empty result, not an error.
pub fn aggregate_availability<'a, I>(
    units: I,
    window: &WorkingWindow,
    duration: ServiceDuration,
) -> AvailabilityResult
where
    I: IntoIterator<Item = &'a PerformingUnit>,
{
    let candidates: Vec<NaiveTime> = generate_slots(window, duration).collect();

    let mut result = AvailabilityResult::new();
    let mut unit_count = 0usize;
    for unit in units {
        unit_count += 1;
        result.extend(free_for_unit(unit, &candidates, duration));
    }

    tracing::debug!(
        units = unit_count,
        candidates = candidates.len(),
        available = result.len(),
        %duration,
        "aggregated availability"
    );
    result
}

/// Parallel [`aggregate_availability`] over a rayon pool.
///
/// Each task folds into its own [`AvailabilityResult`]; the partial results are
/// unioned pairwise at the join. The output is identical to the sequential
/// version for the same input.
pub fn aggregate_availability_par(
    units: &[PerformingUnit],
    window: &WorkingWindow,
    duration: ServiceDuration,
) -> AvailabilityResult {
    let candidates: Vec<NaiveTime> = generate_slots(window, duration).collect();

    let result = units
        .par_iter()
        .fold(AvailabilityResult::new, |mut acc, unit| {
            acc.extend(free_for_unit(unit, &candidates, duration));
            acc
        })
        .reduce(AvailabilityResult::new, |mut left, right| {
            left.merge(right);
            left
        });

    tracing::debug!(
        units = units.len(),
        candidates = candidates.len(),
        available = result.len(),
        %duration,
        "aggregated availability (parallel)"
    );
    result
}

fn free_for_unit(
    unit: &PerformingUnit,
    candidates: &[NaiveTime],
    duration: ServiceDuration,
) -> Vec<NaiveTime> {
    let free = filter_available(candidates, &unit.bookings, duration);
    tracing::trace!(
        unit = %unit.id,
        bookings = unit.bookings.len(),
        free = free.len(),
        "filtered unit"
    );
    free
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookedInterval;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn minutes(m: i64) -> ServiceDuration {
        ServiceDuration::from_minutes(m).unwrap()
    }

    fn booking(sh: u32, sm: u32, eh: u32, em: u32) -> BookedInterval {
        BookedInterval::new(t(sh, sm), t(eh, em)).unwrap()
    }

    fn morning() -> WorkingWindow {
        WorkingWindow::new(t(9, 0), t(12, 0))
    }

    #[test]
    fn test_empty_units_give_empty_result() {
        let units: Vec<PerformingUnit> = Vec::new();
        let result = aggregate_availability(&units, &morning(), minutes(30));
        assert!(result.is_empty());
        assert!(aggregate_availability_par(&units, &morning(), minutes(30)).is_empty());
    }

    #[test]
    fn test_single_free_unit_gets_full_grid() {
        let units = vec![PerformingUnit::new("anna", vec![])];
        let result = aggregate_availability(&units, &morning(), minutes(30));
        assert_eq!(
            result.formatted(),
            vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
        );
    }

    #[test]
    fn test_union_keeps_slot_free_for_any_unit() {
        let units = vec![
            PerformingUnit::new("anna", vec![]),
            PerformingUnit::new("ben", vec![booking(10, 0, 10, 30)]),
        ];
        let result = aggregate_availability(&units, &morning(), minutes(30));
        assert!(result.contains(t(10, 0)));
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn test_slot_busy_for_every_unit_is_dropped() {
        let units = vec![
            PerformingUnit::new("anna", vec![booking(10, 0, 10, 30)]),
            PerformingUnit::new("ben", vec![booking(9, 45, 10, 15)]),
        ];
        let result = aggregate_availability(&units, &morning(), minutes(30));
        assert!(!result.contains(t(10, 0)));
        assert!(!result.contains(t(9, 30)));
        assert_eq!(result.formatted(), vec!["09:00", "10:30", "11:00", "11:30"]);
    }

    #[test]
    fn test_complementary_units_cover_the_day() {
        let units = vec![
            PerformingUnit::new("early", vec![booking(10, 30, 12, 0)]),
            PerformingUnit::new("late", vec![booking(9, 0, 10, 0)]),
        ];
        let result = aggregate_availability(&units, &morning(), minutes(30));
        // early: 09:00, 09:30 (10:00 + 30m = 10:30 is inside its booking)
        // late:  10:00, 10:30, 11:00, 11:30
        assert_eq!(
            result.formatted(),
            vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
        );
    }

    #[test]
    fn test_inverted_window_gives_empty_result() {
        let units = vec![PerformingUnit::new("anna", vec![])];
        let window = WorkingWindow::new(t(17, 0), t(9, 0));
        assert!(aggregate_availability(&units, &window, minutes(30)).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let units = vec![
            PerformingUnit::new("anna", vec![booking(9, 0, 10, 0), booking(11, 0, 11, 15)]),
            PerformingUnit::new("ben", vec![booking(9, 30, 11, 30)]),
            PerformingUnit::new("cleo", vec![booking(10, 0, 12, 0)]),
        ];
        let window = WorkingWindow::new(t(8, 0), t(13, 0));
        let seq = aggregate_availability(&units, &window, minutes(20));
        let par = aggregate_availability_par(&units, &window, minutes(20));
        assert_eq!(seq, par);
    }

    #[test]
    fn test_accepts_map_values() {
        use std::collections::BTreeMap;

        let mut by_id = BTreeMap::new();
        by_id.insert("anna", PerformingUnit::new("anna", vec![booking(9, 0, 12, 0)]));
        by_id.insert("ben", PerformingUnit::new("ben", vec![booking(9, 0, 11, 0)]));
        let result = aggregate_availability(by_id.values(), &morning(), minutes(30));
        assert_eq!(result.formatted(), vec!["11:00", "11:30"]);
    }
}
