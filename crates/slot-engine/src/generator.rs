//! Candidate slot generation.
//!
//! Lays a fixed-length grid over a working window. The generator knows nothing
//! about bookings; conflicts are removed later by [`crate::filter`].

use std::iter::FusedIterator;

use chrono::NaiveTime;

use crate::model::{ServiceDuration, WorkingWindow};

/// Lazy, restartable sequence of candidate start times.
///
/// Clone it to iterate the same grid again.
#[derive(Debug, Clone)]
pub struct CandidateSlots {
    next: Option<NaiveTime>,
    end: NaiveTime,
    step: ServiceDuration,
}

impl Iterator for CandidateSlots {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        let current = self.next.filter(|t| *t < self.end)?;
        self.next = self.step.add_to(current);
        Some(current)
    }
}

impl FusedIterator for CandidateSlots {}

/// Generate every candidate start time in `window`, spaced `duration` apart.
///
/// Starts at `window.start` and emits while the current time is strictly
/// before `window.end`. A start equal to `window.end` is never emitted, but a
/// start whose occupancy runs past `window.end` is. The sequence also ends if
/// stepping would wrap past midnight.
///
/// An inverted or empty window yields nothing.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use slot_engine::generator::generate_slots;
/// use slot_engine::model::{ServiceDuration, WorkingWindow};
///
/// let window = WorkingWindow::new(
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
/// );
/// let slots: Vec<_> = generate_slots(&window, ServiceDuration::from_minutes(20).unwrap())
///     .map(|t| t.format("%H:%M").to_string())
///     .collect();
/// assert_eq!(slots, ["09:00", "09:20", "09:40"]);
/// ```
pub fn generate_slots(window: &WorkingWindow, duration: ServiceDuration) -> CandidateSlots {
    CandidateSlots {
        next: (!window.is_empty()).then_some(window.start),
        end: window.end,
        step: duration,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn minutes(m: i64) -> ServiceDuration {
        ServiceDuration::from_minutes(m).unwrap()
    }

    #[test]
    fn test_morning_half_hour_grid() {
        let window = WorkingWindow::new(t(9, 0), t(12, 0));
        let slots: Vec<_> = generate_slots(&window, minutes(30)).collect();
        assert_eq!(
            slots,
            vec![t(9, 0), t(9, 30), t(10, 0), t(10, 30), t(11, 0), t(11, 30)]
        );
    }

    #[test]
    fn test_slot_equal_to_window_end_excluded() {
        let window = WorkingWindow::new(t(9, 0), t(10, 0));
        let slots: Vec<_> = generate_slots(&window, minutes(60)).collect();
        assert_eq!(slots, vec![t(9, 0)]);
    }

    #[test]
    fn test_end_overrun_still_emitted() {
        // 09:45 + 45m = 10:30 runs past 10:00 but starts inside the window.
        let window = WorkingWindow::new(t(9, 0), t(10, 0));
        let slots: Vec<_> = generate_slots(&window, minutes(45)).collect();
        assert_eq!(slots, vec![t(9, 0), t(9, 45)]);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let window = WorkingWindow::new(t(12, 0), t(9, 0));
        assert_eq!(generate_slots(&window, minutes(30)).count(), 0);
    }

    #[test]
    fn test_inverted_window_never_yields() {
        let window = WorkingWindow::new(t(23, 0), t(0, 30));
        let mut slots = generate_slots(&window, minutes(15));
        assert_eq!(slots.clone().count(), 0);
        assert_eq!(slots.next(), None);
    }

    #[test]
    fn test_zero_length_window_is_empty() {
        let window = WorkingWindow::new(t(9, 0), t(9, 0));
        assert_eq!(generate_slots(&window, minutes(30)).count(), 0);
    }

    #[test]
    fn test_stops_instead_of_wrapping_past_midnight() {
        let window = WorkingWindow::new(t(22, 0), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        let slots: Vec<_> = generate_slots(&window, minutes(120)).collect();
        assert_eq!(slots, vec![t(22, 0)]);
    }

    #[test]
    fn test_duration_longer_than_window() {
        let window = WorkingWindow::new(t(9, 0), t(9, 30));
        let slots: Vec<_> = generate_slots(&window, minutes(90)).collect();
        assert_eq!(slots, vec![t(9, 0)]);
    }

    #[test]
    fn test_restartable_via_clone() {
        let window = WorkingWindow::new(t(8, 0), t(9, 0));
        let mut slots = generate_slots(&window, minutes(15));
        slots.next();
        let rest = slots.clone();
        assert_eq!(slots.count(), 3);
        assert_eq!(rest.count(), 3);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let window = WorkingWindow::new(t(8, 0), t(8, 10));
        let mut slots = generate_slots(&window, minutes(10));
        assert_eq!(slots.next(), Some(t(8, 0)));
        assert_eq!(slots.next(), None);
        assert_eq!(slots.next(), None);
    }
}
