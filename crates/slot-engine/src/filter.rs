//! Remove candidate slots that collide with existing bookings.
//!
//! A candidate `c` collides with a booking `b = [b.start, b.end)` when either
//! point checked below falls inside `b`:
//!
//! 1. the candidate's start `c`;
//! 2. the candidate's duration-extended end `c + duration`.
//!
//! Only those two points are checked. A candidate whose occupancy fully
//! contains a shorter booking, with neither point inside it, is kept.
//! A candidate starting exactly at `b.end` survives, but one ending exactly at
//! `b.start` does not: its end point is inside the booking.

use chrono::NaiveTime;

use crate::model::{BookedInterval, ServiceDuration};

/// Return the candidates not occupied by any booking, in their original order.
///
/// Every candidate is checked against every booking; a candidate flagged by
/// several bookings is removed once. With no bookings the candidates come back
/// unchanged.
///
/// If `c + duration` runs past midnight only the start check applies, since no
/// same-day booking can contain the wrapped end.
pub fn filter_available(
    candidates: &[NaiveTime],
    bookings: &[BookedInterval],
    duration: ServiceDuration,
) -> Vec<NaiveTime> {
    let mut occupied = vec![false; candidates.len()];

    for booking in bookings {
        for (slot, taken) in candidates.iter().zip(occupied.iter_mut()) {
            if is_occupied_by(*slot, booking, duration) {
                *taken = true;
            }
        }
    }

    candidates
        .iter()
        .zip(occupied)
        .filter_map(|(slot, taken)| (!taken).then_some(*slot))
        .collect()
}

/// The two-point collision check for one (candidate, booking) pair.
fn is_occupied_by(slot: NaiveTime, booking: &BookedInterval, duration: ServiceDuration) -> bool {
    if booking.contains(slot) {
        return true;
    }
    duration
        .add_to(slot)
        .is_some_and(|slot_end| booking.contains(slot_end))
}

// ── Tests ───────────────────────────────────────────────────────────────────
