//! Value types shared by the slot generator, the availability filter and the
//! aggregator.
//!
//! Everything here is transient: built per request from upstream lookups and
//! dropped once an [`AvailabilityResult`] has been produced. Times of day are
//! [`chrono::NaiveTime`]; on the wire they travel as `"HH:MM"`.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;

// ── WorkingWindow ───────────────────────────────────────────────────────────

/// The daily time-of-day range in which a service can be booked.
///
/// An inverted window (`start >= end`) is accepted; it simply produces no
/// candidate slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkingWindow {
    /// First bookable start time.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Closing time; no slot starts at or after it.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl WorkingWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// True when no slot can start in it (`start >= end`).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

// ── ServiceDuration ─────────────────────────────────────────────────────────

/// A strictly positive service length in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ServiceDuration(u32);

impl ServiceDuration {
    /// Build a duration from a minute count.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidDuration`] for zero or negative values,
    /// and for values that do not fit a `u32`.
    pub fn from_minutes(minutes: i64) -> Result<Self, SlotError> {
        if minutes <= 0 {
            return Err(SlotError::InvalidDuration(format!(
                "{minutes} minutes; a service must last at least one minute"
            )));
        }
        u32::try_from(minutes)
            .map(Self)
            .map_err(|_| SlotError::InvalidDuration(format!("{minutes} minutes is out of range")))
    }

    /// Length in minutes, always at least 1.
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// The same length as a chrono [`Duration`].
    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }

    /// `time + self`, or `None` when the sum runs past midnight.
    pub fn add_to(self, time: NaiveTime) -> Option<NaiveTime> {
        let (next, wrapped_secs) = time.overflowing_add_signed(self.as_duration());
        (wrapped_secs == 0).then_some(next)
    }
}

impl TryFrom<i64> for ServiceDuration {
    type Error = SlotError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<ServiceDuration> for i64 {
    fn from(d: ServiceDuration) -> Self {
        i64::from(d.0)
    }
}

impl fmt::Display for ServiceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

// ── BookedInterval ──────────────────────────────────────────────────────────

/// An already reserved half-open range `[start, end)` for one performing unit
/// on the target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BookedInterval {
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

impl BookedInterval {
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidInterval`] unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, SlotError> {
        if start >= end {
            return Err(SlotError::InvalidInterval(format!(
                "[{}, {}) is empty or inverted",
                start.format(hhmm::FORMAT),
                end.format(hhmm::FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive start of the reservation.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Exclusive end of the reservation.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Half-open membership: `start <= t < end`.
    pub fn contains(&self, t: NaiveTime) -> bool {
        self.start <= t && t < self.end
    }
}

// ── PerformingUnit ──────────────────────────────────────────────────────────

/// Opaque identifier of a staff member or other resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unit able to perform the service, with its bookings for the target date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformingUnit {
    /// Which unit this is.
    pub id: UnitId,
    /// Bookings on the target date only.
    pub bookings: Vec<BookedInterval>,
}

impl PerformingUnit {
    pub fn new(id: impl Into<String>, bookings: Vec<BookedInterval>) -> Self {
        Self {
            id: UnitId::new(id),
            bookings,
        }
    }
}

// ── AvailabilityResult ──────────────────────────────────────────────────────

/// Ascending, deduplicated start times free for at least one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityResult {
    slots: BTreeSet<NaiveTime>,
}

impl AvailabilityResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        self.slots.contains(&t)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.slots.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<NaiveTime> {
        self.iter().collect()
    }

    /// Render as `"HH:MM"` strings, ascending.
    pub fn formatted(&self) -> Vec<String> {
        self.iter()
            .map(|t| t.format(hhmm::FORMAT).to_string())
            .collect()
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, mut other: AvailabilityResult) {
        self.slots.append(&mut other.slots);
    }
}

impl FromIterator<NaiveTime> for AvailabilityResult {
    fn from_iter<I: IntoIterator<Item = NaiveTime>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveTime> for AvailabilityResult {
    fn extend<I: IntoIterator<Item = NaiveTime>>(&mut self, iter: I) {
        self.slots.extend(iter);
    }
}

impl Serialize for AvailabilityResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.formatted())
    }
}

// ── Dated appointments (request boundary) ───────────────────────────────────

/// A booking as stored upstream, carrying its own calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Calendar date of the appointment (ISO `YYYY-MM-DD` on the wire).
    pub date: NaiveDate,
    /// Start time on that date.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// End time on that date, exclusive.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// A performing unit together with all of its appointments, any date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSchedule {
    /// Which unit this is.
    pub id: UnitId,
    /// Every stored appointment of the unit, any date.
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// A resolved bookable service: its window, slot length and performing units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSchedule {
    /// Display name, used in error messages and logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Daily window shared by every unit.
    pub window: WorkingWindow,
    /// Slot length in minutes.
    pub duration: ServiceDuration,
    /// Units able to perform the service.
    #[serde(default)]
    pub units: Vec<UnitSchedule>,
}

/// `"HH:MM"` serde representation for times of day.
///
/// Times are whole minutes. `HH:MM:00` is accepted on input; any other
/// seconds value, fractional seconds and leap seconds are rejected so that
/// nothing is computed at a precision the output cannot show.
pub(crate) mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&t.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| {
            de::Error::custom(format!("invalid time of day '{s}', expected whole-minute HH:MM"))
        })
    }

    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
            .filter(|t| t.second() == 0 && t.nanosecond() == 0)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
