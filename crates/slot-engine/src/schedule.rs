//! Request boundary: from a stored service definition and a requested date to
//! the set of bookable start times.
//!
//! Upstream stores appointments with their own dates; the core only wants the
//! bookings of the requested day. This module does that narrowing, reports a
//! service with no performing unit as a distinct error, and parses the request
//! date format (`dd-MM-yyyy`).

use chrono::NaiveDate;

use crate::aggregate::{aggregate_availability, aggregate_availability_par};
use crate::error::SlotError;
use crate::model::{
    Appointment, AvailabilityResult, BookedInterval, PerformingUnit, ServiceSchedule,
};

/// Date format used by booking requests, e.g. `15-03-2026`.
pub const REQUEST_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a request date in `dd-MM-yyyy` form.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDate`] for anything else, including ISO dates.
///
/// # Examples
///
/// ```
/// use slot_engine::schedule::parse_request_date;
///
/// let date = parse_request_date("15-03-2026").unwrap();
/// assert_eq!(date.to_string(), "2026-03-15");
/// assert!(parse_request_date("2026-03-15").is_err());
/// ```
pub fn parse_request_date(s: &str) -> Result<NaiveDate, SlotError> {
    NaiveDate::parse_from_str(s.trim(), REQUEST_DATE_FORMAT)
        .map_err(|e| SlotError::InvalidDate(format!("'{s}': {e}; expected dd-MM-yyyy")))
}

/// Keep the appointments falling on `date`, as booked intervals.
///
/// # Errors
///
/// Returns [`SlotError::InvalidInterval`] if a kept appointment does not end
/// after it starts. Appointments on other dates are not validated.
pub fn bookings_on(
    appointments: &[Appointment],
    date: NaiveDate,
) -> Result<Vec<BookedInterval>, SlotError> {
    appointments
        .iter()
        .filter(|a| a.date == date)
        .map(|a| BookedInterval::new(a.start, a.end))
        .collect()
}

impl ServiceSchedule {
    /// The service's performing units with their bookings narrowed to `date`.
    pub fn units_on(&self, date: NaiveDate) -> Result<Vec<PerformingUnit>, SlotError> {
        self.units
            .iter()
            .map(|unit| {
                Ok(PerformingUnit {
                    id: unit.id.clone(),
                    bookings: bookings_on(&unit.appointments, date)?,
                })
            })
            .collect()
    }

    fn require_units(&self) -> Result<(), SlotError> {
        if self.units.is_empty() {
            return Err(SlotError::NoPerformingUnits(format!(
                "service '{}' has no unit configured",
                self.name.as_deref().unwrap_or("<unnamed>")
            )));
        }
        Ok(())
    }
}

/// Compute the available start times of `service` on `date`.
///
/// # Errors
///
/// Returns [`SlotError::NoPerformingUnits`] when the service has no unit
/// configured, or [`SlotError::InvalidInterval`] for a malformed appointment on
/// `date`.
pub fn compute_schedule(
    service: &ServiceSchedule,
    date: NaiveDate,
) -> Result<AvailabilityResult, SlotError> {
    service.require_units()?;
    let units = service.units_on(date)?;
    tracing::debug!(
        service = service.name.as_deref().unwrap_or("<unnamed>"),
        %date,
        units = units.len(),
        "computing schedule"
    );
    Ok(aggregate_availability(&units, &service.window, service.duration))
}

/// [`compute_schedule`] with the per-unit work spread over a rayon pool.
pub fn compute_schedule_par(
    service: &ServiceSchedule,
    date: NaiveDate,
) -> Result<AvailabilityResult, SlotError> {
    service.require_units()?;
    let units = service.units_on(date)?;
    tracing::debug!(
        service = service.name.as_deref().unwrap_or("<unnamed>"),
        %date,
        units = units.len(),
        "computing schedule (parallel)"
    );
    Ok(aggregate_availability_par(
        &units,
        &service.window,
        service.duration,
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────
