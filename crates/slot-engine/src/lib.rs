//! # slot-engine
//!
//! Deterministic appointment availability for bookable services.
//!
//! Given a service's daily working window, its fixed duration, and the
//! bookings of every unit (staff member, room, ...) able to perform it, the
//! engine returns the start times a customer can still book on a date. A start
//! time is offered when at least one unit is free at it.
//!
//! All computation is pure: no clock, no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`generator`] — working window + duration → candidate start times
//! - [`filter`] — drop candidates colliding with a unit's bookings
//! - [`aggregate`] — union per-unit availability, sequentially or on rayon
//! - [`schedule`] — request boundary: date filtering, missing-unit reporting, request dates
//! - [`model`] — value types
//! - [`error`] — Error types

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod generator;
pub mod model;
pub mod schedule;

pub use aggregate::{aggregate_availability, aggregate_availability_par};
pub use error::SlotError;
pub use filter::filter_available;
pub use generator::{generate_slots, CandidateSlots};
pub use model::{
    Appointment, AvailabilityResult, BookedInterval, PerformingUnit, ServiceDuration,
    ServiceSchedule, UnitId, UnitSchedule, WorkingWindow,
};
pub use schedule::{bookings_on, compute_schedule, compute_schedule_par, parse_request_date};
