//! # Booking Validation
//!
//! Rules deciding whether a visit may be booked on a given day and slot.
//! Appointments are only taken for weekdays strictly after today, and a
//! vet's slot can hold a single visit.

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::models::time_slot::SlotNumber;

/// Why a proposed booking was turned down.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    #[error("Visits can only be booked on a weekday after today")]
    UnavailableDay,

    #[error("Time slot {0} is already booked")]
    SlotTaken(SlotNumber),
}

/// Returns true when no visit can be booked on `candidate`.
///
/// Past days, today and weekends are all unavailable.
pub fn is_day_unavailable(candidate: NaiveDate, today: NaiveDate) -> bool {
    let is_weekend = matches!(candidate.weekday(), Weekday::Sat | Weekday::Sun);

    candidate <= today || is_weekend
}

/// Checks a proposed visit against the day rules and the slots already
/// booked for the chosen vet on that day.
pub fn check_booking<I>(
    date: NaiveDate,
    slot: SlotNumber,
    today: NaiveDate,
    booked: I,
) -> Result<(), BookingRejection>
where
    I: IntoIterator<Item = i16>,
{
    if is_day_unavailable(date, today) {
        return Err(BookingRejection::UnavailableDay);
    }

    if booked.into_iter().any(|taken| taken == i16::from(slot)) {
        return Err(BookingRejection::SlotTaken(slot));
    }

    Ok(())
}
