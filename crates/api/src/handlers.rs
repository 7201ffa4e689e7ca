pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;

use chrono::{Local, NaiveDate};

/// The clinic's current calendar day.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
