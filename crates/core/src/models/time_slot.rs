use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};
use crate::slots;

/// Number of bookable slots in one clinic day.
pub const SLOTS_PER_DAY: u8 = 9;

/// One of the fixed appointment intervals of a clinic day, numbered `1..=9`.
///
/// A value of this type is always in range, so label lookups on it cannot
/// fail. Use [`SlotNumber::new`] to validate raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct SlotNumber(u8);

impl SlotNumber {
    /// Validates a raw slot number.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Validation` when `number` is outside `1..=9`.
    pub fn new(number: i16) -> ClinicResult<Self> {
        if (1..=i16::from(SLOTS_PER_DAY)).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(ClinicError::Validation(format!(
                "Time slot must be between 1 and {}, got {}",
                SLOTS_PER_DAY, number
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every slot of the day in ascending order.
    pub fn all() -> impl Iterator<Item = SlotNumber> {
        (1..=SLOTS_PER_DAY).map(SlotNumber)
    }

    pub fn label(self) -> String {
        slots::label_for(self)
    }
}

impl TryFrom<i16> for SlotNumber {
    type Error = ClinicError;

    fn try_from(number: i16) -> ClinicResult<Self> {
        Self::new(number)
    }
}

impl From<SlotNumber> for i16 {
    fn from(slot: SlotNumber) -> Self {
        i16::from(slot.0)
    }
}

impl fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A free slot as presented to clients: its number and human readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub slot: SlotNumber,
    pub label: String,
}

impl TimeSlot {
    pub fn new(slot: SlotNumber) -> Self {
        Self {
            slot,
            label: slot.label(),
        }
    }
}
