//! # Slot Catalog
//!
//! The clinic day is split into nine one-hour slots starting at 8 AM. This
//! module maps slot numbers to their labels and computes which slots of a
//! vet's day are still free.

use std::collections::HashSet;

use crate::models::time_slot::{SlotNumber, TimeSlot};

/// Returns the human readable interval for a slot.
///
/// Slots 1-4 are morning hours, 6-9 afternoon hours. Slot 5 keeps its
/// historical "12 AM to 1 PM" label.
///
/// # Example
///
/// ```
/// use petclinic_core::{models::time_slot::SlotNumber, slots::label_for};
///
/// let slot = SlotNumber::new(1).unwrap();
/// assert_eq!(label_for(slot), "8 AM to 9 AM");
/// ```
pub fn label_for(slot: SlotNumber) -> String {
    let n = slot.get();
    match n {
        1..=4 => format!("{} AM to {} AM", 7 + n, 8 + n),
        5 => "12 AM to 1 PM".to_string(),
        _ => format!("{} PM to {} PM", n - 5, n - 4),
    }
}

/// Computes the free slots of a day given the slot numbers already booked.
///
/// The result is ordered by slot number and always freshly built. Booked
/// numbers outside `1..=9` are ignored.
///
/// # Example
///
/// ```
/// use petclinic_core::slots::available_slots;
///
/// let free = available_slots([1, 5]);
/// let numbers: Vec<u8> = free.iter().map(|s| s.slot.get()).collect();
/// assert_eq!(numbers, vec![2, 3, 4, 6, 7, 8, 9]);
/// ```
pub fn available_slots<I>(booked: I) -> Vec<TimeSlot>
where
    I: IntoIterator<Item = i16>,
{
    let booked: HashSet<i16> = booked.into_iter().collect();

    SlotNumber::all()
        .filter(|slot| !booked.contains(&i16::from(*slot)))
        .map(TimeSlot::new)
        .collect()
}
