use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    required,
    time_slot::{SlotNumber, TimeSlot},
};
use crate::errors::ClinicResult;

/// A booked appointment of a pet with a vet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub vet_id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub time_slot: SlotNumber,
}

impl Visit {
    /// Whether the visit lies strictly after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date > today
    }

    pub fn time_slot_label(&self) -> String {
        self.time_slot.label()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookVisitRequest {
    pub date: NaiveDate,
    pub description: Option<String>,
    pub vet_id: Uuid,
    pub time_slot: i16,
}

impl BookVisitRequest {
    /// Validates the request fields and builds the visit for `pet_id`.
    ///
    /// Day and slot availability are checked separately by the booking rules.
    pub fn into_visit(self, id: Uuid, pet_id: Uuid) -> ClinicResult<Visit> {
        let description = required("description", self.description)?;
        let time_slot = SlotNumber::new(self.time_slot)?;

        Ok(Visit {
            id,
            pet_id,
            vet_id: self.vet_id,
            date: self.date,
            description,
            time_slot,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitResponse {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub vet_id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub time_slot: SlotNumber,
    pub time_slot_label: String,
    pub is_upcoming: bool,
}

impl VisitResponse {
    pub fn new(visit: Visit, today: NaiveDate) -> Self {
        Self {
            time_slot_label: visit.time_slot_label(),
            is_upcoming: visit.is_upcoming(today),
            id: visit.id,
            pet_id: visit.pet_id,
            vet_id: visit.vet_id,
            date: visit.date,
            description: visit.description,
            time_slot: visit.time_slot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub vet_id: Uuid,
    pub date: NaiveDate,
    pub day_unavailable: bool,
    pub slots: Vec<TimeSlot>,
}
