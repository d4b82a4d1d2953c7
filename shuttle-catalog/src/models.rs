use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Which fleet operates a schedule. Student buses are booked one seat at a
/// time; employee buses allow family tickets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BusType {
    Student,
    Employee,
}

/// Availability state as produced by the data source. The catalog never
/// re-derives `Full` from the seat count; both are carried as supplied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Available,
    Full,
    Held,
}

/// One direction of travel relative to campus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    FromCampus,
    ToCampus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    pub date: NaiveDate,
    pub departure: NaiveTime,
}

/// A pickup or drop point within a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stop {
    pub id: String,
    pub name: String,
}

/// A bookable (city, time slot, stop) combination with its live availability.
/// Read-only from the booking core's point of view; a fresh list is supplied
/// per request by the external data layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    pub id: u32,
    pub city_id: String,
    pub time_slot_id: String,
    pub stop_id: String,
    pub bus_type: BusType,
    pub tickets_remaining: u32,
    pub status: ScheduleStatus,
    pub is_held: bool,
}

impl Schedule {
    /// Sold out, whether organically or because the source flagged it.
    pub fn is_full(&self) -> bool {
        self.tickets_remaining == 0 || self.status == ScheduleStatus::Full
    }

    /// Full and not held by an administrator. Held schedules stay bookable
    /// (they resume once the hold is released); this is the only state a
    /// booking may never be saved against.
    pub fn is_blocked(&self) -> bool {
        self.is_full() && !self.is_held
    }

    /// Seat-picker ceiling for this schedule: students book exactly one
    /// ticket, employee buses cap at three or the seats left, whichever is
    /// lower.
    pub fn max_tickets(&self) -> u32 {
        match self.bus_type {
            BusType::Student => 1,
            BusType::Employee => self.tickets_remaining.min(3),
        }
    }
}
