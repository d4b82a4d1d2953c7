use serde::{Deserialize, Serialize};
use shuttle_catalog::{BusType, ScheduleCatalog, ScheduleStatus};

/// In-progress pick for one leg. Each field depends on the one above it:
/// the time-slot options are filtered by city, the stop options by city and
/// time slot, so changing an upstream field must drop everything downstream
/// (a stale stop could point at an option the new city never serves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegSelection {
    pub city_id: Option<String>,
    pub time_slot_id: Option<String>,
    pub stop_id: Option<String>,
    pub ticket_count: u32,
}

impl Default for LegSelection {
    fn default() -> Self {
        Self {
            city_id: None,
            time_slot_id: None,
            stop_id: None,
            ticket_count: 1,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No seats are available for this selection")]
    NoSeatsAvailable,
}

impl LegSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a city. Always cascades, even when the id is unchanged: the
    /// downstream options are recomputed either way and the previous picks
    /// may no longer be valid against a fresh schedule list.
    pub fn select_city(&mut self, city_id: impl Into<String>) {
        self.city_id = Some(city_id.into());
        self.time_slot_id = None;
        self.stop_id = None;
        self.ticket_count = 1;
    }

    pub fn select_time_slot(&mut self, time_slot_id: impl Into<String>) {
        self.time_slot_id = Some(time_slot_id.into());
        self.stop_id = None;
        self.ticket_count = 1;
    }

    pub fn select_stop(&mut self, stop_id: impl Into<String>) {
        self.stop_id = Some(stop_id.into());
        self.ticket_count = 1;
    }

    /// Set the ticket count, clamped to `[1, max]`. A ceiling of zero means
    /// no count is valid and the booking action stays disabled.
    pub fn set_ticket_count(&mut self, count: u32, max: u32) -> Result<(), SelectionError> {
        if max == 0 {
            return Err(SelectionError::NoSeatsAvailable);
        }
        self.ticket_count = count.clamp(1, max);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.city_id.is_some() && self.time_slot_id.is_some() && self.stop_id.is_some()
    }

    /// Resolve the pick against the catalog. Complete only when all three
    /// ids are chosen and a matching schedule exists; the returned snapshot
    /// freezes the availability seen at selection time.
    pub fn resolve(&self, catalog: &ScheduleCatalog) -> Option<SavedSelection> {
        let city_id = self.city_id.as_deref()?;
        let time_slot_id = self.time_slot_id.as_deref()?;
        let stop_id = self.stop_id.as_deref()?;
        let schedule = catalog.find_schedule(city_id, time_slot_id, stop_id)?;

        Some(SavedSelection {
            city_id: city_id.to_string(),
            time_slot_id: time_slot_id.to_string(),
            stop_id: stop_id.to_string(),
            ticket_count: self.ticket_count,
            schedule_id: schedule.id,
            is_full: schedule.is_full(),
            tickets_left: schedule.tickets_remaining,
            status: schedule.status,
            bus_type: schedule.bus_type,
            is_held: schedule.is_held,
        })
    }
}

/// A completed leg pick with the availability snapshot taken when it was
/// saved. This is what the round-trip planner stores and what the assembler
/// turns into the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedSelection {
    pub city_id: String,
    pub time_slot_id: String,
    pub stop_id: String,
    pub ticket_count: u32,
    pub schedule_id: u32,
    pub is_full: bool,
    pub tickets_left: u32,
    pub status: ScheduleStatus,
    pub bus_type: BusType,
    pub is_held: bool,
}

impl SavedSelection {
    /// Sold out and not merely held. Held legs remain bookable.
    pub fn is_blocked(&self) -> bool {
        self.is_full && !self.is_held
    }
}
