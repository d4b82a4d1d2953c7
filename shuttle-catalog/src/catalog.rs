use crate::models::{City, Schedule, Stop, TimeSlot};

/// The bookable universe for one direction of travel: reference data plus the
/// schedules that tie (city, time slot, stop) triples to live availability.
///
/// Supplied wholesale by the external data layer; nothing in here is mutated
/// by the booking core.
#[derive(Debug, Clone, Default)]
pub struct ScheduleCatalog {
    pub cities: Vec<City>,
    pub time_slots: Vec<TimeSlot>,
    pub stops: Vec<Stop>,
    pub schedules: Vec<Schedule>,
}

impl ScheduleCatalog {
    pub fn new(
        cities: Vec<City>,
        time_slots: Vec<TimeSlot>,
        stops: Vec<Stop>,
        schedules: Vec<Schedule>,
    ) -> Self {
        Self {
            cities,
            time_slots,
            stops,
            schedules,
        }
    }

    /// Resolve a complete (city, time slot, stop) pick to its schedule.
    ///
    /// `None` means the selection is incomplete or invalid and is not an
    /// error. The data source guarantees uniqueness; if it ever ships
    /// duplicates we log the integrity violation and return the first match.
    pub fn find_schedule(
        &self,
        city_id: &str,
        time_slot_id: &str,
        stop_id: &str,
    ) -> Option<&Schedule> {
        let mut matches = self.schedules.iter().filter(|s| {
            s.city_id == city_id && s.time_slot_id == time_slot_id && s.stop_id == stop_id
        });

        let first = matches.next()?;
        if let Some(dup) = matches.next() {
            tracing::warn!(
                schedule_id = first.id,
                duplicate_id = dup.id,
                city_id,
                time_slot_id,
                stop_id,
                "duplicate schedule rows for the same city/slot/stop"
            );
        }
        Some(first)
    }

    /// Time slots that have at least one schedule for the city, in catalog
    /// order and deduplicated.
    pub fn time_slots_for_city(&self, city_id: &str) -> Vec<&TimeSlot> {
        self.time_slots
            .iter()
            .filter(|ts| {
                self.schedules
                    .iter()
                    .any(|s| s.city_id == city_id && s.time_slot_id == ts.id)
            })
            .collect()
    }

    /// Stops served for a given city and time slot.
    pub fn stops_for_city_and_time(&self, city_id: &str, time_slot_id: &str) -> Vec<&Stop> {
        self.stops
            .iter()
            .filter(|stop| {
                self.schedules.iter().any(|s| {
                    s.city_id == city_id && s.time_slot_id == time_slot_id && s.stop_id == stop.id
                })
            })
            .collect()
    }
}
