use crate::selection::SavedSelection;
use serde::{Deserialize, Serialize};
use shuttle_catalog::Direction;

/// Where a round-trip booking stands. `Confirmable` is the only state from
/// which submission may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundTripState {
    /// Neither leg saved.
    Empty,
    /// Exactly one leg saved.
    Partial,
    /// Both legs saved but at least one went sold-out (and is not held).
    BothSaved,
    /// Both legs saved, neither sold-out-and-not-held.
    Confirmable,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoundTripError {
    #[error("This leg is sold out. Please pick another schedule")]
    LegSoldOut,
}

/// Holds the outbound and return leg selections for a round trip.
///
/// Legs are saved independently; a save against a schedule that is full and
/// not held is refused and clears the leg instead, so the planner never
/// stores a selection that was already unbookable when saved. A leg can
/// still turn sold-out after the fact (its snapshot is refreshed by the
/// caller), which is why confirmability re-checks both snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundTripPlanner {
    outbound: Option<SavedSelection>,
    return_leg: Option<SavedSelection>,
}

impl RoundTripPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a leg. Sold-out-and-not-held selections are rejected and the leg
    /// cleared; held legs are accepted even with zero seats showing.
    pub fn save_leg(
        &mut self,
        direction: Direction,
        selection: SavedSelection,
    ) -> Result<(), RoundTripError> {
        if selection.is_blocked() {
            *self.leg_mut(direction) = None;
            return Err(RoundTripError::LegSoldOut);
        }
        *self.leg_mut(direction) = Some(selection);
        Ok(())
    }

    pub fn clear_leg(&mut self, direction: Direction) {
        *self.leg_mut(direction) = None;
    }

    /// Reset both legs: round-trip mode was switched off, or the shared city
    /// changed and neither saved leg is valid for it anymore.
    pub fn reset(&mut self) {
        self.outbound = None;
        self.return_leg = None;
    }

    pub fn leg(&self, direction: Direction) -> Option<&SavedSelection> {
        match direction {
            Direction::FromCampus => self.outbound.as_ref(),
            Direction::ToCampus => self.return_leg.as_ref(),
        }
    }

    fn leg_mut(&mut self, direction: Direction) -> &mut Option<SavedSelection> {
        match direction {
            Direction::FromCampus => &mut self.outbound,
            Direction::ToCampus => &mut self.return_leg,
        }
    }

    pub fn state(&self) -> RoundTripState {
        match (&self.outbound, &self.return_leg) {
            (None, None) => RoundTripState::Empty,
            (Some(_), None) | (None, Some(_)) => RoundTripState::Partial,
            (Some(out), Some(ret)) => {
                if out.is_blocked() || ret.is_blocked() {
                    RoundTripState::BothSaved
                } else {
                    RoundTripState::Confirmable
                }
            }
        }
    }

    pub fn is_confirmable(&self) -> bool {
        self.state() == RoundTripState::Confirmable
    }

    /// Both legs, outbound first, once confirmable.
    pub fn confirmed_legs(&self) -> Option<[&SavedSelection; 2]> {
        if !self.is_confirmable() {
            return None;
        }
        Some([self.outbound.as_ref()?, self.return_leg.as_ref()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuttle_catalog::{BusType, ScheduleStatus};

    fn selection(schedule_id: u32, full: bool, held: bool) -> SavedSelection {
        SavedSelection {
            city_id: "islamabad".to_string(),
            time_slot_id: "ts1".to_string(),
            stop_id: "isl_f6".to_string(),
            ticket_count: 1,
            schedule_id,
            is_full: full,
            tickets_left: if full { 0 } else { 4 },
            status: if full { ScheduleStatus::Full } else { ScheduleStatus::Available },
            bus_type: BusType::Employee,
            is_held: held,
        }
    }

    #[test]
    fn walks_empty_partial_confirmable() {
        let mut planner = RoundTripPlanner::new();
        assert_eq!(planner.state(), RoundTripState::Empty);

        planner.save_leg(Direction::FromCampus, selection(1, false, false)).unwrap();
        assert_eq!(planner.state(), RoundTripState::Partial);

        planner.save_leg(Direction::ToCampus, selection(101, false, false)).unwrap();
        assert_eq!(planner.state(), RoundTripState::Confirmable);
        assert!(planner.is_confirmable());
    }

    #[test]
    fn saving_sold_out_leg_clears_it() {
        let mut planner = RoundTripPlanner::new();
        planner.save_leg(Direction::FromCampus, selection(1, false, false)).unwrap();

        let err = planner
            .save_leg(Direction::FromCampus, selection(2, true, false))
            .unwrap_err();
        assert_eq!(err, RoundTripError::LegSoldOut);
        assert!(planner.leg(Direction::FromCampus).is_none());
        assert_eq!(planner.state(), RoundTripState::Empty);
    }

    #[test]
    fn held_leg_is_saved_even_with_no_seats() {
        let mut planner = RoundTripPlanner::new();
        planner.save_leg(Direction::FromCampus, selection(1, true, true)).unwrap();
        planner.save_leg(Direction::ToCampus, selection(101, false, false)).unwrap();
        assert!(planner.is_confirmable());
    }

    #[test]
    fn stale_sold_out_leg_blocks_confirmation() {
        // A leg saved while available can go sold-out before confirm; the
        // refreshed snapshot lands via save_leg's rejection path or, when the
        // caller re-stores it directly, via the state predicate.
        let mut planner = RoundTripPlanner::new();
        planner.save_leg(Direction::FromCampus, selection(1, false, false)).unwrap();
        planner.save_leg(Direction::ToCampus, selection(101, false, false)).unwrap();

        planner.return_leg = Some(selection(101, true, false));
        assert_eq!(planner.state(), RoundTripState::BothSaved);
        assert!(!planner.is_confirmable());
        assert!(planner.confirmed_legs().is_none());
    }

    #[test]
    fn reset_drops_both_legs() {
        let mut planner = RoundTripPlanner::new();
        planner.save_leg(Direction::FromCampus, selection(1, false, false)).unwrap();
        planner.save_leg(Direction::ToCampus, selection(101, false, false)).unwrap();

        planner.reset();
        assert_eq!(planner.state(), RoundTripState::Empty);
    }
}
