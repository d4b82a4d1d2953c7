use crate::assembler::{assemble, BookingError, SubmissionPayload};
use crate::eligibility::{max_family_tickets, EmployeeTicketInfo};
use crate::passenger::PassengerData;
use crate::policy::FamilyPolicy;
use crate::selection::SavedSelection;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("No trip at position {0} in this booking")]
    NoSuchLeg(usize),

    #[error("You already booked your own ticket for today")]
    AlreadyBookedToday,
}

/// The confirmation form for an employee booking: one or two legs, each with
/// a family-ticket count, a passenger entry per ticket, and an "I am
/// traveling" flag.
///
/// The passenger list for a leg always has exactly as many entries as its
/// ticket count. Growing the count appends blank entries; shrinking it
/// discards the trailing ones outright (they are not cached for a later
/// flip back).
#[derive(Debug, Clone)]
pub struct ConfirmationDraft {
    selections: Vec<SavedSelection>,
    ticket_counts: Vec<u32>,
    passengers: Vec<Vec<PassengerData>>,
    employee_traveling: Vec<bool>,
    info: EmployeeTicketInfo,
    policy: FamilyPolicy,
}

impl ConfirmationDraft {
    /// Seed the draft from the saved selections: counts carry over, every
    /// ticket starts with a blank passenger form, the employee starts as not
    /// traveling on any leg.
    pub fn new(
        selections: Vec<SavedSelection>,
        info: EmployeeTicketInfo,
        policy: FamilyPolicy,
    ) -> Self {
        let ticket_counts: Vec<u32> = selections.iter().map(|s| s.ticket_count).collect();
        let passengers = ticket_counts
            .iter()
            .map(|&count| (0..count).map(|_| PassengerData::blank()).collect())
            .collect();
        let employee_traveling = vec![false; selections.len()];

        Self {
            selections,
            ticket_counts,
            passengers,
            employee_traveling,
            info,
            policy,
        }
    }

    pub fn legs(&self) -> usize {
        self.selections.len()
    }

    pub fn selection(&self, leg: usize) -> Option<&SavedSelection> {
        self.selections.get(leg)
    }

    pub fn ticket_count(&self, leg: usize) -> Option<u32> {
        self.ticket_counts.get(leg).copied()
    }

    pub fn is_employee_traveling(&self, leg: usize) -> bool {
        self.employee_traveling.get(leg).copied().unwrap_or(false)
    }

    pub fn passengers(&self, leg: usize) -> Option<&[PassengerData]> {
        self.passengers.get(leg).map(|p| p.as_slice())
    }

    pub fn passenger_mut(&mut self, leg: usize, index: usize) -> Option<&mut PassengerData> {
        self.passengers.get_mut(leg)?.get_mut(index)
    }

    /// Family-ticket ceiling for a leg under the current traveling flag.
    pub fn max_tickets(&self, leg: usize) -> Result<u32, DraftError> {
        let selection = self.selections.get(leg).ok_or(DraftError::NoSuchLeg(leg))?;
        Ok(max_family_tickets(
            selection.tickets_left,
            self.is_employee_traveling(leg),
            self.info.family_slots_remaining,
            &self.policy,
        ))
    }

    /// Change a leg's family-ticket count, clamped to the ceiling, and size
    /// its passenger list to match.
    pub fn set_ticket_count(&mut self, leg: usize, count: u32) -> Result<(), DraftError> {
        let max = self.max_tickets(leg)?;
        let count = count.clamp(1, max);
        self.ticket_counts[leg] = count;
        self.resize_passengers(leg, count);
        Ok(())
    }

    /// Toggle whether the employee takes a seat on this leg. Refused while
    /// today's self ticket already exists. Turning the flag on can lower the
    /// ceiling, in which case the count is clamped down and the surplus
    /// passenger entries dropped.
    pub fn set_employee_traveling(&mut self, leg: usize, traveling: bool) -> Result<(), DraftError> {
        if leg >= self.legs() {
            return Err(DraftError::NoSuchLeg(leg));
        }
        if self.info.employee_ticket_exists_today {
            return Err(DraftError::AlreadyBookedToday);
        }
        self.employee_traveling[leg] = traveling;

        let max = self.max_tickets(leg)?;
        if self.ticket_counts[leg] > max {
            self.ticket_counts[leg] = max;
            self.resize_passengers(leg, max);
        }
        Ok(())
    }

    fn resize_passengers(&mut self, leg: usize, count: u32) {
        let forms = &mut self.passengers[leg];
        let count = count as usize;
        if count > forms.len() {
            forms.resize_with(count, PassengerData::blank);
        } else {
            forms.truncate(count);
        }
    }

    pub fn total_family_tickets(&self) -> u32 {
        self.ticket_counts.iter().sum()
    }

    pub fn total_employee_tickets(&self) -> u32 {
        self.employee_traveling.iter().filter(|&&t| t).count() as u32
    }

    pub fn total_tickets(&self) -> u32 {
        self.total_family_tickets() + self.total_employee_tickets()
    }

    /// Run the confirm-time checks and produce the submission payload.
    pub fn confirm(&self) -> Result<SubmissionPayload, BookingError> {
        assemble(
            &self.selections,
            &self.ticket_counts,
            &self.passengers,
            &self.employee_traveling,
            &self.info,
            &self.policy,
        )
    }
}
