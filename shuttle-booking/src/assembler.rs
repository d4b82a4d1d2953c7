use crate::eligibility::{max_family_tickets, EmployeeTicketInfo};
use crate::passenger::PassengerData;
use crate::policy::FamilyPolicy;
use crate::selection::SavedSelection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the external booking API receives once every check passes. Ticket
/// counts here are final totals: family tickets plus the employee's own seat
/// on legs where they travel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub selections: Vec<SavedSelection>,
    pub passengers: Vec<Vec<PassengerData>>,
    pub is_employee_traveling: Vec<bool>,
    pub created_at: DateTime<Utc>,
}

impl SubmissionPayload {
    pub fn total_tickets(&self) -> u32 {
        self.selections.iter().map(|s| s.ticket_count).sum()
    }
}

/// User-facing booking failures. All are recoverable: the caller surfaces the
/// message inline and the user corrects and retries. Nothing is submitted
/// until assembly succeeds.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("You have already booked a ticket for this route")]
    RouteAlreadyBooked,

    #[error("Family ticket slots are not available. Please try again later")]
    FamilyUnavailable,

    #[error("Passenger {passenger} on trip {leg} needs a name and a relation")]
    IncompletePassenger { leg: usize, passenger: usize },

    #[error("Passenger {passenger} on trip {leg}: CNIC must be in the format 12345-1234567-1")]
    InvalidCnic { leg: usize, passenger: usize },

    #[error("Ticket count for trip {leg} exceeds the allowed limit")]
    TicketLimitExceeded { leg: usize },

    #[error("Booking draft is inconsistent: {0}")]
    MalformedDraft(String),
}

/// Validate a finished draft and produce the submission payload.
///
/// Policy flags are rechecked here, not trusted from when the confirmation
/// opened: the `EmployeeTicketInfo` snapshot can go stale while forms are
/// filled in, and so can the seat counts, which is why each leg's ceiling is
/// recomputed from its availability snapshot at this point.
pub fn assemble(
    selections: &[SavedSelection],
    ticket_counts: &[u32],
    passengers: &[Vec<PassengerData>],
    employee_traveling: &[bool],
    info: &EmployeeTicketInfo,
    policy: &FamilyPolicy,
) -> Result<SubmissionPayload, BookingError> {
    let legs = selections.len();
    if ticket_counts.len() != legs || passengers.len() != legs || employee_traveling.len() != legs {
        return Err(BookingError::MalformedDraft(format!(
            "{} selections but {} counts, {} passenger lists, {} travel flags",
            legs,
            ticket_counts.len(),
            passengers.len(),
            employee_traveling.len()
        )));
    }
    for (leg, leg_passengers) in passengers.iter().enumerate() {
        if leg_passengers.len() != ticket_counts[leg] as usize {
            return Err(BookingError::MalformedDraft(format!(
                "trip {} has {} tickets but {} passenger forms",
                leg,
                ticket_counts[leg],
                leg_passengers.len()
            )));
        }
    }

    if info.route_already_booked {
        return Err(BookingError::RouteAlreadyBooked);
    }

    // Family tickets requested means any count above the self-only allowance.
    if !info.can_book_family {
        let family_requested = ticket_counts
            .iter()
            .zip(employee_traveling)
            .any(|(&count, &traveling)| count > if traveling { 1 } else { 0 });
        if family_requested {
            return Err(BookingError::FamilyUnavailable);
        }
    }

    for (leg, leg_passengers) in passengers.iter().enumerate() {
        for (idx, passenger) in leg_passengers.iter().enumerate() {
            if !passenger.is_complete() {
                return Err(BookingError::IncompletePassenger { leg, passenger: idx });
            }
            if !passenger.has_valid_cnic() {
                return Err(BookingError::InvalidCnic { leg, passenger: idx });
            }
        }
    }

    for (leg, selection) in selections.iter().enumerate() {
        let ceiling = max_family_tickets(
            selection.tickets_left,
            employee_traveling[leg],
            info.family_slots_remaining,
            policy,
        );
        if ticket_counts[leg] > ceiling {
            return Err(BookingError::TicketLimitExceeded { leg });
        }
    }

    let selections = selections
        .iter()
        .enumerate()
        .map(|(leg, selection)| {
            let mut adjusted = selection.clone();
            adjusted.ticket_count =
                ticket_counts[leg] + if employee_traveling[leg] { 1 } else { 0 };
            adjusted
        })
        .collect();

    Ok(SubmissionPayload {
        selections,
        passengers: passengers.to_vec(),
        is_employee_traveling: employee_traveling.to_vec(),
        created_at: Utc::now(),
    })
}
