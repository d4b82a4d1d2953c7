use crate::assembler::SubmissionPayload;
use crate::policy::GatewayConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Backend acknowledgement of a submitted booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub reference: Uuid,
    pub ticket_count: u32,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Booking was rejected: {0}")]
    Rejected(String),

    #[error("A submission is already in progress for this booking")]
    InFlight,
}

/// The single asynchronous call that hands a finished payload to the booking
/// backend. One call per pending booking; concurrency control sits in
/// [`GuardedSubmitter`], not in implementations.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<BookingConfirmation, SubmitError>;
}

/// Stand-in for the real HTTP gateway: sleeps for the configured delay and
/// confirms. No retry or cancellation semantics; the eventual network-backed
/// implementation defines its own.
pub struct MockBookingGateway {
    delay: Duration,
}

impl MockBookingGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(Duration::from_millis(config.submit_delay_ms))
    }
}

impl Default for MockBookingGateway {
    fn default() -> Self {
        Self::from_config(&GatewayConfig::default())
    }
}

#[async_trait]
impl BookingGateway for MockBookingGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<BookingConfirmation, SubmitError> {
        tokio::time::sleep(self.delay).await;

        let confirmation = BookingConfirmation {
            reference: Uuid::new_v4(),
            ticket_count: payload.total_tickets(),
            confirmed_at: Utc::now(),
        };
        tracing::info!(
            reference = %confirmation.reference,
            tickets = confirmation.ticket_count,
            legs = payload.selections.len(),
            "booking confirmed"
        );
        Ok(confirmation)
    }
}

/// Wraps a gateway with a resubmission guard: while one submit is
/// outstanding, further submits for the same pending booking are refused
/// instead of queued (the confirm action is disabled, not buffered).
pub struct GuardedSubmitter<G> {
    gateway: G,
    in_flight: AtomicBool,
}

impl<G: BookingGateway> GuardedSubmitter<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<BookingConfirmation, SubmitError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(SubmitError::InFlight);
        }
        let result = self.gateway.submit(payload).await;
        self.in_flight.store(false, Ordering::Release);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::EmployeeTicketInfo;
    use crate::passenger::{PassengerData, Relation};
    use crate::policy::FamilyPolicy;
    use crate::selection::SavedSelection;
    use shuttle_catalog::{BusType, ScheduleStatus};
    use shuttle_shared::Masked;

    fn payload() -> SubmissionPayload {
        let selection = SavedSelection {
            city_id: "islamabad".to_string(),
            time_slot_id: "ts1".to_string(),
            stop_id: "isl_f6".to_string(),
            ticket_count: 1,
            schedule_id: 1,
            is_full: false,
            tickets_left: 8,
            status: ScheduleStatus::Available,
            bus_type: BusType::Employee,
            is_held: false,
        };
        let passenger = PassengerData {
            name: "Ayesha".to_string(),
            cnic: Masked(String::new()),
            relation: Some(Relation::Child),
        };
        crate::assembler::assemble(
            &[selection],
            &[1],
            &[vec![passenger]],
            &[false],
            &EmployeeTicketInfo::unrestricted(),
            &FamilyPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn default_delay_comes_from_gateway_config() {
        let config = GatewayConfig { submit_delay_ms: 5 };
        assert_eq!(
            MockBookingGateway::from_config(&config).delay,
            Duration::from_millis(5)
        );
        assert_eq!(
            MockBookingGateway::default().delay,
            Duration::from_millis(GatewayConfig::default().submit_delay_ms)
        );
    }

    #[tokio::test]
    async fn mock_gateway_confirms_with_ticket_total() {
        let gateway = MockBookingGateway::new(Duration::from_millis(1));
        let confirmation = gateway.submit(&payload()).await.unwrap();
        assert_eq!(confirmation.ticket_count, 1);
    }

    #[tokio::test]
    async fn guard_refuses_concurrent_submission() {
        let submitter =
            GuardedSubmitter::new(MockBookingGateway::new(Duration::from_millis(50)));
        let payload = payload();

        let first = submitter.submit(&payload);
        let second = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            submitter.submit(&payload).await
        };

        let (first, second) = tokio::join!(first, second);
        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), SubmitError::InFlight);
    }

    #[tokio::test]
    async fn guard_clears_after_completion() {
        let submitter = GuardedSubmitter::new(MockBookingGateway::new(Duration::from_millis(1)));
        let payload = payload();

        submitter.submit(&payload).await.unwrap();
        assert!(!submitter.is_in_flight());
        assert!(submitter.submit(&payload).await.is_ok());
    }
}
