pub mod assembler;
pub mod draft;
pub mod eligibility;
pub mod gateway;
pub mod passenger;
pub mod policy;
pub mod round_trip;
pub mod selection;


pub use assembler::{assemble, BookingError, SubmissionPayload};
pub use draft::{ConfirmationDraft, DraftError};
pub use eligibility::{max_family_tickets, EmployeeTicketInfo};
pub use gateway::{
    BookingConfirmation, BookingGateway, GuardedSubmitter, MockBookingGateway, SubmitError,
};
pub use passenger::{format_cnic, is_valid_cnic, PassengerData, Relation};
pub use policy::{BookingConfig, FamilyPolicy, GatewayConfig};
pub use round_trip::{RoundTripError, RoundTripPlanner, RoundTripState};
pub use selection::{LegSelection, SavedSelection, SelectionError};
