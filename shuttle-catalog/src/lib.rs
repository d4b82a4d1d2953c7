pub mod catalog;
pub mod models;

pub use catalog::ScheduleCatalog;
pub use models::{BusType, City, Direction, Schedule, ScheduleStatus, Stop, TimeSlot};
