pub mod appointment_repo;

pub use appointment_repo::{AppointmentRepository, SLOT_TAKEN_MESSAGE};
