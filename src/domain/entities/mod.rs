pub mod users;
pub mod doctors;
pub mod appointments;

pub use users::User;
pub use doctors::Doctor;
pub use appointments::{Appointment, AppointmentStatus};
