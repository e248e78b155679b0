pub mod request;
pub mod response;

pub use request::{AppointmentForm, NewAppointmentQuery, StatusForm};
pub use response::AppointmentResponse;
