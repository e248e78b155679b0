pub mod request;
pub mod response;

pub use request::DoctorForm;
pub use response::DoctorResponse;
