//! 요청 폼 / 화면 응답 DTO

pub mod users;
pub mod doctors;
pub mod appointments;
pub mod dashboard;

pub use users::{LoginForm, OAuthCallbackQuery, RegisterForm, UserResponse};
pub use doctors::{DoctorForm, DoctorResponse};
pub use appointments::{AppointmentForm, AppointmentResponse, NewAppointmentQuery, StatusForm};
pub use dashboard::DashboardStats;
