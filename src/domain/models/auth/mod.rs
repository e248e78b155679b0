pub mod session_user;
pub mod authentication_request;

pub use session_user::{OptionalUser, SessionUser};
pub use authentication_request::{AuthMode, RequiredRole};
