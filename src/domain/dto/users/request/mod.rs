pub mod register_form;
pub mod auth_request;

pub use register_form::RegisterForm;
pub use auth_request::{LoginForm, OAuthCallbackQuery};
