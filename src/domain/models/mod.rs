//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 값 객체를 정의합니다.
//!
//! - [`auth`] - 세션 사용자, 인증 미들웨어 설정
//! - [`oauth`] - Google OAuth 응답
//! - [`flash`] - 플래시 메시지

pub mod auth;
pub mod oauth;
pub mod flash;

pub use auth::{AuthMode, OptionalUser, RequiredRole, SessionUser};
pub use oauth::{GoogleTokenResponse, GoogleUserInfo};
pub use flash::{FlashBag, FlashLevel};
