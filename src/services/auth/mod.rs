//! 인증 서비스 모듈
//!
//! Google OAuth 2.0 로그인을 담당합니다. 로컬 비밀번호 로그인은
//! [`crate::services::users::UserService::authenticate`]가 처리합니다.
//!
//! # Security
//!
//! - CSRF 방지 (세션에 저장한 OAuth `state` 검증)
//! - 토큰 교환은 서버 간 통신으로만 수행
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::GoogleAuthService;
//!
//! let google_auth = GoogleAuthService::instance();
//! let state = GoogleAuthService::new_state();
//! let login_url = google_auth.authorization_url(&state)?;
//! ```

pub mod google_auth_service;

pub use google_auth_service::*;
