//! 사용자 관리 서비스 모듈
//!
//! 로컬 회원가입, 비밀번호 로그인, 관리자용 사용자 조회를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let user = user_service.authenticate("jane@example.com", "correct-horse").await?;
//! ```

pub mod user_service;

pub use user_service::*;
