//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//!
//! | 서비스 | 역할 |
//! |--------|------|
//! | [`users::UserService`] | 회원가입, 비밀번호 로그인, 사용자 조회 |
//! | [`auth::GoogleAuthService`] | Google OAuth 로그인 및 계정 연동 |
//! | [`doctors::DoctorService`] | 의사 계정 + 프로필 관리 |
//! | [`appointments::AppointmentService`] | 예약 신청, 취소, 상태 변경 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{appointments::AppointmentService, doctors::DoctorService};
//!
//! let doctors = DoctorService::instance().list_available().await?;
//! let appointment = AppointmentService::instance().book(&user, form).await?;
//! ```

pub mod users;
pub mod auth;
pub mod doctors;
pub mod appointments;
