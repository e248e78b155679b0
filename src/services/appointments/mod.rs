//! 진료 예약 서비스 모듈
//!
//! 예약 생성, 취소, 의사의 승인/거절/완료 처리를 제공합니다.

pub mod appointment_service;

pub use appointment_service::*;
