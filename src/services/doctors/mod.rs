//! 의사 프로필 서비스 모듈

pub mod doctor_service;

pub use doctor_service::*;
