//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 폼 문자열 정리, 날짜/시간 파싱
//! - [`display_terminal`] - 기동 과정 터미널 출력

pub mod string_utils;
pub mod display_terminal;
