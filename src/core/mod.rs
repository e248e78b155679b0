//! # Core Framework Module
//!
//! 애플리케이션 전역에서 사용하는 핵심 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 싱글톤 인스턴스 저장소
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **의존성 해결**: `Arc<T>` 필드 자동 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: 모든 에러를 `error.html` 뷰로 렌더링
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! // 1. 인프라 컴포넌트 등록
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//!
//! // 2. #[repository] / #[service] 컴포넌트 생성
//! ServiceLocator::initialize_all().await?;
//! ```
//!
//! ## 자주 발생하는 문제
//!
//! **증상**: `등록되지 않은 컴포넌트` 패닉
//!
//! **해결**: `#[service(name = "...")]`의 이름이 구조체 이름에서 `Service`를 뺀 소문자와
//! 일치하는지 확인하거나, `ServiceLocator::set()`으로 수동 등록합니다.

pub mod registry;
pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
