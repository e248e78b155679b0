//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! - [`session`] - 서명/암호화된 쿠키 세션 (`docappoint.sid`, 7일)
//! - [`method_override`] - `POST ?_method=PUT|PATCH|DELETE` 메서드 변환
//! - [`auth_middleware`] - 세션 로그인 + 역할 검사
//!
//! # 등록 순서
//!
//! `wrap`은 나중에 등록한 미들웨어가 바깥쪽에서 먼저 실행됩니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(MethodOverride)          // 라우팅 전에 메서드 변환
//!     .wrap(session_middleware())    // 세션 로드/저장
//!     .service(
//!         web::scope("/client")
//!             .wrap(AuthMiddleware::required_with_role(Role::Client))
//!             .route("", web::get().to(dashboard))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod method_override;
pub mod session;

pub use auth_inner::{RETURN_TO_SESSION_KEY, SIGN_IN_REQUIRED_MESSAGE};
pub use auth_middleware::AuthMiddleware;
pub use method_override::MethodOverride;
pub use session::session_middleware;
