//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! `.env` 파일은 `main.rs`에서 `PROFILE`에 따라 선택되어 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`server_config`] - 서버 바인딩, 실행 환경, 비밀번호 해싱, Rate Limiting
//! - [`auth_config`] - 세션 쿠키, Google OAuth, 사용자 역할
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수 (프로덕션)
//!
//! ```bash
//! export SESSION_SECRET="at-least-a-long-random-string"
//!
//! # Google OAuth (사용 시)
//! export GOOGLE_CONSUMER_KEY="your-client-id"
//! export GOOGLE_CONSUMER_SECRET="your-client-secret"
//! export GOOGLE_CALLBACK_URL="https://yourdomain.com/auth/google/callback"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export HOST="127.0.0.1"            # 기본값 127.0.0.1
//! export PORT="3000"                 # 기본값 3000
//! export WORKERS="4"
//! export ENVIRONMENT="production"    # development, test, staging, production
//! export BCRYPT_COST="12"            # 4-15 범위
//! export SESSION_TTL_DAYS="7"
//! export SESSION_COOKIE_SECURE="true"
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```
//!
//! 데이터 저장소 설정(`MONGODB_URI`, `DATABASE_NAME`, `REDIS_URL`)은
//! 각각 [`crate::db`], [`crate::caching`] 모듈이 직접 읽습니다.

pub mod server_config;
pub mod auth_config;

pub use server_config::*;
pub use auth_config::*;
