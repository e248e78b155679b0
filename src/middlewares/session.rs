//! 쿠키 세션 미들웨어
//!
//! 세션 전체를 서명 + 암호화된 `docappoint.sid` 쿠키에 담습니다.
//! httpOnly, SameSite=Lax, 만료 기간은 [`SessionConfig::ttl_days`] (기본 7일)입니다.

use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use crate::config::SessionConfig;

/// 환경 변수 설정으로 세션 미들웨어를 만듭니다.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    build_session_middleware(SessionConfig::key(), SessionConfig::cookie_secure(), SessionConfig::ttl_days())
}

pub fn build_session_middleware(key: Key, secure: bool, ttl_days: i64) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SessionConfig::COOKIE_NAME.to_string())
        .cookie_http_only(true)
        .cookie_secure(secure)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::days(ttl_days)))
        .build()
}
