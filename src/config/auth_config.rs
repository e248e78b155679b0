//! 인증 관련 설정
//!
//! 세션 쿠키, Google OAuth 자격 증명, 사용자 역할을 정의합니다.

use std::env;
use std::fmt;
use actix_web::cookie::Key;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use crate::config::Environment;
use crate::core::errors::{AppError, AppResult};

/// 세션 쿠키 설정
///
/// 세션은 서명 + 암호화된 쿠키(`CookieSessionStore`)에 저장됩니다.
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 쿠키 이름
    pub const COOKIE_NAME: &'static str = "docappoint.sid";

    pub const DEFAULT_TTL_DAYS: i64 = 7;

    pub fn secret() -> String {
        env::var("SESSION_SECRET").unwrap_or_else(|_| {
            log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
            "docappoint-development-session-secret".to_string()
        })
    }

    /// 세션 만료 기간 (일)
    pub fn ttl_days() -> i64 {
        env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(Self::DEFAULT_TTL_DAYS)
    }

    /// `Secure` 속성 여부. 지정하지 않으면 프로덕션에서만 켭니다.
    pub fn cookie_secure() -> bool {
        match env::var("SESSION_COOKIE_SECURE") {
            Ok(value) => matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => Environment::current().is_production(),
        }
    }

    /// 쿠키 서명/암호화 키
    pub fn key() -> Key {
        Self::key_from_secret(&Self::secret())
    }

    /// `Key::from`은 64바이트 이상을 요구하므로 SHA-512 다이제스트로 늘립니다.
    pub fn key_from_secret(secret: &str) -> Key {
        let digest = Sha512::digest(secret.as_bytes());
        Key::from(digest.as_slice())
    }
}

/// Google OAuth 2.0 설정
///
/// 자격 증명이 없어도 서버는 기동되며, Google 로그인 시도 시점에 에러가 됩니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub const SCOPE: &'static str = "openid email profile";

    pub fn client_id() -> AppResult<String> {
        required("GOOGLE_CONSUMER_KEY")
    }

    pub fn client_secret() -> AppResult<String> {
        required("GOOGLE_CONSUMER_SECRET")
    }

    pub fn callback_url() -> AppResult<String> {
        required("GOOGLE_CALLBACK_URL")
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/userinfo".to_string())
    }
}

fn required(name: &str) -> AppResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            log::warn!("🔑 {} 환경 변수가 설정되지 않았습니다", name);
            Err(AppError::ExternalServiceError(format!("{} must be set", name)))
        }
    }
}

/// 사용자 역할
///
/// 각 역할은 자신의 라우트 그룹(`/client`, `/doctor`, `/admin`)에만 접근할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Client,
    Doctor,
    Admin,
}

impl Role {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unsupported role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    /// 로그인 직후 이동하는 역할별 대시보드 경로
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Client => "/client",
            Role::Doctor => "/doctor",
            Role::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from_str("client").unwrap(), Role::Client);
        assert_eq!(Role::from_str("Doctor").unwrap(), Role::Doctor);
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert!(Role::from_str("nurse").is_err());
    }

    #[test]
    fn test_role_roundtrip_and_home() {
        for role in [Role::Client, Role::Doctor, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
            assert_eq!(role.home_path(), format!("/{}", role));
        }
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(Role::default(), Role::Client);
    }

    #[test]
    fn test_session_key_is_stable_for_same_secret() {
        let a = SessionConfig::key_from_secret("short");
        let b = SessionConfig::key_from_secret("short");
        let c = SessionConfig::key_from_secret("another");

        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.master());
    }
}
