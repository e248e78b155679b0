//! 서버 실행 환경 설정
//!
//! 실행 환경 구분, 서버 바인딩 주소, bcrypt 비용, Rate Limiting 값을 제공합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수에서 현재 환경을 읽습니다.
    ///
    /// 값이 없거나 알 수 없는 값이면 가장 보수적인 `Production`으로 간주합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// bcrypt 해싱 비용 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        Self::resolve_cost(env::var("BCRYPT_COST").ok().as_deref(), &Environment::current())
    }

    pub fn resolve_cost(raw: Option<&str>, environment: &Environment) -> u32 {
        raw.and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(environment))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_WORKERS: usize = 4;

    pub fn port() -> u16 {
        parse_or(env::var("PORT").ok().as_deref(), Self::DEFAULT_PORT)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string())
    }

    pub fn workers() -> usize {
        parse_or(env::var("WORKERS").ok().as_deref(), Self::DEFAULT_WORKERS).max(1)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 요청 속도 제한 설정 (`actix-governor`)
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 100,
            burst_size: 200,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("RATE_LIMIT_PER_SECOND").ok().as_deref(),
            env::var("RATE_LIMIT_BURST_SIZE").ok().as_deref(),
        )
    }

    pub fn from_values(per_second: Option<&str>, burst_size: Option<&str>) -> Self {
        let defaults = Self::default();

        let config = Self {
            per_second: parse_or(per_second, defaults.per_second).max(1),
            burst_size: parse_or(burst_size, defaults.burst_size).max(1),
        };

        log::debug!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}

/// 값이 없으면 기본값, 파싱에 실패하면 경고 후 기본값
fn parse_or<T>(raw: Option<&str>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("설정값 '{}' 파싱 실패. 기본값 {} 사용", value, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_falls_back() {
        assert_eq!(PasswordConfig::resolve_cost(Some("8"), &Environment::Production), 8);
        assert_eq!(PasswordConfig::resolve_cost(Some("3"), &Environment::Production), 12);
        assert_eq!(PasswordConfig::resolve_cost(Some("31"), &Environment::Staging), 10);
        assert_eq!(PasswordConfig::resolve_cost(Some("abc"), &Environment::Test), 4);
        assert_eq!(PasswordConfig::resolve_cost(None, &Environment::Development), 4);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 3000);
        }
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }
        if env::var("WORKERS").is_err() {
            assert_eq!(ServerConfig::workers(), 4);
        }
    }

    #[test]
    fn test_rate_limit_values() {
        assert_eq!(RateLimitConfig::from_values(None, None), RateLimitConfig::default());

        let config = RateLimitConfig::from_values(Some("20"), Some("not-a-number"));
        assert_eq!(config.per_second, 20);
        assert_eq!(config.burst_size, 200);

        let config = RateLimitConfig::from_values(Some("0"), Some("0"));
        assert_eq!(config.per_second, 1);
        assert_eq!(config.burst_size, 1);
    }
}
