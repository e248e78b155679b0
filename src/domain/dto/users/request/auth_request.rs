//! 로그인 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::{deserialize_optional_string, deserialize_trimmed};

/// `POST /login` 폼
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "Please enter your password."))]
    pub password: String,
}

/// `GET /auth/google/callback` 쿼리
///
/// 사용자가 동의를 거부하면 Google은 `code` 없이 `error=access_denied`를 보냅니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub state: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}
