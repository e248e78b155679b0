//! Google OAuth 응답 모델

use serde::Deserialize;

/// 토큰 엔드포인트 응답
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// userinfo 엔드포인트 응답
///
/// v3 엔드포인트는 `sub`, v2 엔드포인트는 `id`로 계정 ID를 보냅니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    #[serde(alias = "id")]
    pub sub: String,
    pub email: Option<String>,
    #[serde(default, alias = "verified_email")]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// 표시 이름이 없으면 이메일의 로컬 파트를 사용합니다.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .as_deref()
                .and_then(|email| email.split('@').next())
                .unwrap_or("Google User")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v3_userinfo() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{"sub": "1100223344", "email": "pat@example.com", "email_verified": true, "name": "Pat Doe"}"#,
        )
        .unwrap();

        assert_eq!(info.sub, "1100223344");
        assert_eq!(info.display_name(), "Pat Doe");
    }

    #[test]
    fn test_parse_v2_userinfo_and_name_fallback() {
        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"id": "42", "email": "sam@example.com", "verified_email": true}"#).unwrap();

        assert_eq!(info.sub, "42");
        assert_eq!(info.email_verified, Some(true));
        assert_eq!(info.display_name(), "sam");
    }
}
