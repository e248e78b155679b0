//! # Google OAuth 2.0 로그인 서비스
//!
//! Authorization Code 흐름으로 Google 계정을 로컬 사용자와 연결합니다.
//!
//! ```text
//! GET /auth/google            → state 생성 후 세션 저장 → Google 인증 페이지로 303
//! GET /auth/google/callback   → state 검증 → code ↔ access_token 교환
//!                             → userinfo 조회 → 이메일로 기존 사용자 연결 또는 신규 생성
//! ```
//!
//! Google이 확인한(`email_verified`) 이메일이 같은 기존 계정이 있으면 `google_id`를 붙여
//! 같은 계정으로 로그인합니다.
//! 새로 만드는 계정은 `username`이 이메일과 같고 역할은 `client`입니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    config::GoogleOAuthConfig,
    core::errors::{AppError, AppResult},
    domain::{
        entities::users::user::User,
        models::oauth::{GoogleTokenResponse, GoogleUserInfo},
    },
    repositories::users::user_repo::UserRepository,
    utils::string_utils::normalize_email,
};

#[service(name = "googleauth")]
pub struct GoogleAuthService {
    user_repo: Arc<UserRepository>,

    http: reqwest::Client,
}

impl GoogleAuthService {
    /// CSRF 방지용 일회성 state 값
    pub fn new_state() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    /// 세션에 저장했던 state와 콜백으로 돌아온 state를 비교합니다.
    pub fn verify_state(expected: Option<&str>, received: Option<&str>) -> AppResult<()> {
        match (expected, received) {
            (Some(expected), Some(received)) if !expected.is_empty() && expected == received => Ok(()),
            _ => {
                log::warn!("🔒 OAuth state 불일치");
                Err(AppError::AuthenticationError(
                    "Google sign-in could not be verified. Please try again.".to_string(),
                ))
            }
        }
    }

    /// Google 인증 페이지 URL
    pub fn authorization_url(&self, state: &str) -> AppResult<String> {
        Ok(build_authorization_url(
            &GoogleOAuthConfig::auth_uri(),
            &GoogleOAuthConfig::client_id()?,
            &GoogleOAuthConfig::callback_url()?,
            state,
        ))
    }

    /// 콜백의 authorization code로 로컬 사용자를 찾거나 만듭니다.
    pub async fn authenticate_with_code(&self, code: &str) -> AppResult<User> {
        let token = self.exchange_code_for_token(code).await?;
        let profile = self.fetch_user_info(&token.access_token).await?;

        self.link_or_create(profile).await
    }

    async fn exchange_code_for_token(&self, code: &str) -> AppResult<GoogleTokenResponse> {
        let client_id = GoogleOAuthConfig::client_id()?;
        let client_secret = GoogleOAuthConfig::client_secret()?;
        let callback_url = GoogleOAuthConfig::callback_url()?;

        let params = [
            ("code", code),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("redirect_uri", callback_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http
            .post(GoogleOAuthConfig::token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패 ({}): {}", status, body
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn fetch_user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self.http
            .get(GoogleOAuthConfig::userinfo_uri())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패 ({}): {}", status, body
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }

    /// 이메일로 기존 사용자를 찾아 `google_id`를 연결하거나, 없으면 새로 만듭니다.
    pub async fn link_or_create(&self, profile: GoogleUserInfo) -> AppResult<User> {
        let email = verified_email(&profile)?;

        let by_email = self.user_repo.find_by_email(&email).await?;
        let by_google_id = if by_email.is_some() {
            None
        } else {
            self.user_repo.find_by_google_id(&profile.sub).await?
        };

        match plan_google_login(&profile, email, by_email, by_google_id) {
            GoogleLogin::SignIn(user) => {
                log::info!("🔑 Google 로그인: {}", user.email);
                Ok(user)
            }
            GoogleLogin::Link(mut user) => {
                let id = user
                    .id_string()
                    .ok_or_else(|| AppError::InternalError("Stored user has no ObjectId".to_string()))?;

                log::info!("🔗 기존 계정에 Google 연동: {}", user.email);
                match self.user_repo.save_google_id(&id, &profile.sub).await? {
                    Some(updated) => Ok(updated),
                    None => {
                        user.link_google(profile.sub);
                        Ok(user)
                    }
                }
            }
            GoogleLogin::Create(user) => {
                log::info!("🆕 Google 계정으로 신규 사용자 생성: {}", user.email);
                self.user_repo.create(user).await
            }
        }
    }
}

/// 콜백 처리 결과로 할 일
#[derive(Debug)]
pub enum GoogleLogin {
    /// 이미 연동된 계정
    SignIn(User),
    /// 같은 이메일의 기존 계정에 `google_id`를 붙임
    Link(User),
    /// 새 `client` 계정
    Create(User),
}

/// Google이 확인한 이메일만 계정 연결에 사용합니다.
fn verified_email(profile: &GoogleUserInfo) -> AppResult<String> {
    let email = profile
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::AuthenticationError(
            "Your Google account did not share an email address.".to_string(),
        ))?;

    if profile.email_verified != Some(true) {
        log::warn!("🔒 확인되지 않은 Google 이메일: {}", email);
        return Err(AppError::AuthenticationError(
            "Your Google email address is not verified.".to_string(),
        ));
    }

    Ok(email)
}

/// 이메일로 찾은 계정이 우선이고, 없으면 `google_id`로 찾은 계정(Google 쪽 이메일 변경)을 씁니다.
fn plan_google_login(
    profile: &GoogleUserInfo,
    email: String,
    by_email: Option<User>,
    by_google_id: Option<User>,
) -> GoogleLogin {
    if let Some(user) = by_email {
        return if user.google_id.as_deref() == Some(profile.sub.as_str()) {
            GoogleLogin::SignIn(user)
        } else {
            GoogleLogin::Link(user)
        };
    }

    if let Some(user) = by_google_id {
        return GoogleLogin::SignIn(user);
    }

    GoogleLogin::Create(User::new_google(email, profile.sub.clone(), profile.display_name()))
}

/// 쿼리 파라미터를 퍼센트 인코딩하여 인증 URL을 조립합니다.
pub fn build_authorization_url(auth_uri: &str, client_id: &str, redirect_uri: &str, state: &str) -> String {
    let params = [
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("scope", GoogleOAuthConfig::SCOPE),
        ("response_type", "code"),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", auth_uri, query_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Role;
    use mongodb::bson::oid::ObjectId;

    fn profile(sub: &str, email: Option<&str>, verified: Option<bool>) -> GoogleUserInfo {
        GoogleUserInfo {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            email_verified: verified,
            name: Some("Pat Doe".to_string()),
            picture: None,
        }
    }

    fn stored_user(email: &str, google_id: Option<&str>, role: Role) -> User {
        let mut user = User::new_local(
            email.to_string(),
            "pat".to_string(),
            "Pat".to_string(),
            "$2b$04$hash".to_string(),
            role,
        );
        user.id = Some(ObjectId::new());
        user.google_id = google_id.map(str::to_string);
        user
    }

    #[test]
    fn test_verified_email_is_normalized() {
        let email = verified_email(&profile("1100", Some("  Pat@Example.COM "), Some(true))).unwrap();
        assert_eq!(email, "pat@example.com");
    }

    #[test]
    fn test_unverified_or_missing_email_is_rejected() {
        for info in [
            profile("1100", Some("admin@example.com"), Some(false)),
            profile("1100", Some("admin@example.com"), None),
            profile("1100", None, Some(true)),
            profile("1100", Some("   "), Some(true)),
        ] {
            assert!(
                matches!(verified_email(&info), Err(AppError::AuthenticationError(_))),
                "{:?}",
                info
            );
        }
    }

    #[test]
    fn test_existing_email_without_google_id_is_linked() {
        let info = profile("1100", Some("pat@example.com"), Some(true));
        let existing = stored_user("pat@example.com", None, Role::Admin);
        let existing_id = existing.id;

        match plan_google_login(&info, "pat@example.com".to_string(), Some(existing), None) {
            GoogleLogin::Link(user) => {
                assert_eq!(user.id, existing_id);
                assert_eq!(user.role, Role::Admin);
            }
            other => panic!("Expected Link, got {:?}", other),
        }
    }

    #[test]
    fn test_existing_email_with_other_google_id_is_relinked() {
        let info = profile("2200", Some("pat@example.com"), Some(true));
        let existing = stored_user("pat@example.com", Some("1100"), Role::Client);

        assert!(matches!(
            plan_google_login(&info, "pat@example.com".to_string(), Some(existing), None),
            GoogleLogin::Link(_)
        ));
    }

    #[test]
    fn test_linked_accounts_sign_in() {
        let info = profile("1100", Some("pat@example.com"), Some(true));

        let by_email = stored_user("pat@example.com", Some("1100"), Role::Client);
        assert!(matches!(
            plan_google_login(&info, "pat@example.com".to_string(), Some(by_email), None),
            GoogleLogin::SignIn(_)
        ));

        let by_google_id = stored_user("old@example.com", Some("1100"), Role::Client);
        match plan_google_login(&info, "pat@example.com".to_string(), None, Some(by_google_id)) {
            GoogleLogin::SignIn(user) => assert_eq!(user.email, "old@example.com"),
            other => panic!("Expected SignIn, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_account_is_created_as_client() {
        let info = profile("1100", Some("pat@example.com"), Some(true));

        match plan_google_login(&info, "pat@example.com".to_string(), None, None) {
            GoogleLogin::Create(user) => {
                assert!(user.id.is_none());
                assert_eq!(user.email, "pat@example.com");
                assert_eq!(user.username, "pat@example.com");
                assert_eq!(user.name, "Pat Doe");
                assert_eq!(user.google_id.as_deref(), Some("1100"));
                assert_eq!(user.role, Role::Client);
            }
            other => panic!("Expected Create, got {:?}", other),
        }
    }

    #[test]
    fn test_build_authorization_url() {
        let url = build_authorization_url(
            "https://accounts.google.com/o/oauth2/v2/auth",
            "client-123",
            "http://localhost:3000/auth/google/callback",
            "abc",
        );

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?client_id=client-123&"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgoogle%2Fcallback"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("response_type=code"));
        assert!(url.ends_with("state=abc"));
    }

    #[test]
    fn test_state_is_random_and_verified() {
        let state = GoogleAuthService::new_state();
        assert_eq!(state.len(), 32);
        assert_ne!(state, GoogleAuthService::new_state());

        assert!(GoogleAuthService::verify_state(Some(&state), Some(&state)).is_ok());
        assert!(GoogleAuthService::verify_state(Some(&state), Some("forged")).is_err());
        assert!(GoogleAuthService::verify_state(None, Some(&state)).is_err());
        assert!(GoogleAuthService::verify_state(Some(&state), None).is_err());
        assert!(GoogleAuthService::verify_state(Some(""), Some("")).is_err());
    }
}
