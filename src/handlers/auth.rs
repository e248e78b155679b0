//! Google OAuth 로그인 핸들러
//!
//! `state` 값은 세션에 저장했다가 콜백에서 한 번만 꺼내 비교합니다.

use actix_session::Session;
use actix_web::{get, web, HttpResponse};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::OAuthCallbackQuery;
use crate::handlers::users::{landing_path, sign_in, take_return_to};
use crate::services::auth::GoogleAuthService;
use crate::views::{self, flash};

const OAUTH_STATE_SESSION_KEY: &str = "oauth_state";

#[get("/auth/google")]
pub async fn google_login(session: Session) -> AppResult<HttpResponse> {
    let state = GoogleAuthService::new_state();

    let login_url = match GoogleAuthService::instance().authorization_url(&state) {
        Ok(url) => url,
        Err(e) => {
            log::error!("❌ Google 로그인 설정 누락: {}", e);
            flash::error(&session, "Google sign-in is not available right now.");
            return Ok(views::redirect("/login"));
        }
    };

    session.insert(OAUTH_STATE_SESSION_KEY, &state)?;
    Ok(views::redirect(&login_url))
}

#[get("/auth/google/callback")]
pub async fn google_callback(session: Session, query: web::Query<OAuthCallbackQuery>) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let expected_state = session
        .remove_as::<String>(OAUTH_STATE_SESSION_KEY)
        .and_then(Result::ok);

    if let Some(error) = query.error {
        log::warn!("🔒 Google 로그인 거부/실패: {}", error);
        flash::error(&session, "Google sign-in was cancelled.");
        return Ok(views::redirect("/login"));
    }

    let result = match GoogleAuthService::verify_state(expected_state.as_deref(), query.state.as_deref()) {
        Ok(()) => match query.code {
            Some(code) => GoogleAuthService::instance().authenticate_with_code(&code).await,
            None => Err(AppError::AuthenticationError(
                "Google did not return an authorization code.".to_string(),
            )),
        },
        Err(e) => Err(e),
    };

    let user = match result {
        Ok(user) => user,
        Err(AppError::ExternalServiceError(e)) => {
            log::error!("❌ Google 로그인 실패: {}", e);
            flash::error(&session, "Google sign-in failed. Please try again.");
            return Ok(views::redirect("/login"));
        }
        Err(e @ (AppError::AuthenticationError(_) | AppError::ConflictError(_))) => {
            flash::error(&session, e.display_message());
            return Ok(views::redirect("/login"));
        }
        Err(e) => return Err(e),
    };

    let return_to = take_return_to(&session);
    sign_in(&session, &user)?;
    flash::success(&session, format!("Welcome, {}!", user.name));

    Ok(views::redirect(&landing_path(return_to, user.role)))
}
