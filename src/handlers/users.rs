//! 홈, 회원가입, 로그인, 로그아웃
//!
//! 로그인에 성공하면 세션 ID를 새로 발급(`renew`)한 뒤 사용자 정보를 세션에 저장합니다.

use actix_session::Session;
use actix_web::{get, post, web, HttpResponse};
use tera::Context;
use validator::Validate;
use crate::config::{GoogleOAuthConfig, Role};
use crate::core::errors::AppResult;
use crate::domain::dto::users::{LoginForm, RegisterForm};
use crate::domain::entities::users::User;
use crate::domain::models::auth::{OptionalUser, SessionUser};
use crate::handlers::redirect_on_user_error;
use crate::middlewares::RETURN_TO_SESSION_KEY;
use crate::services::users::UserService;
use crate::views::{self, flash};

#[get("/")]
pub async fn home(session: Session) -> AppResult<HttpResponse> {
    views::render(&session, "home.html", Context::new())
}

#[get("/register")]
pub async fn register_form(session: Session, user: OptionalUser) -> AppResult<HttpResponse> {
    if let OptionalUser(Some(user)) = user {
        return Ok(views::redirect(user.role.home_path()));
    }

    views::render(&session, "users/register.html", auth_page_context())
}

#[post("/register")]
pub async fn register(session: Session, form: web::Form<RegisterForm>) -> AppResult<HttpResponse> {
    let user = match UserService::instance().register(form.into_inner()).await {
        Ok(user) => user,
        Err(e) => return redirect_on_user_error(&session, e, "/register"),
    };

    sign_in(&session, &user)?;
    flash::success(&session, "Welcome to DocAppoint!");

    Ok(views::redirect(user.role.home_path()))
}

#[get("/login")]
pub async fn login_form(session: Session, user: OptionalUser) -> AppResult<HttpResponse> {
    if let OptionalUser(Some(user)) = user {
        return Ok(views::redirect(user.role.home_path()));
    }

    views::render(&session, "users/login.html", auth_page_context())
}

#[post("/login")]
pub async fn login(session: Session, form: web::Form<LoginForm>) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let result = match form.validate() {
        Ok(()) => UserService::instance().authenticate(&form.email, &form.password).await,
        Err(e) => Err(e.into()),
    };

    let user = match result {
        Ok(user) => user,
        Err(e) => return redirect_on_user_error(&session, e, "/login"),
    };

    let return_to = take_return_to(&session);
    sign_in(&session, &user)?;
    flash::success(&session, format!("Welcome back, {}!", user.name));

    Ok(views::redirect(&landing_path(return_to, user.role)))
}

#[get("/logout")]
pub async fn logout(session: Session) -> AppResult<HttpResponse> {
    if let Ok(Some(user)) = SessionUser::load(&session) {
        log::info!("👋 로그아웃: {}", user.email);
    }

    SessionUser::clear(&session);
    session.renew();
    flash::success(&session, "Goodbye!");

    Ok(views::redirect("/"))
}

/// 세션 고정 공격을 막기 위해 세션 키를 새로 발급한 뒤 저장합니다.
pub(crate) fn sign_in(session: &Session, user: &User) -> AppResult<()> {
    session.renew();
    SessionUser::from_user(user)?.store(session)
}

pub(crate) fn take_return_to(session: &Session) -> Option<String> {
    session
        .remove_as::<String>(RETURN_TO_SESSION_KEY)
        .and_then(Result::ok)
}

fn auth_page_context() -> Context {
    let mut context = Context::new();
    context.insert("google_enabled", &GoogleOAuthConfig::client_id().is_ok());
    context
}

/// 로그인 후 이동할 경로
///
/// 저장된 복귀 경로가 자기 역할의 영역 안에 있을 때만 따르고,
/// 그 외에는 역할별 홈으로 보냅니다.
pub(crate) fn landing_path(return_to: Option<String>, role: Role) -> String {
    let home_path = role.home_path();

    match return_to {
        Some(path) if path == home_path || path.starts_with(&format!("{}/", home_path)) || path.starts_with(&format!("{}?", home_path)) => path,
        _ => home_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use crate::config::SessionConfig;
    use crate::middlewares::session::build_session_middleware;

    #[::core::prelude::v1::test]
    fn test_landing_path_follows_return_to_within_role_area() {
        assert_eq!(landing_path(Some("/client/doctors".to_string()), Role::Client), "/client/doctors");
        assert_eq!(
            landing_path(Some("/client/appointments/new?doctor_id=1".to_string()), Role::Client),
            "/client/appointments/new?doctor_id=1"
        );
        assert_eq!(landing_path(Some("/admin".to_string()), Role::Admin), "/admin");
    }

    #[::core::prelude::v1::test]
    fn test_landing_path_ignores_foreign_or_external_paths() {
        assert_eq!(landing_path(Some("/admin/users".to_string()), Role::Client), "/client");
        assert_eq!(landing_path(Some("/clientele".to_string()), Role::Client), "/client");
        assert_eq!(landing_path(Some("https://evil.example".to_string()), Role::Doctor), "/doctor");
        assert_eq!(landing_path(None, Role::Doctor), "/doctor");
    }

    #[actix_web::test]
    async fn test_home_renders() {
        let app = test::init_service(
            App::new()
                .wrap(build_session_middleware(SessionConfig::key_from_secret("test-secret"), false, 7))
                .service(home),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("DocAppoint"));
    }

    fn session_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<actix_web::cookie::Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == SessionConfig::COOKIE_NAME)
            .map(|c| c.into_owned())
    }

    #[actix_web::test]
    async fn test_flash_message_lives_for_one_rendered_page() {
        async fn notify(session: Session) -> HttpResponse {
            flash::info(&session, "Your appointment request was sent.");
            views::redirect("/")
        }

        let app = test::init_service(
            App::new()
                .wrap(build_session_middleware(SessionConfig::key_from_secret("test-secret"), false, 7))
                .route("/notify", web::post().to(notify))
                .service(home),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/notify").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&resp).unwrap();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").cookie(cookie).to_request()).await;
        let cookie = session_cookie(&resp).unwrap();
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Your appointment request was sent."));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").cookie(cookie).to_request()).await;
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(!html.contains("Your appointment request was sent."));
    }

    #[actix_web::test]
    async fn test_login_page_renders_for_anonymous_user() {
        let app = test::init_service(
            App::new()
                .wrap(build_session_middleware(SessionConfig::key_from_secret("test-secret"), false, 7))
                .service(login_form),
        )
        .await;

        let req = test::TestRequest::get().uri("/login").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("action=\"/login\""));
    }
}
