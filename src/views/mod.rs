//! # 서버 렌더링 뷰
//!
//! Tera 템플릿은 바이너리에 포함(`include_str!`)되어 배포 시 경로에 의존하지 않습니다.
//! 모든 페이지는 [`render`]를 거치며 `current_user`, `success`, `error`, `info`
//! 값을 공통으로 받습니다.
//!
//! ```text
//! handler ──▶ views::render(session, "client/dashboard.html", ctx)
//!                 ├─ current_user ← 세션
//!                 ├─ success/error/info ← flash::take (읽으면 비워짐)
//!                 └─ Tera::render
//! ```

pub mod flash;

use actix_session::Session;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use once_cell::sync::OnceCell;
use tera::{Context, Tera};
use crate::core::errors::{AppError, AppResult, DEFAULT_ERROR_MESSAGE};
use crate::domain::models::auth::SessionUser;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

static TEMPLATES: OnceCell<Tera> = OnceCell::new();

const TEMPLATE_SOURCES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("users/register.html", include_str!("../../templates/users/register.html")),
    ("users/login.html", include_str!("../../templates/users/login.html")),
    ("client/dashboard.html", include_str!("../../templates/client/dashboard.html")),
    ("client/doctors.html", include_str!("../../templates/client/doctors.html")),
    ("client/new_appointment.html", include_str!("../../templates/client/new_appointment.html")),
    ("admin/dashboard.html", include_str!("../../templates/admin/dashboard.html")),
    ("admin/users.html", include_str!("../../templates/admin/users.html")),
    ("admin/doctors.html", include_str!("../../templates/admin/doctors.html")),
    ("admin/doctor_form.html", include_str!("../../templates/admin/doctor_form.html")),
    ("admin/appointments.html", include_str!("../../templates/admin/appointments.html")),
    ("doctor/dashboard.html", include_str!("../../templates/doctor/dashboard.html")),
];

fn build_engine() -> AppResult<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_templates(TEMPLATE_SOURCES.iter().copied())
        .map_err(|e| AppError::InternalError(format!("템플릿 로드 실패: {:?}", e)))?;

    Ok(tera)
}

fn engine() -> AppResult<&'static Tera> {
    TEMPLATES.get_or_try_init(build_engine)
}

/// 서버 시작 시 템플릿을 미리 컴파일하여 문법 오류를 바로 드러냅니다.
pub fn init() -> AppResult<()> {
    let tera = engine()?;
    log::info!("🖼️ 템플릿 {}개 로드 완료", tera.get_template_names().count());
    Ok(())
}

/// 공통 값을 채워 200 페이지를 렌더링합니다.
pub fn render(session: &Session, template: &str, mut context: Context) -> AppResult<HttpResponse> {
    let current_user = SessionUser::load(session).unwrap_or_else(|e| {
        log::warn!("⚠️ 세션 사용자 읽기 실패: {}", e);
        None
    });
    let messages = flash::take(session);

    context.insert("current_user", &current_user);
    context.insert("success", &messages.success);
    context.insert("error", &messages.error);
    context.insert("info", &messages.info);

    let html = render_template(template, &context)?;

    Ok(HttpResponse::Ok()
        .content_type(HTML_CONTENT_TYPE)
        .body(html))
}

fn render_template(template: &str, context: &Context) -> AppResult<String> {
    engine()?
        .render(template, context)
        .map_err(|e| AppError::InternalError(format!("템플릿 렌더링 실패 ({}): {:?}", template, e)))
}

/// `error.html`을 주어진 상태 코드로 렌더링합니다.
///
/// 요청 정보가 없는 곳(`ResponseError`)에서 쓰이므로 로그아웃 상태의 메뉴가 그려집니다.
/// 로그인한 사용자의 에러 응답은 인증 미들웨어가 [`render_error_for`]로 다시 그립니다.
pub fn render_error(status: StatusCode, message: &str) -> HttpResponse {
    render_error_for(status, message, None)
}

/// 템플릿 렌더링 자체가 실패하면 일반 텍스트로 응답합니다.
pub fn render_error_for(status: StatusCode, message: &str, current_user: Option<&SessionUser>) -> HttpResponse {
    let message = if message.trim().is_empty() { DEFAULT_ERROR_MESSAGE } else { message };

    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("message", message);
    context.insert("current_user", &current_user);
    context.insert("success", &Vec::<String>::new());
    context.insert("error", &Vec::<String>::new());
    context.insert("info", &Vec::<String>::new());

    match render_template("error.html", &context) {
        Ok(html) => HttpResponse::build(status)
            .content_type(HTML_CONTENT_TYPE)
            .body(html),
        Err(e) => {
            log::error!("❌ 에러 페이지 렌더링 실패: {}", e);
            HttpResponse::build(status)
                .content_type("text/plain; charset=utf-8")
                .body(format!("{} {}", status.as_u16(), message))
        }
    }
}

/// POST/PUT/DELETE 처리 후 GET 페이지로 보내는 303 응답
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_all_templates_compile() {
        let tera = build_engine().unwrap();
        assert_eq!(tera.get_template_names().count(), TEMPLATE_SOURCES.len());
    }

    #[actix_web::test]
    async fn test_render_error_escapes_message() {
        let response = render_error(StatusCode::BAD_REQUEST, "<script>alert(1)</script>");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[actix_web::test]
    async fn test_render_error_uses_default_message() {
        let response = render_error(StatusCode::INTERNAL_SERVER_ERROR, "   ");
        let body = to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains(DEFAULT_ERROR_MESSAGE));
        assert!(html.contains("500"));
    }

    #[actix_web::test]
    async fn test_render_error_for_signed_in_user_shows_their_nav() {
        let user = SessionUser {
            id: "65f0c0ffee0000000000abcd".to_string(),
            email: "jane@example.com".to_string(),
            username: "jane".to_string(),
            name: "Jane Doe".to_string(),
            role: crate::config::Role::Client,
        };

        let response = render_error_for(StatusCode::NOT_FOUND, "Page Not Found", Some(&user));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Signed in as Jane Doe"));
        assert!(html.contains("Page Not Found"));
    }

    #[test]
    fn test_redirect_is_see_other() {
        let response = redirect("/login");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
