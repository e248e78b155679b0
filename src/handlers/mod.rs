//! HTTP 핸들러 모듈
//!
//! 라우트 그룹별로 나뉘어 있으며, 모든 핸들러는 HTML 페이지를 렌더링하거나
//! 플래시 메시지와 함께 303 리다이렉트합니다.
//!
//! - [`users`] - 홈, 회원가입, 로그인, 로그아웃
//! - [`auth`] - Google OAuth
//! - [`client`] - 환자 대시보드, 의사 목록, 예약
//! - [`admin`] - 관리자 대시보드, 사용자/의사/예약 관리
//! - [`doctor`] - 의사 대시보드, 예약 처리

pub mod users;
pub mod auth;
pub mod client;
pub mod admin;
pub mod doctor;

use actix_session::Session;
use actix_web::error::{PathError, QueryPayloadError, UrlencodedError};
use actix_web::{web, HttpRequest, HttpResponse};
use crate::core::errors::{AppError, AppResult};
use crate::views::{self, flash};

/// 매칭되는 라우트가 없을 때 (`default_service`)
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    log::debug!("🔍 404: {} {}", req.method(), req.path());
    Err(AppError::page_not_found())
}

/// 폼 제출 실패 처리
///
/// 사용자가 고칠 수 있는 에러(검증, 중복, 로그인 실패)는 플래시 에러와 함께
/// 폼 페이지로 되돌리고, 나머지는 에러 페이지로 보냅니다.
pub fn redirect_on_user_error(session: &Session, error: AppError, back_to: &str) -> AppResult<HttpResponse> {
    match error {
        AppError::ValidationError(_) | AppError::ConflictError(_) | AppError::AuthenticationError(_) => {
            flash::error(session, error.display_message());
            Ok(views::redirect(back_to))
        }
        other => Err(other),
    }
}

/// 폼 / 쿼리 / 경로 추출 실패를 400 에러 페이지로 바꿉니다.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("폼 파싱 실패 ({}): {}", req.path(), err);
    AppError::ValidationError("Please fill out the form correctly.".to_string()).into()
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("쿼리 파싱 실패 ({}): {}", req.path(), err);
    AppError::ValidationError("The request contained invalid parameters.".to_string()).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("경로 파싱 실패 ({}): {}", req.path(), err);
    AppError::page_not_found().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use crate::core::errors::PAGE_NOT_FOUND_MESSAGE;

    #[actix_web::test]
    async fn test_unknown_route_renders_page_not_found() {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;

        let req = test::TestRequest::get().uri("/no/such/page").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(PAGE_NOT_FOUND_MESSAGE));
    }

    #[actix_web::test]
    async fn test_bad_form_renders_400() {
        #[derive(serde::Deserialize)]
        struct NumberForm {
            #[allow(dead_code)]
            fee: u32,
        }

        async fn submit(_form: web::Form<NumberForm>) -> HttpResponse {
            HttpResponse::Ok().finish()
        }

        let app = test::init_service(
            App::new()
                .configure(configure_extractors)
                .route("/fees", web::post().to(submit)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/fees")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload("fee=free")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Please fill out the form correctly."));
    }
}
