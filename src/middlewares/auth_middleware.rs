//! # 세션 인증 미들웨어
//!
//! 라우트 그룹(`/client`, `/admin`, `/doctor`)을 역할별로 보호합니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 로그인하지 않음 | 플래시 에러 + `/login`으로 303 (GET이면 돌아올 경로 저장) |
//! | 다른 역할로 로그인 | 403 에러 페이지 |
//! | 통과 | 요청 확장에 [`SessionUser`] 저장 후 핸들러 실행 |
//!
//! ```rust,ignore
//! web::scope("/admin")
//!     .wrap(AuthMiddleware::required_with_role(Role::Admin))
//!     .route("", web::get().to(dashboard))
//! ```
//!
//! [`SessionUser`]: crate::domain::models::auth::SessionUser

use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::config::Role;
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 로그인 정보가 있으면 요청 확장에 넣고, 없어도 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::SessionExt;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App, HttpRequest, HttpResponse};
    use crate::config::SessionConfig;
    use crate::core::errors::AppError;
    use crate::domain::models::auth::SessionUser;
    use crate::middlewares::session::build_session_middleware;

    fn session_user(role: Role) -> SessionUser {
        SessionUser {
            id: "65f0c0ffee0000000000abcd".to_string(),
            email: "jane@example.com".to_string(),
            username: "jane".to_string(),
            name: "Jane Doe".to_string(),
            role,
        }
    }

    /// 경로의 역할로 로그인 세션을 만듭니다.
    async fn sign_in(req: HttpRequest, role: web::Path<String>) -> HttpResponse {
        let role = Role::from_str(&role).unwrap();
        session_user(role).store(&req.get_session()).unwrap();
        HttpResponse::Ok().finish()
    }

    async fn whoami(user: SessionUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    async fn missing() -> Result<HttpResponse, AppError> {
        Err(AppError::NotFound("Appointment not found.".to_string()))
    }

    fn session_cookie<B>(resp: &ServiceResponse<B>) -> actix_web::cookie::Cookie<'static> {
        resp.response()
            .cookies()
            .find(|c| c.name() == SessionConfig::COOKIE_NAME)
            .unwrap()
            .into_owned()
    }

    macro_rules! guarded_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(build_session_middleware(SessionConfig::key_from_secret("test-secret"), false, 7))
                    .route("/sign-in/{role}", web::get().to(sign_in))
                    .service(
                        web::scope("/admin")
                            .wrap(AuthMiddleware::required_with_role(Role::Admin))
                            .route("", web::get().to(whoami)),
                    )
                    .service(
                        web::scope("/pages")
                            .wrap(AuthMiddleware::optional())
                            .route("/missing", web::get().to(missing)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_anonymous_user_is_redirected_to_login() {
        let app = guarded_app!();

        let req = test::TestRequest::get().uri("/admin").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
        assert!(resp.response().cookies().any(|c| c.name() == SessionConfig::COOKIE_NAME));
    }

    #[actix_web::test]
    async fn test_other_role_is_forbidden() {
        let app = guarded_app!();

        let req = test::TestRequest::get().uri("/sign-in/client").to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SessionConfig::COOKIE_NAME)
            .unwrap()
            .into_owned();

        let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_matching_role_passes_with_user_in_extensions() {
        let app = guarded_app!();

        let req = test::TestRequest::get().uri("/sign-in/admin").to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SessionConfig::COOKIE_NAME)
            .unwrap()
            .into_owned();

        let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, "jane");
    }

    #[actix_web::test]
    async fn test_error_pages_keep_signed_in_nav() {
        let app = guarded_app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/sign-in/client").to_request()).await;
        let cookie = session_cookie(&resp);

        let req = test::TestRequest::get().uri("/pages/missing").cookie(cookie.clone()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Appointment not found."));
        assert!(html.contains("Signed in as Jane Doe"));

        let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Signed in as Jane Doe"));
    }

    #[actix_web::test]
    async fn test_error_pages_for_anonymous_users_show_login_link() {
        let app = guarded_app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/pages/missing").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("href=\"/login\""));
        assert!(!html.contains("Signed in as"));
    }
}
