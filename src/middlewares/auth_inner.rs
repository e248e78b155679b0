use std::rc::Rc;
use actix_session::{Session, SessionExt};
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::AppError;
use crate::domain::models::auth::{AuthMode, RequiredRole, SessionUser};
use crate::views::{self, flash};

/// 로그인 후 돌아갈 경로를 저장하는 세션 키
pub const RETURN_TO_SESSION_KEY: &str = "return_to";

pub const SIGN_IN_REQUIRED_MESSAGE: &str = "You must be signed in first!";

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let session = req.get_session();
            let user = load_user(&session);
            let mut signed_in = None;

            match (&mode, user) {
                (AuthMode::Required, None) => {
                    log::debug!("🔒 로그인 필요: {} {}", req.method(), req.path());

                    if req.method() == Method::GET {
                        remember_return_to(&session, &req);
                    }
                    flash::error(&session, SIGN_IN_REQUIRED_MESSAGE);

                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, views::redirect("/login")).map_into_right_body());
                }
                (AuthMode::Required, Some(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(user.role) {
                            log::warn!(
                                "🚫 권한 부족: {} [{}] → {} (필요: {:?})",
                                user.email, user.role, req.path(), required
                            );
                            let response = forbidden(&user);
                            let (req, _) = req.into_parts();
                            return Ok(ServiceResponse::new(req, response).map_into_right_body());
                        }
                    }

                    log::debug!("인증 성공: {} [{}]", user.email, user.role);
                    signed_in = Some(user.clone());
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Some(user)) => {
                    let allowed = required_role
                        .as_ref()
                        .map(|required| required.is_satisfied(user.role))
                        .unwrap_or(true);
                    if allowed {
                        signed_in = Some(user.clone());
                        req.extensions_mut().insert(user);
                    }
                }
                (AuthMode::Optional, None) => {}
            }

            let res = service.call(req).await?;

            // 핸들러 에러 페이지를 로그인 사용자의 메뉴로 다시 그립니다.
            if let Some(user) = signed_in {
                let page = res
                    .response()
                    .error()
                    .and_then(|e| e.as_error::<AppError>())
                    .map(|e| views::render_error_for(res.status(), e.display_message(), Some(&user)));

                if let Some(page) = page {
                    return Ok(res.into_response(page).map_into_right_body());
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}

fn load_user(session: &Session) -> Option<SessionUser> {
    SessionUser::load(session).unwrap_or_else(|e| {
        log::warn!("⚠️ 세션 사용자 복원 실패: {}", e);
        None
    })
}

fn remember_return_to(session: &Session, req: &ServiceRequest) {
    let path = req.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    if let Err(e) = session.insert(RETURN_TO_SESSION_KEY, path) {
        log::warn!("⚠️ 복귀 경로 저장 실패: {}", e);
    }
}

fn forbidden(user: &SessionUser) -> HttpResponse {
    let error = AppError::AuthorizationError("You do not have permission to view that page.".to_string());
    views::render_error_for(error.status_code(), error.display_message(), Some(user))
}
