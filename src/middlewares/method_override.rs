//! `_method` 쿼리 파라미터로 HTTP 메서드를 바꾸는 미들웨어
//!
//! HTML 폼은 GET/POST만 보낼 수 있으므로 `POST /admin/doctors/{id}?_method=DELETE`
//! 형태의 요청을 라우팅 전에 `DELETE`로 바꿔 줍니다.
//! POST 요청의 `PUT`, `PATCH`, `DELETE`만 허용합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

const METHOD_PARAM: &str = "_method";

pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService {
            service: Rc::new(service),
        }))
    }
}

pub struct MethodOverrideService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_method(req.query_string()) {
                log::debug!("🔀 메서드 오버라이드: POST → {} {}", method, req.path());
                req.head_mut().method = method;
            }
        }

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}

/// 쿼리 문자열에서 허용된 대체 메서드를 찾습니다.
fn override_method(query: &str) -> Option<Method> {
    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == METHOD_PARAM)
        .map(|(_, value)| value.to_ascii_uppercase())?;

    match value.as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
