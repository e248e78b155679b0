//! # Application Error Handling System
//!
//! 서버 렌더링 애플리케이션을 위한 통합 에러 처리 시스템입니다.
//! 모든 핸들러, 미들웨어, 추출기(extractor) 오류는 [`AppError`]로 모이고,
//! 하나의 렌더러가 `error.html` 뷰를 상태 코드와 함께 응답합니다.
//!
//! ## 렌더링 규칙
//!
//! 1. 상태 코드는 에러 변형에서 결정되며, 분류되지 않은 에러는 500입니다.
//! 2. 메시지가 비어 있으면 `Oh No, Something Went Wrong!`으로 대체합니다.
//! 3. 5xx 에러는 내부 정보를 노출하지 않고 기본 메시지를 보여주며,
//!    상세 내용은 `log::error!`로 기록합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 폼 검증 실패, 잘못된 쿼리/경로 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, OAuth state 불일치 |
//! | `AuthorizationError` | 403 Forbidden | 다른 역할의 페이지 접근, 소유권 없음 |
//! | `NotFound` | 404 Not Found | 없는 라우트, 없는 예약/의사 |
//! | `ConflictError` | 409 Conflict | 중복 이메일, 이미 예약된 시간 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | Google API 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! async fn show_doctor(path: web::Path<String>) -> AppResult<HttpResponse> {
//!     let doctor = DoctorService::instance()
//!         .get_doctor(&path)
//!         .await?; // NotFound → 404 에러 페이지
//!     // ...
//! }
//! ```

use actix_session::{SessionGetError, SessionInsertError};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;
use validator::ValidationErrors;
use crate::views;

/// 에러 메시지가 비어 있을 때, 그리고 5xx 에러에서 사용자에게 보여주는 메시지
pub const DEFAULT_ERROR_MESSAGE: &str = "Oh No, Something Went Wrong!";

/// 매칭되는 라우트가 없을 때의 메시지
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page Not Found";

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error`를 구현하고 `actix_web::ResponseError`를 구현하여
/// 핸들러에서 `?`로 전파하면 곧바로 에러 페이지가 됩니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// client.post(token_uri).send().await
///     .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연산 실패 (연결, 쿼리, 인덱스)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 연결 또는 명령 실패
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러
    ///
    /// 폼 POST 핸들러에서는 플래시 메시지 + 이전 페이지 리다이렉트로 바뀌고,
    /// 그 외 경로(잘못된 쿼리 문자열 등)에서는 400 에러 페이지가 됩니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복 데이터 또는 상태 제약 위반
    ///
    /// # 발생 시나리오
    /// - 이미 가입된 이메일/사용자명
    /// - 같은 의사의 같은 날짜/시간에 활성 예약이 이미 존재
    /// - 종료된 예약의 상태 변경 시도
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패
    ///
    /// 잘못된 이메일/비밀번호, OAuth state 불일치 등.
    /// 어떤 조건에서 실패했는지는 메시지에 드러내지 않습니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Google OAuth 등 외부 API 호출 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 예상하지 못한 시스템 오류
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 매칭되지 않은 라우트용 404 에러
    pub fn page_not_found() -> Self {
        AppError::NotFound(PAGE_NOT_FOUND_MESSAGE.to_string())
    }

    /// 변형 접두사 없이 담긴 메시지만 반환합니다.
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::RedisError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::ExternalServiceError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }

    /// 사용자에게 보여줄 메시지
    ///
    /// 5xx 에러와 빈 메시지는 기본 메시지로 대체됩니다.
    pub fn display_message(&self) -> &str {
        let message = self.message().trim();

        if message.is_empty() || self.is_server_error() {
            DEFAULT_ERROR_MESSAGE
        } else {
            message
        }
    }

    fn is_server_error(&self) -> bool {
        actix_web::ResponseError::status_code(self).is_server_error()
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `error.html` 뷰를 에러의 상태 코드로 렌더링합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {} {}", status.as_u16(), self);
        } else {
            log::debug!("⚠️ {} {}", status.as_u16(), self);
        }

        views::render_error(status, self.display_message())
    }
}

/// 검증 실패 메시지들을 필드 이름 순서로 이어 붙입니다.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();

        AppError::ValidationError(messages.join(" "))
    }
}

impl From<SessionInsertError> for AppError {
    fn from(error: SessionInsertError) -> Self {
        AppError::InternalError(format!("Session write failed: {}", error))
    }
}

impl From<SessionGetError> for AppError {
    fn from(error: SessionGetError) -> Self {
        AppError::InternalError(format!("Session read failed: {}", error))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let hash = bcrypt::hash(password, cost).context("Failed to hash password")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;
    use validator::Validate;

    #[derive(Validate)]
    struct SignupProbe {
        #[validate(email(message = "Please enter a valid email address."))]
        email: String,
        #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
        password: String,
    }

    async fn body_of(error: AppError) -> String {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap_or_default();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::AuthenticationError("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::AuthorizationError("x".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("x".into()), StatusCode::CONFLICT),
            (AppError::DatabaseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::ExternalServiceError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected);
        }
    }

    #[test]
    fn test_empty_message_uses_default() {
        let error = AppError::NotFound("   ".to_string());
        assert_eq!(error.display_message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_server_error_hides_details() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        assert_eq!(error.display_message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_client_error_keeps_message() {
        let error = AppError::ConflictError("That time slot is already booked.".to_string());
        assert_eq!(error.display_message(), "That time slot is already booked.");
    }

    #[actix_web::test]
    async fn test_page_not_found_renders_message() {
        let body = body_of(AppError::page_not_found()).await;
        assert!(body.contains(PAGE_NOT_FOUND_MESSAGE));
    }

    #[actix_web::test]
    async fn test_internal_error_renders_default_message() {
        let body = body_of(AppError::InternalError(String::new())).await;
        assert!(body.contains(DEFAULT_ERROR_MESSAGE));
    }

    #[test]
    fn test_validation_errors_conversion() {
        let probe = SignupProbe {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let error: AppError = probe.validate().unwrap_err().into();
        match error {
            AppError::ValidationError(msg) => {
                assert_eq!(
                    msg,
                    "Please enter a valid email address. Password must be at least 8 characters."
                );
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("underlying error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("underlying error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
