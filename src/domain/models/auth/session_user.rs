//! 세션에 저장되는 로그인 사용자
//!
//! 로그인 시 사용자 정보 전체를 세션에 직렬화하고, 이후 요청에서는
//! DB 조회 없이 세션에서 그대로 복원합니다.
//!
//! ## 사용 방법
//!
//! ```rust,ignore
//! // 역할 미들웨어로 보호되는 핸들러
//! async fn dashboard(user: SessionUser) -> AppResult<HttpResponse> { ... }
//!
//! // 로그인 여부와 관계없는 핸들러
//! async fn home(user: OptionalUser) -> AppResult<HttpResponse> { ... }
//! ```

use std::future::{ready, Ready};
use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::Role;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;

/// 세션 키
pub const SESSION_USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    /// 저장된(`_id`가 있는) 사용자로부터 생성합니다.
    pub fn from_user(user: &User) -> AppResult<Self> {
        let id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?;

        Ok(Self {
            id,
            email: user.email.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
        })
    }

    pub fn load(session: &Session) -> AppResult<Option<Self>> {
        Ok(session.get::<SessionUser>(SESSION_USER_KEY)?)
    }

    pub fn store(&self, session: &Session) -> AppResult<()> {
        session.insert(SESSION_USER_KEY, self)?;
        Ok(())
    }

    pub fn clear(session: &Session) {
        session.remove(SESSION_USER_KEY);
    }

    /// 요청 확장에 미들웨어가 넣어둔 값, 없으면 세션에서 읽습니다.
    fn resolve(req: &HttpRequest) -> Option<Self> {
        if let Some(user) = req.extensions().get::<SessionUser>() {
            return Some(user.clone());
        }

        match SessionUser::load(&req.get_session()) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("⚠️ 세션 사용자 복원 실패: {}", e);
                None
            }
        }
    }
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            SessionUser::resolve(req)
                .ok_or_else(|| AppError::AuthenticationError("You must be signed in first!".to_string())),
        )
    }
}

/// 로그인하지 않은 요청도 허용하는 추출기
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<SessionUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(OptionalUser(SessionUser::resolve(req))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_from_user_requires_stored_user() {
        let mut user = User::new_google(
            "patient@example.com".to_string(),
            "1098765".to_string(),
            "Pat Doe".to_string(),
        );
        assert!(matches!(SessionUser::from_user(&user), Err(AppError::InternalError(_))));

        let id = ObjectId::new();
        user.id = Some(id);
        let session_user = SessionUser::from_user(&user).unwrap();

        assert_eq!(session_user.id, id.to_hex());
        assert_eq!(session_user.username, "patient@example.com");
        assert_eq!(session_user.role, Role::Client);
    }

    #[test]
    fn test_session_user_serializes_whole_principal() {
        let user = SessionUser {
            id: "65f0c0ffee0000000000abcd".to_string(),
            email: "house@example.com".to_string(),
            username: "house".to_string(),
            name: "Gregory House".to_string(),
            role: Role::Doctor,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "doctor");
        assert_eq!(serde_json::from_value::<SessionUser>(json).unwrap(), user);
    }
}
