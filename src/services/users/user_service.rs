//! # 사용자 서비스
//!
//! 로컬 회원가입과 이메일/비밀번호 로그인, 관리자 화면용 사용자 조회를 담당합니다.
//!
//! ```text
//! RegisterForm ──validate──▶ normalize email ──▶ bcrypt hash ──▶ UserRepository::create
//! LoginForm    ──────────────▶ find_by_email ──▶ bcrypt verify ──▶ User
//! ```
//!
//! bcrypt는 CPU를 오래 점유하므로 `web::block`으로 블로킹 스레드풀에서 실행합니다.

use std::sync::Arc;
use actix_web::web;
use singleton_macro::service;
use validator::Validate;
use crate::{
    config::{PasswordConfig, Role},
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{
        dto::users::{request::RegisterForm, response::UserResponse},
        entities::users::user::User,
    },
    repositories::users::user_repo::UserRepository,
    utils::string_utils::normalize_email,
};

/// 로그인 실패 시 계정 존재 여부를 드러내지 않는 공통 메시지
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password.";

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 로컬 회원가입. 새 사용자의 역할은 항상 `client`입니다.
    pub async fn register(&self, form: RegisterForm) -> AppResult<User> {
        form.validate()?;

        let user = self
            .create_account(form.email, form.username, form.name, form.password, Role::Client)
            .await?;

        log::info!("👤 신규 회원가입: {} ({})", user.email, user.username);
        Ok(user)
    }

    /// 지정한 역할로 로컬 계정을 만듭니다. 의사 계정 생성에도 사용됩니다.
    pub async fn create_account(
        &self,
        email: String,
        username: String,
        name: String,
        password: String,
        role: Role,
    ) -> AppResult<User> {
        let password_hash = self.hash_password(password).await?;
        let user = User::new_local(normalize_email(&email), username, name, password_hash, role);

        self.user_repo.create(user).await
    }

    pub async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = PasswordConfig::bcrypt_cost();
        let started = std::time::Instant::now();

        let hashed = web::block(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 작업 실패: {}", e)))?
            .context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", started.elapsed());
        Ok(hashed)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 없는 이메일, 비밀번호가 없는 Google 전용 계정, 틀린 비밀번호는
    /// 모두 같은 401 메시지로 응답합니다.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            log::warn!("🔒 로그인 실패 (미등록 이메일): {}", email);
            return Err(Self::invalid_credentials());
        };

        let Some(password_hash) = user.password_hash.clone() else {
            log::warn!("🔒 로그인 실패 (Google 전용 계정): {}", email);
            return Err(Self::invalid_credentials());
        };

        let password = password.to_string();
        let is_valid = web::block(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 작업 실패: {}", e)))?
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            log::warn!("🔒 로그인 실패 (비밀번호 불일치): {}", email);
            return Err(Self::invalid_credentials());
        }

        log::info!("🔓 로그인: {} [{}]", user.email, user.role);
        Ok(user)
    }

    fn invalid_credentials() -> AppError {
        AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string())
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn count_users(&self) -> AppResult<u64> {
        self.user_repo.count().await
    }

    pub async fn count_by_role(&self, role: Role) -> AppResult<u64> {
        self.user_repo.count_by_role(role).await
    }

    pub async fn change_password(&self, id: &str, password: String) -> AppResult<()> {
        let password_hash = self.hash_password(password).await?;

        self.user_repo
            .update(id, mongodb::bson::doc! { "password_hash": password_hash })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        Ok(())
    }

    pub async fn update_name(&self, id: &str, name: &str) -> AppResult<()> {
        self.user_repo
            .update(id, mongodb::bson::doc! { "name": name })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        if !self.user_repo.delete(id).await? {
            return Err(AppError::NotFound("User not found.".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_is_unauthorized() {
        let err = UserService::invalid_credentials();
        assert!(matches!(err, AppError::AuthenticationError(ref msg) if msg == INVALID_CREDENTIALS_MESSAGE));
    }

    #[test]
    fn test_bcrypt_round_trip_at_minimum_cost() {
        let hashed = bcrypt::hash("correct-horse", 4).unwrap();
        assert!(bcrypt::verify("correct-horse", &hashed).unwrap());
        assert!(!bcrypt::verify("battery-staple", &hashed).unwrap());
    }
}
