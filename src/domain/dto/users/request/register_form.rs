//! # 회원가입 폼 DTO
//!
//! `POST /register`로 전송되는 `application/x-www-form-urlencoded` 데이터입니다.
//!
//! ## 검증 규칙
//!
//! - `email`: 이메일 형식 (중복 여부는 서비스 계층에서 검사)
//! - `username`: 3-30자, 영문/숫자/언더스코어
//! - `name`: 1-50자
//! - `password`: 8자 이상, `password_confirm`과 일치

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::deserialize_trimmed;

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct RegisterForm {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 30, message = "Username must be between 3 and 30 characters."))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters."))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,

    pub password_confirm: String,
}

fn validate_passwords_match(form: &RegisterForm) -> Result<(), ValidationError> {
    if form.password != form.password_confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("Passwords do not match.".into()));
    }
    Ok(())
}

/// 영문, 숫자, 언더스코어만 허용
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("Username may only contain letters, numbers and underscores.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            email: "jane@example.com".to_string(),
            username: username.to_string(),
            name: "Jane Doe".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form("jane_doe", "correct-horse", "correct-horse").validate().is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(form("jd", "correct-horse", "correct-horse").validate().is_err());
        assert!(form("jane-doe", "correct-horse", "correct-horse").validate().is_err());
        assert!(form("제인", "correct-horse", "correct-horse").validate().is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(form("jane_doe", "short", "short").validate().is_err());

        let errors = form("jane_doe", "correct-horse", "battery-staple").validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn test_form_fields_are_trimmed() {
        let form: RegisterForm = serde_json::from_str(
            r#"{"email": " jane@example.com ", "username": "jane", "name": " Jane ",
                "password": "p", "password_confirm": "p"}"#,
        )
        .unwrap();

        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.name, "Jane");
    }
}
