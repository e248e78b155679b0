//! 의사 프로필 생성/수정 폼 (관리자 전용)

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};
use crate::core::errors::{AppError, AppResult};
use crate::utils::string_utils::{deserialize_optional_string, deserialize_trimmed};

/// `POST /admin/doctors`, `PUT /admin/doctors/{id}` 폼
///
/// - 생성 시 `email`, `password`로 의사 로그인 계정을 함께 만듭니다.
/// - 수정 시 `email`은 무시되며, `password`를 입력한 경우에만 비밀번호를 바꿉니다.
/// - `is_available` 체크박스는 체크되지 않으면 전송되지 않습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DoctorForm {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters."))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub email: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 60, message = "Specialization must be between 2 and 60 characters."))]
    pub specialization: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(range(max = 100000, message = "Fee must be between 0 and 100000."))]
    pub fee: u32,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters."))]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: Option<String>,

    #[serde(default)]
    pub is_available: Option<String>,
}

impl DoctorForm {
    pub fn available(&self) -> bool {
        self.is_available.is_some()
    }

    /// 생성 폼에만 적용되는 규칙: 이메일 형식과 비밀번호 필수
    pub fn check_create_fields(&self) -> AppResult<()> {
        if !self.email.validate_email() {
            return Err(AppError::ValidationError("Please enter a valid email address.".to_string()));
        }
        if self.password.is_none() {
            return Err(AppError::ValidationError("Password is required for a new doctor.".to_string()));
        }
        Ok(())
    }
}

/// 숫자, 공백, `+`, `-`, 괄호만 허용하며 숫자는 7-15개
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();

    if !allowed || !(7..=15).contains(&digits) {
        return Err(ValidationError::new("invalid_phone")
            .with_message("Please enter a valid phone number.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DoctorForm {
        DoctorForm {
            name: "Dr. Gregory House".to_string(),
            email: "house@example.com".to_string(),
            specialization: "Diagnostics".to_string(),
            phone: "+1 (555) 010-2000".to_string(),
            fee: 150,
            bio: None,
            password: Some("vicodin-42".to_string()),
            is_available: Some("on".to_string()),
        }
    }

    #[test]
    fn test_valid_create_form() {
        assert!(form().validate().is_ok());
        assert!(form().check_create_fields().is_ok());
        assert!(form().available());
    }

    #[test]
    fn test_create_requires_password_and_email() {
        let mut doctor = form();
        doctor.password = None;
        doctor.email = "not-an-email".to_string();

        assert!(matches!(doctor.check_create_fields(), Err(AppError::ValidationError(_))));

        doctor.email = "wilson@example.com".to_string();
        match doctor.check_create_fields() {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("Password is required")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_update_allows_missing_password() {
        let mut doctor = form();
        doctor.password = None;
        doctor.is_available = None;

        assert!(doctor.validate().is_ok());
        assert!(!doctor.available());
    }

    #[test]
    fn test_phone_and_fee_rules() {
        let mut doctor = form();
        doctor.phone = "call me".to_string();
        assert!(doctor.validate().is_err());

        let mut doctor = form();
        doctor.fee = 100_001;
        assert!(doctor.validate().is_err());
    }
}
