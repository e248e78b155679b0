//! 예약 관련 요청 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::appointments::AppointmentStatus;
use crate::utils::string_utils::{deserialize_optional_string, deserialize_trimmed, parse_date, parse_time};

/// `POST /client/appointments` 폼
///
/// 과거 날짜, 의사 진료 가능 여부, 시간 중복은 서비스 계층에서 검사합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppointmentForm {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Please choose a doctor."))]
    pub doctor_id: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_date"))]
    pub date: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_time"))]
    pub time: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 500, message = "Reason must be between 3 and 500 characters."))]
    pub reason: String,
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    match parse_date(date) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("invalid_date")
            .with_message("Please choose a valid date.".into())),
    }
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    match parse_time(time) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("invalid_time")
            .with_message("Please choose a valid time.".into())),
    }
}

/// `PUT /doctor/appointments/{id}` 폼
#[derive(Debug, Clone, Deserialize)]
pub struct StatusForm {
    pub status: AppointmentStatus,
}

/// `GET /client/appointments/new?doctor_id=...`
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointmentQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub doctor_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(date: &str, time: &str, reason: &str) -> AppointmentForm {
        AppointmentForm {
            doctor_id: "65f0c0ffee0000000000abcd".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form("2031-05-04", "14:30", "Annual check-up").validate().is_ok());
    }

    #[test]
    fn test_invalid_date_and_time() {
        let errors = form("2031-13-01", "25:00", "Annual check-up").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("time"));
    }

    #[test]
    fn test_reason_required() {
        assert!(form("2031-05-04", "14:30", "").validate().is_err());
    }

    #[test]
    fn test_status_form_parses_lowercase() {
        let form: StatusForm = serde_json::from_str(r#"{"status": "approved"}"#).unwrap();
        assert_eq!(form.status, AppointmentStatus::Approved);
        assert!(serde_json::from_str::<StatusForm>(r#"{"status": "postponed"}"#).is_err());
    }
}
