//! 폼 입력 문자열 처리 유틸리티
//!
//! HTML 폼은 비어 있는 입력도 빈 문자열로 전송하므로,
//! 선택 필드는 공백 제거 후 비어 있으면 `None`으로 정규화합니다.

use chrono::{NaiveDate, NaiveTime};
use mongodb::bson::DateTime;
use serde::Deserialize;

pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `#[serde(deserialize_with = "deserialize_optional_string")]`용
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 필수 문자열 필드의 앞뒤 공백 제거
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// 이메일 비교용 정규화 (공백 제거 + 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// `HH:MM` (24시간제)
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// 화면 표시용 `YYYY-MM-DD` (UTC)
pub fn format_bson_date(value: &DateTime) -> String {
    value
        .try_to_rfc3339_string()
        .map(|rfc3339| rfc3339.chars().take(10).collect())
        .unwrap_or_default()
}
