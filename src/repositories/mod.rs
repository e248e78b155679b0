//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들을 제공합니다.
//! MongoDB를 주 저장소로 사용하고 단건 조회는 Redis에 캐싱합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod doctors;
pub mod appointments;

use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use crate::core::errors::{AppError, AppResult};
use self::appointments::AppointmentRepository;
use self::doctors::DoctorRepository;
use self::users::UserRepository;

/// 문자열 ID 파싱. 잘못된 형식은 존재하지 않는 리소스와 같게 취급합니다.
pub(crate) fn parse_object_id(id: &str, resource: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::NotFound(format!("{} not found.", resource)))
}

/// unique 인덱스 위반(E11000)은 409, 나머지는 500
pub(crate) fn map_write_error(error: mongodb::error::Error, conflict_message: &str) -> AppError {
    match *error.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000 => {
            AppError::ConflictError(conflict_message.to_string())
        }
        _ => AppError::DatabaseError(error.to_string()),
    }
}

/// 모든 컬렉션의 인덱스를 생성합니다. 이미 존재하는 인덱스는 그대로 둡니다.
pub async fn create_all_indexes() -> AppResult<()> {
    UserRepository::instance().create_indexes().await?;
    DoctorRepository::instance().create_indexes().await?;
    AppointmentRepository::instance().create_indexes().await?;

    log::info!("✅ MongoDB 인덱스 확인 완료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("65f0c0ffee0000000000abcd", "Doctor").is_ok());

        match parse_object_id("not-an-id", "Doctor") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Doctor not found."),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
