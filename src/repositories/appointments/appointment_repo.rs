//! 예약 리포지토리
//!
//! 상태 변경은 `{ _id, status: 현재상태 }` 조건부 갱신으로 수행하여
//! 동시에 들어온 두 요청이 같은 예약을 서로 다른 상태로 바꾸지 못하게 합니다.
//! 상태가 자주 바뀌므로 Redis 캐시는 사용하지 않습니다.
//!
//! 한 의사의 같은 날짜/시간에는 활성 예약이 하나만 존재하도록
//! `{ doctor_id, date, time }`에 `active: true` 조건의 부분 unique 인덱스를 겁니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document, DateTime}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::appointments::{Appointment, AppointmentStatus},
    repositories::{map_write_error, parse_object_id},
};
use singleton_macro::repository;

pub const SLOT_TAKEN_MESSAGE: &str = "That time slot is already booked.";

fn active_statuses() -> Vec<&'static str> {
    AppointmentStatus::ACTIVE.iter().map(|status| status.as_str()).collect()
}

#[repository(name = "appointment", collection = "appointments")]
pub struct AppointmentRepository {
    db: Arc<Database>,
}

impl AppointmentRepository {
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Appointment>> {
        let object_id = parse_object_id(id, "Appointment")?;

        self.collection::<Appointment>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 날짜/시간 내림차순 (최근 예약 먼저)
    async fn find_sorted(&self, filter: Document) -> AppResult<Vec<Appointment>> {
        self.collection::<Appointment>()
            .find(filter)
            .sort(doc! { "date": -1, "time": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_by_client(&self, client_id: ObjectId) -> AppResult<Vec<Appointment>> {
        self.find_sorted(doc! { "client_id": client_id }).await
    }

    pub async fn find_by_doctor(&self, doctor_id: ObjectId) -> AppResult<Vec<Appointment>> {
        self.find_sorted(doc! { "doctor_id": doctor_id }).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Appointment>> {
        self.find_sorted(doc! {}).await
    }

    /// 같은 의사의 같은 날짜/시간에 잡힌 활성(pending/approved) 예약
    pub async fn find_active_slot(&self, doctor_id: ObjectId, date: &str, time: &str) -> AppResult<Option<Appointment>> {
        self.collection::<Appointment>()
            .find_one(doc! {
                "doctor_id": doctor_id,
                "date": date,
                "time": time,
                "status": { "$in": active_statuses() },
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.collection::<Appointment>()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn count_by_status(&self, status: AppointmentStatus) -> AppResult<u64> {
        self.collection::<Appointment>()
            .count_documents(doc! { "status": status.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut appointment: Appointment) -> AppResult<Appointment> {
        let result = self.collection::<Appointment>()
            .insert_one(&appointment)
            .await
            .map_err(|e| map_write_error(e, SLOT_TAKEN_MESSAGE))?;

        appointment.id = result.inserted_id.as_object_id();
        if appointment.id.is_none() {
            return Err(AppError::InternalError("Inserted appointment has no ObjectId".to_string()));
        }

        Ok(appointment)
    }

    /// 현재 상태가 `from`일 때만 `to`로 바꿉니다. 조건이 맞지 않으면 `None`.
    pub async fn update_status(
        &self,
        id: ObjectId,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> AppResult<Option<Appointment>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Appointment>()
            .find_one_and_update(
                doc! { "_id": id, "status": from.as_str() },
                doc! { "$set": {
                    "status": to.as_str(),
                    "active": to.is_active(),
                    "updated_at": DateTime::now(),
                } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 의사 프로필 삭제 시 남아 있는 활성 예약을 모두 취소합니다.
    pub async fn cancel_active_for_doctor(&self, doctor_id: ObjectId) -> AppResult<u64> {
        let result = self.collection::<Appointment>()
            .update_many(
                doc! { "doctor_id": doctor_id, "status": { "$in": active_statuses() } },
                doc! { "$set": {
                    "status": AppointmentStatus::Cancelled.as_str(),
                    "active": false,
                    "updated_at": DateTime::now(),
                } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    /// 의사 정보가 바뀌면 예약에 복사된 이름도 맞춥니다.
    pub async fn rename_doctor(&self, doctor_id: ObjectId, doctor_name: &str) -> AppResult<u64> {
        let result = self.collection::<Appointment>()
            .update_many(
                doc! { "doctor_id": doctor_id },
                doc! { "$set": { "doctor_name": doctor_name } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let slot_index = active_slot_index();

        let client_index = IndexModel::builder()
            .keys(doc! { "client_id": 1, "date": -1 })
            .options(IndexOptions::builder()
                .name("client_date_desc".to_string())
                .build())
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .options(IndexOptions::builder()
                .name("status".to_string())
                .build())
            .build();

        self.collection::<Appointment>()
            .create_indexes([slot_index, client_index, status_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// 취소/거절/완료된 예약은 `active: false`가 되어 같은 시간을 다시 예약할 수 있습니다.
fn active_slot_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "doctor_id": 1, "date": 1, "time": 1 })
        .options(IndexOptions::builder()
            .name("doctor_active_slot".to_string())
            .unique(true)
            .partial_filter_expression(doc! { "active": true })
            .build())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_slot_index_is_unique_for_active_appointments() {
        let index = active_slot_index();
        assert_eq!(index.keys, doc! { "doctor_id": 1, "date": 1, "time": 1 });

        let options = index.options.unwrap();
        assert_eq!(options.name.as_deref(), Some("doctor_active_slot"));
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.partial_filter_expression, Some(doc! { "active": true }));
    }

    #[test]
    fn test_active_statuses() {
        assert_eq!(active_statuses(), vec!["pending", "approved"]);
    }
}
