//! 의사 프로필 리포지토리

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document, DateTime}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use crate::{
    caching::redis::{RedisClient, DEFAULT_TTL_SECONDS},
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::doctors::Doctor,
    repositories::{map_write_error, parse_object_id},
};
use singleton_macro::repository;

#[repository(name = "doctor", collection = "doctors")]
pub struct DoctorRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl DoctorRepository {
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Doctor>> {
        let object_id = parse_object_id(id, "Doctor")?;
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Doctor>(&cache_key).await {
            return Ok(Some(cached));
        }

        let doctor = self.collection::<Doctor>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref doctor) = doctor {
            if let Err(e) = self.redis.set_with_expiry(&cache_key, doctor, DEFAULT_TTL_SECONDS).await {
                log::warn!("⚠️ 의사 캐시 저장 실패 ({}): {}", cache_key, e);
            }
        }

        Ok(doctor)
    }

    /// 의사 계정(`users._id`)으로 프로필 조회
    pub async fn find_by_user_id(&self, user_id: ObjectId) -> AppResult<Option<Doctor>> {
        self.collection::<Doctor>()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_sorted(&self, filter: Document) -> AppResult<Vec<Doctor>> {
        self.collection::<Doctor>()
            .find(filter)
            .sort(doc! { "name": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이름순 전체 목록
    pub async fn find_all(&self) -> AppResult<Vec<Doctor>> {
        self.find_sorted(doc! {}).await
    }

    /// 예약 가능한 의사만
    pub async fn find_available(&self) -> AppResult<Vec<Doctor>> {
        self.find_sorted(doc! { "is_available": true }).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.collection::<Doctor>()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut doctor: Doctor) -> AppResult<Doctor> {
        let result = self.collection::<Doctor>()
            .insert_one(&doctor)
            .await
            .map_err(|e| map_write_error(e, "A doctor profile already exists for that account."))?;

        doctor.id = result.inserted_id.as_object_id();
        if doctor.id.is_none() {
            return Err(AppError::InternalError("Inserted doctor has no ObjectId".to_string()));
        }

        Ok(doctor)
    }

    pub async fn update(&self, id: &str, mut update_doc: Document) -> AppResult<Option<Doctor>> {
        let object_id = parse_object_id(id, "Doctor")?;
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Doctor>()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(updated)
    }

    /// 삭제된 프로필을 반환합니다. 계정 삭제에 `user_id`가 필요합니다.
    pub async fn delete(&self, id: &str) -> AppResult<Option<Doctor>> {
        let object_id = parse_object_id(id, "Doctor")?;

        let deleted = self.collection::<Doctor>()
            .find_one_and_delete(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if deleted.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(deleted)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        let available_index = IndexModel::builder()
            .keys(doc! { "is_available": 1, "name": 1 })
            .options(IndexOptions::builder()
                .name("available_by_name".to_string())
                .build())
            .build();

        self.collection::<Doctor>()
            .create_indexes([user_index, available_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
