//! 사용자 리포지토리
//!
//! `users` 컬렉션 접근과 단건 조회 캐싱을 담당합니다.
//! 로그인 때마다 조회되는 이메일만 `user:email:{email}` 키로 캐싱합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, Document, DateTime}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use crate::{
    caching::redis::{RedisClient, DEFAULT_TTL_SECONDS},
    config::Role,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
    repositories::{map_write_error, parse_object_id},
};
use singleton_macro::repository;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    async fn cache_user(&self, key: &str, user: &User) {
        if let Err(e) = self.redis.set_with_expiry(key, user, DEFAULT_TTL_SECONDS).await {
            log::warn!("⚠️ 사용자 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    /// 사용자 변경 후 이메일 캐시를 비웁니다.
    async fn evict(&self, user: &User) {
        let _ = self.redis.del(&Self::email_cache_key(&user.email)).await;
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        self.collection::<User>()
            .find_one(doc! { "google_id": google_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 최근 가입 순
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.collection::<User>()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.collection::<User>()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn count_by_role(&self, role: Role) -> AppResult<u64> {
        self.collection::<User>()
            .count_documents(doc! { "role": role.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이메일/사용자명 중복을 확인한 뒤 저장합니다.
    ///
    /// 동시에 같은 값으로 가입하는 경우는 unique 인덱스 위반으로 409가 됩니다.
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("A user with that email is already registered.".to_string()));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("A user with that username is already registered.".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, "A user with that email or username is already registered."))?;

        user.id = result.inserted_id.as_object_id();
        if user.id.is_none() {
            return Err(AppError::InternalError("Inserted user has no ObjectId".to_string()));
        }

        Ok(user)
    }

    /// `$set` 갱신 후 변경된 문서를 반환합니다. `updated_at`은 자동으로 갱신됩니다.
    pub async fn update(&self, id: &str, mut update_doc: Document) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id, "User")?;
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, "A user with that email or username is already registered."))?;

        if let Some(ref user) = updated_user {
            self.evict(user).await;
        }

        Ok(updated_user)
    }

    pub async fn save_google_id(&self, id: &str, google_id: &str) -> AppResult<Option<User>> {
        self.update(id, doc! { "google_id": google_id }).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id, "User")?;

        let deleted = self.collection::<User>()
            .find_one_and_delete(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match deleted {
            Some(user) => {
                self.evict(&user).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let collection = self.collection::<User>();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // Google 미연동 사용자는 필드가 없으므로 sparse
        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("google_id_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, username_index, google_id_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
