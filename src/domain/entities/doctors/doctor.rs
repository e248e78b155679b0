//! Doctor Profile Entity
//!
//! 의사 계정(`User`, 역할 `doctor`)에 연결된 진료 프로필입니다.
//! 관리자가 생성/수정/삭제하며, 환자는 `is_available`인 의사만 예약할 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 계정 (`users._id`)
    pub user_id: ObjectId,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub phone: String,
    /// 진료비
    pub fee: u32,
    #[serde(default)]
    pub bio: String,
    pub is_available: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Doctor {
    pub fn new(
        user_id: ObjectId,
        name: String,
        email: String,
        specialization: String,
        phone: String,
        fee: u32,
        bio: String,
        is_available: bool,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user_id,
            name,
            email,
            specialization,
            phone,
            fee,
            bio,
            is_available,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
