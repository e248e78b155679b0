//! User Entity Implementation
//!
//! 로컬 인증(이메일/비밀번호)과 Google 계정 연동을 모두 지원하는 사용자 모델입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::Role;

/// 사용자 엔티티
///
/// `users` 컬렉션에 저장됩니다. `email`과 `username`에는 unique 인덱스가,
/// `google_id`에는 unique + sparse 인덱스가 걸려 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 소문자로 정규화)
    pub email: String,
    /// 사용자명 (unique). Google로 생성된 계정은 이메일과 같습니다.
    pub username: String,
    /// 화면에 보여지는 이름
    pub name: String,
    /// 해시된 비밀번호 (Google 전용 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 연동된 Google 계정 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/비밀번호)
    pub fn new_local(email: String, username: String, name: String, password_hash: String, role: Role) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            username,
            name,
            password_hash: Some(password_hash),
            google_id: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// 첫 Google 로그인으로 생성되는 사용자
    ///
    /// 사용자명은 이메일, 역할은 `client`로 시작합니다.
    pub fn new_google(email: String, google_id: String, name: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: email.clone(),
            email,
            name,
            password_hash: None,
            google_id: Some(google_id),
            role: Role::Client,
            created_at: now,
            updated_at: now,
        }
    }

    /// 기존 계정에 Google ID를 연결(또는 갱신)합니다.
    pub fn link_google(&mut self, google_id: String) {
        self.google_id = Some(google_id);
        self.updated_at = DateTime::now();
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn is_google_linked(&self) -> bool {
        self.google_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_google_user_uses_email_as_username() {
        let user = User::new_google(
            "patient@example.com".to_string(),
            "1098765".to_string(),
            "Pat Doe".to_string(),
        );

        assert_eq!(user.username, "patient@example.com");
        assert_eq!(user.role, Role::Client);
        assert!(!user.can_authenticate_with_password());
        assert!(user.is_google_linked());
    }

    #[test]
    fn test_link_google_keeps_password() {
        let mut user = User::new_local(
            "jane@example.com".to_string(),
            "jane".to_string(),
            "Jane".to_string(),
            "$2b$04$hash".to_string(),
            Role::Client,
        );
        assert!(!user.is_google_linked());

        user.link_google("abc-123".to_string());

        assert_eq!(user.google_id.as_deref(), Some("abc-123"));
        assert!(user.can_authenticate_with_password());
    }

    #[test]
    fn test_optional_fields_are_not_serialized_when_absent() {
        let user = User::new_google("a@b.com".to_string(), "g".to_string(), "A".to_string());
        let doc = mongodb::bson::to_document(&user).unwrap();

        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("password_hash"));
        assert_eq!(doc.get_str("role").unwrap(), "client");
    }
}
