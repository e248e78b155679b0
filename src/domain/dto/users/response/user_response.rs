//! 사용자 목록/대시보드 화면용 응답 DTO

use serde::Serialize;
use crate::config::Role;
use crate::domain::entities::users::user::User;
use crate::utils::string_utils::format_bson_date;

/// 템플릿에 전달되는 사용자 정보
///
/// 비밀번호 해시와 Google ID는 노출하지 않고 연동 여부만 전달합니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub google_linked: bool,
    pub has_password: bool,
    pub joined_on: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let google_linked = user.is_google_linked();
        let has_password = user.can_authenticate_with_password();
        let joined_on = format_bson_date(&user.created_at);

        let User {
            id,
            email,
            username,
            name,
            role,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            username,
            name,
            role,
            google_linked,
            has_password,
            joined_on,
        }
    }
}
