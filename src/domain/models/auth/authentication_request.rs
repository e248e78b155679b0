//! 인증 미들웨어 설정 값

use crate::config::Role;

/// 로그인 필수 여부
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 로그인하지 않으면 `/login`으로 리다이렉트
    Required,
    /// 로그인 정보가 있으면 요청 확장에 넣고 그대로 통과
    Optional,
}

/// 라우트 그룹이 요구하는 역할
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    Single(Role),
    Any(Vec<Role>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, role: Role) -> bool {
        match self {
            RequiredRole::Single(required) => *required == role,
            RequiredRole::Any(required) => required.contains(&role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_role() {
        let required = RequiredRole::Single(Role::Doctor);
        assert!(required.is_satisfied(Role::Doctor));
        assert!(!required.is_satisfied(Role::Client));
        assert!(!required.is_satisfied(Role::Admin));
    }

    #[test]
    fn test_any_role() {
        let required = RequiredRole::Any(vec![Role::Admin, Role::Doctor]);
        assert!(required.is_satisfied(Role::Admin));
        assert!(required.is_satisfied(Role::Doctor));
        assert!(!required.is_satisfied(Role::Client));
    }
}
