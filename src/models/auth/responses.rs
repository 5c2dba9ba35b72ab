use crate::models::users::entities::{User, UserRole};
use serde::Serialize;
use ts_rs::TS;

/// 当前账号可进入的后台模块，前端据此渲染菜单
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct Permissions {
    pub manage_accounts: bool,
    pub manage_academics: bool,
    pub manage_content: bool,
}

impl From<UserRole> for Permissions {
    fn from(role: UserRole) -> Self {
        Self {
            manage_accounts: UserRole::admin_roles().contains(&&role),
            manage_academics: UserRole::academic_roles().contains(&&role),
            manage_content: UserRole::content_roles().contains(&&role),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub permissions: Permissions,
    pub user: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UserInfoResponse {
    pub permissions: Permissions,
    pub user: User,
}

impl From<User> for UserInfoResponse {
    fn from(user: User) -> Self {
        Self {
            permissions: user.role.into(),
            user,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
    pub user_id: Option<i64>,
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_follow_role() {
        let registrar = Permissions::from(UserRole::Registrar);
        assert!(registrar.manage_academics);
        assert!(!registrar.manage_content);
        assert!(!registrar.manage_accounts);

        let admin = Permissions::from(UserRole::Admin);
        assert!(admin.manage_accounts && admin.manage_academics && admin.manage_content);
    }
}
