use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 门户账号角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,     // 管理员
    Registrar, // 教务（学籍与成绩）
    Editor,    // 内容编辑
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const REGISTRAR: &'static str = "registrar";
    pub const EDITOR: &'static str = "editor";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// 可管理学籍与成绩的角色
    pub fn academic_roles() -> &'static [&'static UserRole] {
        &[&Self::Registrar, &Self::Admin]
    }
    /// 可管理内容与媒体的角色
    pub fn content_roles() -> &'static [&'static UserRole] {
        &[&Self::Editor, &Self::Admin]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Registrar => Self::REGISTRAR,
            UserRole::Editor => Self::EDITOR,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(UserRole::Admin),
            Self::REGISTRAR => Ok(UserRole::Registrar),
            Self::EDITOR => Ok(UserRole::Editor),
            _ => Err(format!(
                "Invalid user role: '{s}'. Supported: admin, registrar, editor"
            )),
        }
    }
}

// 账号状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!(
                "Invalid user status: '{s}'. Supported: active, suspended"
            )),
        }
    }
}

// 门户账号
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("registrar".parse::<UserRole>(), Ok(UserRole::Registrar));
        assert!("teacher".parse::<UserRole>().is_err());
        let role: UserRole = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(role, UserRole::Editor);
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::academic_roles().contains(&&UserRole::Registrar));
        assert!(!UserRole::academic_roles().contains(&&UserRole::Editor));
        assert!(UserRole::content_roles().contains(&&UserRole::Admin));
    }
}
