use serde::Deserialize;
use ts_rs::TS;

// 登录请求，`login` 可以是用户名或邮箱
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginRequest {
    /// 去除首尾空白，邮箱统一小写
    pub fn normalize(&mut self) -> Result<(), &'static str> {
        let login = self.login.trim();
        if login.is_empty() || self.password.is_empty() {
            return Err("Username and password are required");
        }
        self.login = if login.contains('@') {
            login.to_lowercase()
        } else {
            login.to_string()
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_username_alias() {
        let mut req: LoginRequest =
            serde_json::from_str(r#"{"username":"  Registrar@Uni.EDU ","password":"x"}"#).unwrap();
        req.normalize().unwrap();
        assert_eq!(req.login, "registrar@uni.edu");
        assert!(!req.remember_me);
    }

    #[test]
    fn test_login_rejects_blank() {
        let mut req = LoginRequest {
            login: "   ".to_string(),
            password: "secret".to_string(),
            remember_me: false,
        };
        assert!(req.normalize().is_err());
    }
}
