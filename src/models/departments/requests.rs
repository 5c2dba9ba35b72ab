use crate::utils::validate::{validate_code, validate_required};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct CreateDepartmentRequest {
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub description: Option<String>,
    pub head_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct UpdateDepartmentRequest {
    pub code: Option<String>,
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub head_name: Option<String>,
}

impl CreateDepartmentRequest {
    /// 规范化并校验字段
    pub fn normalize(&mut self) -> Result<(), String> {
        self.code = self.code.trim().to_uppercase();
        validate_code(&self.code)?;
        validate_required(&self.name_ar, "name_ar")?;
        validate_required(&self.name_en, "name_en")?;
        Ok(())
    }
}

impl UpdateDepartmentRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        if let Some(code) = self.code.as_mut() {
            *code = code.trim().to_uppercase();
            validate_code(code)?;
        }
        if let Some(name) = &self.name_ar {
            validate_required(name, "name_ar")?;
        }
        if let Some(name) = &self.name_en {
            validate_required(name, "name_en")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let mut req = CreateDepartmentRequest {
            code: " cs ".to_string(),
            name_ar: "علوم الحاسب".to_string(),
            name_en: "Computer Science".to_string(),
            description: None,
            head_name: None,
        };
        req.normalize().unwrap();
        assert_eq!(req.code, "CS");

        let mut blank = UpdateDepartmentRequest {
            name_en: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.normalize().is_err());
    }
}
