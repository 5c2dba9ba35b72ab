use crate::utils::validate::{validate_code, validate_required};
use crate::models::common::{PaginationQuery, optional_from_str};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "optional_from_str")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_from_str")]
    pub level: Option<i32>,
    #[serde(default, deserialize_with = "optional_from_str")]
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub department_id: i64,
    pub credit_hours: i32,
    #[serde(default = "default_level")]
    pub level: i32,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_level() -> i32 {
    1
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub department_id: Option<i64>,
    pub credit_hours: Option<i32>,
    pub level: Option<i32>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub const MIN_CREDIT_HOURS: i32 = 1;
pub const MAX_CREDIT_HOURS: i32 = 6;

fn check_credit_hours(hours: i32) -> Result<(), String> {
    if !(MIN_CREDIT_HOURS..=MAX_CREDIT_HOURS).contains(&hours) {
        return Err(format!(
            "credit_hours must be between {MIN_CREDIT_HOURS} and {MAX_CREDIT_HOURS}"
        ));
    }
    Ok(())
}

fn check_level(level: i32) -> Result<(), String> {
    if !(1..=8).contains(&level) {
        return Err("level must be between 1 and 8".to_string());
    }
    Ok(())
}

impl CreateCourseRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        self.code = self.code.trim().to_uppercase();
        validate_code(&self.code)?;
        validate_required(&self.name_ar, "name_ar")?;
        validate_required(&self.name_en, "name_en")?;
        check_credit_hours(self.credit_hours)?;
        check_level(self.level)
    }
}

impl UpdateCourseRequest {
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
        if let Some(hours) = self.credit_hours {
            check_credit_hours(hours)?;
        }
        if let Some(level) = self.level {
            check_level(level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_hours_bounds() {
        let mut req = CreateCourseRequest {
            code: "cs101".to_string(),
            name_ar: "برمجة".to_string(),
            name_en: "Programming".to_string(),
            department_id: 1,
            credit_hours: 3,
            level: 1,
            description: None,
            is_active: true,
        };
        req.normalize().unwrap();
        assert_eq!(req.code, "CS101");

        req.credit_hours = 7;
        assert!(req.normalize().unwrap_err().contains("credit_hours"));

        let mut update = UpdateCourseRequest {
            credit_hours: Some(0),
            ..Default::default()
        };
        assert!(update.normalize().is_err());
    }
}
