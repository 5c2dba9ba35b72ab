use crate::utils::validate::{validate_email, validate_required, validate_student_number};
use chrono::Datelike;
use super::entities::StudentStatus;
use crate::models::common::{PaginationQuery, optional_from_str};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "optional_from_str")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_from_str")]
    pub level: Option<i32>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub student_number: String,
    pub full_name_ar: String,
    pub full_name_en: String,
    pub email: Option<String>,
    pub department_id: i64,
    pub enrollment_year: i32,
    #[serde(default = "default_level")]
    pub level: i32,
    pub status: Option<StudentStatus>,
}

fn default_level() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub student_number: Option<String>,
    pub full_name_ar: Option<String>,
    pub full_name_en: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<i64>,
    pub enrollment_year: Option<i32>,
    pub level: Option<i32>,
    pub status: Option<StudentStatus>,
}

pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 8;

fn check_level(level: i32) -> Result<(), String> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(format!("level must be between {MIN_LEVEL} and {MAX_LEVEL}"));
    }
    Ok(())
}

fn check_enrollment_year(year: i32) -> Result<(), String> {
    let next_year = chrono::Utc::now().year() + 1;
    if !(1950..=next_year).contains(&year) {
        return Err(format!("enrollment_year must be between 1950 and {next_year}"));
    }
    Ok(())
}

fn normalize_email(email: &mut Option<String>) -> Result<(), String> {
    if let Some(value) = email.as_mut() {
        *value = value.trim().to_lowercase();
        if value.is_empty() {
            *email = None;
        } else {
            validate_email(value)?;
        }
    }
    Ok(())
}

impl CreateStudentRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        self.student_number = self.student_number.trim().to_string();
        validate_student_number(&self.student_number)?;
        validate_required(&self.full_name_ar, "full_name_ar")?;
        validate_required(&self.full_name_en, "full_name_en")?;
        normalize_email(&mut self.email)?;
        check_enrollment_year(self.enrollment_year)?;
        check_level(self.level)
    }
}

impl UpdateStudentRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        if let Some(number) = self.student_number.as_mut() {
            *number = number.trim().to_string();
            validate_student_number(number)?;
        }
        if let Some(name) = &self.full_name_ar {
            validate_required(name, "full_name_ar")?;
        }
        if let Some(name) = &self.full_name_en {
            validate_required(name, "full_name_en")?;
        }
        normalize_email(&mut self.email)?;
        if let Some(year) = self.enrollment_year {
            check_enrollment_year(year)?;
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

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            student_number: " 441-10023 ".to_string(),
            full_name_ar: "سارة محمد".to_string(),
            full_name_en: "Sara Mohammed".to_string(),
            email: Some(" Sara@Uni.edu ".to_string()),
            department_id: 1,
            enrollment_year: 2022,
            level: 3,
            status: None,
        }
    }

    #[test]
    fn test_normalize_student() {
        let mut req = request();
        req.normalize().unwrap();
        assert_eq!(req.student_number, "441-10023");
        assert_eq!(req.email.as_deref(), Some("sara@uni.edu"));
    }

    #[test]
    fn test_level_and_number_bounds() {
        let mut req = request();
        req.level = 9;
        assert!(req.normalize().unwrap_err().contains("level"));

        let mut req = request();
        req.student_number = "S1".to_string();
        assert!(req.normalize().is_err());

        let mut update = UpdateStudentRequest {
            level: Some(0),
            ..Default::default()
        };
        assert!(update.normalize().is_err());
    }
}
