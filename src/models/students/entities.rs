use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学籍状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum StudentStatus {
    Active,    // 在读
    Graduated, // 已毕业
    Suspended, // 休学
    Withdrawn, // 退学
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Graduated => "graduated",
            StudentStatus::Suspended => "suspended",
            StudentStatus::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "graduated" => Ok(StudentStatus::Graduated),
            "suspended" => Ok(StudentStatus::Suspended),
            "withdrawn" => Ok(StudentStatus::Withdrawn),
            _ => Err(format!(
                "Invalid student status: '{s}'. Supported: active, graduated, suspended, withdrawn"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// 学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub student_number: String,
    pub full_name_ar: String,
    pub full_name_en: String,
    pub email: Option<String>,
    pub department_id: i64,
    pub enrollment_year: i32,
    pub level: i32,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
