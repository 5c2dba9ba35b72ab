use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub department_id: i64,
    pub credit_hours: i32,
    pub level: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
