use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 院系
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct Department {
    pub id: i64,
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub description: Option<String>,
    pub head_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
