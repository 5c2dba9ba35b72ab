use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 媒体文件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/media.ts")]
pub struct MediaItem {
    pub id: i64,
    pub original_name: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub alt_ar: Option<String>,
    pub alt_en: Option<String>,
    pub uploaded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl MediaItem {
    /// 下载地址
    pub fn download_url(&self) -> String {
        format!("/api/v1/media/{}/download", self.id)
    }
}
