use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/media.ts")]
pub struct MediaListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    /// MIME 前缀，例如 `image/`
    pub mime_type: Option<String>,
}

// 新媒体记录（上传完成后写入）
#[derive(Debug, Clone)]
pub struct NewMediaItem {
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub uploaded_by: Option<i64>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/media.ts")]
pub struct UpdateMediaRequest {
    pub alt_ar: Option<String>,
    pub alt_en: Option<String>,
}
