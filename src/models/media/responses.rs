use super::entities::MediaItem;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/media.ts")]
pub struct MediaResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub media: MediaItem,
    pub url: String,
}

impl From<MediaItem> for MediaResponse {
    fn from(media: MediaItem) -> Self {
        let url = media.download_url();
        Self { media, url }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/media.ts")]
pub struct MediaListResponse {
    pub items: Vec<MediaResponse>,
    pub pagination: PaginationInfo,
}
