use super::entities::{ContentElement, ContentPage};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct PageListResponse {
    pub items: Vec<ContentPage>,
    pub pagination: PaginationInfo,
}

// 页面及其元素
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct PageDetailResponse {
    pub page: ContentPage,
    pub elements: Vec<ContentElement>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ElementListResponse {
    pub items: Vec<ContentElement>,
}
