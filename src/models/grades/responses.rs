use super::entities::GradeDetail;
use crate::grading::{ComponentLimits, GradeBand, ImportRowError};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeDetail>,
    pub pagination: PaginationInfo,
}

// 批量导入结果
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeImportResponse {
    pub total: usize,
    pub success: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

// 评分标准
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeScaleResponse {
    pub bands: Vec<GradeBand>,
    pub limits: ComponentLimits,
    pub passing_total: f64,
}
