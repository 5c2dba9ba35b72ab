use crate::grading::Semester;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct CourseStatisticsParams {
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
}
