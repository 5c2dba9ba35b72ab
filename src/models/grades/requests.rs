use crate::grading::{LetterGrade, Semester};
use crate::models::common::{PaginationQuery, optional_from_str};
use serde::Deserialize;
use ts_rs::TS;

// 成绩筛选条件（列表与导出共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeFilter {
    #[serde(default, deserialize_with = "optional_from_str")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_from_str")]
    pub course_id: Option<i64>,
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
    pub letter_grade: Option<LetterGrade>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: GradeFilter,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub coursework: f64,
    pub midterm: f64,
    pub final_exam: f64,
    pub academic_year: String,
    pub semester: Semester,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub coursework: Option<f64>,
    pub midterm: Option<f64>,
    pub final_exam: Option<f64>,
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
    pub notes: Option<String>,
}

// 导出参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeExportParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub filter: GradeFilter,
    pub format: Option<String>,
}

// 导入参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeImportParams {
    #[serde(default, deserialize_with = "optional_from_str")]
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TemplateParams {
    pub format: Option<String>,
}
