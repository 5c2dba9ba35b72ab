use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grading::{LetterGrade, Semester};

// 成绩记录，total / letter_grade / gpa_points 均由服务端计算
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub coursework: f64,
    pub midterm: f64,
    pub final_exam: f64,
    pub total: f64,
    pub letter_grade: LetterGrade,
    pub gpa_points: f64,
    pub academic_year: String,
    pub semester: Semester,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 附带学生与课程信息的成绩（列表、导出、成绩单使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub student_number: String,
    pub student_name_ar: String,
    pub student_name_en: String,
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    pub credit_hours: i32,
}

/// 唯一键：同一学生同一课程同一学年学期
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GradeKey {
    pub student_id: i64,
    pub course_id: i64,
    pub academic_year: String,
    pub semester: Semester,
}

/// 写入成绩表的完整数据，派生字段已由评分模块计算
#[derive(Debug, Clone)]
pub struct GradeInput {
    pub student_id: i64,
    pub course_id: i64,
    pub scores: crate::grading::ComponentScores,
    pub computed: crate::grading::ComputedGrade,
    pub academic_year: String,
    pub semester: Semester,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
}

impl GradeInput {
    pub fn key(&self) -> GradeKey {
        GradeKey {
            student_id: self.student_id,
            course_id: self.course_id,
            academic_year: self.academic_year.clone(),
            semester: self.semester,
        }
    }
}
