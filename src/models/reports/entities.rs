use serde::Serialize;
use ts_rs::TS;

use crate::grading::{LetterGrade, Semester};

// 成绩单中的一门课
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct TranscriptCourse {
    pub course_id: i64,
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    pub credit_hours: i32,
    pub coursework: f64,
    pub midterm: f64,
    pub final_exam: f64,
    pub total: f64,
    pub letter_grade: LetterGrade,
    pub gpa_points: f64,
}

// 一个学期
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct TranscriptTerm {
    pub academic_year: String,
    pub semester: Semester,
    pub courses: Vec<TranscriptCourse>,
    pub gpa: f64,
    pub credits_attempted: i32,
    pub credits_earned: i32,
    /// 截至本学期的累计 GPA
    pub cumulative_gpa: f64,
}

// 等级分布
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct LetterCount {
    pub letter: LetterGrade,
    pub count: usize,
}
