use super::entities::{LetterCount, TranscriptTerm};
use crate::grading::Semester;
use crate::models::courses::entities::Course;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 学生成绩单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct TranscriptResponse {
    pub student: Student,
    pub terms: Vec<TranscriptTerm>,
    pub cumulative_gpa: f64,
    pub credits_attempted: i32,
    pub credits_earned: i32,
}

// 课程成绩统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct CourseStatisticsResponse {
    pub course: Course,
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
    pub count: usize,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    pub pass_rate: f64,
    pub distribution: Vec<LetterCount>,
}

// 仪表盘计数
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct DashboardResponse {
    pub departments: u64,
    pub students: u64,
    pub active_students: u64,
    pub courses: u64,
    pub grades: u64,
    pub content_pages: u64,
    pub published_pages: u64,
    pub media_items: u64,
}
