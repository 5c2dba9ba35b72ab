use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::ReportService;
use crate::grading::{GpaEntry, Semester, weighted_gpa};
use crate::models::grades::{entities::GradeDetail, requests::GradeFilter};
use crate::models::reports::{
    entities::{TranscriptCourse, TranscriptTerm},
    responses::TranscriptResponse,
};
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

fn gpa_entry(detail: &GradeDetail) -> GpaEntry {
    GpaEntry {
        gpa_points: detail.grade.gpa_points,
        credit_hours: detail.credit_hours,
        passed: detail.grade.letter_grade.is_passing(),
    }
}

/// 按学年、学期分组并计算每学期与累计 GPA
pub(crate) fn build_transcript(student: Student, details: Vec<GradeDetail>) -> TranscriptResponse {
    let mut grouped: BTreeMap<(String, Semester), Vec<GradeDetail>> = BTreeMap::new();
    for detail in details {
        grouped
            .entry((detail.grade.academic_year.clone(), detail.grade.semester))
            .or_default()
            .push(detail);
    }

    let mut all_entries: Vec<GpaEntry> = Vec::new();
    let mut terms = Vec::with_capacity(grouped.len());

    for ((academic_year, semester), details) in grouped {
        let entries: Vec<GpaEntry> = details.iter().map(gpa_entry).collect();
        let term_summary = weighted_gpa(&entries);
        all_entries.extend(entries);
        let cumulative = weighted_gpa(&all_entries);

        terms.push(TranscriptTerm {
            academic_year,
            semester,
            courses: details
                .into_iter()
                .map(|d| TranscriptCourse {
                    course_id: d.grade.course_id,
                    course_code: d.course_code,
                    course_name_ar: d.course_name_ar,
                    course_name_en: d.course_name_en,
                    credit_hours: d.credit_hours,
                    coursework: d.grade.coursework,
                    midterm: d.grade.midterm,
                    final_exam: d.grade.final_exam,
                    total: d.grade.total,
                    letter_grade: d.grade.letter_grade,
                    gpa_points: d.grade.gpa_points,
                })
                .collect(),
            gpa: term_summary.gpa,
            credits_attempted: term_summary.credits_attempted,
            credits_earned: term_summary.credits_earned,
            cumulative_gpa: cumulative.gpa,
        });
    }

    let overall = weighted_gpa(&all_entries);
    TranscriptResponse {
        student,
        terms,
        cumulative_gpa: overall.gpa,
        credits_attempted: overall.credits_attempted,
        credits_earned: overall.credits_earned,
    }
}

pub async fn student_transcript(
    service: &ReportService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    };

    let filter = GradeFilter {
        student_id: Some(student_id),
        ..Default::default()
    };
    match storage.list_grade_details(&filter).await {
        Ok(details) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            build_transcript(student, details),
            "Transcript retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load grades: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ComponentScores;
    use crate::models::grades::entities::Grade;
    use crate::models::students::entities::StudentStatus;

    fn student() -> Student {
        Student {
            id: 1,
            student_number: "441001".to_string(),
            full_name_ar: "سارة".to_string(),
            full_name_en: "Sara".to_string(),
            email: None,
            department_id: 1,
            enrollment_year: 2023,
            level: 2,
            status: StudentStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn detail(year: &str, semester: Semester, credit_hours: i32, total: f64) -> GradeDetail {
        let scores = ComponentScores {
            coursework: 0.0,
            midterm: 0.0,
            final_exam: total,
        };
        let computed = scores.compute();
        GradeDetail {
            grade: Grade {
                id: 0,
                student_id: 1,
                course_id: credit_hours as i64,
                coursework: scores.coursework,
                midterm: scores.midterm,
                final_exam: scores.final_exam,
                total: computed.total,
                letter_grade: computed.letter,
                gpa_points: computed.gpa_points,
                academic_year: year.to_string(),
                semester,
                notes: None,
                recorded_by: None,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            student_number: "441001".to_string(),
            student_name_ar: String::new(),
            student_name_en: String::new(),
            course_code: format!("C{credit_hours}"),
            course_name_ar: String::new(),
            course_name_en: String::new(),
            credit_hours,
        }
    }

    #[test]
    fn test_transcript_terms_and_cumulative_gpa() {
        let transcript = build_transcript(
            student(),
            vec![
                detail("2024-2025", Semester::First, 2, 50.0),
                detail("2023-2024", Semester::Second, 3, 96.0),
                detail("2024-2025", Semester::First, 3, 82.0),
            ],
        );

        assert_eq!(transcript.terms.len(), 2);
        let first = &transcript.terms[0];
        assert_eq!(first.academic_year, "2023-2024");
        assert_eq!(first.gpa, 4.0);
        assert_eq!(first.cumulative_gpa, 4.0);

        // (0.0 * 2 + 3.0 * 3) / 5 = 1.8
        let second = &transcript.terms[1];
        assert_eq!(second.gpa, 1.8);
        assert_eq!(second.credits_attempted, 5);
        assert_eq!(second.credits_earned, 3);
        // (4.0 * 3 + 0.0 * 2 + 3.0 * 3) / 8 = 2.625
        assert_eq!(second.cumulative_gpa, 2.63);

        assert_eq!(transcript.credits_attempted, 8);
        assert_eq!(transcript.credits_earned, 6);
        assert_eq!(transcript.cumulative_gpa, second.cumulative_gpa);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = build_transcript(student(), Vec::new());
        assert!(transcript.terms.is_empty());
        assert_eq!(transcript.cumulative_gpa, 0.0);
    }
}
