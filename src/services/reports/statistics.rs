use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::grading::{LetterGrade, Semester, round2, validate_academic_year};
use crate::models::courses::entities::Course;
use crate::models::grades::entities::Grade;
use crate::models::reports::{
    entities::LetterCount, requests::CourseStatisticsParams, responses::CourseStatisticsResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found};

/// 汇总课程成绩。分布中包含全部等级，没有成绩的等级计数为 0
pub(crate) fn summarize(
    course: Course,
    grades: &[Grade],
    academic_year: Option<String>,
    semester: Option<Semester>,
) -> CourseStatisticsResponse {
    let distribution = LetterGrade::ALL
        .iter()
        .map(|letter| LetterCount {
            letter: *letter,
            count: grades.iter().filter(|g| g.letter_grade == *letter).count(),
        })
        .collect();

    let count = grades.len();
    let (average, highest, lowest, pass_rate) = if count == 0 {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        let sum: f64 = grades.iter().map(|g| g.total).sum();
        let highest = grades.iter().map(|g| g.total).fold(f64::MIN, f64::max);
        let lowest = grades.iter().map(|g| g.total).fold(f64::MAX, f64::min);
        let passed = grades.iter().filter(|g| g.letter_grade.is_passing()).count();
        (
            round2(sum / count as f64),
            highest,
            lowest,
            round2(passed as f64 * 100.0 / count as f64),
        )
    };

    CourseStatisticsResponse {
        course,
        academic_year,
        semester,
        count,
        average,
        highest,
        lowest,
        pass_rate,
        distribution,
    }
}

pub async fn course_statistics(
    service: &ReportService,
    course_id: i64,
    params: CourseStatisticsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let academic_year = params
        .academic_year
        .map(|y| y.trim().to_string())
        .filter(|y| !y.is_empty());
    if let Some(year) = &academic_year
        && let Err(msg) = validate_academic_year(year)
    {
        return Ok(bad_request(ErrorCode::GradeTermInvalid, msg));
    }

    let storage = service.get_storage(request);
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course: {e}"),
                )),
            );
        }
    };

    match storage
        .list_course_grades(course_id, academic_year.as_deref(), params.semester)
        .await
    {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(course, &grades, academic_year, params.semester),
            "Course statistics retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load course grades: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ComponentScores;

    fn course() -> Course {
        Course {
            id: 7,
            code: "CS101".to_string(),
            name_ar: "برمجة".to_string(),
            name_en: "Programming".to_string(),
            department_id: 1,
            credit_hours: 3,
            level: 1,
            description: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn grade(coursework: f64, midterm: f64, final_exam: f64) -> Grade {
        let scores = ComponentScores {
            coursework,
            midterm,
            final_exam,
        };
        let computed = scores.compute();
        Grade {
            id: 0,
            student_id: 1,
            course_id: 7,
            coursework,
            midterm,
            final_exam,
            total: computed.total,
            letter_grade: computed.letter,
            gpa_points: computed.gpa_points,
            academic_year: "2024-2025".to_string(),
            semester: Semester::First,
            notes: None,
            recorded_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summarize_course_grades() {
        let grades = vec![
            grade(25.0, 28.0, 35.0),
            grade(30.0, 30.0, 36.0),
            grade(10.0, 10.0, 20.0),
            grade(20.0, 20.0, 30.0),
        ];
        let stats = summarize(course(), &grades, None, None);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.highest, 96.0);
        assert_eq!(stats.lowest, 40.0);
        assert_eq!(stats.average, 73.5);
        assert_eq!(stats.pass_rate, 75.0);
        assert_eq!(stats.distribution.len(), LetterGrade::ALL.len());

        let count_of = |letter: LetterGrade| {
            stats
                .distribution
                .iter()
                .find(|c| c.letter == letter)
                .map(|c| c.count)
                .unwrap()
        };
        assert_eq!(count_of(LetterGrade::APlus), 1);
        assert_eq!(count_of(LetterGrade::F), 1);
        assert_eq!(count_of(LetterGrade::C), 1);
        assert_eq!(count_of(LetterGrade::BPlus), 1);
        assert_eq!(count_of(LetterGrade::A), 0);
    }

    #[test]
    fn test_summarize_without_grades() {
        let stats = summarize(course(), &[], Some("2024-2025".to_string()), Some(Semester::Summer));
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, 0.0);
        assert!(stats.distribution.iter().all(|c| c.count == 0));
    }
}
