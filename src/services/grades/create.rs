use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeInputError, GradeService, build_grade_input};
use crate::errors::PortalError;
use crate::grading::ComponentScores;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, grades::requests::CreateGradeRequest};
use crate::services::{bad_request, storage_error_response};

fn lookup_failed(err: PortalError) -> HttpResponse {
    storage_error_response(err, ErrorCode::GradeAlreadyExists, "Grade creation failed")
}

pub async fn create_grade(
    service: &GradeService,
    req: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let scores = ComponentScores {
        coursework: req.coursework,
        midterm: req.midterm,
        final_exam: req.final_exam,
    };

    let input = match build_grade_input(
        &service.limits(),
        req.student_id,
        req.course_id,
        scores,
        &req.academic_year,
        req.semester,
        req.notes,
        RequireJWT::extract_user_id(request),
    ) {
        Ok(input) => input,
        Err(GradeInputError::Term(msg)) => {
            return Ok(bad_request(ErrorCode::GradeTermInvalid, msg));
        }
        Err(GradeInputError::Range(msg)) => {
            return Ok(bad_request(ErrorCode::GradeScoreOutOfRange, msg));
        }
    };

    let storage = service.get_storage(request);

    // 学生与课程必须存在
    match storage.get_student_by_id(input.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(bad_request(ErrorCode::StudentNotFound, "Student does not exist"));
        }
        Err(e) => return Ok(lookup_failed(e)),
    }
    match storage.get_course_by_id(input.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(bad_request(ErrorCode::CourseNotFound, "Course does not exist"));
        }
        Err(e) => return Ok(lookup_failed(e)),
    }

    match storage.create_grade(input).await {
        Ok(grade) => {
            tracing::info!(
                "Grade {} recorded for student {} in course {}",
                grade.id,
                grade.student_id,
                grade.course_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                grade,
                "Grade created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::GradeAlreadyExists,
            "Grade creation failed",
        )),
    }
}
