use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeInputError, GradeService, build_grade_input};
use crate::grading::ComponentScores;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, grades::requests::UpdateGradeRequest};
use crate::services::{bad_request, not_found, storage_error_response};

pub async fn update_grade(
    service: &GradeService,
    id: i64,
    update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => {
            return Ok(storage_error_response(
                e,
                ErrorCode::GradeAlreadyExists,
                "Grade update failed",
            ));
        }
    };

    // 未提供的字段沿用原值，派生字段一律重新计算
    let scores = ComponentScores {
        coursework: update.coursework.unwrap_or(existing.coursework),
        midterm: update.midterm.unwrap_or(existing.midterm),
        final_exam: update.final_exam.unwrap_or(existing.final_exam),
    };
    let academic_year = update.academic_year.unwrap_or(existing.academic_year);

    let input = match build_grade_input(
        &service.limits(),
        existing.student_id,
        existing.course_id,
        scores,
        &academic_year,
        update.semester.unwrap_or(existing.semester),
        update.notes.or(existing.notes),
        RequireJWT::extract_user_id(request).or(existing.recorded_by),
    ) {
        Ok(input) => input,
        Err(GradeInputError::Term(msg)) => {
            return Ok(bad_request(ErrorCode::GradeTermInvalid, msg));
        }
        Err(GradeInputError::Range(msg)) => {
            return Ok(bad_request(ErrorCode::GradeScoreOutOfRange, msg));
        }
    };

    match storage.update_grade(id, input).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::GradeAlreadyExists,
            "Grade update failed",
        )),
    }
}
