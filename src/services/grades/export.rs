//! 成绩导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::GradeService;
use super::sheet::{Cell, SheetFormat, write_rows};
use crate::grading::GradeColumn;
use crate::models::grades::{entities::GradeDetail, requests::GradeExportParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;

const STUDENT_NAME_HEADER: &str = "اسم الطالب";
const COURSE_NAME_HEADER: &str = "اسم المقرر";
const TOTAL_HEADER: &str = "المجموع";
const LETTER_HEADER: &str = "التقدير";
const POINTS_HEADER: &str = "النقاط";

/// 导出表头。包含导入所需的全部列，导出文件可直接回导
fn export_headers() -> Vec<&'static str> {
    vec![
        GradeColumn::StudentNumber.arabic_header(),
        STUDENT_NAME_HEADER,
        GradeColumn::CourseCode.arabic_header(),
        COURSE_NAME_HEADER,
        GradeColumn::Coursework.arabic_header(),
        GradeColumn::Midterm.arabic_header(),
        GradeColumn::FinalExam.arabic_header(),
        TOTAL_HEADER,
        LETTER_HEADER,
        POINTS_HEADER,
        GradeColumn::AcademicYear.arabic_header(),
        GradeColumn::Semester.arabic_header(),
    ]
}

fn export_row(detail: &GradeDetail) -> Vec<Cell> {
    let grade = &detail.grade;
    vec![
        Cell::Text(detail.student_number.clone()),
        Cell::Text(detail.student_name_ar.clone()),
        Cell::Text(detail.course_code.clone()),
        Cell::Text(detail.course_name_ar.clone()),
        Cell::Number(grade.coursework),
        Cell::Number(grade.midterm),
        Cell::Number(grade.final_exam),
        Cell::Number(grade.total),
        Cell::Text(grade.letter_grade.to_string()),
        Cell::Number(grade.gpa_points),
        Cell::Text(grade.academic_year.clone()),
        Cell::Text(grade.semester.arabic_name().to_string()),
    ]
}

pub async fn export_grades(
    service: &GradeService,
    params: GradeExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let format = match SheetFormat::from_query(params.format.as_deref()) {
        Ok(format) => format,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let storage = service.get_storage(request);
    let details = match storage.list_grade_details(&params.filter).await {
        Ok(details) => details,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load grades: {e}"),
                )),
            );
        }
    };

    let rows: Vec<Vec<Cell>> = details.iter().map(export_row).collect();
    match write_rows(format, "grades", &export_headers(), &rows) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("grades_{timestamp}.{}", format.extension());
            tracing::info!("Exported {} grades as {}", rows.len(), format.extension());

            Ok(HttpResponse::Ok()
                .content_type(format.content_type())
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            tracing::error!("Failed to generate grade export: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("Failed to generate export: {}", e.message()),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ColumnMap;

    #[test]
    fn test_export_headers_can_be_imported() {
        let headers = export_headers();
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.index(GradeColumn::StudentNumber), 0);
        assert_eq!(map.index(GradeColumn::CourseCode), 2);
        assert_eq!(map.index(GradeColumn::Semester), 11);
    }
}
