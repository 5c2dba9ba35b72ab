use actix_web::{HttpResponse, Result as ActixResult};

use super::sheet::{Cell, SheetFormat, write_rows};
use crate::grading::GradeColumn;
use crate::models::{ApiResponse, ErrorCode, grades::requests::TemplateParams};
use crate::services::bad_request;

/// 模板示例行
fn example_row() -> Vec<Cell> {
    vec![
        Cell::Text("441-10023".to_string()),
        Cell::Text("CS101".to_string()),
        Cell::Number(25.0),
        Cell::Number(28.0),
        Cell::Number(35.0),
        Cell::Text("2024-2025".to_string()),
        Cell::Text("الأول".to_string()),
    ]
}

pub async fn import_template(params: TemplateParams) -> ActixResult<HttpResponse> {
    let format = match SheetFormat::from_query(params.format.as_deref()) {
        Ok(format) => format,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let headers: Vec<&str> = GradeColumn::ALL.iter().map(|c| c.arabic_header()).collect();
    match write_rows(format, "grades", &headers, &[example_row()]) {
        Ok(buffer) => Ok(HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                "Content-Disposition",
                format!(
                    "attachment; filename=\"grade_import_template.{}\"",
                    format.extension()
                ),
            ))
            .body(buffer)),
        Err(e) => {
            tracing::error!("Failed to generate import template: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("Failed to generate template: {}", e.message()),
                )),
            )
        }
    }
}
