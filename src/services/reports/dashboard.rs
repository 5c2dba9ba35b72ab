use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn dashboard(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.dashboard_counts().await {
        Ok(counts) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            counts,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to collect dashboard counts: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load dashboard: {e}"),
                )),
            )
        }
    }
}
