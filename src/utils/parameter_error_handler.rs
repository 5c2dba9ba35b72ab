use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一响应体
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected JSON body on {}: {}", req.path(), err);

    let (status, code, message) = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => (
            actix_web::http::StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::BadRequest,
            "Request body is too large".to_string(),
        ),
        JsonPayloadError::ContentType => (
            actix_web::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::BadRequest,
            "Content-Type must be application/json".to_string(),
        ),
        _ => (
            actix_web::http::StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            format!("Invalid request body: {err}"),
        ),
    };

    let response = HttpResponse::build(status).json(ApiResponse::error_empty(code, &message));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时返回统一响应体
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected query string on {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
