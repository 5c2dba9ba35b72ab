use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::requests::CourseStatisticsParams;
use crate::models::users::entities::UserRole;
use crate::services::ReportService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn student_transcript(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.student_transcript(id.0, &req).await
}

pub async fn course_statistics(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<CourseStatisticsParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .course_statistics(id.0, query.into_inner(), &req)
        .await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.dashboard(&req).await
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .route("/dashboard", web::get().to(dashboard))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
                    .route("/students/{id}/transcript", web::get().to(student_transcript))
                    .route("/courses/{id}/statistics", web::get().to(course_statistics)),
            ),
    );
}
