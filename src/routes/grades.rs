use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeExportParams, GradeImportParams, GradeListParams, TemplateParams,
    UpdateGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::SafeIDI64;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(data.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(id.0, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.update_grade(id.0, data.into_inner(), &req).await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(id.0, &req).await
}

pub async fn import_grades(
    req: HttpRequest,
    query: web::Query<GradeImportParams>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .import_grades(query.into_inner(), payload, &req)
        .await
}

pub async fn export_grades(
    req: HttpRequest,
    query: web::Query<GradeExportParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.export_grades(query.into_inner(), &req).await
}

pub async fn import_template(query: web::Query<TemplateParams>) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.import_template(query.into_inner()).await
}

pub async fn grade_scale() -> ActixResult<HttpResponse> {
    GRADE_SERVICE.grade_scale().await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            // 评分标准对所有后台账号可见
            .route("/scale", web::get().to(grade_scale))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
                    .route("", web::get().to(list_grades))
                    .route("", web::post().to(create_grade))
                    .route("/import", web::post().to(import_grades))
                    .route("/import/template", web::get().to(import_template))
                    .route("/export", web::get().to(export_grades))
                    .route("/{id}", web::get().to(get_grade))
                    .route("/{id}", web::put().to(update_grade))
                    .route("/{id}", web::delete().to(delete_grade)),
            ),
    );
}
