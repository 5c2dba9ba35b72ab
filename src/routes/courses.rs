use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(data.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.update_course(id.0, data.into_inner(), &req).await
}

pub async fn delete_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(id.0, &req).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
                    .route("", web::get().to(list_courses))
                    .route("", web::post().to(create_course))
                    .route("/{id}", web::get().to(get_course))
                    .route("/{id}", web::put().to(update_course))
                    .route("/{id}", web::delete().to(delete_course)),
            ),
    );
}
