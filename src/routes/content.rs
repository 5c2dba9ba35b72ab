use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::content::requests::{
    CreateElementRequest, CreatePageRequest, PageListParams, ReorderElementsRequest,
    UpdateElementRequest, UpdatePageRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ContentService;
use crate::utils::{SafeElementIdI64, SafePageIdI64, SafeSlug};

// 懒加载的全局 ContentService 实例
static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);

pub async fn list_pages(
    req: HttpRequest,
    query: web::Query<PageListParams>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_pages(query.into_inner(), &req).await
}

pub async fn create_page(
    req: HttpRequest,
    data: web::Json<CreatePageRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.create_page(data.into_inner(), &req).await
}

pub async fn get_page(req: HttpRequest, page_id: SafePageIdI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.get_page(page_id.0, &req).await
}

pub async fn update_page(
    req: HttpRequest,
    page_id: SafePageIdI64,
    data: web::Json<UpdatePageRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .update_page(page_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_page(req: HttpRequest, page_id: SafePageIdI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.delete_page(page_id.0, &req).await
}

pub async fn list_elements(req: HttpRequest, page_id: SafePageIdI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_elements(page_id.0, &req).await
}

pub async fn create_element(
    req: HttpRequest,
    page_id: SafePageIdI64,
    data: web::Json<CreateElementRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .create_element(page_id.0, data.into_inner(), &req)
        .await
}

pub async fn update_element(
    req: HttpRequest,
    page_id: SafePageIdI64,
    element_id: SafeElementIdI64,
    data: web::Json<UpdateElementRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .update_element(page_id.0, element_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_element(
    req: HttpRequest,
    page_id: SafePageIdI64,
    element_id: SafeElementIdI64,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .delete_element(page_id.0, element_id.0, &req)
        .await
}

pub async fn reorder_elements(
    req: HttpRequest,
    page_id: SafePageIdI64,
    data: web::Json<ReorderElementsRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .reorder_elements(page_id.0, data.into_inner(), &req)
        .await
}

pub async fn get_public_page(req: HttpRequest, slug: SafeSlug) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.get_public_page(&slug.0, &req).await
}

// 配置路由
pub fn configure_content_routes(cfg: &mut web::ServiceConfig) {
    // 公开页面无需登录
    cfg.route("/api/v1/public/pages/{slug}", web::get().to(get_public_page));

    cfg.service(
        web::scope("/api/v1/content/pages")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::content_roles()))
                    .route("", web::get().to(list_pages))
                    .route("", web::post().to(create_page))
                    .route("/{page_id}", web::get().to(get_page))
                    .route("/{page_id}", web::put().to(update_page))
                    .route("/{page_id}", web::delete().to(delete_page))
                    .route("/{page_id}/elements", web::get().to(list_elements))
                    .route("/{page_id}/elements", web::post().to(create_element))
                    .route("/{page_id}/elements/order", web::put().to(reorder_elements))
                    .route(
                        "/{page_id}/elements/{element_id}",
                        web::put().to(update_element),
                    )
                    .route(
                        "/{page_id}/elements/{element_id}",
                        web::delete().to(delete_element),
                    ),
            ),
    );
}
