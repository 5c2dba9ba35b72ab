use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::media::requests::{MediaListParams, UpdateMediaRequest};
use crate::models::users::entities::UserRole;
use crate::services::MediaService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MediaService 实例
static MEDIA_SERVICE: Lazy<MediaService> = Lazy::new(MediaService::new_lazy);

pub async fn upload_media(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.upload_media(payload, &req).await
}

pub async fn list_media(
    req: HttpRequest,
    query: web::Query<MediaListParams>,
) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.list_media(query.into_inner(), &req).await
}

pub async fn get_media(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.get_media(id.0, &req).await
}

pub async fn update_media(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateMediaRequest>,
) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.update_media(id.0, data.into_inner(), &req).await
}

pub async fn delete_media(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.delete_media(id.0, &req).await
}

pub async fn download_media(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.download_media(id.0, &req).await
}

// 配置路由
pub fn configure_media_routes(cfg: &mut web::ServiceConfig) {
    // 下载地址会嵌入公开页面，不需要登录
    cfg.service(
        web::resource("/api/v1/media/{id}/download")
            .wrap(middleware::Compress::default())
            .route(web::get().to(download_media)),
    );

    cfg.service(
        web::scope("/api/v1/media")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::content_roles()))
                    .service(
                        web::resource("/upload")
                            .wrap(middlewares::RateLimit::upload())
                            .route(web::post().to(upload_media)),
                    )
                    .route("", web::get().to(list_media))
                    .route("/{id}", web::get().to(get_media))
                    .route("/{id}", web::put().to(update_media))
                    .route("/{id}", web::delete().to(delete_media)),
            ),
    );
}
