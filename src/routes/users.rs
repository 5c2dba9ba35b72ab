use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn list_accounts(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_account(
    req: HttpRequest,
    data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(data.into_inner(), &req).await
}

pub async fn get_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(id.0, &req).await
}

pub async fn update_account(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.update_user(id.0, data.into_inner(), &req).await
}

pub async fn delete_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(id.0, &req).await
}

// 配置路由，后台账号仅管理员可管理
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_accounts))
                    .route("", web::post().to(create_account))
                    .route("/{id}", web::get().to(get_account))
                    .route("/{id}", web::put().to(update_account))
                    .route("/{id}", web::delete().to(delete_account)),
            ),
    );
}
