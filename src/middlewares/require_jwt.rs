/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，加载对应账号并放入请求扩展。
 * 账号信息按用户 ID 缓存，账号被修改或删除时由用户服务清除缓存。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students))
 * ```
 *
 * 处理函数中通过 `RequireJWT::extract_user_id(&req)` 等方法读取当前用户。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// 账号缓存键
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn authenticate(req: &ServiceRequest) -> Result<User, &'static str> {
    let token = bearer_token(req).ok_or("Missing or invalid Authorization header")?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("Access token rejected: {}", err);
        "Invalid or expired token"
    })?;
    let user_id = claims.user_id().map_err(|_| "Invalid token subject")?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    let cached = match &cache {
        Some(cache) => cache.get_json::<User>(&user_cache_key(user_id)).await,
        None => CacheResult::NotFound,
    };

    let user = match cached {
        CacheResult::Found(user) => user,
        _ => {
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .ok_or("Storage is not configured")?
                .get_ref()
                .clone();

            let user = storage
                .get_user_by_id(user_id)
                .await
                .map_err(|_| "Failed to load account")?
                .ok_or("Account no longer exists")?;

            if let Some(cache) = &cache {
                cache.insert_json(user_cache_key(user_id), &user, 0).await;
            }
            user
        }
    };

    if !user.is_active() {
        return Err("Account is suspended");
    }
    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检不携带凭证
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    actix_web::HttpResponse::NoContent()
                        .finish()
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("Authenticated user {} ({})", user.id, user.role);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(reason) => {
                    info!("Authentication failed for {}: {}", req.path(), reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            reason,
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前登录账号，仅在 RequireJWT 保护的路由中可用
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }
}
