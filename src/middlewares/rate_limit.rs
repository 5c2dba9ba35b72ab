/*!
 * 固定窗口速率限制中间件
 *
 * 计数键由端点前缀、客户端标识（已登录用户 ID 或客户端 IP）与窗口序号组成，
 * 窗口结束后计数自然失效。超过限制返回 429。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

// 窗口最长 1 小时，条目在两个窗口后过期
static RATE_LIMIT_COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(2 * 3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    scope: &'static str,
}

impl RateLimit {
    pub fn new(scope: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.clamp(1, 3600),
            scope,
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 刷新令牌：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 批量导入与上传：10 次/分钟/用户
    pub fn upload() -> Self {
        Self::new("upload", 10, 60)
    }

    /// 计数键，`now` 为 unix 秒
    fn counter_key(&self, identifier: &str, now: u64) -> String {
        format!("{}:{}:{}", self.scope, identifier, now / self.window_secs)
    }

    /// 当前窗口剩余秒数
    fn retry_after(&self, now: u64) -> u64 {
        self.window_secs - now % self.window_secs
    }
}

fn client_identifier(req: &ServiceRequest) -> String {
    if let Some(user_id) = req.extensions().get::<User>().map(|u| u.id) {
        return format!("user:{user_id}");
    }

    // 优先使用连接信息（已考虑 Forwarded / X-Forwarded-For），并校验格式
    let info = req.connection_info();
    let ip = info
        .realip_remote_addr()
        .map(|addr| {
            addr.parse::<std::net::SocketAddr>()
                .map(|s| s.ip().to_string())
                .unwrap_or_else(|_| addr.to_string())
        })
        .filter(|ip| ip.parse::<IpAddr>().is_ok());

    format!("ip:{}", ip.unwrap_or_else(|| "unknown".to_string()))
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let key = limit.counter_key(&client_identifier(&req), now);

            let count = RATE_LIMIT_COUNTERS
                .entry(key.clone())
                .and_upsert_with(|entry| async move {
                    entry.map(|e| e.into_value().saturating_add(1)).unwrap_or(1)
                })
                .await
                .into_value();

            if count > limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, count, limit.max_requests
                );
                return Ok(req.into_response(
                    too_many_requests(limit.retry_after(now)).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.scope, "login");
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
    }

    #[test]
    fn test_fixed_window_keys() {
        let limit = RateLimit::new("login", 5, 60);
        assert_eq!(
            limit.counter_key("ip:10.0.0.1", 120),
            limit.counter_key("ip:10.0.0.1", 179)
        );
        assert_ne!(
            limit.counter_key("ip:10.0.0.1", 179),
            limit.counter_key("ip:10.0.0.1", 180)
        );
        assert_eq!(limit.retry_after(125), 55);
        assert_eq!(RateLimit::new("x", 1, 0).window_secs, 1);
    }
}
