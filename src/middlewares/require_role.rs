/*!
 * 基于角色的访问控制中间件，必须套在 RequireJWT 之内使用：
 *
 * ```rust,ignore
 * web::scope("/api/v1/grades")
 *     .wrap(RequireRole::new_any(UserRole::academic_roles()))
 *     .wrap(RequireJWT)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    pub fn new(role: UserRole) -> Self {
        Self {
            allowed: Rc::from([role]),
        }
    }

    /// 任一角色即可
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| **r).collect(),
        }
    }

    pub fn permits(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let current = req.extensions().get::<User>().map(|u| (u.id, u.role));

            let Some((user_id, role)) = current else {
                info!("Role check on {} without an authenticated user", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if policy.permits(role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "Access denied for user {} (role: {}) on {}",
                user_id,
                role,
                req.path()
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "You do not have permission to perform this action",
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups() {
        let academic = RequireRole::new_any(UserRole::academic_roles());
        assert!(academic.permits(UserRole::Registrar));
        assert!(academic.permits(UserRole::Admin));
        assert!(!academic.permits(UserRole::Editor));

        let content = RequireRole::new_any(UserRole::content_roles());
        assert!(content.permits(UserRole::Editor));
        assert!(!content.permits(UserRole::Registrar));

        assert!(!RequireRole::new(UserRole::Admin).permits(UserRole::Editor));
    }
}
