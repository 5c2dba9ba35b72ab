//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 与统一响应体，
//! 不会进入业务处理函数。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 解析正整数 ID
pub(crate) fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

macro_rules! define_safe_id {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                ready(match parse_positive_id(raw) {
                    Some(id) => Ok($name(id)),
                    None => Err(bad_path(format!(
                        "Invalid path parameter '{}': {}",
                        $param, raw
                    ))),
                })
            }
        }
    };
}

define_safe_id!(
    /// 路径中的 `{id}`
    SafeIDI64,
    "id"
);
define_safe_id!(SafePageIdI64, "page_id");
define_safe_id!(SafeElementIdI64, "element_id");

/// 路径中的页面 `{slug}`
#[derive(Debug, Clone)]
pub struct SafeSlug(pub String);

impl FromRequest for SafeSlug {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("slug").unwrap_or_default();
        ready(match super::validate::validate_slug(raw) {
            Ok(()) => Ok(SafeSlug(raw.to_string())),
            Err(msg) => Err(bad_path(msg.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id("42"), Some(42));
        assert_eq!(parse_positive_id("0"), None);
        assert_eq!(parse_positive_id("-3"), None);
        assert_eq!(parse_positive_id("1e3"), None);
        assert_eq!(parse_positive_id(""), None);
    }

    #[actix_web::test]
    async fn test_extracts_named_params() {
        let req = TestRequest::default()
            .param("page_id", "7")
            .param("element_id", "abc")
            .to_http_request();

        let page = SafePageIdI64::extract(&req).await.unwrap();
        assert_eq!(page.0, 7);
        assert!(SafeElementIdI64::extract(&req).await.is_err());
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
