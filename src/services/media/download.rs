use actix_web::http::header::{
    self, Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;

use super::MediaService;
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

/// 文件名中非 ASCII 字符替换为下划线，原名通过 filename* 传递
fn ascii_fallback(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii() && c != '"' && !c.is_ascii_control() { c } else { '_' })
        .collect()
}

fn content_disposition(original_name: &str, mime_type: &str) -> ContentDisposition {
    // SVG 可携带脚本，始终作为附件下载
    let disposition = if mime_type.starts_with("image/") && mime_type != "image/svg+xml" {
        DispositionType::Inline
    } else {
        DispositionType::Attachment
    };

    ContentDisposition {
        disposition,
        parameters: vec![
            DispositionParam::Filename(ascii_fallback(original_name)),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: original_name.as_bytes().to_vec(),
            }),
        ],
    }
}

pub async fn download_media(
    service: &MediaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let media = match storage.get_media_by_id(id).await {
        Ok(Some(media)) => media,
        Ok(None) => return Ok(not_found(ErrorCode::MediaNotFound, "Media not found")),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Media query failed: {e}"),
                )),
            );
        }
    };

    let buf = match fs::read(super::stored_path(&media.stored_name)) {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Stored file missing for media {}", id);
            return Ok(not_found(ErrorCode::FileNotFound, "File not found"));
        }
        Err(e) => {
            tracing::error!("{}", PortalError::file_operation(format!("{e}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, media.mime_type.clone()))
        .insert_header(content_disposition(&media.original_name, &media.mime_type))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_for_arabic_name() {
        let cd = content_disposition("شعار الجامعة.png", "image/png");
        assert_eq!(cd.disposition, DispositionType::Inline);
        assert_eq!(cd.get_filename(), Some("____ _______.png"));

        let svg = content_disposition("logo.svg", "image/svg+xml");
        assert_eq!(svg.disposition, DispositionType::Attachment);
        assert_eq!(svg.get_filename(), Some("logo.svg"));
    }
}
