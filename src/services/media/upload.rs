use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::MediaService;
use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::middlewares::RequireJWT;
use crate::models::media::{requests::NewMediaItem, responses::MediaResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;
use crate::utils::{MediaKind, validate_magic_bytes};

// 魔术字节检查所需的文件头长度
const HEAD_LEN: usize = 16;

/// 已写入上传目录的文件，释放时若未调用 `keep` 则删除
struct PendingFile {
    path: PathBuf,
    kept: bool,
}

impl PendingFile {
    fn new(path: PathBuf) -> Self {
        Self { path, kept: false }
    }

    fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.kept {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        message,
    ))
}

pub async fn upload_media(
    service: &MediaService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", PortalError::file_operation(format!("{e}")));
        return Ok(upload_failed("Failed to create upload directory"));
    }

    let mut uploaded: Option<(String, String, PendingFile, MediaKind, i64)> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if uploaded.is_some() {
            // 已写入的第一个文件随 uploaded 释放而删除
            return Ok(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        // 扩展名必须在允许列表中且为已知媒体类型
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        let allowed = config
            .upload
            .allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension);
        let Some(kind) = MediaKind::from_extension(&extension).filter(|_| allowed) else {
            return Ok(bad_request(ErrorCode::FileTypeNotAllowed, "File type not allowed"));
        };

        let stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
        let file_path = super::stored_path(&stored_name);
        let mut f = match File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", PortalError::file_operation(format!("{e}")));
                return Ok(upload_failed("Failed to create file"));
            }
        };
        let pending = PendingFile::new(file_path);

        let mut head: Vec<u8> = Vec::with_capacity(HEAD_LEN);
        let mut total_size: usize = 0;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => return Err(e.into()),
            };

            if head.len() < HEAD_LEN {
                let take = (HEAD_LEN - head.len()).min(data.len());
                head.extend_from_slice(&data[..take]);
            }

            total_size += data.len();
            if total_size > max_size {
                return Ok(bad_request(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            if let Err(e) = f.write_all(&data) {
                tracing::error!("{}", PortalError::file_operation(format!("{e}")));
                return Ok(upload_failed("Failed to write file"));
            }
        }

        if !validate_magic_bytes(&head, &extension) {
            return Ok(bad_request(
                ErrorCode::FileTypeNotAllowed,
                "File content does not match its extension",
            ));
        }

        uploaded = Some((original_name, stored_name, pending, kind, total_size as i64));
    }

    let Some((original_name, stored_name, pending, kind, file_size)) = uploaded else {
        return Ok(bad_request(ErrorCode::FileNotFound, "No file found in upload payload"));
    };

    let storage = service.get_storage(request);
    let item = NewMediaItem {
        original_name,
        stored_name,
        mime_type: kind.mime_type().to_string(),
        file_size,
        uploaded_by: RequireJWT::extract_user_id(request),
    };

    match storage.create_media(item).await {
        Ok(media) => {
            pending.keep();
            tracing::info!("Media {} uploaded ({} bytes)", media.id, media.file_size);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MediaResponse::from(media),
                "File uploaded successfully",
            )))
        }
        Err(e) => Ok(upload_failed(&format!("Failed to save media record: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::{self, HeaderMap, HeaderValue};
    use actix_web::test::TestRequest;
    use actix_web::web::Bytes;

    const BOUNDARY: &str = "campus-boundary";
    const PNG_HEAD: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_part(filename: &str) -> Vec<u8> {
        let mut part = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .into_bytes();
        part.extend_from_slice(&PNG_HEAD);
        part.extend_from_slice(&[0u8; 32]);
        part.extend_from_slice(b"\r\n");
        part
    }

    fn multipart(body: Vec<u8>) -> Multipart {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}")).unwrap(),
        );
        let stream = futures_util::stream::once(async move {
            Ok::<_, actix_web::error::PayloadError>(Bytes::from(body))
        });
        Multipart::new(&headers, stream)
    }

    fn stored_files() -> Vec<String> {
        fs::read_dir(&AppConfig::get().upload.dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_pending_file_removed_unless_kept() {
        let dir = std::env::temp_dir();
        let dropped = dir.join(format!("{}-dropped.bin", Uuid::new_v4()));
        let kept = dir.join(format!("{}-kept.bin", Uuid::new_v4()));
        fs::write(&dropped, b"x").unwrap();
        fs::write(&kept, b"x").unwrap();

        drop(PendingFile::new(dropped.clone()));
        PendingFile::new(kept.clone()).keep();

        assert!(!dropped.exists());
        assert!(kept.exists());
        fs::remove_file(kept).unwrap();
    }

    #[actix_web::test]
    async fn test_second_file_field_rejected_without_leaving_files() {
        let before = stored_files();

        let mut body = png_part("first.png");
        body.extend(png_part("second.png"));
        body.extend(format!("--{BOUNDARY}--\r\n").into_bytes());

        let request = TestRequest::default().to_http_request();
        let response = upload_media(&MediaService::new_lazy(), multipart(body), &request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let leaked: Vec<_> = stored_files()
            .into_iter()
            .filter(|name| !before.contains(name))
            .collect();
        assert!(leaked.is_empty(), "left on disk: {leaked:?}");
    }
}
