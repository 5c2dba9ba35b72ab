//! 成绩批量导入
//!
//! 流程：读取上传文件 → 解析表格 → 识别表头 → 预加载学生与课程
//! → 逐行校验 → 按顺序逐条写入。写入不在事务中进行，
//! 单行失败不影响已写入的行。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::{StreamExt, TryStreamExt};
use std::collections::BTreeSet;
use std::path::Path;

use super::GradeService;
use super::sheet::{SheetFormat, read_rows};
use crate::config::AppConfig;
use crate::grading::{
    ColumnMap, GradeColumn, ImportDirectory, ImportRowError, RawGradeRow, ValidatedGradeRow,
    validate_rows,
};
use crate::middlewares::RequireJWT;
use crate::models::grades::{
    entities::GradeInput, requests::GradeImportParams, responses::GradeImportResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;
use crate::storage::Storage;

/// 上传的导入文件
struct ImportFile {
    format: SheetFormat,
    bytes: Vec<u8>,
}

/// 读取 multipart 中唯一的 `file` 字段
async fn read_import_file(
    payload: &mut Multipart,
    max_size: usize,
) -> ActixResult<Result<ImportFile, HttpResponse>> {
    let mut file: Option<ImportFile> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if file.is_some() {
            return Ok(Err(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be imported at a time",
            )));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        let Some(format) = SheetFormat::from_extension(&extension) else {
            return Ok(Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                "Only .xlsx and .csv files can be imported",
            )));
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            if bytes.len() + data.len() > max_size {
                return Ok(Err(bad_request(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            bytes.extend_from_slice(&data);
        }

        file = Some(ImportFile { format, bytes });
    }

    Ok(file.ok_or_else(|| bad_request(ErrorCode::FileNotFound, "No file found in upload payload")))
}

/// 表头之后的数据行（表头为第一个非空行）
fn split_header(rows: Vec<Vec<String>>) -> Option<(Vec<String>, Vec<RawRow>)> {
    let header_index = rows
        .iter()
        .position(|row| row.iter().any(|cell| !cell.trim().is_empty()))?;

    let mut iter = rows.into_iter().enumerate().skip(header_index);
    let (_, header) = iter.next()?;
    let data = iter
        .map(|(index, cells)| RawRow {
            row: index + 1,
            cells,
        })
        .collect();
    Some((header, data))
}

/// 带行号的原始单元格
struct RawRow {
    row: usize,
    cells: Vec<String>,
}

/// 预加载文件中出现的学生与课程
async fn load_directory(
    storage: &dyn Storage,
    rows: &[RawGradeRow],
) -> crate::errors::Result<ImportDirectory> {
    let numbers: Vec<String> = rows
        .iter()
        .map(|r| r.student_number.clone())
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let codes: Vec<String> = rows
        .iter()
        .map(|r| r.course_code.to_uppercase())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(ImportDirectory {
        students: storage.find_student_ids_by_numbers(&numbers).await?,
        courses: storage.find_course_ids_by_codes(&codes).await?,
    })
}

/// 写入单条记录的结果
enum WriteOutcome {
    Created,
    Updated,
    Skipped,
}

async fn write_record(
    storage: &dyn Storage,
    record: ValidatedGradeRow,
    overwrite: bool,
    recorded_by: Option<i64>,
) -> crate::errors::Result<WriteOutcome> {
    let input = GradeInput {
        student_id: record.student_id,
        course_id: record.course_id,
        scores: record.scores,
        computed: record.computed,
        academic_year: record.academic_year,
        semester: record.semester,
        notes: None,
        recorded_by,
    };

    match storage.find_grade_by_key(&input.key()).await? {
        Some(existing) if overwrite => {
            let notes = existing.notes.clone();
            storage
                .update_grade(existing.id, GradeInput { notes, ..input })
                .await?;
            Ok(WriteOutcome::Updated)
        }
        Some(_) => Ok(WriteOutcome::Skipped),
        None => {
            storage.create_grade(input).await?;
            Ok(WriteOutcome::Created)
        }
    }
}

pub async fn import_grades(
    service: &GradeService,
    params: GradeImportParams,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let overwrite = params.overwrite.unwrap_or(false);

    let file = match read_import_file(&mut payload, config.upload.max_size).await? {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let rows = match read_rows(file.format, &file.bytes) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("Failed to parse import file: {}", e);
            return Ok(bad_request(
                ErrorCode::ImportFileParseFailed,
                format!("Failed to parse file: {}", e.message()),
            ));
        }
    };

    let Some((header, data_rows)) = split_header(rows) else {
        return Ok(bad_request(ErrorCode::ImportFileParseFailed, "File is empty"));
    };

    let columns = match ColumnMap::resolve(&header) {
        Ok(columns) => columns,
        Err(missing) => {
            return Ok(bad_request(
                ErrorCode::ImportFileMissingColumn,
                format!("Missing required column: {missing}"),
            ));
        }
    };

    let raw_rows: Vec<RawGradeRow> = data_rows
        .iter()
        .map(|r| columns.extract(r.row, &r.cells))
        .filter(|r| !r.is_blank())
        .collect();

    if raw_rows.is_empty() {
        return Ok(bad_request(ErrorCode::ImportFileDataInvalid, "File contains no grade rows"));
    }
    if raw_rows.len() > config.grading.max_import_rows {
        return Ok(bad_request(
            ErrorCode::ImportFileTooLarge,
            format!(
                "File contains {} rows, the limit is {}",
                raw_rows.len(),
                config.grading.max_import_rows
            ),
        ));
    }

    let storage = service.get_storage(request);
    let directory = match load_directory(storage.as_ref(), &raw_rows).await {
        Ok(directory) => directory,
        Err(e) => {
            tracing::error!("Failed to load import directory: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load students and courses: {}", e.message()),
                )),
            );
        }
    };

    let report = validate_rows(&raw_rows, &service.limits(), &directory);
    let mut response = GradeImportResponse {
        total: raw_rows.len(),
        failed: report.rejected_rows(),
        errors: report.errors,
        ..Default::default()
    };

    let recorded_by = RequireJWT::extract_user_id(request);
    for record in report.records {
        let row = record.row;
        match write_record(storage.as_ref(), record, overwrite, recorded_by).await {
            Ok(WriteOutcome::Created) => response.success += 1,
            Ok(WriteOutcome::Updated) => response.updated += 1,
            Ok(WriteOutcome::Skipped) => {
                response.skipped += 1;
                response.errors.push(ImportRowError::new(
                    row,
                    GradeColumn::StudentNumber.field_name(),
                    "Grade already exists for this term; enable overwrite to replace it",
                ));
            }
            Err(e) => {
                tracing::warn!("Import row {} failed: {}", row, e);
                response.failed += 1;
                response.errors.push(ImportRowError::new(
                    row,
                    GradeColumn::StudentNumber.field_name(),
                    format!("Failed to save grade: {}", e.message()),
                ));
            }
        }
    }
    response.errors.sort_by_key(|e| e.row);

    tracing::info!(
        "Grade import finished: {} rows, {} created, {} updated, {} skipped, {} failed",
        response.total,
        response.success,
        response.updated,
        response.skipped,
        response.failed
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Grade import completed")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ComponentLimits;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::new_course;
    use crate::storage::sea_orm_storage::departments::tests::new_department;
    use crate::storage::sea_orm_storage::students::tests::new_student;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_split_header_skips_leading_blank_rows() {
        let rows = vec![
            cells(&["", ""]),
            cells(&["student_number", "course_code"]),
            cells(&["441001", "CS101"]),
        ];
        let (header, data) = split_header(rows).unwrap();
        assert_eq!(header[0], "student_number");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].row, 3);

        assert!(split_header(vec![cells(&["", " "])]).is_none());
    }

    #[tokio::test]
    async fn test_import_rows_written_sequentially() {
        let storage = SeaOrmStorage::in_memory().await;
        let dept = storage.create_department_impl(new_department("CS")).await.unwrap();
        storage.create_student_impl(new_student("441001", dept.id)).await.unwrap();
        storage.create_student_impl(new_student("441002", dept.id)).await.unwrap();
        storage.create_course_impl(new_course("CS101", dept.id, 3)).await.unwrap();

        let header = cells(&[
            "الرقم الجامعي",
            "رمز المقرر",
            "أعمال السنة",
            "الاختبار النصفي",
            "الاختبار النهائي",
            "العام الأكاديمي",
            "الفصل الدراسي",
        ]);
        let columns = ColumnMap::resolve(&header).unwrap();
        let raw_rows = vec![
            columns.extract(2, &cells(&["441001", "cs101", "25", "28", "35", "2024-2025", "الأول"])),
            columns.extract(3, &cells(&["441002", "CS101", "25", "31", "35", "2024-2025", "first"])),
            columns.extract(4, &cells(&["441002", "CS101", "20", "20", "30", "2024-2025", "second"])),
        ];

        let directory = load_directory(&storage, &raw_rows).await.unwrap();
        let report = validate_rows(&raw_rows, &ComponentLimits::default(), &directory);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 3);

        for record in report.records.clone() {
            let outcome = write_record(&storage, record, false, None).await.unwrap();
            assert!(matches!(outcome, WriteOutcome::Created));
        }

        // 再次导入：未开启覆盖时跳过，开启后更新
        let first = report.records[0].clone();
        let skipped = write_record(&storage, first.clone(), false, None).await.unwrap();
        assert!(matches!(skipped, WriteOutcome::Skipped));
        let updated = write_record(&storage, first.clone(), true, None).await.unwrap();
        assert!(matches!(updated, WriteOutcome::Updated));

        let stored = storage
            .find_grade_by_key_impl(&crate::models::grades::entities::GradeKey {
                student_id: first.student_id,
                course_id: first.course_id,
                academic_year: first.academic_year.clone(),
                semester: first.semester,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total, 88.0);
    }
}
