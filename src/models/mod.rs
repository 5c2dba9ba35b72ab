//! 业务数据模型
//!
//! 每个领域分为 `entities`（业务实体）、`requests`（请求参数）
//! 和 `responses`（响应结构）三部分。

pub mod auth;
pub mod common;
pub mod content;
pub mod courses;
pub mod departments;
pub mod grades;
pub mod media;
pub mod reports;
pub mod students;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;
use ts_rs::TS;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
///
/// 按千位划分区段：1xxx 通用，2xxx 认证，3xxx 账号，
/// 4xxx 学籍（院系、学生、课程），5xxx 成绩与导入，6xxx 内容与媒体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    Conflict = 1004,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,

    // 认证
    AuthFailed = 2000,
    TokenInvalid = 2001,

    // 账号
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserCreationFailed = 3005,
    UserUpdateFailed = 3006,
    UserDeleteFailed = 3007,
    CanNotDeleteCurrentUser = 3008,

    // 学籍
    DepartmentNotFound = 4000,
    DepartmentAlreadyExists = 4001,
    DepartmentInUse = 4002,
    StudentNotFound = 4100,
    StudentAlreadyExists = 4101,
    StudentDataInvalid = 4102,
    CourseNotFound = 4200,
    CourseAlreadyExists = 4201,
    CourseDataInvalid = 4202,

    // 成绩
    GradeNotFound = 5000,
    GradeAlreadyExists = 5001,
    GradeScoreOutOfRange = 5002,
    GradeTermInvalid = 5003,
    ImportFileParseFailed = 5100,
    ImportFileMissingColumn = 5101,
    ImportFileDataInvalid = 5102,
    ImportFileTooLarge = 5103,
    ExportFailed = 5104,

    // 内容与媒体
    PageNotFound = 6000,
    PageSlugInvalid = 6001,
    PageAlreadyExists = 6002,
    ElementNotFound = 6100,
    ElementKeyAlreadyExists = 6101,
    ElementDataInvalid = 6102,
    ElementOrderInvalid = 6103,
    MediaNotFound = 6200,
    MediaInUse = 6201,
    FileNotFound = 6202,
    FileTypeNotAllowed = 6203,
    FileSizeExceeded = 6204,
    FileUploadFailed = 6205,
    MultifileUploadNotAllowed = 6206,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::GradeScoreOutOfRange as i32, 5002);
        assert_eq!(ErrorCode::MediaInUse as i32, 6201);
    }
}
