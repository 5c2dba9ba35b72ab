//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

pub(crate) mod content;
pub(crate) mod courses;
pub(crate) mod departments;
pub(crate) mod grades;
pub(crate) mod media;
pub(crate) mod stats;
pub(crate) mod students;
pub(crate) mod users;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;
        let storage =
            Self::connect(&db_url, config.database.pool_size, config.database.timeout).await?;
        info!("SeaORM storage initialized, database: {}", db_url);
        Ok(storage)
    }

    /// 连接数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db = if url.starts_with("sqlite:") {
            Self::connect_sqlite(url, pool_size, timeout).await?
        } else {
            Self::connect_generic(url, pool_size, timeout).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("Migration failed: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化，开启外键约束）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| {
                PortalError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| {
                PortalError::database_connection(format!("Database connection failed: {e}"))
            })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }

    /// 内存 SQLite，仅用于测试
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        Self::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory sqlite should open")
    }
}

/// IN 查询单批参数数量上限
pub(crate) const LOOKUP_CHUNK: usize = 500;

/// 写操作错误映射：唯一约束冲突转为 Conflict，外键约束转为 Validation
pub(crate) fn write_error(err: DbErr, context: &str) -> PortalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            PortalError::conflict(format!("{context}: {msg}"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            PortalError::validation(format!("{context}: {msg}"))
        }
        _ => PortalError::database_operation(format!("{context}: {err}")),
    }
}

/// 查询错误映射
pub(crate) fn read_error(err: DbErr, context: &str) -> PortalError {
    PortalError::database_operation(format!("{context}: {err}"))
}

// Storage trait 实现
use crate::grading::Semester;
use crate::models::{
    content::{
        entities::{ContentElement, ContentPage},
        requests::{
            CreateElementRequest, CreatePageRequest, PageListParams, UpdateElementRequest,
            UpdatePageRequest,
        },
        responses::PageListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
    grades::{
        entities::{Grade, GradeDetail, GradeInput, GradeKey},
        requests::{GradeFilter, GradeListParams},
        responses::GradeListResponse,
    },
    media::{
        entities::MediaItem,
        requests::{MediaListParams, NewMediaItem, UpdateMediaRequest},
        responses::MediaListResponse,
    },
    reports::responses::DashboardResponse,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListParams},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 院系模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListParams,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    async fn department_in_use(&self, id: i64) -> Result<bool> {
        self.department_in_use_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn find_student_ids_by_numbers(
        &self,
        numbers: &[String],
    ) -> Result<HashMap<String, i64>> {
        self.find_student_ids_by_numbers_impl(numbers).await
    }

    // 课程模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn find_course_ids_by_codes(&self, codes: &[String]) -> Result<HashMap<String, i64>> {
        self.find_course_ids_by_codes_impl(codes).await
    }

    // 成绩模块
    async fn create_grade(&self, input: GradeInput) -> Result<Grade> {
        self.create_grade_impl(input).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn find_grade_by_key(&self, key: &GradeKey) -> Result<Option<Grade>> {
        self.find_grade_by_key_impl(key).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListParams,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_grade_details(&self, filter: &GradeFilter) -> Result<Vec<GradeDetail>> {
        self.list_grade_details_impl(filter).await
    }

    async fn update_grade(&self, id: i64, input: GradeInput) -> Result<Option<Grade>> {
        self.update_grade_impl(id, input).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    async fn list_course_grades(
        &self,
        course_id: i64,
        academic_year: Option<&str>,
        semester: Option<Semester>,
    ) -> Result<Vec<Grade>> {
        self.list_course_grades_impl(course_id, academic_year, semester)
            .await
    }

    // 内容页面模块
    async fn create_page(&self, req: CreatePageRequest) -> Result<ContentPage> {
        self.create_page_impl(req).await
    }

    async fn get_page_by_id(&self, id: i64) -> Result<Option<ContentPage>> {
        self.get_page_by_id_impl(id).await
    }

    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<ContentPage>> {
        self.get_page_by_slug_impl(slug).await
    }

    async fn list_pages_with_pagination(
        &self,
        query: PageListParams,
    ) -> Result<PageListResponse> {
        self.list_pages_with_pagination_impl(query).await
    }

    async fn update_page(
        &self,
        id: i64,
        update: UpdatePageRequest,
    ) -> Result<Option<ContentPage>> {
        self.update_page_impl(id, update).await
    }

    async fn delete_page(&self, id: i64) -> Result<bool> {
        self.delete_page_impl(id).await
    }

    // 页面元素模块
    async fn list_page_elements(
        &self,
        page_id: i64,
        published_only: bool,
    ) -> Result<Vec<ContentElement>> {
        self.list_page_elements_impl(page_id, published_only).await
    }

    async fn create_element(
        &self,
        page_id: i64,
        req: CreateElementRequest,
    ) -> Result<ContentElement> {
        self.create_element_impl(page_id, req).await
    }

    async fn get_element(&self, page_id: i64, element_id: i64) -> Result<Option<ContentElement>> {
        self.get_element_impl(page_id, element_id).await
    }

    async fn update_element(
        &self,
        element_id: i64,
        update: UpdateElementRequest,
    ) -> Result<Option<ContentElement>> {
        self.update_element_impl(element_id, update).await
    }

    async fn delete_element(&self, element_id: i64) -> Result<bool> {
        self.delete_element_impl(element_id).await
    }

    async fn reorder_elements(&self, page_id: i64, element_ids: &[i64]) -> Result<()> {
        self.reorder_elements_impl(page_id, element_ids).await
    }

    // 媒体模块
    async fn create_media(&self, item: NewMediaItem) -> Result<MediaItem> {
        self.create_media_impl(item).await
    }

    async fn get_media_by_id(&self, id: i64) -> Result<Option<MediaItem>> {
        self.get_media_by_id_impl(id).await
    }

    async fn list_media_with_pagination(
        &self,
        query: MediaListParams,
    ) -> Result<MediaListResponse> {
        self.list_media_with_pagination_impl(query).await
    }

    async fn update_media(
        &self,
        id: i64,
        update: UpdateMediaRequest,
    ) -> Result<Option<MediaItem>> {
        self.update_media_impl(id, update).await
    }

    async fn delete_media(&self, id: i64) -> Result<bool> {
        self.delete_media_impl(id).await
    }

    async fn media_in_use(&self, id: i64) -> Result<bool> {
        self.media_in_use_impl(id).await
    }

    // 统计
    async fn dashboard_counts(&self) -> Result<DashboardResponse> {
        self.dashboard_counts_impl().await
    }
}
