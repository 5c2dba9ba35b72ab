use std::collections::HashMap;
use std::sync::Arc;

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

use crate::errors::Result;
use crate::grading::Semester;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号（password 字段须为哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取账号（登录用）
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 院系管理方法
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListParams,
    ) -> Result<DepartmentListResponse>;
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;
    // 院系是否仍被学生或课程引用
    async fn department_in_use(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 按学号批量查找学生 ID（导入用）
    async fn find_student_ids_by_numbers(
        &self,
        numbers: &[String],
    ) -> Result<HashMap<String, i64>>;

    /// 课程管理方法
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest)
    -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 按课程代码批量查找课程 ID（导入用）
    async fn find_course_ids_by_codes(&self, codes: &[String]) -> Result<HashMap<String, i64>>;

    /// 成绩管理方法
    // 唯一键冲突时返回 Conflict 错误
    async fn create_grade(&self, input: GradeInput) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn find_grade_by_key(&self, key: &GradeKey) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListParams)
    -> Result<GradeListResponse>;
    // 按筛选条件列出全部成绩（导出用）
    async fn list_grade_details(&self, filter: &GradeFilter) -> Result<Vec<GradeDetail>>;
    async fn update_grade(&self, id: i64, input: GradeInput) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;
    async fn list_course_grades(
        &self,
        course_id: i64,
        academic_year: Option<&str>,
        semester: Option<Semester>,
    ) -> Result<Vec<Grade>>;

    /// 内容页面方法
    async fn create_page(&self, req: CreatePageRequest) -> Result<ContentPage>;
    async fn get_page_by_id(&self, id: i64) -> Result<Option<ContentPage>>;
    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<ContentPage>>;
    async fn list_pages_with_pagination(&self, query: PageListParams)
    -> Result<PageListResponse>;
    async fn update_page(&self, id: i64, update: UpdatePageRequest)
    -> Result<Option<ContentPage>>;
    // 删除页面，元素随之级联删除
    async fn delete_page(&self, id: i64) -> Result<bool>;

    /// 页面元素方法
    async fn list_page_elements(
        &self,
        page_id: i64,
        published_only: bool,
    ) -> Result<Vec<ContentElement>>;
    async fn create_element(
        &self,
        page_id: i64,
        req: CreateElementRequest,
    ) -> Result<ContentElement>;
    async fn get_element(&self, page_id: i64, element_id: i64) -> Result<Option<ContentElement>>;
    async fn update_element(
        &self,
        element_id: i64,
        update: UpdateElementRequest,
    ) -> Result<Option<ContentElement>>;
    async fn delete_element(&self, element_id: i64) -> Result<bool>;
    // 按给定顺序重写 sort_order
    async fn reorder_elements(&self, page_id: i64, element_ids: &[i64]) -> Result<()>;

    /// 媒体管理方法
    async fn create_media(&self, item: NewMediaItem) -> Result<MediaItem>;
    async fn get_media_by_id(&self, id: i64) -> Result<Option<MediaItem>>;
    async fn list_media_with_pagination(&self, query: MediaListParams)
    -> Result<MediaListResponse>;
    async fn update_media(&self, id: i64, update: UpdateMediaRequest)
    -> Result<Option<MediaItem>>;
    async fn delete_media(&self, id: i64) -> Result<bool>;
    // 媒体是否仍被页面元素引用
    async fn media_in_use(&self, id: i64) -> Result<bool>;

    /// 统计
    async fn dashboard_counts(&self) -> Result<DashboardResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
