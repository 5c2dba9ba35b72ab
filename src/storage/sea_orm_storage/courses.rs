use std::collections::HashMap;

use super::{LOOKUP_CHUNK, SeaOrmStorage, read_error, write_error};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name_ar: Set(req.name_ar),
            name_en: Set(req.name_en),
            department_id: Set(req.department_id),
            credit_hours: Set(req.credit_hours),
            level: Set(req.level),
            description: Set(req.description),
            is_active: Set(req.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create course"))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query course"))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.like(contains_pattern(search)))
                    .add(Column::NameAr.like(contains_pattern(search)))
                    .add(Column::NameEn.like(contains_pattern(search))),
            );
        }
        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        let paginator = select.order_by_asc(Column::Code).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count courses"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list courses"))?;

        Ok(CourseListResponse {
            items: items.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name_ar) = update.name_ar {
            model.name_ar = Set(name_ar);
        }
        if let Some(name_en) = update.name_en {
            model.name_en = Set(name_en);
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(credit_hours) = update.credit_hours {
            model.credit_hours = Set(credit_hours);
        }
        if let Some(level) = update.level {
            model.level = Set(level);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update course"))?;

        self.get_course_by_id_impl(id).await
    }

    /// 删除课程，成绩随之级联删除
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete course"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_course_ids_by_codes_impl(
        &self,
        codes: &[String],
    ) -> Result<HashMap<String, i64>> {
        if codes.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = HashMap::with_capacity(codes.len());
        for chunk in codes.chunks(LOOKUP_CHUNK) {
            let rows = Courses::find()
                .filter(Column::Code.is_in(chunk.iter().cloned()))
                .all(&self.db)
                .await
                .map_err(|e| read_error(e, "Failed to look up courses"))?;
            found.extend(rows.into_iter().map(|m| (m.code, m.id)));
        }

        Ok(found)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::departments::tests::new_department;

    pub(crate) fn new_course(
        code: &str,
        department_id: i64,
        credit_hours: i32,
    ) -> CreateCourseRequest {
        CreateCourseRequest {
            code: code.to_string(),
            name_ar: "مقدمة في البرمجة".to_string(),
            name_en: "Introduction to Programming".to_string(),
            department_id,
            credit_hours,
            level: 1,
            description: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_course_filters() {
        let storage = SeaOrmStorage::in_memory().await;
        let dept = storage
            .create_department_impl(new_department("CS"))
            .await
            .unwrap();
        storage
            .create_course_impl(new_course("CS101", dept.id, 3))
            .await
            .unwrap();
        let inactive = storage
            .create_course_impl(new_course("CS_OLD", dept.id, 2))
            .await
            .unwrap();
        storage
            .update_course_impl(
                inactive.id,
                UpdateCourseRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let active = storage
            .list_courses_with_pagination_impl(CourseListParams {
                pagination: Default::default(),
                department_id: Some(dept.id),
                level: None,
                is_active: Some(true),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0].code, "CS101");

        // 下划线按字面匹配
        let searched = storage
            .list_courses_with_pagination_impl(CourseListParams {
                pagination: Default::default(),
                department_id: None,
                level: None,
                is_active: None,
                search: Some("_OLD".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].id, inactive.id);
    }
}
