use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name_ar: Set(req.name_ar),
            name_en: Set(req.name_en),
            description: Set(req.description),
            head_name: Set(req.head_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create department"))?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query department"))?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListParams,
    ) -> Result<DepartmentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Departments::find();

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

        let paginator = select.order_by_asc(Column::Code).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count departments"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list departments"))?;

        Ok(DepartmentListResponse {
            items: items.into_iter().map(|m| m.into_department()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_department_impl(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        if self.get_department_by_id_impl(id).await?.is_none() {
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
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(head_name) = update.head_name {
            model.head_name = Set(Some(head_name));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update department"))?;

        self.get_department_by_id_impl(id).await
    }

    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete department"))?;

        Ok(result.rows_affected > 0)
    }

    /// 是否有学生或课程挂在该院系下
    pub async fn department_in_use_impl(&self, id: i64) -> Result<bool> {
        let students = Students::find()
            .filter(StudentColumn::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to count department students"))?;
        if students > 0 {
            return Ok(true);
        }

        let courses = Courses::find()
            .filter(CourseColumn::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to count department courses"))?;

        Ok(courses > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::PortalError;

    pub(crate) fn new_department(code: &str) -> CreateDepartmentRequest {
        CreateDepartmentRequest {
            code: code.to_string(),
            name_ar: "علوم الحاسب".to_string(),
            name_en: "Computer Science".to_string(),
            description: None,
            head_name: None,
        }
    }

    #[tokio::test]
    async fn test_department_crud() {
        let storage = SeaOrmStorage::in_memory().await;
        let dept = storage
            .create_department_impl(new_department("CS"))
            .await
            .unwrap();
        assert_eq!(dept.code, "CS");

        let updated = storage
            .update_department_impl(
                dept.id,
                UpdateDepartmentRequest {
                    head_name: Some("Dr. Salem".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.head_name.as_deref(), Some("Dr. Salem"));
        assert_eq!(updated.name_en, "Computer Science");

        assert!(!storage.department_in_use_impl(dept.id).await.unwrap());
        assert!(storage.delete_department_impl(dept.id).await.unwrap());
        assert!(
            storage
                .get_department_by_id_impl(dept.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_code_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_department_impl(new_department("MATH"))
            .await
            .unwrap();
        let err = storage
            .create_department_impl(new_department("MATH"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }
}
