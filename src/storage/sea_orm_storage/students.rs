use std::collections::HashMap;

use super::{LOOKUP_CHUNK, SeaOrmStorage, read_error, write_error};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_number: Set(req.student_number),
            full_name_ar: Set(req.full_name_ar),
            full_name_en: Set(req.full_name_en),
            email: Set(req.email),
            department_id: Set(req.department_id),
            enrollment_year: Set(req.enrollment_year),
            level: Set(req.level),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create student"))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query student"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Students::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::StudentNumber.like(contains_pattern(search)))
                    .add(Column::FullNameAr.like(contains_pattern(search)))
                    .add(Column::FullNameEn.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search))),
            );
        }
        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_asc(Column::StudentNumber)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count students"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list students"))?;

        Ok(StudentListResponse {
            items: items.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(student_number) = update.student_number {
            model.student_number = Set(student_number);
        }
        if let Some(full_name_ar) = update.full_name_ar {
            model.full_name_ar = Set(full_name_ar);
        }
        if let Some(full_name_en) = update.full_name_en {
            model.full_name_en = Set(full_name_en);
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(enrollment_year) = update.enrollment_year {
            model.enrollment_year = Set(enrollment_year);
        }
        if let Some(level) = update.level {
            model.level = Set(level);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update student"))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生，成绩随之级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete student"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_student_ids_by_numbers_impl(
        &self,
        numbers: &[String],
    ) -> Result<HashMap<String, i64>> {
        if numbers.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = HashMap::with_capacity(numbers.len());
        // 分批查询，避免 IN 列表过长
        for chunk in numbers.chunks(LOOKUP_CHUNK) {
            let rows = Students::find()
                .filter(Column::StudentNumber.is_in(chunk.iter().cloned()))
                .all(&self.db)
                .await
                .map_err(|e| read_error(e, "Failed to look up students"))?;
            found.extend(rows.into_iter().map(|m| (m.student_number, m.id)));
        }

        Ok(found)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::departments::tests::new_department;

    pub(crate) fn new_student(number: &str, department_id: i64) -> CreateStudentRequest {
        CreateStudentRequest {
            student_number: number.to_string(),
            full_name_ar: "أحمد علي".to_string(),
            full_name_en: "Ahmed Ali".to_string(),
            email: None,
            department_id,
            enrollment_year: 2023,
            level: 2,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_student_lookup_and_department_usage() {
        let storage = SeaOrmStorage::in_memory().await;
        let dept = storage
            .create_department_impl(new_department("CS"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(new_student("S1001", dept.id))
            .await
            .unwrap();
        assert_eq!(student.status, StudentStatus::Active);

        assert!(storage.department_in_use_impl(dept.id).await.unwrap());

        let ids = storage
            .find_student_ids_by_numbers_impl(&["S1001".to_string(), "S9999".to_string()])
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids["S1001"], student.id);
    }

    #[tokio::test]
    async fn test_unknown_department_is_rejected() {
        let storage = SeaOrmStorage::in_memory().await;
        let result = storage.create_student_impl(new_student("S2000", 42)).await;
        assert!(result.is_err());
    }
}
