//! 仪表盘统计

use super::{SeaOrmStorage, read_error};
use crate::entity::prelude::*;
use crate::entity::{content_pages, students};
use crate::errors::Result;
use crate::models::{
    content::entities::ContentStatus, reports::responses::DashboardResponse,
    students::entities::StudentStatus,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    pub async fn dashboard_counts_impl(&self) -> Result<DashboardResponse> {
        let err = |e| read_error(e, "Failed to collect dashboard counts");

        Ok(DashboardResponse {
            departments: Departments::find().count(&self.db).await.map_err(err)?,
            students: Students::find().count(&self.db).await.map_err(err)?,
            active_students: Students::find()
                .filter(students::Column::Status.eq(StudentStatus::Active.to_string()))
                .count(&self.db)
                .await
                .map_err(err)?,
            courses: Courses::find().count(&self.db).await.map_err(err)?,
            grades: Grades::find().count(&self.db).await.map_err(err)?,
            content_pages: ContentPages::find().count(&self.db).await.map_err(err)?,
            published_pages: ContentPages::find()
                .filter(content_pages::Column::Status.eq(ContentStatus::Published.to_string()))
                .count(&self.db)
                .await
                .map_err(err)?,
            media_items: MediaItems::find().count(&self.db).await.map_err(err)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::departments::tests::new_department;
    use crate::storage::sea_orm_storage::students::tests::new_student;

    #[tokio::test]
    async fn test_dashboard_counts() {
        let storage = SeaOrmStorage::in_memory().await;
        let empty = storage.dashboard_counts_impl().await.unwrap();
        assert_eq!(empty.students, 0);

        let dept = storage
            .create_department_impl(new_department("CS"))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student("S1", dept.id))
            .await
            .unwrap();
        let mut graduated = new_student("S2", dept.id);
        graduated.status = Some(StudentStatus::Graduated);
        storage.create_student_impl(graduated).await.unwrap();

        let counts = storage.dashboard_counts_impl().await.unwrap();
        assert_eq!(counts.departments, 1);
        assert_eq!(counts.students, 2);
        assert_eq!(counts.active_students, 1);
        assert_eq!(counts.published_pages, 0);
    }
}
