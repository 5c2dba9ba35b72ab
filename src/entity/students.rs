//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_number: String,
    pub full_name_ar: String,
    pub full_name_en: String,
    pub email: Option<String>,
    pub department_id: i64,
    pub enrollment_year: i32,
    pub level: i32,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Student, StudentStatus};

        Student {
            id: self.id,
            student_number: self.student_number,
            full_name_ar: self.full_name_ar,
            full_name_en: self.full_name_en,
            email: self.email,
            department_id: self.department_id,
            enrollment_year: self.enrollment_year,
            level: self.level,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
