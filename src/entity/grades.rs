//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub coursework: f64,
    pub midterm: f64,
    pub final_exam: f64,
    pub total: f64,
    pub letter_grade: String,
    pub gpa_points: f64,
    pub academic_year: String,
    pub semester: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 等级以存储值为准；无法识别时按总分重新计算
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::grading::{LetterGrade, Semester, score_total};

        let letter_grade = self
            .letter_grade
            .parse::<LetterGrade>()
            .unwrap_or_else(|_| score_total(self.total).letter);

        crate::models::grades::entities::Grade {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            coursework: self.coursework,
            midterm: self.midterm,
            final_exam: self.final_exam,
            total: self.total,
            letter_grade,
            gpa_points: self.gpa_points,
            academic_year: self.academic_year,
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::First),
            notes: self.notes,
            recorded_by: self.recorded_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
