//! 成绩存储操作

use std::collections::HashMap;

use super::{LOOKUP_CHUNK, SeaOrmStorage, read_error, write_error};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Model};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::Result;
use crate::grading::Semester;
use crate::models::{
    PaginationInfo,
    grades::{
        entities::{Grade, GradeDetail, GradeInput, GradeKey},
        requests::{GradeFilter, GradeListParams},
        responses::GradeListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set,
};

/// 将筛选条件应用到查询
fn apply_filter(mut select: Select<Grades>, filter: &GradeFilter) -> Select<Grades> {
    if let Some(student_id) = filter.student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    if let Some(course_id) = filter.course_id {
        select = select.filter(Column::CourseId.eq(course_id));
    }
    if let Some(ref year) = filter.academic_year
        && !year.trim().is_empty()
    {
        select = select.filter(Column::AcademicYear.eq(year.trim()));
    }
    if let Some(semester) = filter.semester {
        select = select.filter(Column::Semester.eq(semester.as_str()));
    }
    if let Some(letter) = filter.letter_grade {
        select = select.filter(Column::LetterGrade.eq(letter.as_str()));
    }
    select
}

impl SeaOrmStorage {
    /// 创建成绩，唯一键冲突返回 Conflict
    pub async fn create_grade_impl(&self, input: GradeInput) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(input.student_id),
            course_id: Set(input.course_id),
            coursework: Set(input.scores.coursework),
            midterm: Set(input.scores.midterm),
            final_exam: Set(input.scores.final_exam),
            total: Set(input.computed.total),
            letter_grade: Set(input.computed.letter.to_string()),
            gpa_points: Set(input.computed.gpa_points),
            academic_year: Set(input.academic_year),
            semester: Set(input.semester.to_string()),
            notes: Set(input.notes),
            recorded_by: Set(input.recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create grade"))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query grade"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn find_grade_by_key_impl(&self, key: &GradeKey) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::StudentId.eq(key.student_id))
            .filter(Column::CourseId.eq(key.course_id))
            .filter(Column::AcademicYear.eq(key.academic_year.as_str()))
            .filter(Column::Semester.eq(key.semester.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query grade"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩（附带学生与课程信息）
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListParams,
    ) -> Result<GradeListResponse> {
        let (page, size) = query.pagination.normalized();

        let paginator = apply_filter(Grades::find(), &query.filter)
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count grades"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list grades"))?;

        Ok(GradeListResponse {
            items: self.attach_details(rows).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 不分页列出成绩
    pub async fn list_grade_details_impl(&self, filter: &GradeFilter) -> Result<Vec<GradeDetail>> {
        let rows = apply_filter(Grades::find(), filter)
            .order_by_asc(Column::AcademicYear)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to list grades"))?;

        self.attach_details(rows).await
    }

    /// 批量补充学生与课程信息
    async fn attach_details(&self, rows: Vec<Model>) -> Result<Vec<GradeDetail>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut student_ids: Vec<i64> = rows.iter().map(|g| g.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();
        let mut course_ids: Vec<i64> = rows.iter().map(|g| g.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let mut students = HashMap::with_capacity(student_ids.len());
        for chunk in student_ids.chunks(LOOKUP_CHUNK) {
            let found = Students::find()
                .filter(StudentColumn::Id.is_in(chunk.iter().copied()))
                .all(&self.db)
                .await
                .map_err(|e| read_error(e, "Failed to load grade students"))?;
            students.extend(found.into_iter().map(|s| (s.id, s)));
        }
        let mut courses = HashMap::with_capacity(course_ids.len());
        for chunk in course_ids.chunks(LOOKUP_CHUNK) {
            let found = Courses::find()
                .filter(CourseColumn::Id.is_in(chunk.iter().copied()))
                .all(&self.db)
                .await
                .map_err(|e| read_error(e, "Failed to load grade courses"))?;
            courses.extend(found.into_iter().map(|c| (c.id, c)));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let student = students.get(&row.student_id);
                let course = courses.get(&row.course_id);
                GradeDetail {
                    student_number: student.map(|s| s.student_number.clone()).unwrap_or_default(),
                    student_name_ar: student.map(|s| s.full_name_ar.clone()).unwrap_or_default(),
                    student_name_en: student.map(|s| s.full_name_en.clone()).unwrap_or_default(),
                    course_code: course.map(|c| c.code.clone()).unwrap_or_default(),
                    course_name_ar: course.map(|c| c.name_ar.clone()).unwrap_or_default(),
                    course_name_en: course.map(|c| c.name_en.clone()).unwrap_or_default(),
                    credit_hours: course.map(|c| c.credit_hours).unwrap_or_default(),
                    grade: row.into_grade(),
                }
            })
            .collect())
    }

    /// 覆盖写入成绩的全部可编辑字段
    pub async fn update_grade_impl(&self, id: i64, input: GradeInput) -> Result<Option<Grade>> {
        if Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query grade"))?
            .is_none()
        {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            student_id: Set(input.student_id),
            course_id: Set(input.course_id),
            coursework: Set(input.scores.coursework),
            midterm: Set(input.scores.midterm),
            final_exam: Set(input.scores.final_exam),
            total: Set(input.computed.total),
            letter_grade: Set(input.computed.letter.to_string()),
            gpa_points: Set(input.computed.gpa_points),
            academic_year: Set(input.academic_year),
            semester: Set(input.semester.to_string()),
            notes: Set(input.notes),
            recorded_by: Set(input.recorded_by),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update grade"))?;

        Ok(Some(updated.into_grade()))
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete grade"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_course_grades_impl(
        &self,
        course_id: i64,
        academic_year: Option<&str>,
        semester: Option<Semester>,
    ) -> Result<Vec<Grade>> {
        let mut select = Grades::find().filter(Column::CourseId.eq(course_id));
        if let Some(year) = academic_year {
            select = select.filter(Column::AcademicYear.eq(year));
        }
        if let Some(semester) = semester {
            select = select.filter(Column::Semester.eq(semester.as_str()));
        }

        let rows = select
            .order_by_desc(Column::Total)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to list course grades"))?;

        Ok(rows.into_iter().map(|m| m.into_grade()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortalError;
    use crate::grading::{ComponentScores, LetterGrade};
    use crate::storage::sea_orm_storage::courses::tests::new_course;
    use crate::storage::sea_orm_storage::departments::tests::new_department;
    use crate::storage::sea_orm_storage::students::tests::new_student;

    async fn seeded() -> (SeaOrmStorage, i64, i64) {
        let storage = SeaOrmStorage::in_memory().await;
        let dept = storage
            .create_department_impl(new_department("CS"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(new_student("S1001", dept.id))
            .await
            .unwrap();
        let course = storage
            .create_course_impl(new_course("CS101", dept.id, 3))
            .await
            .unwrap();
        (storage, student.id, course.id)
    }

    fn input(student_id: i64, course_id: i64, scores: ComponentScores) -> GradeInput {
        GradeInput {
            student_id,
            course_id,
            computed: scores.compute(),
            scores,
            academic_year: "2024-2025".to_string(),
            semester: Semester::First,
            notes: None,
            recorded_by: None,
        }
    }

    #[tokio::test]
    async fn test_create_stores_computed_fields() {
        let (storage, student_id, course_id) = seeded().await;
        let scores = ComponentScores {
            coursework: 25.0,
            midterm: 28.0,
            final_exam: 35.0,
        };
        let grade = storage
            .create_grade_impl(input(student_id, course_id, scores))
            .await
            .unwrap();
        assert_eq!(grade.total, 88.0);
        assert_eq!(grade.letter_grade, LetterGrade::BPlus);
        assert_eq!(grade.gpa_points, 3.5);

        let found = storage
            .find_grade_by_key_impl(&GradeKey {
                student_id,
                course_id,
                academic_year: "2024-2025".to_string(),
                semester: Semester::First,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, grade.id);
    }

    #[tokio::test]
    async fn test_duplicate_term_grade_is_conflict() {
        let (storage, student_id, course_id) = seeded().await;
        let scores = ComponentScores {
            coursework: 20.0,
            midterm: 20.0,
            final_exam: 20.0,
        };
        storage
            .create_grade_impl(input(student_id, course_id, scores))
            .await
            .unwrap();
        let err = storage
            .create_grade_impl(input(student_id, course_id, scores))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_attaches_details_and_filters() {
        let (storage, student_id, course_id) = seeded().await;
        let scores = ComponentScores {
            coursework: 10.0,
            midterm: 10.0,
            final_exam: 10.0,
        };
        storage
            .create_grade_impl(input(student_id, course_id, scores))
            .await
            .unwrap();

        let details = storage
            .list_grade_details_impl(&GradeFilter {
                letter_grade: Some(LetterGrade::F),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].student_number, "S1001");
        assert_eq!(details[0].course_code, "CS101");
        assert_eq!(details[0].credit_hours, 3);

        let none = storage
            .list_grade_details_impl(&GradeFilter {
                semester: Some(Semester::Summer),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_student_delete_cascades_grades() {
        let (storage, student_id, course_id) = seeded().await;
        let scores = ComponentScores {
            coursework: 30.0,
            midterm: 30.0,
            final_exam: 40.0,
        };
        let grade = storage
            .create_grade_impl(input(student_id, course_id, scores))
            .await
            .unwrap();
        assert!(storage.delete_student_impl(student_id).await.unwrap());
        assert!(storage.get_grade_by_id_impl(grade.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_resolve_across_lookup_chunks() {
        let (storage, _, course_id) = seeded().await;
        let dept_id = storage
            .get_course_by_id_impl(course_id)
            .await
            .unwrap()
            .unwrap()
            .department_id;

        let count = LOOKUP_CHUNK + 3;
        for i in 0..count {
            let student = storage
                .create_student_impl(new_student(&format!("B{i:05}"), dept_id))
                .await
                .unwrap();
            let scores = ComponentScores {
                coursework: 20.0,
                midterm: 20.0,
                final_exam: 30.0,
            };
            storage
                .create_grade_impl(input(student.id, course_id, scores))
                .await
                .unwrap();
        }

        let details = storage
            .list_grade_details_impl(&GradeFilter::default())
            .await
            .unwrap();
        assert_eq!(details.len(), count);
        assert!(details.iter().all(|d| d.student_number.starts_with('B')));
        assert!(details.iter().all(|d| d.course_code == "CS101"));
    }
}
