//! 成绩录入、批量导入与导出

pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod scale;
pub mod sheet;
pub mod template;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::grading::{ComponentLimits, ComponentScores, Semester, validate_academic_year};
use crate::models::grades::{
    entities::GradeInput,
    requests::{
        CreateGradeRequest, GradeExportParams, GradeImportParams, GradeListParams,
        TemplateParams, UpdateGradeRequest,
    },
};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

/// 录入失败的原因
#[derive(Debug, PartialEq)]
pub(crate) enum GradeInputError {
    Term(String),
    Range(String),
}

/// 校验学期与分项并计算派生字段
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_grade_input(
    limits: &ComponentLimits,
    student_id: i64,
    course_id: i64,
    scores: ComponentScores,
    academic_year: &str,
    semester: Semester,
    notes: Option<String>,
    recorded_by: Option<i64>,
) -> Result<GradeInput, GradeInputError> {
    let academic_year = academic_year.trim();
    validate_academic_year(academic_year).map_err(GradeInputError::Term)?;

    let range_errors = limits.check_all(&scores);
    if !range_errors.is_empty() {
        let message = range_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GradeInputError::Range(message));
    }

    Ok(GradeInput {
        student_id,
        course_id,
        computed: scores.compute(),
        scores,
        academic_year: academic_year.to_string(),
        semester,
        notes: notes.filter(|n| !n.trim().is_empty()),
        recorded_by,
    })
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn limits(&self) -> ComponentLimits {
        ComponentLimits::from(&AppConfig::get().grading)
    }

    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn create_grade(
        &self,
        req: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, req, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_grade(self, id, request).await
    }

    pub async fn update_grade(
        &self,
        id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, id, update, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id, request).await
    }

    pub async fn import_grades(
        &self,
        params: GradeImportParams,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_grades(self, params, payload, request).await
    }

    pub async fn export_grades(
        &self,
        params: GradeExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_grades(self, params, request).await
    }

    pub async fn import_template(&self, params: TemplateParams) -> ActixResult<HttpResponse> {
        template::import_template(params).await
    }

    pub async fn grade_scale(&self) -> ActixResult<HttpResponse> {
        scale::grade_scale(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(coursework: f64, midterm: f64, final_exam: f64) -> ComponentScores {
        ComponentScores {
            coursework,
            midterm,
            final_exam,
        }
    }

    #[test]
    fn test_build_grade_input_recomputes_total() {
        let input = build_grade_input(
            &ComponentLimits::default(),
            1,
            2,
            scores(25.0, 28.0, 35.0),
            " 2024-2025 ",
            Semester::First,
            Some("  ".to_string()),
            Some(9),
        )
        .unwrap();

        assert_eq!(input.computed.total, 88.0);
        assert_eq!(input.academic_year, "2024-2025");
        assert_eq!(input.notes, None);
    }

    #[test]
    fn test_build_grade_input_rejects_bad_values() {
        let limits = ComponentLimits::default();
        let out_of_range = build_grade_input(
            &limits,
            1,
            2,
            scores(25.0, 31.0, 35.0),
            "2024-2025",
            Semester::Second,
            None,
            None,
        );
        assert!(
            matches!(out_of_range, Err(GradeInputError::Range(msg)) if msg.contains("midterm"))
        );

        let bad_year = build_grade_input(
            &limits,
            1,
            2,
            scores(25.0, 28.0, 35.0),
            "2024-2026",
            Semester::Summer,
            None,
            None,
        );
        assert!(matches!(bad_year, Err(GradeInputError::Term(_))));
    }

    #[test]
    fn test_blank_note_on_update_clears_existing_note() {
        let existing = Some("Absent from midterm".to_string());
        let input = build_grade_input(
            &ComponentLimits::default(),
            1,
            2,
            scores(20.0, 20.0, 30.0),
            "2024-2025",
            Semester::First,
            Some(String::new()).or(existing.clone()),
            None,
        )
        .unwrap();
        assert_eq!(input.notes, None);

        let kept = build_grade_input(
            &ComponentLimits::default(),
            1,
            2,
            scores(20.0, 20.0, 30.0),
            "2024-2025",
            Semester::First,
            None.or(existing),
            None,
        )
        .unwrap();
        assert_eq!(kept.notes.as_deref(), Some("Absent from midterm"));
    }
}
