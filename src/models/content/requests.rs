use super::entities::{ContentElement, ContentStatus, ElementPayload, ElementType};
use crate::utils::validate::{validate_element_key, validate_required, validate_slug};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct PageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ContentStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CreatePageRequest {
    pub slug: String,
    pub title_ar: String,
    pub title_en: String,
    pub description: Option<String>,
    pub status: Option<ContentStatus>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct UpdatePageRequest {
    pub slug: Option<String>,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub status: Option<ContentStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CreateElementRequest {
    pub element_key: String,
    pub element_type: ElementType,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    pub media_id: Option<i64>,
    pub url: Option<String>,
    pub status: Option<ContentStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct UpdateElementRequest {
    pub element_key: Option<String>,
    pub element_type: Option<ElementType>,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    pub media_id: Option<i64>,
    pub url: Option<String>,
    pub status: Option<ContentStatus>,
    pub sort_order: Option<i32>,
}

// 元素排序：按数组顺序重新编号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ReorderElementsRequest {
    pub element_ids: Vec<i64>,
}

impl CreatePageRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        self.slug = self.slug.trim().to_lowercase();
        validate_slug(&self.slug)?;
        validate_required(&self.title_ar, "title_ar")?;
        validate_required(&self.title_en, "title_en")?;
        Ok(())
    }
}

impl UpdatePageRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        if let Some(slug) = self.slug.as_mut() {
            *slug = slug.trim().to_lowercase();
            validate_slug(slug)?;
        }
        if let Some(title) = &self.title_ar {
            validate_required(title, "title_ar")?;
        }
        if let Some(title) = &self.title_en {
            validate_required(title, "title_en")?;
        }
        Ok(())
    }
}

impl CreateElementRequest {
    pub fn normalize(&mut self) -> Result<(), String> {
        self.element_key = self.element_key.trim().to_string();
        validate_element_key(&self.element_key)?;
        self.element_type.check_payload(&ElementPayload {
            content_ar: self.content_ar.as_deref(),
            content_en: self.content_en.as_deref(),
            media_id: self.media_id,
            url: self.url.as_deref(),
        })
    }
}

impl UpdateElementRequest {
    /// 将更新叠加到现有元素上再做类型校验
    pub fn normalize(&mut self, existing: &ContentElement) -> Result<(), String> {
        if let Some(key) = self.element_key.as_mut() {
            *key = key.trim().to_string();
            validate_element_key(key)?;
        }

        let element_type = self.element_type.unwrap_or(existing.element_type);
        element_type.check_payload(&ElementPayload {
            content_ar: self.content_ar.as_deref().or(existing.content_ar.as_deref()),
            content_en: self.content_en.as_deref().or(existing.content_en.as_deref()),
            media_id: self.media_id.or(existing.media_id),
            url: self.url.as_deref().or(existing.url.as_deref()),
        })
    }
}

impl ReorderElementsRequest {
    /// 列表不能为空且不能包含重复 ID
    pub fn check(&self) -> Result<(), String> {
        if self.element_ids.is_empty() {
            return Err("element_ids must not be empty".to_string());
        }
        let mut seen = std::collections::HashSet::with_capacity(self.element_ids.len());
        if let Some(dup) = self.element_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(format!("Element {dup} appears more than once"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slug_is_lowercased() {
        let mut req = CreatePageRequest {
            slug: " About-Us ".to_string(),
            title_ar: "من نحن".to_string(),
            title_en: "About us".to_string(),
            description: None,
            status: None,
            sort_order: 0,
        };
        req.normalize().unwrap();
        assert_eq!(req.slug, "about-us");

        req.slug = "about us".to_string();
        assert!(req.normalize().is_err());
    }

    #[test]
    fn test_element_update_checked_against_existing() {
        let existing = ContentElement {
            id: 1,
            page_id: 1,
            element_key: "apply".to_string(),
            element_type: ElementType::Text,
            content_ar: None,
            content_en: Some("Apply".to_string()),
            media_id: None,
            url: None,
            status: ContentStatus::Draft,
            sort_order: 0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let mut to_button = UpdateElementRequest {
            element_type: Some(ElementType::Button),
            ..Default::default()
        };
        assert!(to_button.normalize(&existing).is_err());

        let mut with_url = UpdateElementRequest {
            element_type: Some(ElementType::Button),
            url: Some("/admissions".to_string()),
            ..Default::default()
        };
        assert!(with_url.normalize(&existing).is_ok());
    }

    #[test]
    fn test_reorder_rejects_duplicates() {
        let req = ReorderElementsRequest {
            element_ids: vec![3, 1, 3],
        };
        assert!(req.check().unwrap_err().contains('3'));
        assert!(ReorderElementsRequest { element_ids: vec![] }.check().is_err());
        assert!(ReorderElementsRequest { element_ids: vec![2, 1] }.check().is_ok());
    }
}
