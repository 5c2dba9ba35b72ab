//! 内容页面与页面元素存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::content_elements::{
    ActiveModel as ElementActiveModel, Column as ElementColumn, Entity as ContentElements,
};
use crate::entity::content_pages::{ActiveModel, Column, Entity as ContentPages};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    content::{
        entities::{ContentElement, ContentPage, ContentStatus},
        requests::{
            CreateElementRequest, CreatePageRequest, PageListParams, UpdateElementRequest,
            UpdatePageRequest,
        },
        responses::PageListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_page_impl(&self, req: CreatePageRequest) -> Result<ContentPage> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            slug: Set(req.slug),
            title_ar: Set(req.title_ar),
            title_en: Set(req.title_en),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(ContentStatus::Draft).to_string()),
            sort_order: Set(req.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create page"))?;

        Ok(result.into_page())
    }

    pub async fn get_page_by_id_impl(&self, id: i64) -> Result<Option<ContentPage>> {
        let result = ContentPages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query page"))?;

        Ok(result.map(|m| m.into_page()))
    }

    pub async fn get_page_by_slug_impl(&self, slug: &str) -> Result<Option<ContentPage>> {
        let result = ContentPages::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query page"))?;

        Ok(result.map(|m| m.into_page()))
    }

    pub async fn list_pages_with_pagination_impl(
        &self,
        query: PageListParams,
    ) -> Result<PageListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = ContentPages::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Slug.like(contains_pattern(search)))
                    .add(Column::TitleAr.like(contains_pattern(search)))
                    .add(Column::TitleEn.like(contains_pattern(search))),
            );
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count pages"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list pages"))?;

        Ok(PageListResponse {
            items: items.into_iter().map(|m| m.into_page()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_page_impl(
        &self,
        id: i64,
        update: UpdatePageRequest,
    ) -> Result<Option<ContentPage>> {
        if self.get_page_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(slug) = update.slug {
            model.slug = Set(slug);
        }
        if let Some(title_ar) = update.title_ar {
            model.title_ar = Set(title_ar);
        }
        if let Some(title_en) = update.title_en {
            model.title_en = Set(title_en);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(sort_order) = update.sort_order {
            model.sort_order = Set(sort_order);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update page"))?;

        self.get_page_by_id_impl(id).await
    }

    pub async fn delete_page_impl(&self, id: i64) -> Result<bool> {
        let result = ContentPages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete page"))?;

        Ok(result.rows_affected > 0)
    }

    // ==================== 页面元素 ====================

    pub async fn list_page_elements_impl(
        &self,
        page_id: i64,
        published_only: bool,
    ) -> Result<Vec<ContentElement>> {
        let mut select = ContentElements::find().filter(ElementColumn::PageId.eq(page_id));
        if published_only {
            select =
                select.filter(ElementColumn::Status.eq(ContentStatus::Published.to_string()));
        }

        let rows = select
            .order_by_asc(ElementColumn::SortOrder)
            .order_by_asc(ElementColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to list page elements"))?;

        Ok(rows.into_iter().map(|m| m.into_element()).collect())
    }

    /// 创建元素，未指定 sort_order 时追加到末尾
    pub async fn create_element_impl(
        &self,
        page_id: i64,
        req: CreateElementRequest,
    ) -> Result<ContentElement> {
        let now = chrono::Utc::now().timestamp();

        let sort_order = match req.sort_order {
            Some(order) => order,
            None => {
                let max: Option<Option<i32>> = ContentElements::find()
                    .select_only()
                    .column_as(ElementColumn::SortOrder.max(), "max_order")
                    .filter(ElementColumn::PageId.eq(page_id))
                    .into_tuple()
                    .one(&self.db)
                    .await
                    .map_err(|e| read_error(e, "Failed to query element order"))?;
                max.flatten().map(|m| m + 1).unwrap_or(0)
            }
        };

        let model = ElementActiveModel {
            page_id: Set(page_id),
            element_key: Set(req.element_key),
            element_type: Set(req.element_type.to_string()),
            content_ar: Set(req.content_ar),
            content_en: Set(req.content_en),
            media_id: Set(req.media_id),
            url: Set(req.url),
            status: Set(req.status.unwrap_or(ContentStatus::Draft).to_string()),
            sort_order: Set(sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create element"))?;

        Ok(result.into_element())
    }

    pub async fn get_element_impl(
        &self,
        page_id: i64,
        element_id: i64,
    ) -> Result<Option<ContentElement>> {
        let result = ContentElements::find_by_id(element_id)
            .filter(ElementColumn::PageId.eq(page_id))
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query element"))?;

        Ok(result.map(|m| m.into_element()))
    }

    pub async fn update_element_impl(
        &self,
        element_id: i64,
        update: UpdateElementRequest,
    ) -> Result<Option<ContentElement>> {
        let Some(existing) = ContentElements::find_by_id(element_id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query element"))?
        else {
            return Ok(None);
        };

        let mut model = ElementActiveModel {
            id: Set(element_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(element_key) = update.element_key {
            model.element_key = Set(element_key);
        }
        if let Some(element_type) = update.element_type {
            model.element_type = Set(element_type.to_string());
        }
        if let Some(content_ar) = update.content_ar {
            model.content_ar = Set(Some(content_ar));
        }
        if let Some(content_en) = update.content_en {
            model.content_en = Set(Some(content_en));
        }
        if let Some(media_id) = update.media_id {
            model.media_id = Set(Some(media_id));
        }
        if let Some(url) = update.url {
            model.url = Set(Some(url));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(sort_order) = update.sort_order {
            model.sort_order = Set(sort_order);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update element"))?;

        self.get_element_impl(existing.page_id, element_id).await
    }

    pub async fn delete_element_impl(&self, element_id: i64) -> Result<bool> {
        let result = ContentElements::delete_by_id(element_id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete element"))?;

        Ok(result.rows_affected > 0)
    }

    /// 在事务中按给定顺序重写 sort_order
    pub async fn reorder_elements_impl(&self, page_id: i64, element_ids: &[i64]) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| read_error(e, "Failed to start transaction"))?;

        let now = chrono::Utc::now().timestamp();
        for (index, element_id) in element_ids.iter().enumerate() {
            let result = ContentElements::update_many()
                .col_expr(
                    ElementColumn::SortOrder,
                    sea_orm::sea_query::Expr::value(index as i32),
                )
                .col_expr(ElementColumn::UpdatedAt, sea_orm::sea_query::Expr::value(now))
                .filter(ElementColumn::Id.eq(*element_id))
                .filter(ElementColumn::PageId.eq(page_id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(e, "Failed to reorder elements"))?;

            if result.rows_affected == 0 {
                return Err(PortalError::validation(format!(
                    "Element {element_id} does not belong to page {page_id}"
                )));
            }
        }

        txn.commit()
            .await
            .map_err(|e| write_error(e, "Failed to commit element order"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::entities::ElementType;

    fn new_page(slug: &str) -> CreatePageRequest {
        CreatePageRequest {
            slug: slug.to_string(),
            title_ar: "عن الجامعة".to_string(),
            title_en: "About".to_string(),
            description: None,
            status: Some(ContentStatus::Published),
            sort_order: 0,
        }
    }

    fn text_element(key: &str, status: ContentStatus) -> CreateElementRequest {
        CreateElementRequest {
            element_key: key.to_string(),
            element_type: ElementType::Text,
            content_ar: Some("نص".to_string()),
            content_en: Some("Text".to_string()),
            media_id: None,
            url: None,
            status: Some(status),
            sort_order: None,
        }
    }

    #[tokio::test]
    async fn test_elements_append_and_reorder() {
        let storage = SeaOrmStorage::in_memory().await;
        let page = storage.create_page_impl(new_page("about")).await.unwrap();

        let a = storage
            .create_element_impl(page.id, text_element("intro", ContentStatus::Published))
            .await
            .unwrap();
        let b = storage
            .create_element_impl(page.id, text_element("body", ContentStatus::Draft))
            .await
            .unwrap();
        assert_eq!(a.sort_order, 0);
        assert_eq!(b.sort_order, 1);

        storage
            .reorder_elements_impl(page.id, &[b.id, a.id])
            .await
            .unwrap();
        let elements = storage.list_page_elements_impl(page.id, false).await.unwrap();
        let keys: Vec<_> = elements.iter().map(|e| e.element_key.as_str()).collect();
        assert_eq!(keys, vec!["body", "intro"]);

        let published = storage.list_page_elements_impl(page.id, true).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].element_key, "intro");
    }

    #[tokio::test]
    async fn test_reorder_rejects_foreign_element() {
        let storage = SeaOrmStorage::in_memory().await;
        let page = storage.create_page_impl(new_page("news")).await.unwrap();
        let other = storage.create_page_impl(new_page("events")).await.unwrap();
        let foreign = storage
            .create_element_impl(other.id, text_element("intro", ContentStatus::Draft))
            .await
            .unwrap();
        let own = storage
            .create_element_impl(page.id, text_element("intro", ContentStatus::Draft))
            .await
            .unwrap();

        let err = storage
            .reorder_elements_impl(page.id, &[foreign.id, own.id])
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_page_delete_cascades_elements() {
        let storage = SeaOrmStorage::in_memory().await;
        let page = storage.create_page_impl(new_page("admissions")).await.unwrap();
        let element = storage
            .create_element_impl(page.id, text_element("intro", ContentStatus::Draft))
            .await
            .unwrap();

        assert!(storage.delete_page_impl(page.id).await.unwrap());
        assert!(
            storage
                .get_element_impl(page.id, element.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
