use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::content_elements::{Column as ElementColumn, Entity as ContentElements};
use crate::entity::media_items::{ActiveModel, Column, Entity as MediaItems};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    media::{
        entities::MediaItem,
        requests::{MediaListParams, NewMediaItem, UpdateMediaRequest},
        responses::MediaListResponse,
    },
};
use crate::utils::{contains_pattern, escape_like_pattern};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::LikeExpr,
};

impl SeaOrmStorage {
    pub async fn create_media_impl(&self, item: NewMediaItem) -> Result<MediaItem> {
        let model = ActiveModel {
            original_name: Set(item.original_name),
            stored_name: Set(item.stored_name),
            mime_type: Set(item.mime_type),
            file_size: Set(item.file_size),
            alt_ar: Set(None),
            alt_en: Set(None),
            uploaded_by: Set(item.uploaded_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create media item"))?;

        Ok(result.into_media_item())
    }

    pub async fn get_media_by_id_impl(&self, id: i64) -> Result<Option<MediaItem>> {
        let result = MediaItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query media item"))?;

        Ok(result.map(|m| m.into_media_item()))
    }

    pub async fn list_media_with_pagination_impl(
        &self,
        query: MediaListParams,
    ) -> Result<MediaListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = MediaItems::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::OriginalName.like(contains_pattern(search)))
                    .add(Column::AltAr.like(contains_pattern(search)))
                    .add(Column::AltEn.like(contains_pattern(search))),
            );
        }
        if let Some(ref mime) = query.mime_type
            && !mime.trim().is_empty()
        {
            let prefix = format!("{}%", escape_like_pattern(mime.trim()));
            select = select.filter(Column::MimeType.like(LikeExpr::new(prefix).escape('\\')));
        }

        let paginator = select.order_by_desc(Column::Id).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count media items"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list media items"))?;

        Ok(MediaListResponse {
            items: items
                .into_iter()
                .map(|m| m.into_media_item().into())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_media_impl(
        &self,
        id: i64,
        update: UpdateMediaRequest,
    ) -> Result<Option<MediaItem>> {
        if self.get_media_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(alt_ar) = update.alt_ar {
            model.alt_ar = Set(Some(alt_ar));
        }
        if let Some(alt_en) = update.alt_en {
            model.alt_en = Set(Some(alt_en));
        }
        if !model.is_changed() {
            return self.get_media_by_id_impl(id).await;
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update media item"))?;

        self.get_media_by_id_impl(id).await
    }

    pub async fn delete_media_impl(&self, id: i64) -> Result<bool> {
        let result = MediaItems::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete media item"))?;

        Ok(result.rows_affected > 0)
    }

    /// 是否有页面元素引用该媒体
    pub async fn media_in_use_impl(&self, id: i64) -> Result<bool> {
        let count = ContentElements::find()
            .filter(ElementColumn::MediaId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to count media references"))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::content::{
        entities::{ContentStatus, ElementType},
        requests::{CreateElementRequest, CreatePageRequest},
    };

    fn new_media(name: &str, mime: &str) -> NewMediaItem {
        NewMediaItem {
            original_name: name.to_string(),
            stored_name: format!("{name}.bin"),
            mime_type: mime.to_string(),
            file_size: 128,
            uploaded_by: None,
        }
    }

    #[tokio::test]
    async fn test_media_filter_by_mime_prefix() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_media_impl(new_media("logo.png", "image/png"))
            .await
            .unwrap();
        storage
            .create_media_impl(new_media("guide.pdf", "application/pdf"))
            .await
            .unwrap();

        let images = storage
            .list_media_with_pagination_impl(MediaListParams {
                pagination: PaginationQuery::default(),
                search: None,
                mime_type: Some("image/".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(images.items.len(), 1);
        assert_eq!(images.items[0].media.original_name, "logo.png");
        assert!(images.items[0].url.ends_with("/download"));
    }

    #[tokio::test]
    async fn test_media_in_use_by_element() {
        let storage = SeaOrmStorage::in_memory().await;
        let media = storage
            .create_media_impl(new_media("hero.jpg", "image/jpeg"))
            .await
            .unwrap();
        assert!(!storage.media_in_use_impl(media.id).await.unwrap());

        let page = storage
            .create_page_impl(CreatePageRequest {
                slug: "home".to_string(),
                title_ar: "الرئيسية".to_string(),
                title_en: "Home".to_string(),
                description: None,
                status: Some(ContentStatus::Published),
                sort_order: 0,
            })
            .await
            .unwrap();
        storage
            .create_element_impl(
                page.id,
                CreateElementRequest {
                    element_key: "hero".to_string(),
                    element_type: ElementType::Image,
                    content_ar: None,
                    content_en: None,
                    media_id: Some(media.id),
                    url: None,
                    status: None,
                    sort_order: None,
                },
            )
            .await
            .unwrap();

        assert!(storage.media_in_use_impl(media.id).await.unwrap());

        let updated = storage
            .update_media_impl(
                media.id,
                UpdateMediaRequest {
                    alt_ar: None,
                    alt_en: Some("Campus gate".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.alt_en.as_deref(), Some("Campus gate"));
    }
}
