//! 页面元素实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "content_elements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub page_id: i64,
    pub element_key: String,
    pub element_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content_ar: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content_en: Option<String>,
    pub media_id: Option<i64>,
    pub url: Option<String>,
    pub status: String,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::content_pages::Entity",
        from = "Column::PageId",
        to = "super::content_pages::Column::Id"
    )]
    Page,
    #[sea_orm(
        belongs_to = "super::media_items::Entity",
        from = "Column::MediaId",
        to = "super::media_items::Column::Id"
    )]
    Media,
}

impl Related<super::content_pages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl Related<super::media_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_element(self) -> crate::models::content::entities::ContentElement {
        use crate::models::content::entities::{ContentElement, ContentStatus, ElementType};

        ContentElement {
            id: self.id,
            page_id: self.page_id,
            element_key: self.element_key,
            element_type: self
                .element_type
                .parse::<ElementType>()
                .unwrap_or(ElementType::Text),
            content_ar: self.content_ar,
            content_en: self.content_en,
            media_id: self.media_id,
            url: self.url,
            status: self
                .status
                .parse::<ContentStatus>()
                .unwrap_or(ContentStatus::Draft),
            sort_order: self.sort_order,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
