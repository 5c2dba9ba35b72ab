//! 内容页面实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "content_pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub slug: String,
    pub title_ar: String,
    pub title_en: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::content_elements::Entity")]
    Elements,
}

impl Related<super::content_elements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Elements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_page(self) -> crate::models::content::entities::ContentPage {
        use crate::models::content::entities::{ContentPage, ContentStatus};

        ContentPage {
            id: self.id,
            slug: self.slug,
            title_ar: self.title_ar,
            title_en: self.title_en,
            description: self.description,
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
