//! 媒体文件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "media_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub original_name: String,
    #[sea_orm(unique)]
    pub stored_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub alt_ar: Option<String>,
    pub alt_en: Option<String>,
    pub uploaded_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id"
    )]
    Uploader,
    #[sea_orm(has_many = "super::content_elements::Entity")]
    ContentElements,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl Related<super::content_elements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentElements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_media_item(self) -> crate::models::media::entities::MediaItem {
        crate::models::media::entities::MediaItem {
            id: self.id,
            original_name: self.original_name,
            stored_name: self.stored_name,
            mime_type: self.mime_type,
            file_size: self.file_size,
            alt_ar: self.alt_ar,
            alt_en: self.alt_en,
            uploaded_by: self.uploaded_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
