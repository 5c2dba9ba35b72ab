use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_academic_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 媒体库 ====================
        manager
            .create_table(
                Table::create()
                    .table(MediaItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MediaItems::OriginalName).string().not_null())
                    .col(
                        ColumnDef::new(MediaItems::StoredName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MediaItems::MimeType).string().not_null())
                    .col(ColumnDef::new(MediaItems::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(MediaItems::AltAr).string().null())
                    .col(ColumnDef::new(MediaItems::AltEn).string().null())
                    .col(ColumnDef::new(MediaItems::UploadedBy).big_integer().null())
                    .col(
                        ColumnDef::new(MediaItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MediaItems::Table, MediaItems::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 内容页面 ====================
        manager
            .create_table(
                Table::create()
                    .table(ContentPages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentPages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentPages::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ContentPages::TitleAr).string().not_null())
                    .col(ColumnDef::new(ContentPages::TitleEn).string().not_null())
                    .col(ColumnDef::new(ContentPages::Description).text().null())
                    .col(ColumnDef::new(ContentPages::Status).string().not_null())
                    .col(
                        ColumnDef::new(ContentPages::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContentPages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentPages::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 内容元素 ====================
        manager
            .create_table(
                Table::create()
                    .table(ContentElements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentElements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentElements::PageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentElements::ElementKey)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentElements::ElementType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContentElements::ContentAr).text().null())
                    .col(ColumnDef::new(ContentElements::ContentEn).text().null())
                    .col(ColumnDef::new(ContentElements::MediaId).big_integer().null())
                    .col(ColumnDef::new(ContentElements::Url).string().null())
                    .col(ColumnDef::new(ContentElements::Status).string().not_null())
                    .col(
                        ColumnDef::new(ContentElements::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContentElements::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentElements::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ContentElements::Table, ContentElements::PageId)
                            .to(ContentPages::Table, ContentPages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ContentElements::Table, ContentElements::MediaId)
                            .to(MediaItems::Table, MediaItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_content_elements_page_key")
                    .table(ContentElements::Table)
                    .col(ContentElements::PageId)
                    .col(ContentElements::ElementKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentElements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContentPages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaItems::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MediaItems {
    #[sea_orm(iden = "media_items")]
    Table,
    Id,
    OriginalName,
    StoredName,
    MimeType,
    FileSize,
    AltAr,
    AltEn,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ContentPages {
    #[sea_orm(iden = "content_pages")]
    Table,
    Id,
    Slug,
    TitleAr,
    TitleEn,
    Description,
    Status,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentElements {
    #[sea_orm(iden = "content_elements")]
    Table,
    Id,
    PageId,
    ElementKey,
    ElementType,
    ContentAr,
    ContentEn,
    MediaId,
    Url,
    Status,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
