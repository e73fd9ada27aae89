//! Create `document` table.
//!
//! One row per (collection, key); the primary key index serves range scans
//! within a collection.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(string_len(Document::Collection, 64).not_null())
                    .col(string(Document::Key).not_null())
                    .col(text(Document::Body).not_null())
                    .primary_key(Index::create().col(Document::Collection).col(Document::Key))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Document::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Document { Table, Collection, Key, Body }
