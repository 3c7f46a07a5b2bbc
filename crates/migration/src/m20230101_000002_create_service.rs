//! Create `service` table for bookable offerings published by businesses.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::BusinessId).not_null())
                    .col(string_len(Service::Name, 128).not_null())
                    .col(string_len(Service::Description, 512).not_null())
                    .col(timestamp_with_time_zone(Service::StartDateTime).not_null())
                    .col(integer(Service::Length).not_null())
                    .col(integer(Service::Capacity).not_null())
                    .col(big_integer(Service::CancelFee).not_null())
                    .col(big_integer(Service::Price).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Service::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    BusinessId,
    Name,
    Description,
    StartDateTime,
    Length,
    Capacity,
    CancelFee,
    Price,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
