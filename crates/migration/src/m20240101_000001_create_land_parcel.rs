//! Create `land_parcel` table.
//!
//! Every column is NOT NULL; `status` holds the enum's string value.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LandParcel::Table)
                    .if_not_exists()
                    .col(big_integer(LandParcel::Id).auto_increment().primary_key())
                    .col(string_len(LandParcel::Name, 255).not_null())
                    .col(string_len(LandParcel::Status, 32).not_null())
                    .col(double(LandParcel::Area).not_null())
                    .col(boolean(LandParcel::HasConstraints).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_land_parcel_status")
                    .table(LandParcel::Table)
                    .col(LandParcel::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_land_parcel_status").table(LandParcel::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(LandParcel::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LandParcel {
    Table,
    Id,
    Name,
    Status,
    Area,
    HasConstraints,
}
