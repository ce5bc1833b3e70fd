use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::SellerId).uuid().not_null())
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Description).text().not_null())
                    .col(ColumnDef::new(Products::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(Products::Quantity).integer().not_null())
                    .col(ColumnDef::new(Products::Category).string().not_null())
                    .col(ColumnDef::new(Products::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Products::ShippingDays).integer().not_null())
                    .col(
                        ColumnDef::new(Products::HasDiscount)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Products::DiscountRate).small_integer())
                    .col(ColumnDef::new(Products::AverageRating).double())
                    .col(
                        ColumnDef::new(Products::NumRatings)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Products::Table, Products::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Seller stock and sales views filter on seller_id.
        manager
            .create_index(
                Index::create()
                    .name("products_seller_id_idx")
                    .table(Products::Table)
                    .col(Products::SellerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    SellerId,
    Name,
    Description,
    PriceCents,
    Quantity,
    Category,
    ImageUrl,
    ShippingDays,
    HasDiscount,
    DiscountRate,
    AverageRating,
    NumRatings,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
