use sea_orm::entity::prelude::*;

/// Catalog product. `quantity` doubles as remaining stock; the duplicate
/// guard (same seller + name) only applies while `quantity > 0`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub description: String,
    /// Unit price in minor currency units (cents).
    pub price_cents: i64,
    pub quantity: i32,
    pub category: String,
    pub image_url: String,
    pub shipping_days: i32,
    pub has_discount: bool,
    pub discount_rate: Option<i16>,
    pub average_rating: Option<f64>,
    pub num_ratings: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SellerId",
        to = "super::users::Column::Id"
    )]
    Seller,
    #[sea_orm(has_many = "super::interactions::Entity")]
    Interactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::interactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
