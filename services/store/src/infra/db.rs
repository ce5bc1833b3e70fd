use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait,
    FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, Func},
};
use uuid::Uuid;

use emporium_domain::pagination::PageRequest;
use emporium_domain::user::RoleFlags;
use emporium_store_schema::{carts, interactions, products, users};

use crate::domain::repository::{
    CartRepository, InteractionRepository, ProductRepository, UserRepository, ViewRepository,
};
use crate::domain::types::{
    Cart, Interaction, Product, ProductFilter, ProductPatch, PurchaseRow, SaleRow, User, UserPatch,
};
use crate::error::StoreError;

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, StoreError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_admin: Set(user.role.is_admin),
            is_seller: Set(user.role.is_seller),
            age: Set(user.age),
            address: Set(user.address.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUser),
            Err(e) => Err(anyhow::Error::from(e).context("create user").into()),
        }
    }

    async fn update(&self, username: &str, patch: &UserPatch) -> Result<Option<User>, StoreError> {
        let Some(model) = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(ref new_username) = patch.username {
            am.username = Set(new_username.clone());
        }
        if let Some(ref password_hash) = patch.password_hash {
            am.password_hash = Set(password_hash.clone());
        }
        if let Some(is_seller) = patch.is_seller {
            am.is_seller = Set(is_seller);
        }
        if let Some(age) = patch.age {
            am.age = Set(Some(age));
        }
        if let Some(ref address) = patch.address {
            am.address = Set(Some(address.clone()));
        }
        match am.update(&self.db).await {
            Ok(updated) => Ok(Some(user_from_model(updated))),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUser),
            Err(e) => Err(anyhow::Error::from(e).context("update user").into()),
        }
    }

    async fn delete(&self, username: &str) -> Result<bool, StoreError> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Username.eq(username))
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role: RoleFlags {
            is_admin: model.is_admin,
            is_seller: model.is_seller,
        },
        age: model.age,
        address: model.address,
        created_at: model.created_at,
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn has_in_stock_with_name(
        &self,
        seller_id: Uuid,
        name: &str,
    ) -> Result<bool, StoreError> {
        let count = products::Entity::find()
            .filter(products::Column::SellerId.eq(seller_id))
            .filter(products::Column::Name.eq(name))
            .filter(products::Column::Quantity.gt(0))
            .count(&self.db)
            .await
            .context("count in-stock products by name")?;
        Ok(count > 0)
    }

    async fn create(&self, product: &Product) -> Result<(), StoreError> {
        products::ActiveModel {
            id: Set(product.id),
            seller_id: Set(product.seller_id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price_cents: Set(product.price_cents),
            quantity: Set(product.quantity),
            category: Set(product.category.clone()),
            image_url: Set(product.image_url.clone()),
            shipping_days: Set(product.shipping_days),
            has_discount: Set(product.has_discount),
            discount_rate: Set(product.discount_rate),
            average_rating: Set(product.average_rating),
            num_ratings: Set(product.num_ratings),
            created_at: Set(product.created_at),
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(())
    }

    async fn search(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Vec<Product>, StoreError> {
        let page = page.clamped();
        let mut query = products::Entity::find();
        if let Some(ref category) = filter.category {
            query = query.filter(products::Column::Category.eq(category.as_str()));
        }
        if let Some(ref search) = filter.search {
            // Case-insensitive substring match, portable across backends.
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(products::Column::Name)))
                    .like(format!("%{}%", search.to_lowercase())),
            );
        }
        let models = query
            .order_by_desc(products::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("search products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>, StoreError> {
        let Some(model) = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(ref description) = patch.description {
            am.description = Set(description.clone());
        }
        if let Some(price_cents) = patch.price_cents {
            am.price_cents = Set(price_cents);
        }
        if let Some(quantity) = patch.quantity {
            am.quantity = Set(quantity);
        }
        if let Some(ref category) = patch.category {
            am.category = Set(category.clone());
        }
        if let Some(ref image_url) = patch.image_url {
            am.image_url = Set(image_url.clone());
        }
        if let Some(shipping_days) = patch.shipping_days {
            am.shipping_days = Set(shipping_days);
        }
        if let Some(has_discount) = patch.has_discount {
            am.has_discount = Set(has_discount);
        }
        if let Some(discount_rate) = patch.discount_rate {
            am.discount_rate = Set(Some(discount_rate));
        }
        let updated = am.update(&self.db).await.context("update product")?;
        Ok(Some(product_from_model(updated)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(result.rows_affected > 0)
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        seller_id: model.seller_id,
        name: model.name,
        description: model.description,
        price_cents: model.price_cents,
        quantity: model.quantity,
        category: model.category,
        image_url: model.image_url,
        shipping_days: model.shipping_days,
        has_discount: model.has_discount,
        discount_rate: model.discount_rate,
        average_rating: model.average_rating,
        num_ratings: model.num_ratings,
        created_at: model.created_at,
    }
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: DatabaseConnection,
}

impl CartRepository for DbCartRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, StoreError> {
        let model = carts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find cart by id")?;
        Ok(model.map(cart_from_model))
    }

    async fn create(&self, cart: &Cart) -> Result<(), StoreError> {
        let result = carts::ActiveModel {
            id: Set(cart.id),
            customer_id: Set(cart.customer_id),
            address: Set(cart.address.clone()),
            bought: Set(cart.bought),
            bought_at: Set(cart.bought_at),
            created_at: Set(cart.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            // carts_one_open_per_customer: the customer already has an
            // open cart, even if a concurrent request created it.
            Err(e) if is_unique_violation(&e) => Err(StoreError::CartAlreadyOpen),
            Err(e) => Err(anyhow::Error::from(e).context("create cart").into()),
        }
    }

    async fn buy(&self, id: Uuid, bought_at: DateTime<Utc>) -> Result<Option<Cart>, StoreError> {
        let txn = self.db.begin().await.context("begin buy transaction")?;

        let Some(model) = carts::Entity::find_by_id(id)
            .one(&txn)
            .await
            .context("find cart for buy")?
        else {
            txn.rollback().await.context("rollback buy transaction")?;
            return Ok(None);
        };

        let mut am = model.into_active_model();
        am.bought = Set(true);
        am.bought_at = Set(Some(bought_at));
        let updated = am.update(&txn).await.context("mark cart bought")?;

        interactions::Entity::update_many()
            .col_expr(interactions::Column::Bought, Expr::value(true))
            .filter(interactions::Column::CartId.eq(id))
            .exec(&txn)
            .await
            .context("mark cart line items bought")?;

        txn.commit().await.context("commit buy transaction")?;
        Ok(Some(cart_from_model(updated)))
    }
}

fn cart_from_model(model: carts::Model) -> Cart {
    Cart {
        id: model.id,
        customer_id: model.customer_id,
        address: model.address,
        bought: model.bought,
        bought_at: model.bought_at,
        created_at: model.created_at,
    }
}

// ── Interaction repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInteractionRepository {
    pub db: DatabaseConnection,
}

impl InteractionRepository for DbInteractionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interaction>, StoreError> {
        let model = interactions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find interaction by id")?;
        Ok(model.map(interaction_from_model))
    }

    async fn create(&self, interaction: &Interaction) -> Result<(), StoreError> {
        interactions::ActiveModel {
            id: Set(interaction.id),
            cart_id: Set(interaction.cart_id),
            product_id: Set(interaction.product_id),
            quantity_chosen: Set(interaction.quantity_chosen),
            bought: Set(interaction.bought),
            seller_approval: Set(interaction.seller_approval),
            created_at: Set(interaction.created_at),
        }
        .insert(&self.db)
        .await
        .context("create interaction")?;
        Ok(())
    }

    async fn approve(&self, id: Uuid) -> Result<Option<Interaction>, StoreError> {
        self.set_flag(id, interactions::Column::SellerApproval).await
    }

    async fn mark_bought(&self, id: Uuid) -> Result<Option<Interaction>, StoreError> {
        self.set_flag(id, interactions::Column::Bought).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = interactions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete interaction")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbInteractionRepository {
    async fn set_flag(
        &self,
        id: Uuid,
        column: interactions::Column,
    ) -> Result<Option<Interaction>, StoreError> {
        let Some(model) = interactions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find interaction for flag update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        match column {
            interactions::Column::SellerApproval => am.seller_approval = Set(true),
            interactions::Column::Bought => am.bought = Set(true),
            _ => unreachable!("only boolean flags are settable"),
        }
        let updated = am
            .update(&self.db)
            .await
            .context("update interaction flag")?;
        Ok(Some(interaction_from_model(updated)))
    }
}

fn interaction_from_model(model: interactions::Model) -> Interaction {
    Interaction {
        id: model.id,
        cart_id: model.cart_id,
        product_id: model.product_id,
        quantity_chosen: model.quantity_chosen,
        bought: model.bought,
        seller_approval: model.seller_approval,
        created_at: model.created_at,
    }
}

// ── View repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbViewRepository {
    pub db: DatabaseConnection,
}

#[derive(FromQueryResult)]
struct PurchaseQueryRow {
    interaction_id: Uuid,
    cart_id: Uuid,
    product_id: Uuid,
    name: String,
    price_cents: i64,
    image_url: String,
    shipping_days: i32,
    quantity_chosen: i32,
    seller_approval: bool,
    bought_at: Option<DateTime<Utc>>,
}

#[derive(FromQueryResult)]
struct SaleQueryRow {
    interaction_id: Uuid,
    cart_id: Uuid,
    product_id: Uuid,
    name: String,
    description: String,
    price_cents: i64,
    image_url: String,
    quantity_chosen: i32,
    address: String,
    bought_at: Option<DateTime<Utc>>,
}

impl ViewRepository for DbViewRepository {
    async fn seller_stock(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Product>, StoreError> {
        let page = page.clamped();
        let models = products::Entity::find()
            .filter(products::Column::SellerId.eq(seller_id))
            .filter(products::Column::Quantity.gt(0))
            .order_by_desc(products::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list seller stock")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn open_cart(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<(Cart, Vec<Interaction>)>, StoreError> {
        let Some(cart) = carts::Entity::find()
            .filter(carts::Column::CustomerId.eq(customer_id))
            .filter(carts::Column::Bought.eq(false))
            .one(&self.db)
            .await
            .context("find open cart")?
        else {
            return Ok(None);
        };
        let items = interactions::Entity::find()
            .filter(interactions::Column::CartId.eq(cart.id))
            .order_by_asc(interactions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list open cart items")?;
        Ok(Some((
            cart_from_model(cart),
            items.into_iter().map(interaction_from_model).collect(),
        )))
    }

    async fn purchase_history(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<PurchaseRow>, StoreError> {
        let page = page.clamped();
        let sql = r#"
            SELECT i.id AS interaction_id, i.cart_id, i.product_id,
                   p.name, p.price_cents, p.image_url, p.shipping_days,
                   i.quantity_chosen, i.seller_approval, c.bought_at
            FROM interactions i
            JOIN carts c ON c.id = i.cart_id
            JOIN products p ON p.id = i.product_id
            WHERE c.customer_id = $1 AND i.bought
            ORDER BY c.bought_at DESC NULLS LAST, i.created_at DESC
            LIMIT $2 OFFSET $3
        "#;
        let rows = PurchaseQueryRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [
                customer_id.into(),
                i64::from(page.per_page).into(),
                (page.offset() as i64).into(),
            ],
        ))
        .all(&self.db)
        .await
        .context("list purchase history")?;
        Ok(rows
            .into_iter()
            .map(|r| PurchaseRow {
                interaction_id: r.interaction_id,
                cart_id: r.cart_id,
                product_id: r.product_id,
                name: r.name,
                price_cents: r.price_cents,
                image_url: r.image_url,
                shipping_days: r.shipping_days,
                quantity_chosen: r.quantity_chosen,
                seller_approval: r.seller_approval,
                bought_at: r.bought_at,
            })
            .collect())
    }

    async fn pending_sales(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        self.sales(seller_id, false, page).await
    }

    async fn approved_sales(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        self.sales(seller_id, true, page).await
    }
}

impl DbViewRepository {
    async fn sales(
        &self,
        seller_id: Uuid,
        approved: bool,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        let page = page.clamped();
        let sql = format!(
            r#"
            SELECT i.id AS interaction_id, i.cart_id, i.product_id,
                   p.name, p.description, p.price_cents, p.image_url,
                   i.quantity_chosen, c.address, c.bought_at
            FROM interactions i
            JOIN products p ON p.id = i.product_id
            JOIN carts c ON c.id = i.cart_id
            WHERE p.seller_id = $1 AND i.bought AND i.seller_approval = {approved}
            ORDER BY c.bought_at DESC NULLS LAST, i.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        );
        let rows = SaleQueryRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [
                seller_id.into(),
                i64::from(page.per_page).into(),
                (page.offset() as i64).into(),
            ],
        ))
        .all(&self.db)
        .await
        .context("list seller sales")?;
        Ok(rows
            .into_iter()
            .map(|r| SaleRow {
                interaction_id: r.interaction_id,
                cart_id: r.cart_id,
                product_id: r.product_id,
                name: r.name,
                description: r.description,
                price_cents: r.price_cents,
                image_url: r.image_url,
                quantity_chosen: r.quantity_chosen,
                address: r.address,
                bought_at: r.bought_at,
            })
            .collect())
    }
}
