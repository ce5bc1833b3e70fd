use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use emporium_domain::pagination::PageRequest;
use emporium_domain::user::RoleFlags;
use emporium_store::domain::repository::{
    CartRepository, InteractionRepository, ProductRepository, UserRepository, ViewRepository,
};
use emporium_store::domain::types::{
    Cart, Interaction, Product, ProductFilter, ProductPatch, PurchaseRow, SaleRow, User, UserPatch,
};
use emporium_store::error::StoreError;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── MemStore ─────────────────────────────────────────────────────────────────

/// In-memory stand-in for the database. Cloning shares the underlying
/// state, so a clone can be handed to each usecase while the test keeps a
/// handle for inspection.
#[derive(Clone, Default)]
pub struct MemStore {
    pub users: Arc<Mutex<Vec<User>>>,
    pub products: Arc<Mutex<Vec<Product>>>,
    pub carts: Arc<Mutex<Vec<Cart>>>,
    pub interactions: Arc<Mutex<Vec<Interaction>>>,
    /// When set, `buy` fails before applying any write, the way an aborted
    /// transaction leaves the database untouched.
    pub fail_buy: Arc<Mutex<bool>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_cart_count(&self, customer_id: Uuid) -> usize {
        self.carts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.customer_id == customer_id && !c.bought)
            .count()
    }
}

impl UserRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, _page: PageRequest) -> Result<Vec<User>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUser);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, username: &str, patch: &UserPatch) -> Result<Option<User>, StoreError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };
        if let Some(ref v) = patch.username {
            user.username = v.clone();
        }
        if let Some(ref v) = patch.password_hash {
            user.password_hash = v.clone();
        }
        if let Some(v) = patch.is_seller {
            user.role.is_seller = v;
        }
        if let Some(v) = patch.age {
            user.age = Some(v);
        }
        if let Some(ref v) = patch.address {
            user.address = Some(v.clone());
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, username: &str) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.username != username);
        Ok(users.len() < before)
    }
}

impl ProductRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn has_in_stock_with_name(
        &self,
        seller_id: Uuid,
        name: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.seller_id == seller_id && p.name == name && p.quantity > 0))
    }

    async fn create(&self, product: &Product) -> Result<(), StoreError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn search(
        &self,
        filter: &ProductFilter,
        _page: PageRequest,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                filter.category.as_deref().is_none_or(|c| p.category == c)
                    && filter
                        .search
                        .as_deref()
                        .is_none_or(|s| p.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(ref v) = patch.name {
            product.name = v.clone();
        }
        if let Some(v) = patch.price_cents {
            product.price_cents = v;
        }
        if let Some(v) = patch.quantity {
            product.quantity = v;
        }
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

impl CartRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, cart: &Cart) -> Result<(), StoreError> {
        let mut carts = self.carts.lock().unwrap();
        if carts
            .iter()
            .any(|c| c.customer_id == cart.customer_id && !c.bought)
        {
            return Err(StoreError::CartAlreadyOpen);
        }
        carts.push(cart.clone());
        Ok(())
    }

    async fn buy(&self, id: Uuid, bought_at: DateTime<Utc>) -> Result<Option<Cart>, StoreError> {
        if *self.fail_buy.lock().unwrap() {
            return Err(StoreError::Internal(anyhow::anyhow!(
                "simulated transaction abort"
            )));
        }
        let mut carts = self.carts.lock().unwrap();
        let Some(cart) = carts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        cart.bought = true;
        cart.bought_at = Some(bought_at);
        let bought = cart.clone();
        drop(carts);
        for interaction in self
            .interactions
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|i| i.cart_id == id)
        {
            interaction.bought = true;
        }
        Ok(Some(bought))
    }
}

impl InteractionRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interaction>, StoreError> {
        Ok(self
            .interactions
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn create(&self, interaction: &Interaction) -> Result<(), StoreError> {
        self.interactions.lock().unwrap().push(interaction.clone());
        Ok(())
    }

    async fn approve(&self, id: Uuid) -> Result<Option<Interaction>, StoreError> {
        let mut interactions = self.interactions.lock().unwrap();
        let Some(interaction) = interactions.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        interaction.seller_approval = true;
        Ok(Some(interaction.clone()))
    }

    async fn mark_bought(&self, id: Uuid) -> Result<Option<Interaction>, StoreError> {
        let mut interactions = self.interactions.lock().unwrap();
        let Some(interaction) = interactions.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        interaction.bought = true;
        Ok(Some(interaction.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut interactions = self.interactions.lock().unwrap();
        let before = interactions.len();
        interactions.retain(|i| i.id != id);
        Ok(interactions.len() < before)
    }
}

impl ViewRepository for MemStore {
    async fn seller_stock(
        &self,
        seller_id: Uuid,
        _page: PageRequest,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.seller_id == seller_id && p.quantity > 0)
            .cloned()
            .collect())
    }

    async fn open_cart(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<(Cart, Vec<Interaction>)>, StoreError> {
        let cart = self
            .carts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.customer_id == customer_id && !c.bought)
            .cloned();
        let Some(cart) = cart else {
            return Ok(None);
        };
        let items = self
            .interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.cart_id == cart.id)
            .cloned()
            .collect();
        Ok(Some((cart, items)))
    }

    async fn purchase_history(
        &self,
        customer_id: Uuid,
        _page: PageRequest,
    ) -> Result<Vec<PurchaseRow>, StoreError> {
        let carts = self.carts.lock().unwrap().clone();
        let products = self.products.lock().unwrap().clone();
        let mut rows: Vec<(DateTime<Utc>, PurchaseRow)> = self
            .interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.bought)
            .filter_map(|i| {
                let cart = carts
                    .iter()
                    .find(|c| c.id == i.cart_id && c.customer_id == customer_id)?;
                let product = products.iter().find(|p| p.id == i.product_id)?;
                Some((
                    i.created_at,
                    PurchaseRow {
                        interaction_id: i.id,
                        cart_id: cart.id,
                        product_id: product.id,
                        name: product.name.clone(),
                        price_cents: product.price_cents,
                        image_url: product.image_url.clone(),
                        shipping_days: product.shipping_days,
                        quantity_chosen: i.quantity_chosen,
                        seller_approval: i.seller_approval,
                        bought_at: cart.bought_at,
                    },
                ))
            })
            .collect();
        // Newest cart first, then newest line item.
        rows.sort_by(|(a_created, a), (b_created, b)| {
            b.bought_at
                .cmp(&a.bought_at)
                .then(b_created.cmp(a_created))
        });
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn pending_sales(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        self.sales(seller_id, false, page)
    }

    async fn approved_sales(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        self.sales(seller_id, true, page)
    }
}

impl MemStore {
    fn sales(
        &self,
        seller_id: Uuid,
        approved: bool,
        _page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        let carts = self.carts.lock().unwrap().clone();
        let products = self.products.lock().unwrap().clone();
        Ok(self
            .interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.bought && i.seller_approval == approved)
            .filter_map(|i| {
                let product = products
                    .iter()
                    .find(|p| p.id == i.product_id && p.seller_id == seller_id)?;
                let cart = carts.iter().find(|c| c.id == i.cart_id)?;
                Some(SaleRow {
                    interaction_id: i.id,
                    cart_id: cart.id,
                    product_id: product.id,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    price_cents: product.price_cents,
                    image_url: product.image_url.clone(),
                    quantity_chosen: i.quantity_chosen,
                    address: cart.address.clone(),
                    bought_at: cart.bought_at,
                })
            })
            .collect())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(username: &str, role: RoleFlags) -> User {
    User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        password_hash: "$argon2id$unused".to_owned(),
        role,
        age: Some(30),
        address: Some("12 Main St".to_owned()),
        created_at: Utc::now(),
    }
}

pub fn test_product(seller_id: Uuid, name: &str) -> Product {
    Product {
        id: Uuid::now_v7(),
        seller_id,
        name: name.to_owned(),
        description: format!("{name} description"),
        price_cents: 1999,
        quantity: 5,
        category: "home".to_owned(),
        image_url: format!("https://img.example/{name}.png"),
        shipping_days: 3,
        has_discount: false,
        discount_rate: None,
        average_rating: None,
        num_ratings: 0,
        created_at: Utc::now(),
    }
}
