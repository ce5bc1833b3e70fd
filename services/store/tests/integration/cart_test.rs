use uuid::Uuid;

use emporium_auth_types::identity::Identity;
use emporium_domain::user::RoleFlags;
use emporium_store::domain::guard;
use emporium_store::error::StoreError;
use emporium_store::usecase::cart::{BuyCartUseCase, CompleteInteractionUseCase, CreateCartUseCase};
use emporium_store::usecase::interaction::{AddInteractionInput, AddInteractionUseCase};

use crate::helpers::{MemStore, test_product, test_user};

// ── One open cart per customer ───────────────────────────────────────────────

#[tokio::test]
async fn should_conflict_on_second_open_cart_and_keep_exactly_one() {
    let store = MemStore::new();
    let customer_id = Uuid::now_v7();
    let usecase = CreateCartUseCase {
        carts: store.clone(),
    };

    usecase
        .execute(customer_id, "12 Main St".into())
        .await
        .unwrap();
    let result = usecase.execute(customer_id, "34 Oak Ave".into()).await;

    assert!(matches!(result, Err(StoreError::CartAlreadyOpen)));
    assert_eq!(store.open_cart_count(customer_id), 1);
}

#[tokio::test]
async fn should_allow_new_cart_once_previous_is_bought() {
    let store = MemStore::new();
    let customer_id = Uuid::now_v7();
    let create = CreateCartUseCase {
        carts: store.clone(),
    };

    let cart = create.execute(customer_id, "12 Main St".into()).await.unwrap();
    BuyCartUseCase {
        carts: store.clone(),
    }
    .execute(cart.id)
    .await
    .unwrap();

    assert!(create.execute(customer_id, "12 Main St".into()).await.is_ok());
    assert_eq!(store.open_cart_count(customer_id), 1);
}

// ── Buy atomicity ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mark_cart_and_every_line_item_bought_together() {
    let store = MemStore::new();
    let seller = test_user("sam", RoleFlags::seller());
    let lamp = test_product(seller.id, "lamp");
    let mug = test_product(seller.id, "mug");
    store.products.lock().unwrap().extend([lamp.clone(), mug.clone()]);

    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(Uuid::now_v7(), "12 Main St".into())
    .await
    .unwrap();
    let add = AddInteractionUseCase {
        carts: store.clone(),
        interactions: store.clone(),
    };
    add.execute(AddInteractionInput {
        cart_id: cart.id,
        product_id: lamp.id,
        quantity_chosen: 1,
    })
    .await
    .unwrap();
    add.execute(AddInteractionInput {
        cart_id: cart.id,
        product_id: mug.id,
        quantity_chosen: 2,
    })
    .await
    .unwrap();

    let bought = BuyCartUseCase {
        carts: store.clone(),
    }
    .execute(cart.id)
    .await
    .unwrap();

    assert!(bought.bought);
    assert!(bought.bought_at.is_some());
    let interactions = store.interactions.lock().unwrap();
    assert_eq!(interactions.len(), 2);
    assert!(interactions.iter().all(|i| i.bought));
}

#[tokio::test]
async fn should_leave_no_partial_state_when_buy_aborts() {
    let store = MemStore::new();
    let seller = test_user("sam", RoleFlags::seller());
    let lamp = test_product(seller.id, "lamp");
    store.products.lock().unwrap().push(lamp.clone());

    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(Uuid::now_v7(), "12 Main St".into())
    .await
    .unwrap();
    AddInteractionUseCase {
        carts: store.clone(),
        interactions: store.clone(),
    }
    .execute(AddInteractionInput {
        cart_id: cart.id,
        product_id: lamp.id,
        quantity_chosen: 1,
    })
    .await
    .unwrap();

    *store.fail_buy.lock().unwrap() = true;
    let result = BuyCartUseCase {
        carts: store.clone(),
    }
    .execute(cart.id)
    .await;
    assert!(matches!(result, Err(StoreError::Internal(_))));

    // Neither the cart nor its line items may show a partial buy.
    let carts = store.carts.lock().unwrap();
    assert!(!carts[0].bought);
    assert!(carts[0].bought_at.is_none());
    let interactions = store.interactions.lock().unwrap();
    assert!(interactions.iter().all(|i| !i.bought));
}

#[tokio::test]
async fn should_fail_buy_for_missing_cart() {
    let store = MemStore::new();
    let result = BuyCartUseCase { carts: store }.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(StoreError::CartNotFound)));
}

// ── Authorization before mutation ────────────────────────────────────────────

#[tokio::test]
async fn should_keep_cart_unchanged_when_non_owner_attempts_buy() {
    let store = MemStore::new();
    let owner_id = Uuid::now_v7();
    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(owner_id, "12 Main St".into())
    .await
    .unwrap();

    let stranger = Identity {
        id: Uuid::now_v7(),
        username: "mallory".into(),
        role: RoleFlags::customer(),
    };
    // The route guard runs before the buy usecase; a failed guard means the
    // transition is never attempted.
    let verdict = guard::owner_of_cart_or_admin(&stranger, cart.id, &store.clone()).await;
    assert!(matches!(verdict, Err(StoreError::Forbidden)));

    let carts = store.carts.lock().unwrap();
    assert!(!carts[0].bought);
}

// ── CompleteInteraction ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_mark_single_line_item_bought() {
    let store = MemStore::new();
    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(Uuid::now_v7(), "12 Main St".into())
    .await
    .unwrap();
    let added = AddInteractionUseCase {
        carts: store.clone(),
        interactions: store.clone(),
    }
    .execute(AddInteractionInput {
        cart_id: cart.id,
        product_id: Uuid::now_v7(),
        quantity_chosen: 1,
    })
    .await
    .unwrap();

    let completed = CompleteInteractionUseCase {
        interactions: store.clone(),
    }
    .execute(added.id)
    .await
    .unwrap();

    assert!(completed.bought);
    // The parent cart is untouched.
    assert!(!store.carts.lock().unwrap()[0].bought);
}

#[tokio::test]
async fn should_fail_complete_for_missing_interaction() {
    let store = MemStore::new();
    let result = CompleteInteractionUseCase {
        interactions: store,
    }
    .execute(Uuid::now_v7())
    .await;
    assert!(matches!(result, Err(StoreError::InteractionNotFound)));
}
