use uuid::Uuid;

use emporium_domain::pagination::PageRequest;
use emporium_domain::user::RoleFlags;
use emporium_store::error::StoreError;
use emporium_store::usecase::cart::{BuyCartUseCase, CreateCartUseCase};
use emporium_store::usecase::interaction::{
    AddInteractionInput, AddInteractionUseCase, ApproveInteractionUseCase,
};
use emporium_store::usecase::views::{
    ApprovedSalesUseCase, OpenCartUseCase, PendingSalesUseCase, PurchaseHistoryUseCase,
    SellerStockUseCase,
};

use crate::helpers::{MemStore, test_product, test_user};

#[tokio::test]
async fn should_fail_views_for_unknown_username() {
    let store = MemStore::new();
    let usecase = SellerStockUseCase {
        users: store.clone(),
        views: store.clone(),
    };
    let result = usecase.execute("ghost", PageRequest::default()).await;
    assert!(matches!(result, Err(StoreError::UserNotFound)));
}

#[tokio::test]
async fn should_exclude_depleted_products_from_seller_stock() {
    let store = MemStore::new();
    let seller = test_user("sam", RoleFlags::seller());
    let mut depleted = test_product(seller.id, "lamp");
    depleted.quantity = 0;
    let in_stock = test_product(seller.id, "mug");
    store.users.lock().unwrap().push(seller.clone());
    store
        .products
        .lock()
        .unwrap()
        .extend([depleted, in_stock.clone()]);

    let usecase = SellerStockUseCase {
        users: store.clone(),
        views: store.clone(),
    };
    let stock = usecase.execute("sam", PageRequest::default()).await.unwrap();
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].id, in_stock.id);
}

#[tokio::test]
async fn should_return_purchase_history_for_completed_cart() {
    let store = MemStore::new();
    let customer = test_user("carol", RoleFlags::customer());
    let seller = test_user("sam", RoleFlags::seller());
    let lamp = test_product(seller.id, "lamp");
    store
        .users
        .lock()
        .unwrap()
        .extend([customer.clone(), seller.clone()]);
    store.products.lock().unwrap().push(lamp.clone());

    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(customer.id, "A1".into())
    .await
    .unwrap();
    AddInteractionUseCase {
        carts: store.clone(),
        interactions: store.clone(),
    }
    .execute(AddInteractionInput {
        cart_id: cart.id,
        product_id: lamp.id,
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

    let history = PurchaseHistoryUseCase {
        users: store.clone(),
        views: store.clone(),
    }
    .execute("carol", PageRequest::default())
    .await
    .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, lamp.id);
    assert_eq!(history[0].quantity_chosen, 2);
    assert_eq!(history[0].bought_at, bought.bought_at);
}

#[tokio::test]
async fn should_order_purchase_history_newest_cart_first() {
    let store = MemStore::new();
    let customer = test_user("carol", RoleFlags::customer());
    let seller = test_user("sam", RoleFlags::seller());
    let lamp = test_product(seller.id, "lamp");
    let mug = test_product(seller.id, "mug");
    store
        .users
        .lock()
        .unwrap()
        .extend([customer.clone(), seller.clone()]);
    store.products.lock().unwrap().extend([lamp.clone(), mug.clone()]);

    let create = CreateCartUseCase {
        carts: store.clone(),
    };
    let add = AddInteractionUseCase {
        carts: store.clone(),
        interactions: store.clone(),
    };
    let buy = BuyCartUseCase {
        carts: store.clone(),
    };

    let first = create.execute(customer.id, "A1".into()).await.unwrap();
    add.execute(AddInteractionInput {
        cart_id: first.id,
        product_id: lamp.id,
        quantity_chosen: 1,
    })
    .await
    .unwrap();
    buy.execute(first.id).await.unwrap();

    let second = create.execute(customer.id, "A2".into()).await.unwrap();
    add.execute(AddInteractionInput {
        cart_id: second.id,
        product_id: mug.id,
        quantity_chosen: 3,
    })
    .await
    .unwrap();
    buy.execute(second.id).await.unwrap();

    let history = PurchaseHistoryUseCase {
        users: store.clone(),
        views: store.clone(),
    }
    .execute("carol", PageRequest::default())
    .await
    .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].product_id, mug.id);
    assert_eq!(history[1].product_id, lamp.id);
}

#[tokio::test]
async fn should_not_include_open_cart_items_in_history() {
    let store = MemStore::new();
    let customer = test_user("carol", RoleFlags::customer());
    let seller = test_user("sam", RoleFlags::seller());
    let lamp = test_product(seller.id, "lamp");
    store
        .users
        .lock()
        .unwrap()
        .extend([customer.clone(), seller.clone()]);
    store.products.lock().unwrap().push(lamp.clone());

    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(customer.id, "A1".into())
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

    let history = PurchaseHistoryUseCase {
        users: store.clone(),
        views: store.clone(),
    }
    .execute("carol", PageRequest::default())
    .await
    .unwrap();
    assert!(history.is_empty());

    // Still visible through the open-cart view.
    let open = OpenCartUseCase {
        users: store.clone(),
        views: store.clone(),
    }
    .execute("carol")
    .await
    .unwrap();
    let (open_cart, items) = open.unwrap();
    assert_eq!(open_cart.id, cart.id);
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn should_move_sale_from_pending_to_approved() {
    let store = MemStore::new();
    let customer = test_user("carol", RoleFlags::customer());
    let seller = test_user("sam", RoleFlags::seller());
    let lamp = test_product(seller.id, "lamp");
    store
        .users
        .lock()
        .unwrap()
        .extend([customer.clone(), seller.clone()]);
    store.products.lock().unwrap().push(lamp.clone());

    let cart = CreateCartUseCase {
        carts: store.clone(),
    }
    .execute(customer.id, "A1".into())
    .await
    .unwrap();
    let added = AddInteractionUseCase {
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
    BuyCartUseCase {
        carts: store.clone(),
    }
    .execute(cart.id)
    .await
    .unwrap();

    let pending = PendingSalesUseCase {
        users: store.clone(),
        views: store.clone(),
    };
    let approved = ApprovedSalesUseCase {
        users: store.clone(),
        views: store.clone(),
    };

    let before = pending.execute("sam", PageRequest::default()).await.unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].interaction_id, added.id);
    assert_eq!(before[0].address, "A1");
    assert!(
        approved
            .execute("sam", PageRequest::default())
            .await
            .unwrap()
            .is_empty()
    );

    ApproveInteractionUseCase {
        interactions: store.clone(),
    }
    .execute(added.id)
    .await
    .unwrap();

    assert!(
        pending
            .execute("sam", PageRequest::default())
            .await
            .unwrap()
            .is_empty()
    );
    let after = approved.execute("sam", PageRequest::default()).await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].interaction_id, added.id);
}
