use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use smartshelf_client::router::HistoryNavigator;
use smartshelf_client::{AppContext, ClientConfig, MemoryStorage, Navigation, SharedStorage, Storage};
use smartshelf_shared::{keys, LoginRequest, Product, Store};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product(id: i64, name: &str, price: i64) -> Product {
    serde_json::from_value(json!({"id": id, "product_name": name, "price": price})).unwrap()
}

fn store(id: i64, name: &str) -> Store {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

fn placed_order(id: i64, store_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "customer_id": 11,
        "store_id": store_id,
        "sales_id": 4,
        "payment_status": false,
        "pickup_status": 0,
        "items": []
    })
}

async fn context(start: &str, storage: SharedStorage) -> (MockServer, Arc<HistoryNavigator>, AppContext) {
    let server = MockServer::start().await;
    let navigator = Arc::new(HistoryNavigator::new(start));
    let config = ClientConfig::default().with_base_url(format!("{}/api", server.uri()));
    let ctx = AppContext::new(config, storage, navigator.clone());
    (server, navigator, ctx)
}

fn signed_in_storage() -> SharedStorage {
    let storage = MemoryStorage::shared();
    storage.set_item(keys::TOKEN, "abc").unwrap();
    storage.set_item(keys::USER, r#"{"online_id":1,"email":"ada@shop.test"}"#).unwrap();
    storage.set_item(keys::USER_ROLE, "customer").unwrap();
    storage
}

#[tokio::test]
async fn login_persists_session_and_returns_to_bounced_page() {
    let storage = MemoryStorage::shared();
    let (server, _navigator, mut ctx) = context("/", storage.clone()).await;

    match ctx.navigate("/checkout") {
        Navigation::Redirect(to) => assert_eq!(to, "/login?redirect=%2Fcheckout"),
        other => panic!("expected redirect, got {other:?}"),
    }

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@shop.test", "passwd": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh",
            "user": {"online_id": 1, "email": "ada@shop.test", "customer_id": 11},
            "role": "customer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = LoginRequest { email: "ada@shop.test".to_string(), passwd: "hunter2".to_string() };
    ctx.login(&credentials).await.unwrap();

    assert!(ctx.session.is_authenticated());
    assert_eq!(ctx.session.role(), Some("customer"));
    assert_eq!(storage.get_item(keys::TOKEN).unwrap().as_deref(), Some("fresh"));
    assert_eq!(storage.get_item(keys::USER_ROLE).unwrap().as_deref(), Some("customer"));
    assert_eq!(ctx.post_login_destination(), "/checkout");
}

#[tokio::test]
async fn checkout_places_one_order_per_store_and_empties_cart() {
    let storage = signed_in_storage();
    let (server, _navigator, mut ctx) = context("/checkout", storage.clone()).await;

    let north = store(1, "North");
    let south = store(2, "South");
    ctx.cart.add_to_cart(&product(10, "Milk", 350), &north, 2);
    ctx.cart.add_to_cart(&product(11, "Bread", 500), &south, 1);
    ctx.cart.add_to_cart(&product(12, "Eggs", 425), &north, 1);
    assert_eq!(ctx.cart.total_price(), Decimal::from(1625));

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({
            "store_id": 1,
            "items": [
                {"product_id": 10, "quantity": 2, "price": 350},
                {"product_id": 12, "quantity": 1, "price": 425}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(placed_order(100, 1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({
            "store_id": 2,
            "items": [{"product_id": 11, "quantity": 1, "price": 500}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(placed_order(101, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let orders = ctx.checkout().await.unwrap();
    assert_eq!(orders.iter().map(|o| o.id).collect::<Vec<_>>(), vec![100, 101]);
    assert!(ctx.cart.is_empty());
    assert_eq!(storage.get_item(keys::CART).unwrap(), None);
}

#[tokio::test]
async fn failed_checkout_keeps_unplaced_lines() {
    let storage = signed_in_storage();
    let (server, _navigator, mut ctx) = context("/checkout", storage.clone()).await;

    ctx.cart.add_to_cart(&product(10, "Milk", 350), &store(1, "North"), 1);
    ctx.cart.add_to_cart(&product(11, "Bread", 500), &store(2, "South"), 1);

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({
            "store_id": 1,
            "items": [{"product_id": 10, "quantity": 1, "price": 350}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(placed_order(100, 1)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Insufficient stock for product Bread"})),
        )
        .with_priority(10)
        .mount(&server)
        .await;

    let err = ctx.checkout().await.unwrap_err();
    assert_eq!(err.message(), "Insufficient stock for product Bread");
    assert_eq!(ctx.cart.len(), 1);
    assert!(ctx.cart.get(11, 2).is_some());
    assert!(ctx.session.is_authenticated());

    let reloaded = smartshelf_client::CartStore::load(storage);
    assert_eq!(reloaded.items(), ctx.cart.items());
}

#[tokio::test]
async fn rejected_token_signs_out_in_memory_too() {
    let storage = signed_in_storage();
    let (server, navigator, mut ctx) = context("/checkout", storage.clone()).await;
    ctx.cart.add_to_cart(&product(10, "Milk", 350), &store(1, "North"), 3);

    Mock::given(method("GET"))
        .and(path("/api/stores/1/inventory/10"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Token has expired"})))
        .mount(&server)
        .await;

    assert!(ctx.refresh_cart_stock().await.is_err());
    assert!(!ctx.session.is_authenticated());
    assert_eq!(navigator.history().last().map(String::as_str), Some("/login"));
    assert_eq!(ctx.cart.len(), 1);
}

#[tokio::test]
async fn refresh_records_stock_and_flags_shortfalls() {
    let storage = signed_in_storage();
    let (server, _navigator, mut ctx) = context("/checkout", storage).await;
    ctx.cart.add_to_cart(&product(10, "Milk", 350), &store(1, "North"), 3);

    Mock::given(method("GET"))
        .and(path("/api/stores/1/inventory/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stock": 2})))
        .expect(1)
        .mount(&server)
        .await;

    ctx.refresh_cart_stock().await.unwrap();
    assert_eq!(ctx.cart.get(10, 1).and_then(|item| item.stock), Some(2));
    assert_eq!(ctx.cart.over_stock_items().len(), 1);
}

#[tokio::test]
async fn post_login_destination_stays_on_this_origin() {
    for start in [
        "/login?redirect=%2F%2Fevil.example%2Fphish",
        "/login?redirect=%2F%5Cevil.example",
        "/login?redirect=https%3A%2F%2Fevil.example",
    ] {
        let (_server, _navigator, ctx) = context(start, MemoryStorage::shared()).await;
        assert_eq!(ctx.post_login_destination(), "/home", "{start}");
    }

    let (_server, _navigator, ctx) =
        context("/login?redirect=%2Fhome%2Fstats%3Frange%3D7", MemoryStorage::shared()).await;
    assert_eq!(ctx.post_login_destination(), "/home/stats?range=7");
}
