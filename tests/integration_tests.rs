use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use product_catalog::{
    app::product::{
        model::{Product, ProductFields},
        repository::{InMemoryProductRepository, ProductRepository, StoreError},
    },
    build_router, AppState,
};
use serde_json::{json, Value};

fn create_test_server() -> (TestServer, Arc<InMemoryProductRepository>) {
    let repository = Arc::new(InMemoryProductRepository::new());
    let app = build_router(AppState::new(repository.clone()));
    (TestServer::new(app).unwrap(), repository)
}

async fn create_widget(server: &TestServer) -> i64 {
    let response = server
        .post("/products")
        .json(&json!({"name": "Widget", "description": "blue", "price": 9.5}))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_list_empty_table_returns_empty_array() {
    let (server, _) = create_test_server();

    let response = server.get("/products").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_length_matches_rows() {
    let (server, repository) = create_test_server();
    for _ in 0..3 {
        create_widget(&server).await;
    }

    let products: Vec<Product> = server.get("/products").await.json();
    assert_eq!(products.len(), 3);
    assert_eq!(products.len(), repository.len().await);
}

#[tokio::test]
async fn test_create_with_zero_price() {
    let (server, _) = create_test_server();

    let response = server
        .post("/products")
        .json(&json!({"name": "Widget", "price": 0}))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({"id": 1, "name": "Widget", "price": 0})
    );
}

#[tokio::test]
async fn test_create_with_portuguese_field_names() {
    let (server, _) = create_test_server();

    let response = server
        .post("/products")
        .json(&json!({"nome": "Widget", "preco": 0}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["price"], 0);
    assert!(body.get("description").is_none());
}

#[tokio::test]
async fn test_create_echoes_null_description() {
    let (server, _) = create_test_server();

    let response = server
        .post("/products")
        .json(&json!({"name": "Widget", "description": null, "price": 1}))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["description"], Value::Null);
}

#[tokio::test]
async fn test_create_missing_or_empty_name_is_rejected() {
    let (server, repository) = create_test_server();

    for body in [json!({"price": 1}), json!({"name": "", "price": 1})] {
        let response = server.post("/products").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("name"));
    }
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_create_missing_or_null_price_is_rejected() {
    let (server, repository) = create_test_server();

    for body in [
        json!({"name": "Widget"}),
        json!({"name": "Widget", "price": null}),
    ] {
        let response = server.post("/products").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "price is required");
    }
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_create_with_malformed_body_is_rejected() {
    let (server, repository) = create_test_server();

    let response = server
        .post("/products")
        .json(&json!({"name": "Widget", "price": "cheap"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/products").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (server, _) = create_test_server();
    let id = create_widget(&server).await;

    let response = server.get(&format!("/products/{}", id)).await;
    response.assert_status_ok();

    let product: Product = response.json();
    assert_eq!(
        product,
        Product {
            id,
            name: "Widget".to_string(),
            description: Some("blue".to_string()),
            price: 9.5,
        }
    );
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let (server, _) = create_test_server();

    let response = server.get("/products/999").await;
    response.assert_status_not_found();
    assert_eq!(response.text(), "Product not found");

    server.get("/products/abc").await.assert_status_not_found();
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let (server, _) = create_test_server();
    let id = create_widget(&server).await;

    let response = server
        .put(&format!("/products/{}", id))
        .json(&json!({"name": "Gadget", "price": 0}))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"id": id, "name": "Gadget", "price": 0})
    );

    // description 未提交，被覆盖为 null
    let product: Product = server.get(&format!("/products/{}", id)).await.json();
    assert_eq!(product.name, "Gadget");
    assert_eq!(product.description, None);
    assert_eq!(product.price, 0.0);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (server, _) = create_test_server();
    let id = create_widget(&server).await;

    let response = server
        .put("/products/999")
        .json(&json!({"name": "Gadget", "description": "red", "price": 3}))
        .await;
    response.assert_status_not_found();

    let product: Product = server.get(&format!("/products/{}", id)).await.json();
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description.as_deref(), Some("blue"));
    assert_eq!(product.price, 9.5);
}

#[tokio::test]
async fn test_update_without_name_is_internal_error() {
    let (server, _) = create_test_server();
    let id = create_widget(&server).await;

    let response = server
        .put(&format!("/products/{}", id))
        .json(&json!({"price": 3}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Internal server error");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (server, repository) = create_test_server();
    let id = create_widget(&server).await;

    let response = server.delete(&format!("/products/{}", id)).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    server
        .get(&format!("/products/{}", id))
        .await
        .assert_status_not_found();
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let (server, _) = create_test_server();

    server.delete("/products/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_produtos_alias_shares_the_same_table() {
    let (server, _) = create_test_server();
    let id = create_widget(&server).await;

    let response = server.get(&format!("/produtos/{}", id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Product>().name, "Widget");

    server
        .delete(&format!("/produtos/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(server.get("/products").await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (server, _) = create_test_server();

    let response = server.get("/products").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

/// 所有调用都失败的存储
struct FailingRepository;

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::NullColumn("nome"))
    }

    async fn find(&self, _id: i64) -> Result<Option<Product>, StoreError> {
        Err(StoreError::NullColumn("nome"))
    }

    async fn insert(&self, _fields: &ProductFields) -> Result<i64, StoreError> {
        Err(StoreError::NullColumn("nome"))
    }

    async fn update(&self, _id: i64, _fields: &ProductFields) -> Result<u64, StoreError> {
        Err(StoreError::NullColumn("nome"))
    }

    async fn delete(&self, _id: i64) -> Result<u64, StoreError> {
        Err(StoreError::NullColumn("nome"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::NullColumn("nome"))
    }
}

#[tokio::test]
async fn test_store_failures_are_internal_errors() {
    let app = build_router(AppState::new(Arc::new(FailingRepository)));
    let server = TestServer::new(app).unwrap();

    let responses = [
        server.get("/products").await,
        server.get("/products/1").await,
        server
            .post("/products")
            .json(&json!({"name": "Widget", "price": 1}))
            .await,
        server
            .put("/products/1")
            .json(&json!({"name": "Widget", "price": 1}))
            .await,
        server.delete("/products/1").await,
    ];

    for response in responses {
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Internal server error");
    }

    server
        .get("/health")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
