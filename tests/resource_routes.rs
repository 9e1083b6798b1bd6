//! Drives a generated resource router end to end over an in-memory store.

use async_trait::async_trait;
use auto_rest::{
    ApiFilter, AutoRestGenerator, EntityId, EntityStore, InMemoryStore, RestEntity, SortableField, StoreError,
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    name: String,
    stock: i64,
}

impl RestEntity for Product {
    fn id(&self) -> Option<EntityId> {
        self.id.map(EntityId::from)
    }
}

fn product(id: u64, name: &str, stock: i64) -> Product {
    Product {
        id: Some(id),
        name: name.into(),
        stock,
    }
}

fn store(items: Vec<Product>) -> InMemoryStore<Product> {
    let next = AtomicU64::new(1000);
    InMemoryStore::with_items(items, move |p: &mut Product| {
        p.id = Some(next.fetch_add(1, Ordering::SeqCst))
    })
}

fn generator<S: EntityStore<Product>>(store: S) -> AutoRestGenerator<Product, S> {
    AutoRestGenerator::given_store(store)
        .sortable_field(SortableField::new("stock", |p: &Product| p.stock))
        .sortable_field(SortableField::new("name", |p: &Product| p.name.clone()))
        .filter(ApiFilter::by_value("name", |v, p: &Product| p.name.contains(v)))
        .filter(ApiFilter::by_value("minStock", |v, p: &Product| {
            v.parse::<i64>().map(|n| p.stock >= n).unwrap_or(false)
        }))
}

fn app(items: Vec<Product>) -> Router {
    generator(store(items)).generate().unwrap()
}

fn ten_products() -> Vec<Product> {
    (1..=10).map(|i| product(i, &format!("p{}", i), i as i64 * 10)).collect()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_without_query_returns_everything_unpaginated() {
    let (status, body) = get(app(ten_products()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (1..=10).collect::<Vec<_>>());
    assert!(body.get("pagination").is_none());
}

#[tokio::test]
async fn list_sorts_ascending_by_key() {
    let items = vec![product(1, "a", 5), product(2, "b", 3), product(3, "c", 1)];
    let (status, body) = get(app(items), "/?sortBy=stock").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 1]);
}

#[tokio::test]
async fn list_sorts_descending_and_filters() {
    let (status, body) = get(app(ten_products()), "/?sortBy=stock&sortDir=DESC&minStock=70").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![10, 9, 8, 7]);
}

#[tokio::test]
async fn list_paginates_with_summary() {
    let (status, body) = get(app(ten_products()), "/?page=1&pageSize=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![4, 5, 6]);
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "pageSize": 3, "actualPageSize": 3, "totalPages": 4, "totalSize": 10 })
    );
}

#[tokio::test]
async fn list_paginates_relative_to_zero_id() {
    let (status, body) = get(app(ten_products()), "/?page=0&pageSize=3&zeroId=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![5, 6, 7]);
    assert_eq!(body["pagination"]["actualPageSize"], 3);
}

#[tokio::test]
async fn list_accepts_zero_page_size() {
    let (status, body) = get(app(ten_products()), "/?page=0&pageSize=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);
    assert_eq!(body["pagination"]["actualPageSize"], 1);
    assert_eq!(body["pagination"]["totalPages"], 0);
}

#[tokio::test]
async fn list_accepts_integral_decimal_page() {
    let (status, body) = get(app(ten_products()), "/?page=1.0&pageSize=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![4, 5, 6]);
}

#[tokio::test]
async fn list_rejects_unknown_filter() {
    let (status, body) = get(app(ten_products()), "/?foo=bar").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": {
                "errorCode": "INVALID_FILTER",
                "message": "Invalid filter",
                "details": [
                    { "code": "INVALID_FILTER", "message": "Invalid filter", "field": "query", "rejectedValue": "foo" }
                ]
            }
        })
    );
}

#[tokio::test]
async fn list_rejects_unknown_sort_field() {
    let (status, body) = get(app(ten_products()), "/?sortBy=price").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_SORTING");
    assert_eq!(body["error"]["details"][0]["code"], "UNSUPPORTED_SORTING_FIELD");
    assert_eq!(body["error"]["details"][0]["rejectedValue"], "price");
}

#[tokio::test]
async fn list_rejects_half_pagination() {
    let (status, body) = get(app(ten_products()), "/?pageSize=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_PAGINATION");
    assert_eq!(body["error"]["details"][0]["code"], "INVALID_PAGE");
    assert_eq!(body["error"]["details"][0]["field"], "query:page");
}

#[tokio::test]
async fn list_rejects_missing_zero_id() {
    let (status, body) = get(app(ten_products()), "/?minStock=50&zeroId=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "ZEROID_NOT_FOUND");
    assert_eq!(body["error"]["details"][0]["field"], "query:zeroId");
    assert_eq!(body["error"]["details"][0]["rejectedValue"], "2");
}

#[tokio::test]
async fn read_one_and_not_found() {
    let (status, body) = get(app(ten_products()), "/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "p3");

    let (status, body) = get(app(ten_products()), "/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": { "errorCode": "NOT_FOUND", "message": "Entity not found", "details": null } }));
}

#[tokio::test]
async fn create_assigns_id_and_returns_created() {
    let shared = Arc::new(store(vec![]));
    let router = AutoRestGenerator::given_shared_store(Arc::clone(&shared)).generate().unwrap();
    let (status, body) = send(
        router,
        Method::POST,
        "/",
        Some(json!({ "data": { "name": "widget", "stock": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1000);
    assert_eq!(shared.len().await, 1);
}

#[tokio::test]
async fn create_rejects_entity_with_id() {
    let (status, body) = send(
        app(vec![]),
        Method::POST,
        "/",
        Some(json!({ "data": { "id": 7, "name": "widget", "stock": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_ENTITY");
    assert_eq!(body["error"]["details"][0]["code"], "NEW_ENTITY_WITH_ID");
    assert_eq!(body["error"]["details"][0]["rejectedValue"], "7");
}

async fn send_raw(app: Router, method: Method, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn malformed_bodies_are_rejected_with_an_envelope() {
    let (status, body) = send(app(vec![]), Method::POST, "/", Some(json!({ "data": { "name": 1 } }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_ENTITY");
    assert_eq!(body["error"]["details"][0]["code"], "INVALID_ENTITY");
    assert_eq!(body["error"]["details"][0]["field"], "data");

    let (status, body) = send_raw(app(ten_products()), Method::PUT, "/5", "{\"data\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_ENTITY");

    let (status, body) = send(app(vec![]), Method::POST, "/", Some(json!({ "name": "bare", "stock": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_ENTITY");
}

#[tokio::test]
async fn update_checks_ids() {
    let (status, body) = send(
        app(ten_products()),
        Method::PUT,
        "/5",
        Some(json!({ "data": { "id": 6, "name": "x", "stock": 1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errorCode"], "INVALID_ID");
    assert_eq!(body["error"]["details"][0]["code"], "ID_MISMATCH");

    let (status, body) = send(
        app(ten_products()),
        Method::PUT,
        "/5",
        Some(json!({ "data": { "name": "x", "stock": 1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["code"], "EDIT_ENTITY_WITHOUT_ID");
}

#[tokio::test]
async fn update_replaces_entity() {
    let (status, body) = send(
        app(ten_products()),
        Method::PUT,
        "/5",
        Some(json!({ "data": { "id": 5, "name": "renamed", "stock": 1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "renamed");
}

#[tokio::test]
async fn delete_returns_deleted_entity() {
    let shared = Arc::new(store(ten_products()));
    let router = generator_shared(Arc::clone(&shared));
    let (status, body) = send(router, Method::DELETE, "/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(shared.len().await, 9);

    let (status, body) = send(generator_shared(shared), Method::DELETE, "/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["errorCode"], "NOT_FOUND");
}

fn generator_shared(shared: Arc<InMemoryStore<Product>>) -> Router {
    AutoRestGenerator::given_shared_store(shared).generate().unwrap()
}

#[tokio::test]
async fn custom_id_param_name_routes_members() {
    let router = generator(store(ten_products()))
        .entity_id_name_on_url("productId")
        .generate()
        .unwrap();
    let (status, body) = get(router, "/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 2);
}

struct FailingStore;

#[async_trait]
impl EntityStore<Product> for FailingStore {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn fetch_by_id(&self, _id: &EntityId) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn create(&self, _entity: Product) -> Result<Product, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn update(&self, _entity: Product) -> Result<Product, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn delete_by_id(&self, _id: &EntityId) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

#[tokio::test]
async fn store_failures_surface_as_internal_errors() {
    let cases = [
        (Method::GET, "/", None),
        (Method::GET, "/1", None),
        (Method::POST, "/", Some(json!({ "data": { "name": "widget", "stock": 4 } }))),
        (Method::PUT, "/1", Some(json!({ "data": { "id": 1, "name": "widget", "stock": 4 } }))),
        (Method::DELETE, "/1", None),
    ];
    for (method, uri, body) in cases {
        let label = format!("{} {}", method, uri);
        let (status, body) = send(generator(FailingStore).generate().unwrap(), method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", label);
        assert_eq!(body["error"]["errorCode"], "INTERNAL_ERROR", "{}", label);
    }
}

#[tokio::test]
async fn validation_runs_before_the_store_is_called() {
    let (status, body) = get(generator(FailingStore).generate().unwrap(), "/?foo=1&bar=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn generate_rejects_duplicate_descriptors() {
    let result = generator(store(vec![]))
        .sortable_field(SortableField::new("stock", |p: &Product| p.stock))
        .generate();
    assert!(matches!(result, Err(auto_rest::ConfigError::DuplicateSortableField(_))));
}

#[tokio::test]
async fn info_lists_mounted_resources() {
    let app = Router::new()
        .merge(auto_rest::common_routes(["/products"]))
        .nest("/products", generator(store(vec![])).generate().unwrap());
    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (_, body) = get(app, "/info").await;
    assert_eq!(body["resources"], json!(["/products"]));
    assert_eq!(body["name"], "auto-rest");
}
