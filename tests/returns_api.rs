use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use bookstore_app::store::{BookstoreDb, BookstoreTables, SeedData};
use bookstore_db::Database;
use bookstore_kernel::settings::Settings;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn database() -> BookstoreDb {
    let seed: SeedData = serde_json::from_value(json!({
        "books": [
            {"id": "B1", "title": "Wuthering Heights", "author": "Emily Brontë", "price": "10.00", "stock": 5},
            {"id": "B2", "title": "Jane Eyre", "author": "Charlotte Brontë", "price": "12.34", "stock": 11}
        ],
        "orders": [
            {"id": "O1", "order_no": "1", "items": [{"book_id": "B1", "amount": 3}]}
        ]
    }))
    .unwrap();
    Database::new(BookstoreTables::from_seed(seed).unwrap())
}

fn app_with(maintenance_enabled: bool) -> Router {
    let mut settings = Settings::default();
    settings.returns.maintenance_enabled = maintenance_enabled;
    let registry = bookstore_app::build_registry(&database(), &settings);
    bookstore_http::build_router(&registry, &settings)
}

fn app() -> Router {
    app_with(false)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_return_restocks_and_computes_net_amount() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/returns/items",
            json!({"book_id": "B1", "order_id": "O1", "amount": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["net_amount"], "20.00");
    assert_eq!(created["amount"], 2);

    let book = json_body(app.clone().oneshot(get("/api/books/B1")).await.unwrap()).await;
    assert_eq!(book["stock"], 7);

    let id = created["id"].as_str().unwrap();
    let fetched = app
        .oneshot(get(&format!("/api/returns/items/{}", id)))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(fetched).await["net_amount"], "20.00");
}

#[tokio::test]
async fn over_return_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            "/api/returns/items",
            json!({"book_id": "B1", "order_id": "O1", "amount": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(
        body["error"]["message"],
        "return amount should equal or less than order amount"
    );
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let response = app()
        .oneshot(post_json(
            "/api/returns/items",
            json!({"book_id": "B1", "order_id": "O404", "amount": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "Order does not exist"
    );
}

#[tokio::test]
async fn book_outside_order_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            "/api/returns/items",
            json!({"book_id": "B2", "order_id": "O1", "amount": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "Order ID not match Book ID"
    );
}

#[tokio::test]
async fn zero_amount_is_a_validation_error() {
    let response = app()
        .oneshot(post_json(
            "/api/returns/items",
            json!({"book_id": "B1", "order_id": "O1", "amount": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["details"][0]["field"], "amount");
}

#[tokio::test]
async fn negative_amount_uses_error_envelope() {
    let response = app()
        .oneshot(post_json(
            "/api/returns/items",
            json!({"book_id": "B1", "order_id": "O1", "amount": -1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "body");
    assert!(body["error"]["trace_id"].is_string());
}

#[tokio::test]
async fn missing_amount_uses_error_envelope() {
    let response = app()
        .oneshot(post_json(
            "/api/returns/items/batch",
            json!([{"book_id": "B1", "order_id": "O1"}]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn unparseable_body_is_bad_request() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/returns/items")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn failing_batch_changes_nothing() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/returns/items/batch",
            json!([
                {"book_id": "B1", "order_id": "O1", "amount": 1},
                {"book_id": "B2", "order_id": "O1", "amount": 1}
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let book = json_body(app.clone().oneshot(get("/api/books/B1")).await.unwrap()).await;
    assert_eq!(book["stock"], 5);

    let items = json_body(app.oneshot(get("/api/returns/items")).await.unwrap()).await;
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn batch_creates_every_item() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/returns/items/batch",
            json!([
                {"book_id": "B1", "order_id": "O1", "amount": 1},
                {"book_id": "B1", "order_id": "O1", "amount": 2}
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);

    let book = json_body(app.clone().oneshot(get("/api/books/B1")).await.unwrap()).await;
    assert_eq!(book["stock"], 8);

    let items = json_body(app.oneshot(get("/api/returns/items")).await.unwrap()).await;
    let net_amounts: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["net_amount"].as_str().unwrap())
        .collect();
    assert_eq!(net_amounts, vec!["10.00", "20.00"]);
}

#[tokio::test]
async fn purge_is_forbidden_outside_maintenance() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/returns/maintenance/items/R1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn purge_removes_item_in_maintenance() {
    let app = app_with(true);

    let created = json_body(
        app.clone()
            .oneshot(post_json(
                "/api/returns/items",
                json!({"book_id": "B1", "order_id": "O1", "amount": 1}),
            ))
            .await
            .unwrap(),
    )
    .await;
    let uri = format!(
        "/api/returns/maintenance/items/{}",
        created["id"].as_str().unwrap()
    );

    let purge = || {
        Request::builder()
            .method("DELETE")
            .uri(uri.as_str())
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(purge()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let again = app.oneshot(purge()).await.unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_book_lookup_is_not_found() {
    let response = app().oneshot(get("/api/books/B404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_return_routes() {
    let spec = json_body(app().oneshot(get("/docs/openapi.json")).await.unwrap()).await;

    assert!(spec["paths"]["/api/returns/items"]["post"].is_object());
    assert!(spec["paths"]["/api/books"]["get"].is_object());
    assert!(spec["components"]["schemas"]["ReturnItem"].is_object());
}
