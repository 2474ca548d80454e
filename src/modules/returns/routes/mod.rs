use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use bookstore_http::AppError;

use super::models::{CreateReturnItem, ReturnItem};
use super::service::ReturnService;

/// Routes mounted under `/api/returns`.
pub fn router(service: ReturnService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/items", get(list_return_items).post(create_return_item))
        .route("/items/batch", post(create_return_items))
        .route("/items/{id}", get(get_return_item))
        .route("/maintenance/items/{id}", delete(purge_return_item))
        .with_state(service)
}

async fn health_check() -> &'static str {
    "returns module is healthy"
}

async fn list_return_items(
    State(service): State<ReturnService>,
) -> Result<Json<Vec<ReturnItem>>, AppError> {
    Ok(Json(service.list()?))
}

async fn get_return_item(
    State(service): State<ReturnService>,
    Path(id): Path<String>,
) -> Result<Json<ReturnItem>, AppError> {
    Ok(Json(service.get(&id)?))
}

async fn create_return_item(
    State(service): State<ReturnService>,
    payload: Result<Json<CreateReturnItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ReturnItem>), AppError> {
    let Json(payload) = payload?;
    let mut created = service.create(vec![payload])?;
    let item = created
        .pop()
        .ok_or_else(|| anyhow::anyhow!("create returned no return item"))?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn create_return_items(
    State(service): State<ReturnService>,
    payloads: Result<Json<Vec<CreateReturnItem>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<ReturnItem>>), AppError> {
    let Json(payloads) = payloads?;
    let created = service.create(payloads)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn purge_return_item(
    State(service): State<ReturnService>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service.purge(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// OpenAPI fragment for the routes above.
pub fn openapi() -> serde_json::Value {
    let error_response = |description: &str| {
        serde_json::json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        })
    };
    let return_item = |description: &str| {
        serde_json::json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ReturnItem" }
                }
            }
        })
    };
    let return_items = |description: &str| {
        serde_json::json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/ReturnItem" }
                    }
                }
            }
        })
    };
    let id_parameter = serde_json::json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);

    serde_json::json!({
        "paths": {
            "/items": {
                "get": {
                    "summary": "List return items with net amounts",
                    "tags": ["Returns"],
                    "responses": {
                        "200": return_items("Return items"),
                        "404": error_response("Referenced book no longer exists")
                    }
                },
                "post": {
                    "summary": "Create a return item and restock the book",
                    "tags": ["Returns"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateReturnItem" }
                            }
                        }
                    },
                    "responses": {
                        "201": return_item("Created return item"),
                        "400": error_response("Book not in order or amount exceeds ordered amount"),
                        "404": error_response("Book or order does not exist"),
                        "422": error_response("Amount is not positive")
                    }
                }
            },
            "/items/batch": {
                "post": {
                    "summary": "Create several return items atomically",
                    "tags": ["Returns"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/CreateReturnItem" }
                                }
                            }
                        }
                    },
                    "responses": {
                        "201": return_items("Created return items"),
                        "400": error_response("A return item broke a business rule"),
                        "404": error_response("Book or order does not exist"),
                        "422": error_response("Amount is not positive")
                    }
                }
            },
            "/items/{id}": {
                "get": {
                    "summary": "Get a return item with its net amount",
                    "tags": ["Returns"],
                    "parameters": id_parameter.clone(),
                    "responses": {
                        "200": return_item("Return item"),
                        "404": error_response("Return item does not exist")
                    }
                }
            },
            "/maintenance/items/{id}": {
                "delete": {
                    "summary": "Purge a return item (maintenance mode only)",
                    "tags": ["Returns"],
                    "parameters": id_parameter,
                    "responses": {
                        "204": { "description": "Purged" },
                        "403": error_response("Maintenance mode is disabled"),
                        "404": error_response("Return item does not exist")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Returns health check",
                    "tags": ["Returns"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ReturnItem": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Identifier assigned on creation" },
                        "book_id": { "type": "string" },
                        "order_id": { "type": "string" },
                        "amount": { "type": "integer", "minimum": 1 },
                        "net_amount": {
                            "type": "string",
                            "description": "Current book price times amount, as a decimal string"
                        }
                    },
                    "required": ["id", "book_id", "order_id", "amount"]
                },
                "CreateReturnItem": {
                    "type": "object",
                    "properties": {
                        "book_id": { "type": "string" },
                        "order_id": { "type": "string" },
                        "amount": { "type": "integer", "minimum": 1 }
                    },
                    "required": ["book_id", "order_id", "amount"]
                }
            }
        }
    })
}
