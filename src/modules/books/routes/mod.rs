use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use bookstore_http::AppError;

use super::models::Book;
use crate::store::{BookstoreDb, ReturnStore};

/// Routes mounted under `/api/books`.
pub fn router(db: BookstoreDb) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book))
        .with_state(db)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(db): State<BookstoreDb>) -> Json<Vec<Book>> {
    Json(db.read(|tables| tables.books().cloned().collect()))
}

async fn get_book(
    State(db): State<BookstoreDb>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book = db
        .read(|tables| tables.find_book_by_id(&id))
        .map_err(anyhow::Error::new)?;

    book.map(Json)
        .ok_or_else(|| AppError::not_found("Book does not exist"))
}
