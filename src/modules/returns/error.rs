use bookstore_db::StoreError;
use bookstore_http::AppError;
use serde_json::json;
use thiserror::Error;

/// Reasons a return item operation is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReturnError {
    #[error("Book does not exist")]
    BookNotFound { book_id: String },

    #[error("Order does not exist")]
    OrderNotFound { order_id: String },

    #[error("Order ID not match Book ID")]
    OrderBookMismatch { order_id: String, book_id: String },

    #[error("return amount should equal or less than order amount")]
    AmountExceedsOrdered { requested: u32, ordered: u32 },

    #[error("return amount must be positive")]
    ZeroAmount,

    #[error("stock of book '{book_id}' would overflow")]
    StockOverflow { book_id: String },

    #[error("net amount of return item '{return_id}' overflows")]
    NetAmountOverflow { return_id: String },

    #[error("Return item does not exist")]
    ReturnItemNotFound { return_id: String },

    #[error("return item maintenance is disabled")]
    MaintenanceDisabled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReturnError> for AppError {
    fn from(err: ReturnError) -> Self {
        let message = err.to_string();
        match err {
            ReturnError::BookNotFound { .. }
            | ReturnError::OrderNotFound { .. }
            | ReturnError::ReturnItemNotFound { .. } => AppError::not_found(message),
            ReturnError::OrderBookMismatch { .. }
            | ReturnError::AmountExceedsOrdered { .. }
            | ReturnError::StockOverflow { .. } => AppError::bad_request(message),
            ReturnError::ZeroAmount => AppError::validation(
                vec![json!({"field": "amount", "error": "must be positive"})],
                message,
            ),
            ReturnError::MaintenanceDisabled => AppError::forbidden(message),
            ReturnError::Store(StoreError::DuplicateKey { table, key }) => AppError::conflict(
                vec![json!({"table": table, "key": key})],
                message,
            ),
            ReturnError::NetAmountOverflow { .. } | ReturnError::Store(_) => {
                AppError::Internal(anyhow::Error::new(err))
            }
        }
    }
}
