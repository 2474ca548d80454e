use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer order. Its lines live in the order item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Human-facing order number
    #[serde(default)]
    pub order_no: String,
}

/// One line of an order: a book and the quantity ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub book_id: String,
    pub amount: u32,
}

/// A customer's return of some quantity of a previously ordered book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnItem {
    pub id: String,
    pub book_id: String,
    pub order_id: String,
    pub amount: u32,
    /// Refund value, computed on read as current price times amount.
    /// Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_amount: Option<Decimal>,
}

/// Request model for creating a return item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReturnItem {
    pub book_id: String,
    pub order_id: String,
    pub amount: u32,
}

impl CreateReturnItem {
    pub fn into_return_item(self, id: String) -> ReturnItem {
        ReturnItem {
            id,
            book_id: self.book_id,
            order_id: self.order_id,
            amount: self.amount,
            net_amount: None,
        }
    }
}
