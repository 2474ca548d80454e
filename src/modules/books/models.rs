use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A title in the catalog together with its inventory level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    #[serde(default)]
    pub author: String,
    /// Unit price, serialized as a decimal string
    pub price: Decimal,
    /// Units currently available
    pub stock: u32,
}
