//! Bookstore tables and the lookups the return workflow needs from them.

mod seed;

use std::collections::BTreeMap;

use bookstore_db::{Database, StoreError};

use crate::modules::books::models::Book;
use crate::modules::returns::models::{Order, OrderItem, ReturnItem};

pub use seed::{SeedData, SeedOrder, SeedOrderItem};

/// Shared handle to the bookstore tables.
pub type BookstoreDb = Database<BookstoreTables>;

const BOOKS: &str = "books";
const ORDERS: &str = "orders";
const RETURN_ITEMS: &str = "return_items";

/// Persistence operations used by the return workflow.
///
/// Implementations are expected to run inside a transaction owned by the
/// caller; none of these methods commit anything on their own.
pub trait ReturnStore {
    fn find_book_by_id(&self, id: &str) -> Result<Option<Book>, StoreError>;

    fn find_order_by_id(&self, id: &str) -> Result<Option<Order>, StoreError>;

    /// Lines of the given order, in insertion order.
    fn find_order_items_by_order(&self, order_id: &str) -> Result<Vec<OrderItem>, StoreError>;

    fn update_book(&mut self, book: Book) -> Result<(), StoreError>;

    fn insert_return_item(&mut self, item: ReturnItem) -> Result<(), StoreError>;

    fn find_return_item_by_id(&self, id: &str) -> Result<Option<ReturnItem>, StoreError>;

    /// All return items ordered by id.
    fn list_return_items(&self) -> Result<Vec<ReturnItem>, StoreError>;

    /// Remove a return item, yielding it if it existed.
    fn delete_return_item(&mut self, id: &str) -> Result<Option<ReturnItem>, StoreError>;
}

/// In-memory rows for every bookstore entity.
#[derive(Debug, Clone, Default)]
pub struct BookstoreTables {
    books: BTreeMap<String, Book>,
    orders: BTreeMap<String, Order>,
    order_items: Vec<OrderItem>,
    return_items: BTreeMap<String, ReturnItem>,
}

impl BookstoreTables {
    /// Build tables from fixture data, rejecting duplicate keys.
    pub fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        let mut tables = Self::default();

        for book in seed.books {
            tables.insert_book(book)?;
        }

        for order in seed.orders {
            let order_id = order.id.clone();
            tables.insert_order(Order {
                id: order.id,
                order_no: order.order_no,
            })?;

            for line in order.items {
                tables.insert_order_item(OrderItem {
                    order_id: order_id.clone(),
                    book_id: line.book_id,
                    amount: line.amount,
                });
            }
        }

        Ok(tables)
    }

    pub fn insert_book(&mut self, book: Book) -> Result<(), StoreError> {
        if self.books.contains_key(&book.id) {
            return Err(StoreError::DuplicateKey {
                table: BOOKS,
                key: book.id,
            });
        }
        self.books.insert(book.id.clone(), book);
        Ok(())
    }

    pub fn insert_order(&mut self, order: Order) -> Result<(), StoreError> {
        if self.orders.contains_key(&order.id) {
            return Err(StoreError::DuplicateKey {
                table: ORDERS,
                key: order.id,
            });
        }
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    pub fn insert_order_item(&mut self, item: OrderItem) {
        self.order_items.push(item);
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl ReturnStore for BookstoreTables {
    fn find_book_by_id(&self, id: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get(id).cloned())
    }

    fn find_order_by_id(&self, id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(id).cloned())
    }

    fn find_order_items_by_order(&self, order_id: &str) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }

    fn update_book(&mut self, book: Book) -> Result<(), StoreError> {
        match self.books.get_mut(&book.id) {
            Some(row) => {
                *row = book;
                Ok(())
            }
            None => Err(StoreError::MissingRow {
                table: BOOKS,
                key: book.id,
            }),
        }
    }

    fn insert_return_item(&mut self, mut item: ReturnItem) -> Result<(), StoreError> {
        if self.return_items.contains_key(&item.id) {
            return Err(StoreError::DuplicateKey {
                table: RETURN_ITEMS,
                key: item.id,
            });
        }
        item.net_amount = None;
        self.return_items.insert(item.id.clone(), item);
        Ok(())
    }

    fn find_return_item_by_id(&self, id: &str) -> Result<Option<ReturnItem>, StoreError> {
        Ok(self.return_items.get(id).cloned())
    }

    fn list_return_items(&self) -> Result<Vec<ReturnItem>, StoreError> {
        Ok(self.return_items.values().cloned().collect())
    }

    fn delete_return_item(&mut self, id: &str) -> Result<Option<ReturnItem>, StoreError> {
        Ok(self.return_items.remove(id))
    }
}
