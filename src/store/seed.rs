use std::collections::HashSet;

use serde::Deserialize;

use crate::modules::books::models::Book;

/// Fixture format for catalog and order data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedOrder {
    pub id: String,
    #[serde(default)]
    pub order_no: String,
    #[serde(default)]
    pub items: Vec<SeedOrderItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedOrderItem {
    pub book_id: String,
    pub amount: u32,
}

impl SeedData {
    /// Referential problems in the fixture, one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut book_ids = HashSet::new();
        for book in &self.books {
            if !book_ids.insert(book.id.as_str()) {
                problems.push(format!("duplicate book id '{}'", book.id));
            }
        }

        let mut order_ids = HashSet::new();
        for order in &self.orders {
            if !order_ids.insert(order.id.as_str()) {
                problems.push(format!("duplicate order id '{}'", order.id));
            }

            for item in &order.items {
                if !book_ids.contains(item.book_id.as_str()) {
                    problems.push(format!(
                        "order '{}' references unknown book '{}'",
                        order.id, item.book_id
                    ));
                }
                if item.amount == 0 {
                    problems.push(format!(
                        "order '{}' has a zero amount line for book '{}'",
                        order.id, item.book_id
                    ));
                }
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> SeedData {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn clean_fixture_has_no_problems() {
        let seed = parse(
            r#"{
                "books": [{"id": "B1", "title": "Jane Eyre", "price": "12.34", "stock": 5}],
                "orders": [{"id": "O1", "order_no": "1", "items": [{"book_id": "B1", "amount": 2}]}]
            }"#,
        );

        assert!(seed.validate().is_empty());
    }

    #[test]
    fn reports_dangling_and_zero_lines() {
        let seed = parse(
            r#"{
                "books": [{"id": "B1", "title": "Jane Eyre", "price": "12.34", "stock": 5}],
                "orders": [
                    {"id": "O1", "items": [{"book_id": "B2", "amount": 1}, {"book_id": "B1", "amount": 0}]},
                    {"id": "O1"}
                ]
            }"#,
        );

        assert_eq!(
            seed.validate(),
            vec![
                "order 'O1' references unknown book 'B2'",
                "order 'O1' has a zero amount line for book 'B1'",
                "duplicate order id 'O1'",
            ]
        );
    }
}
