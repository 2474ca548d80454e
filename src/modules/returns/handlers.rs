//! Lifecycle hooks for return items.
//!
//! [`validate_and_restock`] runs before new return items are persisted and
//! [`compute_net_amounts`] runs after return items are read or created. Both
//! work item by item and stop at the first failure; callers run them inside a
//! store transaction so a failure leaves no partial stock update behind.

use rust_decimal::Decimal;

use super::error::ReturnError;
use super::models::ReturnItem;
use crate::store::ReturnStore;

/// Check each return item against its book and order, then put the returned
/// units back into stock.
pub fn validate_and_restock<S>(store: &mut S, items: &[ReturnItem]) -> Result<(), ReturnError>
where
    S: ReturnStore + ?Sized,
{
    for item in items {
        let mut book = store
            .find_book_by_id(&item.book_id)?
            .ok_or_else(|| ReturnError::BookNotFound {
                book_id: item.book_id.clone(),
            })?;

        store
            .find_order_by_id(&item.order_id)?
            .ok_or_else(|| ReturnError::OrderNotFound {
                order_id: item.order_id.clone(),
            })?;

        let ordered = ordered_amount(store, item)?;

        if item.amount > ordered {
            return Err(ReturnError::AmountExceedsOrdered {
                requested: item.amount,
                ordered,
            });
        }

        book.stock = book
            .stock
            .checked_add(item.amount)
            .ok_or_else(|| ReturnError::StockOverflow {
                book_id: book.id.clone(),
            })?;

        tracing::info!(
            return_id = %item.id,
            book_id = %book.id,
            order_id = %item.order_id,
            amount = item.amount,
            stock = book.stock,
            "return accepted, stock increased"
        );

        store.update_book(book)?;
    }

    Ok(())
}

/// Quantity of `item.book_id` ordered in `item.order_id`.
///
/// When the order has several lines for the same book the last one wins.
fn ordered_amount<S>(store: &S, item: &ReturnItem) -> Result<u32, ReturnError>
where
    S: ReturnStore + ?Sized,
{
    let lines = store.find_order_items_by_order(&item.order_id)?;
    let matching: Vec<_> = lines
        .iter()
        .filter(|line| line.book_id == item.book_id)
        .collect();

    let Some(last) = matching.last() else {
        return Err(ReturnError::OrderBookMismatch {
            order_id: item.order_id.clone(),
            book_id: item.book_id.clone(),
        });
    };

    if matching.len() > 1 {
        tracing::warn!(
            order_id = %item.order_id,
            book_id = %item.book_id,
            lines = matching.len(),
            "order has several lines for the same book, using the last one"
        );
    }

    Ok(last.amount)
}

/// Fill `net_amount` with the book's current price times the returned amount.
pub fn compute_net_amounts<S>(store: &S, items: &mut [ReturnItem]) -> Result<(), ReturnError>
where
    S: ReturnStore + ?Sized,
{
    for item in items.iter_mut() {
        let book = store
            .find_book_by_id(&item.book_id)?
            .ok_or_else(|| ReturnError::BookNotFound {
                book_id: item.book_id.clone(),
            })?;

        let net_amount = book
            .price
            .checked_mul(Decimal::from(item.amount))
            .ok_or_else(|| ReturnError::NetAmountOverflow {
                return_id: item.id.clone(),
            })?;

        item.net_amount = Some(net_amount);
    }

    Ok(())
}
