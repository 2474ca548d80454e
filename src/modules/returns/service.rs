use super::error::ReturnError;
use super::handlers::{compute_net_amounts, validate_and_restock};
use super::models::{CreateReturnItem, ReturnItem};
use crate::store::{BookstoreDb, ReturnStore};
use crate::utils;

/// Entry point for return item operations. Every write runs in one store
/// transaction: either all items of a request are applied or none are.
#[derive(Clone)]
pub struct ReturnService {
    db: BookstoreDb,
    maintenance_enabled: bool,
}

impl ReturnService {
    pub fn new(db: BookstoreDb, maintenance_enabled: bool) -> Self {
        Self {
            db,
            maintenance_enabled,
        }
    }

    /// Create return items, restocking their books.
    pub fn create(&self, payloads: Vec<CreateReturnItem>) -> Result<Vec<ReturnItem>, ReturnError> {
        if payloads.iter().any(|payload| payload.amount == 0) {
            return Err(ReturnError::ZeroAmount);
        }

        let mut items: Vec<ReturnItem> = payloads
            .into_iter()
            .map(|payload| payload.into_return_item(utils::new_record_id()))
            .collect();

        self.db.transaction(|tables| -> Result<(), ReturnError> {
            validate_and_restock(tables, &items)?;

            for item in &items {
                tables.insert_return_item(item.clone())?;
            }

            compute_net_amounts(tables, &mut items)
        })?;

        tracing::info!(count = items.len(), "return items created");
        Ok(items)
    }

    pub fn list(&self) -> Result<Vec<ReturnItem>, ReturnError> {
        self.db.read(|tables| -> Result<Vec<ReturnItem>, ReturnError> {
            let mut items = tables.list_return_items()?;
            compute_net_amounts(tables, &mut items)?;
            Ok(items)
        })
    }

    pub fn get(&self, id: &str) -> Result<ReturnItem, ReturnError> {
        self.db.read(|tables| -> Result<ReturnItem, ReturnError> {
            let item = tables
                .find_return_item_by_id(id)?
                .ok_or_else(|| ReturnError::ReturnItemNotFound {
                    return_id: id.to_string(),
                })?;

            let mut items = [item];
            compute_net_amounts(tables, &mut items)?;
            let [item] = items;
            Ok(item)
        })
    }

    /// Maintenance removal of a single return item. Stock is left untouched.
    pub fn purge(&self, id: &str) -> Result<ReturnItem, ReturnError> {
        if !self.maintenance_enabled {
            return Err(ReturnError::MaintenanceDisabled);
        }

        let removed = self.db.transaction(|tables| -> Result<ReturnItem, ReturnError> {
            tables
                .delete_return_item(id)?
                .ok_or_else(|| ReturnError::ReturnItemNotFound {
                    return_id: id.to_string(),
                })
        })?;

        tracing::warn!(return_id = %removed.id, "return item purged");
        Ok(removed)
    }
}
