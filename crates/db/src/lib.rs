//! In-memory relational store with all-or-nothing transactions.
//!
//! A [`Database`] owns one state value `S` (a set of tables). Readers get a
//! shared view; writers run inside [`Database::transaction`], which stages a
//! copy of the state and swaps it in only when the closure returns `Ok`.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures raised by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate key '{key}' in table '{table}'")]
    DuplicateKey { table: &'static str, key: String },

    #[error("row '{key}' does not exist in table '{table}'")]
    MissingRow { table: &'static str, key: String },
}

/// Failures raised while loading a JSON fixture.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read fixture {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Shared handle to the store. Cloning is cheap and every clone sees the same tables.
pub struct Database<S> {
    state: Arc<RwLock<S>>,
}

impl<S> Clone for Database<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Default> Default for Database<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Database<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Run `f` against a consistent view of the current state.
    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        let guard = self.state.read();
        f(&guard)
    }

}

impl<S: Clone> Database<S> {
    /// Run `f` inside a write transaction.
    ///
    /// Writers are serialized. `f` mutates a staged copy; the copy becomes the
    /// new state only if `f` returns `Ok`, so an error leaves every table
    /// exactly as it was before the call.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&mut S) -> Result<T, E>) -> Result<T, E> {
        let mut guard = self.state.write();
        let mut staged = guard.clone();

        match f(&mut staged) {
            Ok(value) => {
                *guard = staged;
                tracing::trace!(target: "bookstore-db", "transaction committed");
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(target: "bookstore-db", "transaction rolled back");
                Err(err)
            }
        }
    }
}

/// Deserialize a JSON fixture file.
pub fn load_fixture<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, FixtureError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: shown.clone(),
        source,
    })?;

    let fixture = serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: shown.clone(),
        source,
    })?;

    tracing::info!(target: "bookstore-db", path = %shown, "fixture loaded");
    Ok(fixture)
}
