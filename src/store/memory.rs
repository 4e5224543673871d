use crate::store::{Connect, Error, KeyValueStore};
use dashmap::DashMap;
use std::convert::Infallible;
use std::sync::Arc;

/// An in-memory key-value store.
///
/// Records are kept in a [`DashMap`] keyed by `(table, key)`. Clones share the
/// same underlying map, so a single `MemoryStore` can back several session
/// stores bound to different tables.
///
/// ### Note
///
/// Do not use this in a production environment. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<DashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all tables.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn read(&self, table: &str, key: &str) -> Result<Option<String>, Error> {
        Ok(self
            .data
            .get(&(table.to_owned(), key.to_owned()))
            .map(|payload| payload.value().clone()))
    }

    async fn write(&self, table: &str, key: &str, payload: String) -> Result<(), Error> {
        self.data.insert((table.to_owned(), key.to_owned()), payload);
        Ok(())
    }

    async fn remove(&self, table: &str, key: &str) -> Result<(), Error> {
        self.data.remove(&(table.to_owned(), key.to_owned()));
        Ok(())
    }
}

impl Connect for MemoryStore {
    type Config = ();
    type Error = Infallible;

    async fn connect(_config: ()) -> Result<Self, Infallible> {
        Ok(Self::new())
    }
}
