//! Session persistence on top of a key-value store.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

mod builder;
pub use builder::{Connection, DEFAULT_TABLE, SessionStoreBuilder};

use crate::codec;
use crate::store::{Connect, Error, KeyValueStore};

/// The contract exposed to message handlers: load, save and drop the session
/// kept for a conversation key.
///
/// `get` returning `Ok(None)` means "no session yet", not a failure.
pub trait SessionStore<T>: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<T>, Error>> + Send;

    fn set(&self, key: &str, session: &T) -> impl Future<Output = Result<(), Error>> + Send;

    fn delete(&self, key: &str) -> impl Future<Output = Result<(), Error>> + Send;
}

/// A [`SessionStore`] that serializes sessions into a single table of a
/// [`KeyValueStore`].
///
/// Every call goes straight to the store. There is no caching, batching or
/// locking: concurrent writes to the same key race at the store and the last
/// one to land wins. Clones share the store handle.
pub struct KvSessionStore<T, K> {
    client: Option<Arc<K>>,
    table: Arc<str>,
    _session: PhantomData<fn() -> T>,
}

impl<T, K> KvSessionStore<T, K>
where
    K: KeyValueStore,
{
    /// Binds an existing store handle to the [`DEFAULT_TABLE`].
    pub fn new(client: Arc<K>) -> Self {
        Self::with_table(client, DEFAULT_TABLE)
    }

    /// Binds an existing store handle to `table`.
    pub fn with_table(client: Arc<K>, table: impl Into<Arc<str>>) -> Self {
        Self::from_parts(Some(client), table.into())
    }

    /// Starts a builder, either connecting a new handle or reusing one.
    pub fn builder(connection: Connection<K>) -> SessionStoreBuilder<T, K>
    where
        K: Connect,
    {
        SessionStoreBuilder::new(connection)
    }

    pub(crate) fn from_parts(client: Option<Arc<K>>, table: Arc<str>) -> Self {
        Self {
            client,
            table,
            _session: PhantomData,
        }
    }

    /// The table every operation of this store works in.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns `false` when the store handle failed to initialize and the
    /// error was handed to an init-error callback. Every operation on an
    /// unbound store fails with [`Error::Unbound`].
    pub fn is_bound(&self) -> bool {
        self.client.is_some()
    }

    /// The underlying store handle, if bound.
    pub fn client(&self) -> Option<&Arc<K>> {
        self.client.as_ref()
    }

    fn bound(&self) -> Result<&K, Error> {
        self.client.as_deref().ok_or_else(|| {
            tracing::error!("the session store is not bound to a store handle");
            Error::Unbound
        })
    }
}

impl<T, K> KvSessionStore<T, K>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    K: KeyValueStore,
{
    /// Loads the session stored at `key`.
    ///
    /// Returns `Ok(None)` when no record exists. A record with an empty payload
    /// is treated as absent too.
    #[tracing::instrument(
        name = "getting session from store",
        level = "debug",
        skip(self),
        fields(table = %self.table)
    )]
    pub async fn get(&self, key: &str) -> Result<Option<T>, Error> {
        let payload = self.bound()?.read(&self.table, key).await.map_err(|err| {
            tracing::error!(err = %err, "failed to get session from store");
            err
        })?;

        match payload {
            Some(payload) if !payload.is_empty() => codec::decode(&payload).map(Some),
            _ => {
                tracing::debug!("no session stored");
                Ok(None)
            }
        }
    }

    /// Saves `session` at `key`, replacing whatever was stored there.
    #[tracing::instrument(
        name = "saving session to store",
        level = "debug",
        skip(self, session),
        fields(table = %self.table)
    )]
    pub async fn set(&self, key: &str, session: &T) -> Result<(), Error> {
        let client = self.bound()?;
        let payload = codec::encode(session)?;

        client.write(&self.table, key, payload).await.map_err(|err| {
            tracing::error!(err = %err, "failed to save session to store");
            err
        })
    }

    /// Deletes the session at `key`. Deleting a missing session is not an error.
    #[tracing::instrument(
        name = "deleting session from store",
        level = "debug",
        skip(self),
        fields(table = %self.table)
    )]
    pub async fn delete(&self, key: &str) -> Result<(), Error> {
        self.bound()?.remove(&self.table, key).await.map_err(|err| {
            tracing::error!(err = %err, "failed to delete session from store");
            err
        })
    }
}

impl<T, K> SessionStore<T> for KvSessionStore<T, K>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    K: KeyValueStore,
{
    async fn get(&self, key: &str) -> Result<Option<T>, Error> {
        KvSessionStore::get(self, key).await
    }

    async fn set(&self, key: &str, session: &T) -> Result<(), Error> {
        KvSessionStore::set(self, key, session).await
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        KvSessionStore::delete(self, key).await
    }
}

impl<T, K> Clone for KvSessionStore<T, K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            table: Arc::clone(&self.table),
            _session: PhantomData,
        }
    }
}

impl<T, K: fmt::Debug> fmt::Debug for KvSessionStore<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvSessionStore")
            .field("client", &self.client)
            .field("table", &self.table)
            .finish()
    }
}
