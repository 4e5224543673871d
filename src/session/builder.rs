use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::session::KvSessionStore;
use crate::store::{Connect, Error};

/// Table used when none is configured.
pub const DEFAULT_TABLE: &str = "telegraf-sessions";

/// How a session store gets its store handle.
pub enum Connection<K: Connect> {
    /// Build a new handle from connection configuration. The session store
    /// owns it from then on.
    New(K::Config),
    /// Reuse a handle owned elsewhere.
    Existing(Arc<K>),
}

impl<K: Connect> From<Arc<K>> for Connection<K> {
    fn from(client: Arc<K>) -> Self {
        Connection::Existing(client)
    }
}

impl<K> fmt::Debug for Connection<K>
where
    K: Connect + fmt::Debug,
    K::Config: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connection::New(config) => f.debug_tuple("New").field(config).finish(),
            Connection::Existing(client) => f.debug_tuple("Existing").field(client).finish(),
        }
    }
}

type InitErrorHandler<E> = Box<dyn FnOnce(E) + Send>;

/// Builder for a [`KvSessionStore`].
///
/// # Example
///
/// ```rust
/// use kv_session::{Connection, KvSessionStore};
/// use kv_session::store::MemoryStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), kv_session::store::Error> {
/// let store = KvSessionStore::<u32, MemoryStore>::builder(Connection::New(()))
///     .table("bot-sessions")
///     .on_init_error(|err| eprintln!("session store unavailable: {err}"))
///     .build()
///     .await?;
///
/// assert_eq!(store.table(), "bot-sessions");
/// # Ok(())
/// # }
/// ```
pub struct SessionStoreBuilder<T, K: Connect> {
    connection: Connection<K>,
    table: Option<String>,
    on_init_error: Option<InitErrorHandler<K::Error>>,
    _session: PhantomData<fn() -> T>,
}

impl<T, K: Connect> SessionStoreBuilder<T, K> {
    pub fn new(connection: Connection<K>) -> Self {
        Self {
            connection,
            table: None,
            on_init_error: None,
            _session: PhantomData,
        }
    }

    /// Sets the table sessions are stored in. Defaults to [`DEFAULT_TABLE`].
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Registers a callback for store handle construction failures.
    ///
    /// Without one, [`build`](Self::build) returns [`Error::Init`]. With one,
    /// the callback receives the raw connection error exactly once and `build`
    /// returns an *unbound* store: [`KvSessionStore::is_bound`] is `false` and
    /// every operation fails with [`Error::Unbound`].
    pub fn on_init_error<F>(mut self, on_init_error: F) -> Self
    where
        F: FnOnce(K::Error) + Send + 'static,
    {
        self.on_init_error = Some(Box::new(on_init_error));
        self
    }

    /// Resolves the store handle and binds it to the configured table.
    #[tracing::instrument(name = "building session store", level = "debug", skip(self))]
    pub async fn build(self) -> Result<KvSessionStore<T, K>, Error> {
        let table: Arc<str> = self
            .table
            .unwrap_or_else(|| DEFAULT_TABLE.to_owned())
            .into();

        let client = match self.connection {
            Connection::Existing(client) => Some(client),
            Connection::New(config) => match K::connect(config).await {
                Ok(client) => Some(Arc::new(client)),
                Err(err) => match self.on_init_error {
                    Some(on_init_error) => {
                        tracing::warn!(
                            err = %err,
                            table = %table,
                            "failed to initialize the store, session store is unbound"
                        );
                        on_init_error(err);
                        None
                    }
                    None => {
                        tracing::error!(err = %err, "failed to initialize the store");
                        return Err(Error::Init(Box::new(err)));
                    }
                },
            },
        };

        Ok(KvSessionStore::from_parts(client, table))
    }
}

impl<T, K: Connect> fmt::Debug for SessionStoreBuilder<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStoreBuilder")
            .field("table", &self.table)
            .field("on_init_error", &self.on_init_error.is_some())
            .finish_non_exhaustive()
    }
}
