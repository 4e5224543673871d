//! Key-value backends a session store can be bound to.

use std::error::Error as StdError;
use std::future::Future;

#[cfg(feature = "dynamodb-store")]
pub mod dynamodb;
pub mod memory;
#[cfg(feature = "postgres-store")]
pub mod postgres;
#[cfg(feature = "redis-store")]
pub mod redis;

pub use memory::MemoryStore;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Encoding failed with: {0}")]
    Encode(String),

    #[error("Decoding failed with: {0}")]
    Decode(String),

    #[error(transparent)]
    Backend(BoxError),

    /// The store handle could not be constructed and no init-error callback
    /// was registered.
    #[error("failed to initialize the store: {0}")]
    Init(#[source] BoxError),

    /// The adapter was built after a handle construction failure that was
    /// routed to the init-error callback. It has no store to talk to.
    #[error("session store is not bound to a store handle")]
    Unbound,
}

impl Error {
    pub fn backend<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::Backend(Box::new(err))
    }
}

#[cfg(feature = "dynamodb-store")]
impl<E, R> From<aws_sdk_dynamodb::error::SdkError<E, R>> for Error
where
    E: StdError + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(err: aws_sdk_dynamodb::error::SdkError<E, R>) -> Self {
        Error::backend(err)
    }
}

#[cfg(feature = "redis-store")]
impl From<fred::error::Error> for Error {
    fn from(err: fred::error::Error) -> Self {
        Error::backend(err)
    }
}

#[cfg(feature = "postgres-store")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::backend(err)
    }
}

/// The primitive operations a remote key-value service must offer.
///
/// Every record lives in a `table` (namespace) and is addressed by a single
/// string `key`. The payload is an opaque string.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the payload stored at `key`, or `None` if there is no record.
    fn read(
        &self,
        table: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, Error>> + Send;

    /// Creates or fully replaces the record at `key`.
    fn write(
        &self,
        table: &str,
        key: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes the record at `key`. Removing an absent key succeeds.
    fn remove(&self, table: &str, key: &str) -> impl Future<Output = Result<(), Error>> + Send;
}

/// A [`KeyValueStore`] that can build its own handle from connection configuration.
pub trait Connect: KeyValueStore + Sized {
    type Config: Send;
    type Error: StdError + Send + Sync + 'static;

    fn connect(config: Self::Config) -> impl Future<Output = Result<Self, Self::Error>> + Send;
}
