use crate::store::{Connect, Error, KeyValueStore};
use fred::interfaces::HashesInterface;
use fred::prelude::{Builder, Client, ClientLike, Config as RedisConfig};
use std::sync::Arc;

/// A redis key-value store implementation.
///
/// Each table is a Redis Hash named after the table; every session key is a
/// field of that hash holding the serialized payload.
///
/// ```text
/// HGET  <table> <key>
/// HSET  <table> <key> <payload>
/// HDEL  <table> <key>
/// ```
///
/// The client can be any fred client type (`Client`, `Pool`, ...). Only
/// `RedisStore<Client>` can build its own handle through [`Connect`].
#[derive(Clone, Debug)]
pub struct RedisStore<C: HashesInterface + Clone + Send + Sync = Client> {
    client: Arc<C>,
}

impl<C> RedisStore<C>
where
    C: HashesInterface + Clone + Send + Sync,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }
}

impl<C> KeyValueStore for RedisStore<C>
where
    C: HashesInterface + Clone + Send + Sync + 'static,
{
    async fn read(&self, table: &str, key: &str) -> Result<Option<String>, Error> {
        Ok(self.client.hget::<Option<String>, _, _>(table, key).await?)
    }

    async fn write(&self, table: &str, key: &str, payload: String) -> Result<(), Error> {
        let _: i64 = self.client.hset(table, (key, payload)).await?;
        Ok(())
    }

    async fn remove(&self, table: &str, key: &str) -> Result<(), Error> {
        let _: i64 = self.client.hdel(table, key).await?;
        Ok(())
    }
}

impl Connect for RedisStore<Client> {
    type Config = RedisConfig;
    type Error = fred::error::Error;

    /// Builds a client from `config` and waits for the initial connection.
    async fn connect(config: RedisConfig) -> Result<Self, fred::error::Error> {
        let client = Builder::from_config(config).build()?;
        client.init().await?;
        Ok(Self::new(Arc::new(client)))
    }
}
