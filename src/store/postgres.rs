use crate::store::{Connect, Error, KeyValueStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connection parameters for [`PostgresStore::connect`](Connect::connect).
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
        }
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// A Postgres-backed key-value store.
///
/// Each table is a Postgres table with the layout created by
/// [`PostgresStore::create_table`]:
///
/// ```sql
/// create table if not exists "<table>" (
///     key text primary key,
///     session text not null
/// );
/// ```
///
/// Tables are never created implicitly; a missing table surfaces as
/// [`Error::Backend`] on first use.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates `table` with the session record layout if it doesn't exist.
    pub async fn create_table(&self, table: &str) -> Result<(), Error> {
        sqlx::query(&format!(
            r#"
            create table if not exists {} (
                key text primary key,
                session text not null
            )
            "#,
            quote_ident(table)
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Quotes a table name as a Postgres identifier. Embedded quotes are doubled.
fn quote_ident(table: &str) -> String {
    format!("\"{}\"", table.replace('"', "\"\""))
}

impl KeyValueStore for PostgresStore {
    async fn read(&self, table: &str, key: &str) -> Result<Option<String>, Error> {
        let query = format!("select session from {} where key = $1", quote_ident(table));
        let payload: Option<String> = sqlx::query_scalar(&query)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payload)
    }

    async fn write(&self, table: &str, key: &str, payload: String) -> Result<(), Error> {
        let query = format!(
            r#"
            insert into {} (key, session) values ($1, $2)
            on conflict (key) do update set session = excluded.session
            "#,
            quote_ident(table)
        );
        sqlx::query(&query)
            .bind(key)
            .bind(payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, table: &str, key: &str) -> Result<(), Error> {
        let query = format!("delete from {} where key = $1", quote_ident(table));
        sqlx::query(&query).bind(key).execute(&self.pool).await?;
        Ok(())
    }
}

impl Connect for PostgresStore {
    type Config = PostgresConfig;
    type Error = sqlx::Error;

    async fn connect(config: PostgresConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }
}
