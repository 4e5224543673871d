#![cfg(feature = "postgres-store")]

mod common;

#[cfg(test)]
mod tests {
    use super::*;
    use common::*;
    use kv_session::store::Error;
    use kv_session::store::postgres::{PostgresConfig, PostgresStore};
    use kv_session::{Connection, KvSessionStore};
    use serde_json::{Value, json};
    use sqlx::PgPool;
    use std::sync::Arc;

    fn database_url() -> String {
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests")
    }

    async fn setup_store(table: &str) -> Arc<PostgresStore> {
        let pool = PgPool::connect(&database_url()).await.unwrap();

        // Clean up table before each test run
        sqlx::query(&format!("drop table if exists \"{table}\""))
            .execute(&pool)
            .await
            .unwrap();

        let store = PostgresStore::new(pool);
        store.create_table(table).await.unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_postgres_session_lifecycle() {
        let client = setup_store("kv_session_lifecycle").await;
        let store: KvSessionStore<TestSession, _> =
            KvSessionStore::with_table(Arc::clone(&client), "kv_session_lifecycle");
        let session = create_test_session();

        assert_eq!(store.get("u1").await.unwrap(), None);

        store.set("u1", &session).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(session.clone()));

        let mut updated = session;
        updated.preferences.theme = "light".to_string();
        store.set("u1", &updated).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(updated));

        store.delete("u1").await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), None);
        store.delete("u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_postgres_overwrite_keeps_one_row() {
        let client = setup_store("kv_session_overwrite").await;
        let store: KvSessionStore<Value, _> =
            KvSessionStore::with_table(Arc::clone(&client), "kv_session_overwrite");

        store.set("u1", &json!({"count": 1})).await.unwrap();
        store.set("u1", &json!({"count": 2})).await.unwrap();

        let rows: i64 = sqlx::query_scalar("select count(*) from kv_session_overwrite")
            .fetch_one(client.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(store.get("u1").await.unwrap(), Some(json!({"count": 2})));
    }

    #[tokio::test]
    async fn test_postgres_default_table_name_is_quoted() {
        let client = setup_store(kv_session::DEFAULT_TABLE).await;
        let store: KvSessionStore<Value, _> = KvSessionStore::new(Arc::clone(&client));

        store.set("u1", &json!([1, 2, 3])).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn test_postgres_missing_table_is_backend_error() {
        let client = setup_store("kv_session_unused").await;
        let store: KvSessionStore<Value, _> =
            KvSessionStore::with_table(Arc::clone(&client), "kv_session_missing_table");

        assert!(matches!(store.get("u1").await, Err(Error::Backend(_))));
        assert!(matches!(
            store.set("u1", &json!(1)).await,
            Err(Error::Backend(_))
        ));
        assert!(matches!(store.delete("u1").await, Err(Error::Backend(_))));
    }

    #[tokio::test]
    async fn test_postgres_connect_from_config() {
        setup_store("kv_session_connect").await;

        let store = KvSessionStore::<Value, PostgresStore>::builder(Connection::New(
            PostgresConfig::new(database_url()).max_connections(2),
        ))
        .table("kv_session_connect")
        .build()
        .await
        .unwrap();

        store.set("u1", &json!({"count": 1})).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(json!({"count": 1})));
    }

    #[tokio::test]
    async fn test_postgres_bad_url_routes_to_callback() {
        let (tx, rx) = std::sync::mpsc::channel();

        let store = KvSessionStore::<Value, PostgresStore>::builder(Connection::New(
            PostgresConfig::new("not-a-database-url"),
        ))
        .on_init_error(move |err| tx.send(err.to_string()).unwrap())
        .build()
        .await
        .unwrap();

        assert!(!store.is_bound());
        assert_eq!(rx.try_iter().count(), 1);
    }
}
