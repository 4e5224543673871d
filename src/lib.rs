//! # kv-session: key-value session persistence for conversation handlers
//!
//! `kv-session` persists per-conversation state for otherwise stateless message
//! handlers. It exposes a tiny `get`/`set`/`delete` contract over opaque,
//! serde-serializable session values and stores them in a remote key-value
//! service, one string payload per session key.
//!
//! # Quick Start
//!
//! ```rust
//! use kv_session::KvSessionStore;
//! use kv_session::store::MemoryStore;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Chat {
//!     count: u32,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let store: KvSessionStore<Chat, _> = KvSessionStore::new(Arc::new(MemoryStore::new()));
//!
//!     // No session yet for this chat.
//!     let mut chat = store.get("chat:42").await.unwrap().unwrap_or_default();
//!     chat.count += 1;
//!     store.set("chat:42", &chat).await.unwrap();
//!
//!     assert_eq!(store.get("chat:42").await.unwrap(), Some(Chat { count: 1 }));
//!
//!     store.delete("chat:42").await.unwrap();
//!     assert_eq!(store.get("chat:42").await.unwrap(), None);
//! }
//! ```
//!
//! # Binding a store
//!
//! A session store is bound to exactly one store handle and one table for its
//! whole lifetime. The handle is either reused or connected from
//! configuration:
//!
//! ```rust,ignore
//! use fred::prelude::Config;
//! use kv_session::{Connection, KvSessionStore};
//! use kv_session::store::redis::RedisStore;
//!
//! let config = Config::from_url("redis://127.0.0.1:6379")?;
//! let store = KvSessionStore::<MySession, RedisStore>::builder(Connection::New(config))
//!     .table("bot-sessions") // defaults to "telegraf-sessions"
//!     .build()
//!     .await?;
//! ```
//!
//! If connecting fails, `build` returns [`store::Error::Init`]. Registering
//! [`SessionStoreBuilder::on_init_error`] routes the error to a callback
//! instead and yields an unbound store whose operations all fail with
//! [`store::Error::Unbound`].
//!
//! # Stores
//!
//! `kv-session` offers several key-value backends, each enabled by a feature
//! flag.
//!
//! ## Redis
//!
//! Requires the `redis-store` feature. Each table is a Redis hash, each
//! session key a field of it.
//!
//! ## Postgres
//!
//! Requires the `postgres-store` feature. Each table is a Postgres table with a
//! `key` primary key and a `session` text column. See
//! `PostgresStore::create_table`.
//!
//! ## DynamoDB
//!
//! Requires the `dynamodb-store` feature. Each table is a DynamoDB table keyed
//! by the string attribute `key`; the payload is the string attribute
//! `session`. See `DynamoDbStore::create_table`.
//!
//! ## Memory
//!
//! Always available. Meant for tests and local development.
//!
//! ## Serialization
//!
//! Sessions are stored as JSON text by default. With the `messagepack` feature
//! they are stored as base64-encoded [MessagePack](https://crates.io/crates/rmp-serde).
//!
//! ```toml
//! [dependencies]
//! kv-session = { version = "0.1", features = ["redis-store", "messagepack"] }
//! ```

#[cfg(feature = "dynamodb-store")]
pub use aws_sdk_dynamodb;

#[cfg(feature = "redis-store")]
pub use fred;

#[cfg(feature = "postgres-store")]
pub use sqlx;

pub mod codec;

mod session;
pub use session::*;

pub mod store;
