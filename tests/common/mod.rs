use kv_session::store::{Connect, Error, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub(crate) struct TestUser {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TestSession {
    pub user: TestUser,
    pub preferences: TestPreferences,
    pub step: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub(crate) struct TestPreferences {
    pub theme: String,
    pub language: String,
}

pub fn create_test_session() -> TestSession {
    TestSession {
        user: TestUser {
            id: 1,
            name: "Test User".to_string(),
        },
        preferences: TestPreferences {
            theme: "dark".to_string(),
            language: "en".to_string(),
        },
        step: None,
    }
}

#[allow(dead_code)]
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("connection refused: {0}")]
pub struct ConnectError(pub String);

#[allow(dead_code)]
#[derive(thiserror::Error, Debug)]
#[error("service unavailable")]
pub struct Unavailable;

/// A store whose handle can never be constructed.
#[allow(dead_code)]
#[derive(Debug)]
pub struct UnreachableStore;

impl KeyValueStore for UnreachableStore {
    async fn read(&self, _table: &str, _key: &str) -> Result<Option<String>, Error> {
        unreachable!("an unreachable store is never bound")
    }

    async fn write(&self, _table: &str, _key: &str, _payload: String) -> Result<(), Error> {
        unreachable!("an unreachable store is never bound")
    }

    async fn remove(&self, _table: &str, _key: &str) -> Result<(), Error> {
        unreachable!("an unreachable store is never bound")
    }
}

impl Connect for UnreachableStore {
    type Config = String;
    type Error = ConnectError;

    async fn connect(address: String) -> Result<Self, ConnectError> {
        Err(ConnectError(address))
    }
}

/// A store whose every call fails at the transport, counting the attempts.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> Error {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Error::backend(Unavailable)
    }
}

impl KeyValueStore for FailingStore {
    async fn read(&self, _table: &str, _key: &str) -> Result<Option<String>, Error> {
        Err(self.fail())
    }

    async fn write(&self, _table: &str, _key: &str, _payload: String) -> Result<(), Error> {
        Err(self.fail())
    }

    async fn remove(&self, _table: &str, _key: &str) -> Result<(), Error> {
        Err(self.fail())
    }
}
