use crate::store::{Connect, Error, KeyValueStore};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use std::sync::Arc;

/// Attribute holding the session key, the table's partition key.
pub const KEY_ATTRIBUTE: &str = "key";
/// Attribute holding the serialized session.
pub const SESSION_ATTRIBUTE: &str = "session";

#[derive(thiserror::Error, Debug)]
pub enum DynamoDbConnectError {
    #[error("no region configured for the DynamoDB client")]
    MissingRegion,
}

/// A DynamoDB-backed key-value store.
///
/// Each table is a DynamoDB table whose partition key is the string attribute
/// `key`. The payload lives in the string attribute `session`:
///
/// ```text
/// GetItem    { key: S(<key>) }                      -> item.session.S
/// PutItem    { key: S(<key>), session: S(<payload>) }
/// DeleteItem { key: S(<key>) }
/// ```
///
/// Tables are never created implicitly; a missing table surfaces as
/// [`Error::Backend`] on first use.
#[derive(Clone, Debug)]
pub struct DynamoDbStore {
    client: Arc<Client>,
}

impl DynamoDbStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    /// Creates `table` with the session record layout, billed per request.
    pub async fn create_table(&self, table: &str) -> Result<(), Error> {
        self.client
            .create_table()
            .table_name(table)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(KEY_ATTRIBUTE)
                    .key_type(KeyType::Hash)
                    .build()
                    .map_err(Error::backend)?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(KEY_ATTRIBUTE)
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .map_err(Error::backend)?,
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await?;
        Ok(())
    }
}

impl KeyValueStore for DynamoDbStore {
    async fn read(&self, table: &str, key: &str) -> Result<Option<String>, Error> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(KEY_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .send()
            .await?;

        Ok(output
            .item()
            .and_then(|item| item.get(SESSION_ATTRIBUTE))
            .and_then(|session| session.as_s().ok())
            .cloned())
    }

    async fn write(&self, table: &str, key: &str, payload: String) -> Result<(), Error> {
        self.client
            .put_item()
            .table_name(table)
            .item(KEY_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .item(SESSION_ATTRIBUTE, AttributeValue::S(payload))
            .send()
            .await?;
        Ok(())
    }

    async fn remove(&self, table: &str, key: &str) -> Result<(), Error> {
        self.client
            .delete_item()
            .table_name(table)
            .key(KEY_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .send()
            .await?;
        Ok(())
    }
}

impl Connect for DynamoDbStore {
    type Config = aws_sdk_dynamodb::Config;
    type Error = DynamoDbConnectError;

    /// Builds a client from `config`. The config must carry a region and a
    /// behavior version.
    async fn connect(config: aws_sdk_dynamodb::Config) -> Result<Self, DynamoDbConnectError> {
        if config.region().is_none() {
            return Err(DynamoDbConnectError::MissingRegion);
        }
        Ok(Self::new(Arc::new(Client::from_conf(config))))
    }
}
