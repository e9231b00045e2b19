//! MongoDB client wrapper
//!
//! Read-only access to the portal's collections. Index management and all
//! writes belong to the portal's writers (progress trackers, mint handlers);
//! this service only runs filtered finds.

use bson::{doc, Document};
use futures_util::StreamExt;
use mongodb::{Client, Collection};
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::types::PortalError;

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client and verify the connection
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, PortalError> {
        info!("Connecting to MongoDB at {}", uri);

        // Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| PortalError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        // Verify connection with timeout
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PortalError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection handle
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection::<T>(name)
    }

    /// Find all documents matching a filter
    ///
    /// Documents that fail to deserialize are logged and skipped rather than
    /// failing the whole read; a handful of legacy documents predate the
    /// current field layout.
    pub async fn find_many<T>(&self, collection: &str, filter: Document) -> Result<Vec<T>, PortalError>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let cursor = self
            .collection::<T>(collection)
            .find(filter)
            .await
            .map_err(|e| PortalError::Database(format!("Find on '{}' failed: {}", collection, e)))?;

        let results: Vec<T> = cursor
            .filter_map(|doc| async {
                match doc {
                    Ok(d) => Some(d),
                    Err(e) => {
                        error!("Error reading document: {}", e);
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(results)
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}
