// Database Connection Management
//
// MongoDB client bootstrap and the ping-collection query facade. All query
// criteria live here; execution and result materialization belong to the
// driver.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::TryStreamExt;
use mongodb::bson::{Bson, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::config::DatabaseConfig;
use crate::database::models::Ping;
use crate::time::TimeWindow;

/// How long the driver may search for a reachable server before an operation
/// fails. Governs the startup reachability check.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Collection holding one document per ping. The name is historical.
const PING_COLLECTION: &str = "devices";

/// Handle to the ping collection.
///
/// Cheap to clone; the underlying driver client pools connections
/// internally, so one `PingStore` is shared across all in-flight requests.
#[derive(Clone)]
pub struct PingStore {
    pings: Collection<Ping>,
}

impl PingStore {
    /// Connect to MongoDB and verify the server is actually reachable.
    ///
    /// The driver defers connecting until the first operation, so this
    /// issues a `ping` command up front; an unreachable store fails here
    /// rather than on the first request.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .with_context(|| format!("invalid MongoDB URI {}", config.uri))?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options).context("failed to build MongoDB client")?;
        let db = client.database(&config.dbname);
        db.run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB did not answer a ping command")?;

        Ok(Self {
            pings: db.collection(PING_COLLECTION),
        })
    }

    /// Every distinct device id across all stored pings. No ordering
    /// guarantee; non-string values are skipped.
    pub async fn list_device_ids(&self) -> Result<Vec<String>, mongodb::error::Error> {
        let values = self.pings.distinct("device_id", doc! {}).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(id) => Some(id),
                _ => None,
            })
            .collect())
    }

    /// All pings with `from <= timestamp < to`, in cursor order.
    pub async fn find_by_window(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<Ping>, mongodb::error::Error> {
        self.pings
            .find(doc! { "timestamp": { "$gte": window.from, "$lt": window.to } })
            .await?
            .try_collect()
            .await
    }

    /// As [`PingStore::find_by_window`], additionally filtered to one device.
    pub async fn find_by_device_and_window(
        &self,
        device_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Ping>, mongodb::error::Error> {
        self.pings
            .find(doc! {
                "device_id": device_id,
                "timestamp": { "$gte": window.from, "$lt": window.to },
            })
            .await?
            .try_collect()
            .await
    }

    /// Append one ping document.
    pub async fn insert(&self, ping: Ping) -> Result<(), mongodb::error::Error> {
        self.pings.insert_one(ping).await?;
        Ok(())
    }

    /// Delete every ping unconditionally. Succeeds on an already-empty
    /// collection.
    pub async fn clear_all(&self) -> Result<(), mongodb::error::Error> {
        self.pings.delete_many(doc! {}).await?;
        Ok(())
    }
}
