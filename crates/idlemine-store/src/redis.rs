//! Redis-compatible save-slot backend.
//!
//! The whole game state is one JSON record under a single fixed key --
//! there is exactly one player per engine instance, so no key patterns
//! beyond the save slot are needed.

use fred::prelude::*;

use crate::error::StoreError;

/// Default key holding the save record.
pub const SAVE_KEY: &str = "idlemine:save";

/// Connection handle to a Redis-compatible save store.
///
/// Wraps a [`fred::prelude::Client`] and exposes raw read/write of the
/// serialized save record; the gateway owns the JSON encoding.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    key: String,
}

impl RedisStore {
    /// Connect to a Redis-compatible store at the given URL.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Redis`] if the connection fails.
    pub async fn connect(url: &str, key: impl Into<String>) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("invalid Redis URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("connected to Redis save store");
        Ok(Self {
            client,
            key: key.into(),
        })
    }

    /// Store the serialized save record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the write fails.
    pub async fn write(&self, json: &str) -> Result<(), StoreError> {
        let _: () = self
            .client
            .set(self.key.as_str(), json, None, None, false)
            .await?;
        Ok(())
    }

    /// Read the serialized save record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the read fails.
    pub async fn read(&self) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.client.get(self.key.as_str()).await?;
        Ok(value)
    }

    /// Delete the save record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the delete fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _: u32 = self.client.del(self.key.as_str()).await?;
        Ok(())
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}
