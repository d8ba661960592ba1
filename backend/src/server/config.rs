//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `NOTE_APP_*` environment variables and config
//! files, in OrthoConfig's usual precedence. `main` loads `.env` first.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use backend::outbound::security::DEFAULT_BCRYPT_COST;

const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DB_NAME: &str = "note_app";
const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_FCM_CREDENTIALS: &str = "./service_account_key.json";
const DEFAULT_FCM_TIMEOUT_SECS: u64 = 10;

/// Settings rejected after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("bcrypt cost {cost} is below the minimum of {min}", min = DEFAULT_BCRYPT_COST)]
    BcryptCostTooLow { cost: u32 },
    #[error("listen address {value} is not a socket address")]
    ListenAddress { value: String },
}

/// Runtime configuration for the note backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTE_APP")]
pub struct AppSettings {
    /// MongoDB connection string.
    pub mongo_url: Option<String>,
    /// Database holding the `users` and `posts` collections.
    pub mongo_db_name: Option<String>,
    /// Socket address the HTTP server binds to.
    pub listen_address: Option<String>,
    /// Firebase service-account key file.
    pub fcm_credentials_path: Option<PathBuf>,
    /// Timeout for each FCM HTTP request, in seconds.
    pub fcm_timeout_secs: Option<u64>,
    /// bcrypt work factor; values below the default are refused.
    pub bcrypt_cost: Option<u32>,
}

impl AppSettings {
    pub fn mongo_url(&self) -> &str {
        self.mongo_url.as_deref().unwrap_or(DEFAULT_MONGO_URL)
    }

    pub fn mongo_db_name(&self) -> &str {
        self.mongo_db_name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    pub fn fcm_credentials_path(&self) -> PathBuf {
        self.fcm_credentials_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FCM_CREDENTIALS))
    }

    pub fn fcm_timeout(&self) -> Duration {
        Duration::from_secs(self.fcm_timeout_secs.unwrap_or(DEFAULT_FCM_TIMEOUT_SECS))
    }

    /// Parsed bind address.
    ///
    /// # Errors
    /// [`SettingsError::ListenAddress`] when the value does not parse.
    pub fn listen_address(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self
            .listen_address
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN_ADDRESS);
        raw.parse().map_err(|_| SettingsError::ListenAddress {
            value: raw.to_owned(),
        })
    }

    /// Configured bcrypt cost.
    ///
    /// # Errors
    /// [`SettingsError::BcryptCostTooLow`] below [`DEFAULT_BCRYPT_COST`].
    pub fn bcrypt_cost(&self) -> Result<u32, SettingsError> {
        let cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if cost < DEFAULT_BCRYPT_COST {
            return Err(SettingsError::BcryptCostTooLow { cost });
        }
        Ok(cost)
    }
}
