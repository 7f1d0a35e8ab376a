use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    capabilities::{parse_link, CollectionPath},
    DEFAULT_MAPS_SEARCH_URL, DEFAULT_PLACEHOLDER_IMAGE_URL, DEFAULT_RECENT_EVENTS_LIMIT,
    MAX_QUERY_LIMIT,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(String),

    #[error("recent_events_limit must be between 1 and {max}, got {got}")]
    RecentEventsLimit { got: u32, max: u32 },

    #[error("{field} is not a valid URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("dumping_report_collection is not a valid collection name: {0}")]
    InvalidCollection(String),
}

/// Runtime settings handed over by the shell in `Event::AppStarted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cap on the recent events widget of the home dashboard.
    pub recent_events_limit: u32,
    pub maps_search_url: String,
    pub placeholder_image_url: String,
    /// Collection dumping reports are written to. Unset means the report
    /// form is validated and discarded.
    pub dumping_report_collection: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recent_events_limit: DEFAULT_RECENT_EVENTS_LIMIT,
            maps_search_url: DEFAULT_MAPS_SEARCH_URL.to_string(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
            dumping_report_collection: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_events_limit == 0 || self.recent_events_limit > MAX_QUERY_LIMIT {
            return Err(ConfigError::RecentEventsLimit {
                got: self.recent_events_limit,
                max: MAX_QUERY_LIMIT,
            });
        }

        parse_link(&self.maps_search_url).map_err(|e| ConfigError::InvalidUrl {
            field: "maps_search_url",
            reason: e.to_string(),
        })?;
        parse_link(&self.placeholder_image_url).map_err(|e| ConfigError::InvalidUrl {
            field: "placeholder_image_url",
            reason: e.to_string(),
        })?;

        if let Some(collection) = &self.dumping_report_collection {
            CollectionPath::root(collection.as_str())
                .map_err(|e| ConfigError::InvalidCollection(e.to_string()))?;
        }

        Ok(())
    }
}
