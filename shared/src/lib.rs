// lib.rs - EcoRijeka shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod event;
pub mod model;
pub mod routes;
pub mod screens;
pub mod strings;
pub mod text;
pub mod view;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::AppConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::Model;
pub use routes::Route;
pub use view::ViewModel;

pub const COLLECTION_EVENTS: &str = "events";
pub const COLLECTION_REGISTRATIONS: &str = "dogadajPrijava";
pub const COLLECTION_ADDRESSES: &str = "adresa";
pub const COLLECTION_ADVICE: &str = "savjeti";
pub const SUBCOLLECTION_ADVICE_EXAMPLES: &str = "plastika";

pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_FAVORITE: &str = "heart";

pub const DEFAULT_RECENT_EVENTS_LIMIT: u32 = 3;
pub const MAX_QUERY_LIMIT: u32 = 500;
pub const DEFAULT_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/120";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    PermissionDenied,
    NotFound,
    Validation,
    InvalidPath,
    Deserialization,
    Configuration,
    LinkUnsupported,
    InvalidState,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::PermissionDenied => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidPath => "INVALID_PATH",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Configuration => "CONFIG_ERROR",
            Self::LinkUnsupported => "LINK_UNSUPPORTED",
            Self::InvalidState => "INVALID_STATE",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }
}

/// Crate-wide error carried into logs and, through the screen policies,
/// into alerts. Leaf errors convert into it with `?`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub internal_message: Option<String>,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            internal_message: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<capabilities::StoreError> for AppError {
    fn from(e: capabilities::StoreError) -> Self {
        use capabilities::StoreError;

        let kind = match &e {
            StoreError::Network { .. } | StoreError::Unavailable => ErrorKind::Network,
            StoreError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::InvalidArgument { .. } => ErrorKind::Validation,
            StoreError::Unknown { .. } => ErrorKind::Unknown,
        };
        AppError::new(kind, "Document store request failed").with_internal(e.to_string())
    }
}

impl From<capabilities::PathError> for AppError {
    fn from(e: capabilities::PathError) -> Self {
        AppError::new(ErrorKind::InvalidPath, e.to_string())
    }
}

impl From<entities::DecodeError> for AppError {
    fn from(e: entities::DecodeError) -> Self {
        AppError::new(ErrorKind::Deserialization, "Malformed document").with_internal(e.to_string())
    }
}

impl From<screens::FormError> for AppError {
    fn from(e: screens::FormError) -> Self {
        AppError::new(ErrorKind::Validation, e.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::new(ErrorKind::Configuration, e.to_string())
    }
}

impl From<capabilities::LinkingError> for AppError {
    fn from(e: capabilities::LinkingError) -> Self {
        AppError::new(ErrorKind::Unknown, "Unable to open link").with_internal(e.to_string())
    }
}
