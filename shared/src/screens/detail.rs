use crate::{
    capabilities::{DocumentPath, StoreError, StoreOutput, StoreResult},
    entities::{decode, Record},
    model::Alert,
    routes::Route,
    AppError, ErrorKind,
};

use super::{LoadState, Reaction};

/// One document read by id.
///
/// A missing document alerts and sends the user back to `listing`; any
/// other failure alerts and leaves the screen in its failed state.
#[derive(Debug, Clone)]
pub struct DetailFetch<T> {
    path: DocumentPath,
    listing: Route,
    not_found: Alert,
    failed: Alert,
    state: LoadState<T>,
}

impl<T: Record> DetailFetch<T> {
    pub fn new(path: DocumentPath, listing: Route, not_found: Alert, failed: Alert) -> Self {
        Self {
            path,
            listing,
            not_found,
            failed,
            state: LoadState::Loading,
        }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn record(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn apply(&mut self, result: StoreResult) -> Reaction {
        match result {
            Ok(StoreOutput::Document(Some(doc))) => match decode::<T>(doc) {
                Ok(record) => {
                    tracing::debug!(path = %self.path, "document loaded");
                    self.state = LoadState::Ready(record);
                    Reaction::Stay
                }
                Err(e) => self.fail(&AppError::from(e)),
            },
            Ok(StoreOutput::Document(None)) | Err(StoreError::NotFound { .. }) => {
                self.missing()
            }
            Ok(other) => self.fail(
                &AppError::new(ErrorKind::InvalidState, "Unexpected store output")
                    .with_internal(format!("{other:?}")),
            ),
            Err(e) => self.fail(&AppError::from(e)),
        }
    }

    fn missing(&mut self) -> Reaction {
        tracing::info!(path = %self.path, "document not found");
        self.state = LoadState::NotFound;
        Reaction::Redirect {
            alert: self.not_found.clone(),
            to: self.listing.clone(),
        }
    }

    fn fail(&mut self, error: &AppError) -> Reaction {
        tracing::warn!(
            path = %self.path,
            code = error.code(),
            error = %error,
            "document fetch failed"
        );
        self.state = LoadState::Failed;
        Reaction::Alert(self.failed.clone())
    }
}
