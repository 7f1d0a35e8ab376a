use std::fmt;

use crate::{
    capabilities::{Query, StoreOutput, StoreResult},
    entities::{decode_all, Record},
    model::Alert,
    AppError, ErrorKind,
};

use super::{LoadState, Reaction};

/// What a list screen does when its read fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Degrade to an empty list; dashboard widgets.
    Silent,
    /// Raise a blocking alert; listing screens.
    Alert(Alert),
}

/// One collection read projected into an ordered list of records.
///
/// The store-side `limit` is also enforced client-side, so the list never
/// grows past it even if the store ignores the limit.
#[derive(Clone)]
pub struct ListProjection<T> {
    query: Query,
    filter: Option<fn(&T) -> bool>,
    on_failure: FailurePolicy,
    state: LoadState<Vec<T>>,
}

impl<T: fmt::Debug> fmt::Debug for ListProjection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListProjection")
            .field("query", &self.query)
            .field("filtered", &self.filter.is_some())
            .field("on_failure", &self.on_failure)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Record> ListProjection<T> {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            filter: None,
            on_failure: FailurePolicy::Silent,
            state: LoadState::Loading,
        }
    }

    /// Keeps only records matching `filter`.
    #[must_use]
    pub fn keep(mut self, filter: fn(&T) -> bool) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn alert_on_failure(mut self, title: &str, message: &str) -> Self {
        self.on_failure = FailurePolicy::Alert(Alert::new(title, message));
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn state(&self) -> &LoadState<Vec<T>> {
        &self.state
    }

    /// Loaded records; empty while loading or after a failure.
    pub fn items(&self) -> &[T] {
        match &self.state {
            LoadState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items().iter().find(|item| item.record_id() == id)
    }

    pub fn apply(&mut self, result: StoreResult) -> Reaction {
        match result {
            Ok(StoreOutput::Documents(docs)) => {
                let mut items: Vec<T> = decode_all(docs);
                if let Some(filter) = self.filter {
                    items.retain(|item| filter(item));
                }
                if let Some(cap) = self.query.limit {
                    items.truncate(cap as usize);
                }
                tracing::debug!(
                    collection = %self.query.collection,
                    count = items.len(),
                    "list loaded"
                );
                self.state = LoadState::Ready(items);
                Reaction::Stay
            }
            Ok(other) => self.fail(
                &AppError::new(ErrorKind::InvalidState, "Unexpected store output")
                    .with_internal(format!("{other:?}")),
            ),
            Err(e) => self.fail(&AppError::from(e)),
        }
    }

    fn fail(&mut self, error: &AppError) -> Reaction {
        tracing::warn!(
            collection = %self.query.collection,
            code = error.code(),
            error = %error,
            "list fetch failed"
        );
        self.state = LoadState::Failed;
        match &self.on_failure {
            FailurePolicy::Silent => Reaction::Stay,
            FailurePolicy::Alert(alert) => Reaction::Alert(alert.clone()),
        }
    }
}
