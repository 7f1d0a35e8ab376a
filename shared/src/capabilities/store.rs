use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MAX_QUERY_LIMIT;

pub const MAX_SEGMENT_LENGTH: usize = 1500;

pub type Fields = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },

    #[error("path has no segments")]
    Empty,
}

fn validate_segment(segment: &str) -> Result<(), PathError> {
    let invalid = |reason: &str| PathError::InvalidSegment {
        segment: segment.chars().take(50).collect(),
        reason: reason.to_string(),
    };

    if segment.trim().is_empty() {
        return Err(invalid("segment cannot be empty"));
    }
    if segment.len() > MAX_SEGMENT_LENGTH {
        return Err(invalid("segment is too long"));
    }
    if segment.contains('/') {
        return Err(invalid("segment cannot contain '/'"));
    }
    if segment == "." || segment == ".." {
        return Err(invalid("segment cannot be a relative path"));
    }
    if segment.chars().any(char::is_control) {
        return Err(invalid("segment contains control characters"));
    }
    Ok(())
}

/// Path of a collection: `events`, or `savjeti/{id}/plastika` for a
/// sub-collection owned by a parent document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    pub fn root(name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        validate_segment(&name)?;
        Ok(Self {
            segments: vec![name],
        })
    }

    /// Sub-collection `name` of the document `parent/{parent_id}`.
    pub fn sub(
        parent: impl Into<String>,
        parent_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, PathError> {
        let segments = vec![parent.into(), parent_id.into(), name.into()];
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, i.e. the collection's own name.
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    pub fn doc(&self, id: impl Into<String>) -> Result<DocumentPath, PathError> {
        let id = id.into();
        validate_segment(&id)?;
        Ok(DocumentPath {
            collection: self.clone(),
            id,
        })
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentPath {
    collection: CollectionPath,
    id: String,
}

impl DocumentPath {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Result<Self, PathError> {
        CollectionPath::root(collection)?.doc(id)
    }

    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub collection: CollectionPath,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl Query {
    pub fn collection(collection: CollectionPath) -> Self {
        Self {
            collection,
            order_by: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction: Direction::Descending,
        });
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.clamp(1, MAX_QUERY_LIMIT));
        self
    }
}

/// A raw document as the shell hands it over: the store-issued id plus the
/// untyped field map. Decoding into records happens in `entities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreOperation {
    Query(Query),
    Get {
        path: DocumentPath,
    },
    Create {
        collection: CollectionPath,
        fields: Fields,
        /// Fields the store fills with its own commit timestamp.
        server_timestamps: Vec<String>,
    },
    Update {
        path: DocumentPath,
        fields: Fields,
    },
}

impl StoreOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Query(_) => "query",
            Self::Get { .. } => "get",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
        }
    }
}

impl Operation for StoreOperation {
    type Output = StoreResult;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreOutput {
    Documents(Vec<Document>),
    /// `None` when no document exists at the requested path.
    Document(Option<Document>),
    Created { id: String },
    Updated,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("store unavailable")]
    Unavailable,

    #[error("store error: {message}")]
    Unknown { message: String },
}

pub type StoreResult = Result<StoreOutput, StoreError>;

pub struct DocumentStore<E> {
    context: CapabilityContext<StoreOperation, E>,
}

impl<Ev> Capability<Ev> for DocumentStore<Ev> {
    type Operation = StoreOperation;
    type MappedSelf<MappedEv> = DocumentStore<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        DocumentStore::new(self.context.map_event(f))
    }
}

impl<E> DocumentStore<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<StoreOperation, E>) -> Self {
        Self { context }
    }

    pub fn query<F>(&self, query: Query, make_event: F)
    where
        F: FnOnce(StoreResult) -> E + Send + 'static,
    {
        self.run(StoreOperation::Query(query), make_event);
    }

    pub fn get<F>(&self, path: DocumentPath, make_event: F)
    where
        F: FnOnce(StoreResult) -> E + Send + 'static,
    {
        self.run(StoreOperation::Get { path }, make_event);
    }

    pub fn create<F>(
        &self,
        collection: CollectionPath,
        fields: Fields,
        server_timestamps: Vec<String>,
        make_event: F,
    ) where
        F: FnOnce(StoreResult) -> E + Send + 'static,
    {
        self.run(
            StoreOperation::Create {
                collection,
                fields,
                server_timestamps,
            },
            make_event,
        );
    }

    pub fn update<F>(&self, path: DocumentPath, fields: Fields, make_event: F)
    where
        F: FnOnce(StoreResult) -> E + Send + 'static,
    {
        self.run(StoreOperation::Update { path, fields }, make_event);
    }

    fn run<F>(&self, operation: StoreOperation, make_event: F)
    where
        F: FnOnce(StoreResult) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}
