mod linking;
mod store;

pub use self::linking::{
    map_search_url, parse_link, Linking, LinkingError, LinkingOperation, LinkingOutput,
    LinkingResult,
};
pub use self::store::{
    CollectionPath, Direction, Document, DocumentPath, DocumentStore, Fields, OrderBy, PathError,
    Query, StoreError, StoreOperation, StoreOutput, StoreResult,
};

// Crux's built-in Render capability covers view updates as-is.
pub use crux_core::render::Render;

#[allow(unused_imports)]
use crate::app::App;
use crate::event::Event;

/// Everything the core asks of the shell. The derive generates the
/// `Effect` enum with one variant per capability type: `Render`,
/// `DocumentStore` and `Linking`.
#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub store: DocumentStore<Event>,
    pub linking: Linking<Event>,
}
