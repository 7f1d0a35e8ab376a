#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use crux_core::testing::AppTester;
use serde_json::{json, Value};
use shared::{
    capabilities::{
        Direction, Document, Fields, LinkingOperation, LinkingOutput, LinkingResult, StoreError,
        StoreOperation, StoreOutput, StoreResult,
    },
    App, AppConfig, Effect, Event, Model,
};

/// In-memory stand-in for the hosted document store, keyed by collection
/// path. Documents keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, Vec<Document>>,
    failures: HashMap<&'static str, StoreError>,
    pub calls: Vec<StoreOperation>,
    /// Answer queries with every document, as a store ignoring `limit` would.
    pub ignore_limit: bool,
    next_id: u64,
}

impl MemoryStore {
    pub fn insert(&mut self, collection: &str, id: &str, fields: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.to_string(),
                fields: fields.as_object().cloned().unwrap_or_default(),
            });
    }

    pub fn doc(&self, collection: &str, id: &str) -> Option<&Document> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
    }

    pub fn docs(&self, collection: &str) -> &[Document] {
        self.collections.get(collection).map_or(&[], Vec::as_slice)
    }

    /// Fails every operation named `op` ("query", "get", "create", "update").
    pub fn fail(&mut self, op: &'static str, error: StoreError) {
        self.failures.insert(op, error);
    }

    pub fn heal(&mut self) {
        self.failures.clear();
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.iter().filter(|c| c.name() == op).count()
    }

    pub fn handle(&mut self, operation: &StoreOperation) -> StoreResult {
        self.calls.push(operation.clone());
        if let Some(error) = self.failures.get(operation.name()) {
            return Err(error.clone());
        }

        match operation {
            StoreOperation::Query(query) => {
                let mut docs = self.docs(&query.collection.to_string()).to_vec();
                if let Some(order) = &query.order_by {
                    let key = |d: &Document| d.fields.get(&order.field).and_then(Value::as_u64);
                    docs.sort_by_key(|d| key(d));
                    if order.direction == Direction::Descending {
                        docs.reverse();
                    }
                }
                if let (Some(limit), false) = (query.limit, self.ignore_limit) {
                    docs.truncate(limit as usize);
                }
                Ok(StoreOutput::Documents(docs))
            }
            StoreOperation::Get { path } => Ok(StoreOutput::Document(
                self.doc(&path.collection().to_string(), path.id()).cloned(),
            )),
            StoreOperation::Create {
                collection,
                fields,
                server_timestamps,
            } => {
                self.next_id += 1;
                let id = format!("generated-{}", self.next_id);
                let mut fields: Fields = fields.clone();
                for name in server_timestamps {
                    fields.insert(name.clone(), json!({"seconds": 1_700_000_000, "nanoseconds": 0}));
                }
                self.insert(&collection.to_string(), &id, Value::Object(fields));
                Ok(StoreOutput::Created { id })
            }
            StoreOperation::Update { path, fields } => {
                let doc = self
                    .collections
                    .get_mut(&path.collection().to_string())
                    .and_then(|docs| docs.iter_mut().find(|d| d.id == path.id()));
                match doc {
                    Some(doc) => {
                        for (name, value) in fields {
                            doc.fields.insert(name.clone(), value.clone());
                        }
                        Ok(StoreOutput::Updated)
                    }
                    None => Err(StoreError::NotFound {
                        path: path.to_string(),
                    }),
                }
            }
        }
    }
}

/// Runs the core against a [`MemoryStore`], resolving every effect until
/// the app goes quiet.
pub struct Harness {
    pub app: AppTester<App, Effect>,
    pub model: Model,
    pub store: MemoryStore,
    pub opened: Vec<String>,
    pub link_answer: LinkingResult,
    pub renders: usize,
}

impl Harness {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            app: AppTester::default(),
            model: Model::default(),
            store,
            opened: Vec::new(),
            link_answer: Ok(LinkingOutput::Opened),
            renders: 0,
        }
    }

    pub fn started(store: MemoryStore) -> Self {
        Self::started_with(store, AppConfig::default())
    }

    pub fn started_with(store: MemoryStore, config: AppConfig) -> Self {
        let mut harness = Self::new(store);
        harness.run(Event::AppStarted {
            config: Box::new(config),
        });
        harness
    }

    /// Sends `event` and settles everything it triggers.
    pub fn run(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        self.settle(update.effects, update.events);
    }

    /// Sends `event` and hands back its effects unresolved.
    pub fn send(&mut self, event: Event) -> Vec<Effect> {
        self.app.update(event, &mut self.model).effects
    }

    pub fn settle(&mut self, effects: Vec<Effect>, events: Vec<Event>) {
        for effect in effects {
            match effect {
                Effect::Render(_) => self.renders += 1,
                Effect::DocumentStore(mut request) => {
                    let output = self.store.handle(&request.operation);
                    let update = self
                        .app
                        .resolve(&mut request, output)
                        .expect("store request resolves");
                    self.settle(update.effects, update.events);
                }
                Effect::Linking(mut request) => {
                    let LinkingOperation::Open { url } = &request.operation;
                    self.opened.push(url.clone());
                    let update = self
                        .app
                        .resolve(&mut request, self.link_answer.clone())
                        .expect("link request resolves");
                    self.settle(update.effects, update.events);
                }
            }
        }
        for event in events {
            self.run(event);
        }
    }

    pub fn view(&self) -> shared::ViewModel {
        self.app.view(&self.model)
    }

    pub fn alert_message(&self) -> Option<String> {
        self.model.alert.as_ref().map(|a| a.message.clone())
    }
}
