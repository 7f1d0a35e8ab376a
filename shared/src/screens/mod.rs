//! Per-route screen state.
//!
//! Every data-backed screen is one of two shapes: a [`ListProjection`] over a
//! collection or a [`DetailFetch`] of one document. Mounting a route builds
//! its screen and names the single read it needs; the app issues that read
//! and hands the response back through [`Screen::apply_fetch`].

mod detail;
mod forms;
mod list;

pub use self::detail::DetailFetch;
pub use self::forms::{
    Form, FormError, FormStatus, RegistrationField, RegistrationForm, ReportField, ReportForm,
    Submission,
};
pub use self::list::{FailurePolicy, ListProjection};

use serde::Serialize;

use crate::{
    capabilities::{CollectionPath, DocumentPath, PathError, Query, StoreResult},
    catalog::{find_company, Company},
    config::AppConfig,
    entities::{Address, AdviceCategory, AdviceDocument, AdviceExample, CommunityEvent},
    model::{Alert, CategoryId},
    routes::Route,
    strings, text, COLLECTION_ADDRESSES, COLLECTION_ADVICE, COLLECTION_EVENTS, FIELD_CREATED_AT,
    SUBCOLLECTION_ADVICE_EXAMPLES,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    NotFound,
    Failed,
}

/// What the app must do after a screen took in a store response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    Stay,
    Alert(Alert),
    /// Alert, then leave for the listing `to`.
    Redirect { alert: Alert, to: Route },
}

/// The one read a screen issues when mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Query(Query),
    Get(DocumentPath),
}

#[derive(Debug, Clone)]
pub struct AddressDetailScreen {
    pub fetch: DetailFetch<Address>,
    /// Image passed along from the schedule list, shown before the read lands.
    pub image: Option<String>,
    /// Presentation only; nothing is scheduled.
    pub notifications: bool,
    pub deleting: bool,
}

#[derive(Debug, Clone)]
pub struct AdviceExamplesScreen {
    pub category_id: CategoryId,
    pub title: String,
    pub list: ListProjection<AdviceExample>,
}

#[derive(Debug, Clone)]
pub struct AdviceDetailScreen {
    pub title: String,
    /// Description carried by the route, used until the document is read.
    pub seed: Option<String>,
    pub fetch: DetailFetch<AdviceDocument>,
}

impl AdviceDetailScreen {
    pub fn description(&self) -> Option<&str> {
        self.fetch
            .record()
            .map(|doc| doc.description.as_str())
            .or(self.seed.as_deref())
    }

    pub fn entries(&self) -> Vec<String> {
        self.description().map(text::split_numbered).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct CompanyScreen {
    pub category: String,
    pub company: Option<&'static Company>,
}

#[derive(Debug, Default)]
pub enum Screen {
    /// Nothing mounted yet.
    #[default]
    Idle,
    Home(ListProjection<CommunityEvent>),
    EventList(ListProjection<CommunityEvent>),
    EventDetail(DetailFetch<CommunityEvent>),
    EventRegistration(RegistrationForm),
    Schedule(ListProjection<Address>),
    AddressDetail(AddressDetailScreen),
    CollectionInfo,
    AdviceCategories(ListProjection<AdviceCategory>),
    AdviceExamples(AdviceExamplesScreen),
    AdviceDetail(AdviceDetailScreen),
    DumpingReport(ReportForm),
    CompanyDetail(CompanyScreen),
}

/// Alert shown when `route` names a document that does not exist.
#[must_use]
pub fn missing_alert(route: &Route) -> Alert {
    match route {
        Route::EventDetail { .. } => Alert::new(strings::ERROR_TITLE, strings::EVENT_NOT_FOUND),
        Route::AddressDetail { .. } => {
            Alert::new(strings::ERROR_TITLE_HR, strings::ADDRESS_NOT_FOUND)
        }
        _ => Alert::new(strings::ERROR_TITLE, strings::ADVICE_NOT_FOUND),
    }
}

fn events() -> Result<Query, PathError> {
    Ok(Query::collection(CollectionPath::root(COLLECTION_EVENTS)?).order_by_desc(FIELD_CREATED_AT))
}

impl Screen {
    /// Builds the screen for `route`. Fails when a route parameter cannot
    /// form a valid document path.
    pub fn mount(route: &Route, config: &AppConfig) -> Result<Self, PathError> {
        let listing = route.parent_listing().unwrap_or(Route::Home);

        Ok(match route {
            Route::Home => Self::Home(ListProjection::new(
                events()?.limit(config.recent_events_limit),
            )),
            Route::EventList => Self::EventList(
                ListProjection::new(events()?)
                    .alert_on_failure(strings::ERROR_TITLE_HR, strings::EVENTS_FETCH_FAILED),
            ),
            Route::EventDetail { id } => Self::EventDetail(DetailFetch::new(
                DocumentPath::new(COLLECTION_EVENTS, id.as_str())?,
                listing,
                missing_alert(route),
                Alert::new(strings::ERROR_TITLE, strings::EVENT_FETCH_FAILED),
            )),
            Route::EventRegistration { event_title } => {
                Self::EventRegistration(RegistrationForm::new(event_title.clone()))
            }
            Route::Schedule => Self::Schedule(
                ListProjection::new(Query::collection(CollectionPath::root(
                    COLLECTION_ADDRESSES,
                )?))
                .keep(Address::is_favorite)
                .alert_on_failure(strings::ERROR_TITLE_HR, strings::ADDRESSES_FETCH_FAILED),
            ),
            Route::AddressDetail { id, image } => Self::AddressDetail(AddressDetailScreen {
                fetch: DetailFetch::new(
                    DocumentPath::new(COLLECTION_ADDRESSES, id.as_str())?,
                    listing,
                    missing_alert(route),
                    Alert::new(strings::ERROR_TITLE_HR, strings::ADDRESSES_FETCH_FAILED),
                ),
                image: image.clone(),
                notifications: true,
                deleting: false,
            }),
            Route::CollectionInfo => Self::CollectionInfo,
            Route::AdviceCategories => Self::AdviceCategories(
                ListProjection::new(Query::collection(CollectionPath::root(COLLECTION_ADVICE)?))
                    .alert_on_failure(strings::ERROR_TITLE_HR, strings::ADVICE_FETCH_FAILED),
            ),
            Route::AdviceExamples { category_id, title } => {
                Self::AdviceExamples(AdviceExamplesScreen {
                    category_id: category_id.clone(),
                    title: title.clone(),
                    list: ListProjection::new(Query::collection(CollectionPath::sub(
                        COLLECTION_ADVICE,
                        category_id.as_str(),
                        SUBCOLLECTION_ADVICE_EXAMPLES,
                    )?))
                    .alert_on_failure(
                        strings::ERROR_TITLE_HR,
                        strings::ADVICE_EXAMPLES_FETCH_FAILED,
                    ),
                })
            }
            Route::AdviceDetail {
                id,
                title,
                description,
                ..
            } => Self::AdviceDetail(AdviceDetailScreen {
                title: title.clone(),
                seed: description.clone(),
                fetch: DetailFetch::new(
                    DocumentPath::new(COLLECTION_ADVICE, id.as_str())?,
                    listing,
                    missing_alert(route),
                    Alert::new(strings::ERROR_TITLE, strings::ADVICE_FETCH_DOC_FAILED),
                ),
            }),
            Route::DumpingReport => Self::DumpingReport(ReportForm::default()),
            Route::CompanyDetail {
                category,
                company_id,
            } => Self::CompanyDetail(CompanyScreen {
                category: category.clone(),
                company: find_company(company_id),
            }),
        })
    }

    pub fn fetch(&self) -> Option<Fetch> {
        match self {
            Self::Home(list) | Self::EventList(list) => Some(Fetch::Query(list.query().clone())),
            Self::Schedule(list) => Some(Fetch::Query(list.query().clone())),
            Self::AdviceCategories(list) => Some(Fetch::Query(list.query().clone())),
            Self::AdviceExamples(screen) => Some(Fetch::Query(screen.list.query().clone())),
            Self::EventDetail(fetch) => Some(Fetch::Get(fetch.path().clone())),
            Self::AddressDetail(screen) => Some(Fetch::Get(screen.fetch.path().clone())),
            Self::AdviceDetail(screen) => Some(Fetch::Get(screen.fetch.path().clone())),
            Self::Idle
            | Self::EventRegistration(_)
            | Self::CollectionInfo
            | Self::DumpingReport(_)
            | Self::CompanyDetail(_) => None,
        }
    }

    pub fn apply_fetch(&mut self, result: StoreResult) -> Reaction {
        match self {
            Self::Home(list) | Self::EventList(list) => list.apply(result),
            Self::Schedule(list) => list.apply(result),
            Self::AdviceCategories(list) => list.apply(result),
            Self::AdviceExamples(screen) => screen.list.apply(result),
            Self::EventDetail(fetch) => fetch.apply(result),
            Self::AddressDetail(screen) => screen.fetch.apply(result),
            Self::AdviceDetail(screen) => screen.fetch.apply(result),
            Self::Idle
            | Self::EventRegistration(_)
            | Self::CollectionInfo
            | Self::DumpingReport(_)
            | Self::CompanyDetail(_) => {
                tracing::warn!("fetch result for a screen without a read");
                Reaction::Stay
            }
        }
    }

    /// Detail route for the list item `id`, carrying the fields the
    /// destination shows before its own read completes.
    pub fn selection(&self, id: &str) -> Option<Route> {
        match self {
            Self::Home(list) | Self::EventList(list) => list.find(id).map(|event| {
                Route::EventDetail {
                    id: event.id.clone(),
                }
            }),
            Self::Schedule(list) => list.find(id).map(|address| Route::AddressDetail {
                id: address.id.clone(),
                image: address.image.clone(),
            }),
            Self::AdviceCategories(list) => {
                list.find(id).map(|category| Route::AdviceExamples {
                    category_id: category.id.clone(),
                    title: category.title.clone(),
                })
            }
            Self::AdviceExamples(screen) => screen.list.find(id).map(|example| {
                Route::AdviceDetail {
                    category_id: screen.category_id.clone(),
                    category_title: screen.title.clone(),
                    id: example.id.clone(),
                    title: example.title().to_string(),
                    description: example.description.clone(),
                }
            }),
            _ => None,
        }
    }
}
