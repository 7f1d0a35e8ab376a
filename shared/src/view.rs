use serde::{Deserialize, Serialize};

use crate::{
    catalog::Company,
    config::AppConfig,
    entities::{Address, AdviceCategory, AdviceExample, CommunityEvent, Record},
    model::{Alert, Model},
    screens::{
        AddressDetailScreen, AdviceDetailScreen, CompanyScreen, ListProjection, LoadState,
        RegistrationForm, ReportForm, Screen,
    },
    strings,
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Loading,
    Ready,
    NotFound,
    Failed,
}

impl<T> From<&LoadState<T>> for ViewStatus {
    fn from(state: &LoadState<T>) -> Self {
        match state {
            LoadState::Loading => Self::Loading,
            LoadState::Ready(_) => Self::Ready,
            LoadState::NotFound => Self::NotFound,
            LoadState::Failed => Self::Failed,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ListView<T> {
    pub status: ViewStatus,
    pub items: Vec<T>,
    /// Set once loading finished with nothing to show.
    pub empty_message: Option<String>,
}

impl<T> ListView<T> {
    fn project<'a, R>(
        list: &'a ListProjection<R>,
        card: impl Fn(&'a R) -> T,
        empty_message: Option<&str>,
    ) -> Self
    where
        R: Record,
    {
        let status = ViewStatus::from(list.state());
        let items: Vec<T> = list.items().iter().map(card).collect();
        let empty_message = if status != ViewStatus::Loading && items.is_empty() {
            empty_message.map(str::to_string)
        } else {
            None
        };
        Self {
            status,
            items,
            empty_message,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub date: String,
    pub location: String,
    pub image_url: String,
}

impl EventCard {
    fn new(event: &CommunityEvent, config: &AppConfig) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
            image_url: event
                .image_url
                .clone()
                .unwrap_or_else(|| config.placeholder_image_url.clone()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventDetailView {
    pub status: ViewStatus,
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub organizer: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegistrationView {
    pub event_title: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl From<&RegistrationForm> for RegistrationView {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            event_title: form.event_title.clone(),
            name: form.name.clone(),
            surname: form.surname.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            message: form.message.clone(),
            error: form.status.error.clone(),
            submitting: form.status.submitting,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AddressCard {
    pub id: String,
    pub name: String,
    /// "Ovaj tjedan: <odvoz>"
    pub pickup_label: String,
    pub image: Option<String>,
}

fn pickup_label(address: &Address) -> String {
    format!("{}{}", strings::THIS_WEEK_PREFIX, address.pickup)
}

impl From<&Address> for AddressCard {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id.to_string(),
            name: address.name.clone(),
            pickup_label: pickup_label(address),
            image: address.image.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleView {
    pub addresses: ListView<AddressCard>,
    pub empty_hint: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AddressDetailView {
    pub status: ViewStatus,
    pub name: String,
    pub pickup_label: String,
    pub image: Option<String>,
    pub notifications: bool,
    pub deleting: bool,
}

impl From<&AddressDetailScreen> for AddressDetailView {
    fn from(screen: &AddressDetailScreen) -> Self {
        let record = screen.fetch.record();
        Self {
            status: ViewStatus::from(screen.fetch.state()),
            name: record.map(|a| a.name.clone()).unwrap_or_default(),
            pickup_label: record.map(pickup_label).unwrap_or_default(),
            image: record
                .and_then(|a| a.image.clone())
                .or_else(|| screen.image.clone()),
            notifications: screen.notifications,
            deleting: screen.deleting,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdviceCategoryCard {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&AdviceCategory> for AdviceCategoryCard {
    fn from(category: &AdviceCategory) -> Self {
        Self {
            id: category.id.to_string(),
            title: category.title.clone(),
            description: category.description.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdviceExampleCard {
    pub id: String,
    pub title: String,
}

impl From<&AdviceExample> for AdviceExampleCard {
    fn from(example: &AdviceExample) -> Self {
        Self {
            id: example.id.to_string(),
            title: example.title().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdviceExamplesView {
    pub title: String,
    pub examples: ListView<AdviceExampleCard>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdviceDetailView {
    pub status: ViewStatus,
    pub title: String,
    pub entries: Vec<String>,
    pub empty_message: Option<String>,
}

impl From<&AdviceDetailScreen> for AdviceDetailView {
    fn from(screen: &AdviceDetailScreen) -> Self {
        let status = ViewStatus::from(screen.fetch.state());
        let entries = screen.entries();
        let empty_message = (entries.is_empty() && status != ViewStatus::Loading)
            .then(|| strings::NO_ADVICE_DETAILS.to_string());
        Self {
            status,
            title: screen.title.clone(),
            entries,
            empty_message,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReportView {
    pub address: String,
    pub photo: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl From<&ReportForm> for ReportView {
    fn from(form: &ReportForm) -> Self {
        Self {
            address: form.address.clone(),
            photo: form.photo.clone(),
            error: form.status.error.clone(),
            submitting: form.status.submitting,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompanyCard {
    pub name: String,
    pub description: String,
    pub website: String,
    pub phone: String,
    pub email: String,
    pub logo: String,
}

impl From<&Company> for CompanyCard {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.to_string(),
            description: company.description.to_string(),
            website: company.website.to_string(),
            phone: company.phone.to_string(),
            email: company.email.to_string(),
            logo: company.logo.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompanyView {
    pub category: String,
    pub company: Option<CompanyCard>,
    pub empty_message: Option<String>,
}

impl From<&CompanyScreen> for CompanyView {
    fn from(screen: &CompanyScreen) -> Self {
        Self {
            category: screen.category.clone(),
            company: screen.company.map(CompanyCard::from),
            empty_message: screen
                .company
                .is_none()
                .then(|| strings::NO_COMPANY.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InfoView {
    pub title: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScreenView {
    #[default]
    Idle,
    Home {
        recent_events: ListView<EventCard>,
    },
    EventList {
        events: ListView<EventCard>,
    },
    EventDetail(EventDetailView),
    EventRegistration(RegistrationView),
    Schedule(ScheduleView),
    AddressDetail(AddressDetailView),
    CollectionInfo(InfoView),
    AdviceCategories {
        categories: ListView<AdviceCategoryCard>,
    },
    AdviceExamples(AdviceExamplesView),
    AdviceDetail(AdviceDetailView),
    DumpingReport(ReportView),
    CompanyDetail(CompanyView),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub route: String,
    pub can_go_back: bool,
    pub alert: Option<Alert>,
    pub screen: ScreenView,
}

impl ViewModel {
    pub fn build(model: &Model) -> Self {
        Self {
            route: model.navigation.current().name().to_string(),
            can_go_back: model.navigation.can_go_back(),
            alert: model.alert.clone(),
            screen: screen_view(&model.screen, &model.config),
        }
    }
}

fn screen_view(screen: &Screen, config: &AppConfig) -> ScreenView {
    let event_card = |event: &CommunityEvent| EventCard::new(event, config);

    match screen {
        Screen::Idle => ScreenView::Idle,
        Screen::Home(list) => ScreenView::Home {
            recent_events: ListView::project(list, event_card, None),
        },
        Screen::EventList(list) => ScreenView::EventList {
            events: ListView::project(list, event_card, None),
        },
        Screen::EventDetail(fetch) => {
            let record = fetch.record();
            ScreenView::EventDetail(EventDetailView {
                status: ViewStatus::from(fetch.state()),
                title: record.map(|e| e.title.clone()).unwrap_or_default(),
                date: record.map(|e| e.date.clone()).unwrap_or_default(),
                location: record.map(|e| e.location.clone()).unwrap_or_default(),
                description: record.map(|e| e.description.clone()).unwrap_or_default(),
                image_url: record.and_then(|e| e.image_url.clone()),
                organizer: record.and_then(|e| e.organizer.clone()),
            })
        }
        Screen::EventRegistration(form) => ScreenView::EventRegistration(form.into()),
        Screen::Schedule(list) => {
            let addresses = ListView::project(list, AddressCard::from, Some(strings::NO_ADDRESSES));
            let empty_hint = addresses
                .empty_message
                .as_ref()
                .map(|_| strings::NO_ADDRESSES_HINT.to_string());
            ScreenView::Schedule(ScheduleView {
                addresses,
                empty_hint,
            })
        }
        Screen::AddressDetail(screen) => ScreenView::AddressDetail(screen.into()),
        Screen::CollectionInfo => ScreenView::CollectionInfo(InfoView {
            title: strings::COLLECTION_INFO_TITLE.to_string(),
            text: strings::COLLECTION_INFO_TEXT.to_string(),
        }),
        Screen::AdviceCategories(list) => ScreenView::AdviceCategories {
            categories: ListView::project(list, AdviceCategoryCard::from, None),
        },
        Screen::AdviceExamples(screen) => ScreenView::AdviceExamples(AdviceExamplesView {
            title: screen.title.clone(),
            examples: ListView::project(
                &screen.list,
                AdviceExampleCard::from,
                Some(strings::NO_EXAMPLES),
            ),
        }),
        Screen::AdviceDetail(screen) => ScreenView::AdviceDetail(screen.into()),
        Screen::DumpingReport(form) => ScreenView::DumpingReport(form.into()),
        Screen::CompanyDetail(screen) => ScreenView::CompanyDetail(screen.into()),
    }
}
