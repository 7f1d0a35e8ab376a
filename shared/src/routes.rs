use serde::{Deserialize, Serialize};

use crate::model::{AddressId, CategoryId, EventId, ExampleId};

/// Named destinations of the app. Parameters are the simple key/value
/// pairs the shell's router carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Home,
    EventList,
    EventDetail {
        id: EventId,
    },
    EventRegistration {
        event_title: String,
    },
    Schedule,
    AddressDetail {
        id: AddressId,
        image: Option<String>,
    },
    CollectionInfo,
    AdviceCategories,
    AdviceExamples {
        category_id: CategoryId,
        title: String,
    },
    AdviceDetail {
        category_id: CategoryId,
        category_title: String,
        id: ExampleId,
        title: String,
        description: Option<String>,
    },
    DumpingReport,
    CompanyDetail {
        category: String,
        company_id: String,
    },
}

impl Route {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::EventList => "event_list",
            Self::EventDetail { .. } => "event_detail",
            Self::EventRegistration { .. } => "event_registration",
            Self::Schedule => "schedule",
            Self::AddressDetail { .. } => "address_detail",
            Self::CollectionInfo => "collection_info",
            Self::AdviceCategories => "advice_categories",
            Self::AdviceExamples { .. } => "advice_examples",
            Self::AdviceDetail { .. } => "advice_detail",
            Self::DumpingReport => "dumping_report",
            Self::CompanyDetail { .. } => "company_detail",
        }
    }

    /// Listing a detail route falls back to when its resource is missing.
    #[must_use]
    pub fn parent_listing(&self) -> Option<Route> {
        match self {
            Self::EventDetail { .. } => Some(Self::EventList),
            Self::AddressDetail { .. } => Some(Self::Schedule),
            Self::AdviceExamples { .. } => Some(Self::AdviceCategories),
            Self::AdviceDetail {
                category_id,
                category_title,
                ..
            } => Some(Self::AdviceExamples {
                category_id: category_id.clone(),
                title: category_title.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_listing() {
        assert_eq!(
            Route::EventDetail {
                id: EventId::new("e")
            }
            .parent_listing(),
            Some(Route::EventList)
        );
        assert_eq!(
            Route::AddressDetail {
                id: AddressId::new("a"),
                image: None
            }
            .parent_listing(),
            Some(Route::Schedule)
        );
        assert_eq!(Route::Home.parent_listing(), None);
    }

    #[test]
    fn test_advice_detail_parent_keeps_category() {
        let route = Route::AdviceDetail {
            category_id: CategoryId::new("plastika"),
            category_title: "Plastika".into(),
            id: ExampleId::new("boca"),
            title: "Boca".into(),
            description: None,
        };
        assert_eq!(
            route.parent_listing(),
            Some(Route::AdviceExamples {
                category_id: CategoryId::new("plastika"),
                title: "Plastika".into(),
            })
        );
    }

    #[test]
    fn test_route_serializes_tagged() {
        let json = serde_json::to_value(Route::EventRegistration {
            event_title: "Čišćenje plaže".into(),
        })
        .unwrap();
        assert_eq!(json["route"], "event_registration");
        assert_eq!(json["event_title"], "Čišćenje plaže");
    }
}
