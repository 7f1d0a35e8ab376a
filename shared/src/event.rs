use serde::{Deserialize, Serialize};

use crate::{
    capabilities::{LinkingResult, StoreResult},
    config::AppConfig,
    model::VisitId,
    routes::Route,
    screens::{RegistrationField, ReportField},
};

/// Which link a `LinkOpened` answer belongs to; decides the failure copy.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    Map,
    Website,
}

// --- Event enum: store answers are boxed and tagged with their visit ---

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub enum Event {
    #[default]
    Noop,

    AppStarted {
        config: Box<AppConfig>,
    },
    AppStopped,

    Navigate(Route),
    Back,
    AlertDismissed,

    /// A list row was pressed.
    ItemSelected {
        id: String,
    },

    OpenEventLocation,
    RegisterForEvent,
    RegistrationFieldChanged {
        field: RegistrationField,
        value: String,
    },
    SubmitRegistration,

    NotificationsToggled {
        enabled: bool,
    },
    DeleteAddress,

    ReportFieldChanged {
        field: ReportField,
        value: String,
    },
    SubmitReport,

    OpenCompanyWebsite,

    // Capability responses
    Fetched {
        visit: VisitId,
        result: Box<StoreResult>,
    },
    Created {
        visit: VisitId,
        result: Box<StoreResult>,
    },
    Updated {
        visit: VisitId,
        result: Box<StoreResult>,
    },
    LinkOpened {
        target: LinkTarget,
        url: String,
        result: Box<LinkingResult>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::AppStarted { .. } => "app_started",
            Self::AppStopped => "app_stopped",
            Self::Navigate(_) => "navigate",
            Self::Back => "back",
            Self::AlertDismissed => "alert_dismissed",
            Self::ItemSelected { .. } => "item_selected",
            Self::OpenEventLocation => "open_event_location",
            Self::RegisterForEvent => "register_for_event",
            Self::RegistrationFieldChanged { .. } => "registration_field_changed",
            Self::SubmitRegistration => "submit_registration",
            Self::NotificationsToggled { .. } => "notifications_toggled",
            Self::DeleteAddress => "delete_address",
            Self::ReportFieldChanged { .. } => "report_field_changed",
            Self::SubmitReport => "submit_report",
            Self::OpenCompanyWebsite => "open_company_website",
            Self::Fetched { .. } => "fetched",
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::LinkOpened { .. } => "link_opened",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Noop
                | Self::AppStarted { .. }
                | Self::AppStopped
                | Self::Fetched { .. }
                | Self::Created { .. }
                | Self::Updated { .. }
                | Self::LinkOpened { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::StoreError;

    #[test]
    fn test_event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(size <= 160, "Event enum is {size} bytes, box more variants");
    }

    #[test]
    fn test_responses_are_not_user_initiated() {
        let fetched = Event::Fetched {
            visit: VisitId(1),
            result: Box::new(Err(StoreError::Unavailable)),
        };
        assert!(!fetched.is_user_initiated());
        assert!(Event::SubmitRegistration.is_user_initiated());
        assert!(Event::Back.is_user_initiated());
    }

    #[test]
    fn test_navigate_deserializes_from_shell_json() {
        let event: Event =
            serde_json::from_str(r#"{"Navigate":{"route":"event_detail","id":"e1"}}"#).unwrap();
        assert_eq!(event.name(), "navigate");
        assert!(matches!(event, Event::Navigate(Route::EventDetail { .. })));
    }
}
