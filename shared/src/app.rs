use serde_json::Value;

use crate::{
    capabilities::{
        map_search_url, parse_link, Capabilities, CollectionPath, Fields, LinkingOutput,
        LinkingResult, StoreOutput, StoreResult,
    },
    config::AppConfig,
    event::{Event, LinkTarget},
    model::{Alert, Model, VisitId},
    routes::Route,
    screens::{self, Fetch, Form, Reaction, Screen, Submission},
    strings,
    view::ViewModel,
    AppError, ErrorKind, COLLECTION_REGISTRATIONS, FIELD_CREATED_AT, FIELD_FAVORITE,
};

#[derive(Default)]
pub struct App;

impl App {
    /// Builds the screen for the current route under a fresh visit and
    /// issues its read. A route whose parameters cannot address a document
    /// counts as a missing resource.
    fn mount(model: &mut Model, caps: &Capabilities) {
        let route = model.navigation.current().clone();
        let visit = model.begin_visit();

        match Screen::mount(&route, &model.config) {
            Ok(screen) => {
                let fetch = screen.fetch();
                model.screen = screen;
                tracing::debug!(route = route.name(), %visit, "screen mounted");

                if let Some(fetch) = fetch {
                    Self::issue(fetch, visit, caps);
                }
            }
            Err(e) => {
                let error = AppError::from(e);
                tracing::warn!(
                    route = route.name(),
                    code = error.code(),
                    error = %error,
                    "route does not address a document"
                );
                model.show_alert(screens::missing_alert(&route));
                match route.parent_listing() {
                    Some(listing) => {
                        model.navigation.go_to_listing(listing);
                        Self::mount(model, caps);
                    }
                    None => model.screen = Screen::Idle,
                }
            }
        }
    }

    fn issue(fetch: Fetch, visit: VisitId, caps: &Capabilities) {
        let on_result = move |result: StoreResult| Event::Fetched {
            visit,
            result: Box::new(result),
        };
        match fetch {
            Fetch::Query(query) => {
                tracing::debug!(collection = %query.collection, %visit, "query issued");
                caps.store.query(query, on_result);
            }
            Fetch::Get(path) => {
                tracing::debug!(path = %path, %visit, "get issued");
                caps.store.get(path, on_result);
            }
        }
    }

    fn push(route: Route, model: &mut Model, caps: &Capabilities) {
        model.navigation.push(route);
        Self::mount(model, caps);
    }

    fn react(reaction: Reaction, model: &mut Model, caps: &Capabilities) {
        match reaction {
            Reaction::Stay => {}
            Reaction::Alert(alert) => model.show_alert(alert),
            Reaction::Redirect { alert, to } => {
                model.show_alert(alert);
                model.navigation.go_to_listing(to);
                Self::mount(model, caps);
            }
        }
    }

    fn accept_config(config: AppConfig) -> AppConfig {
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                let error = AppError::from(e);
                tracing::warn!(code = error.code(), error = %error, "invalid config, using defaults");
                AppConfig::default()
            }
        }
    }

    fn create_in(
        collection: &str,
        fields: Fields,
        model: &Model,
        caps: &Capabilities,
    ) -> Result<(), AppError> {
        let collection = CollectionPath::root(collection)?;
        let visit = model.visit;
        tracing::info!(collection = %collection, %visit, "creating document");
        caps.store.create(
            collection,
            fields,
            vec![FIELD_CREATED_AT.to_string()],
            move |result| Event::Created {
                visit,
                result: Box::new(result),
            },
        );
        Ok(())
    }

    /// Outcome of a create: `Ok` carries the new document id.
    fn created_id(result: StoreResult) -> Result<String, AppError> {
        match result {
            Ok(StoreOutput::Created { id }) => Ok(id),
            Ok(other) => Err(AppError::new(ErrorKind::InvalidState, "Unexpected store output")
                .with_internal(format!("{other:?}"))),
            Err(e) => Err(e.into()),
        }
    }

    fn open_link(target: LinkTarget, raw: &str, model: &mut Model, caps: &Capabilities) {
        let url = match target {
            LinkTarget::Map => map_search_url(&model.config.maps_search_url, raw),
            LinkTarget::Website => parse_link(raw),
        };
        match url {
            Ok(url) => {
                let shown = raw.to_string();
                caps.linking.open(&url, move |result| Event::LinkOpened {
                    target,
                    url: shown,
                    result: Box::new(result),
                });
            }
            Err(e) => {
                tracing::warn!(url = raw, error = %e, "link rejected");
                model.show_alert(Self::link_failure(target, &e.to_string()));
            }
        }
    }

    fn link_failure(target: LinkTarget, message: &str) -> Alert {
        match target {
            LinkTarget::Map => Alert::new(strings::ERROR_TITLE, strings::MAPS_OPEN_FAILED),
            LinkTarget::Website => Alert::new(
                strings::ERROR_TITLE_HR,
                format!("{}{message}", strings::LINK_OPEN_FAILED_PREFIX),
            ),
        }
    }

    fn link_opened(target: LinkTarget, url: &str, result: LinkingResult) -> Option<Alert> {
        match result {
            Ok(LinkingOutput::Opened) => None,
            Ok(LinkingOutput::Unsupported) => Some(match target {
                LinkTarget::Map => Alert::new(strings::ERROR_TITLE, strings::MAPS_OPEN_FAILED),
                LinkTarget::Website => Alert::new(
                    strings::ERROR_TITLE_HR,
                    format!("{}{url}", strings::URL_UNSUPPORTED_PREFIX),
                ),
            }),
            Err(e) => Some(Self::link_failure(target, &e.to_string())),
        }
    }

    fn is_stale(model: &Model, visit: VisitId, event: &'static str) -> bool {
        if model.is_current(visit) {
            return false;
        }
        tracing::debug!(event, %visit, current = %model.visit, "dropping stale response");
        true
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        tracing::trace!(
            event = event_name,
            route = model.navigation.current().name(),
            "update"
        );

        if !model.started && event.is_user_initiated() {
            tracing::debug!(event = event_name, "ignoring event before start");
            return;
        }

        match event {
            Event::Noop => return,

            Event::AppStarted { config } => {
                model.config = Self::accept_config(*config);
                model.started = true;
                model.alert = None;
                model.navigation.reset();
                tracing::info!(
                    recent_events_limit = model.config.recent_events_limit,
                    reports = model.config.dumping_report_collection.is_some(),
                    "app started"
                );
                Self::mount(model, caps);
            }

            Event::AppStopped => {
                model.end_visit();
                model.started = false;
                model.screen = Screen::Idle;
                tracing::info!("app stopped");
                return;
            }

            Event::Navigate(route) => Self::push(route, model, caps),

            Event::Back => {
                if model.navigation.back() {
                    Self::mount(model, caps);
                } else {
                    tracing::debug!("back at root ignored");
                    return;
                }
            }

            Event::AlertDismissed => model.dismiss_alert(),

            Event::ItemSelected { id } => match model.screen.selection(&id) {
                Some(route) => Self::push(route, model, caps),
                None => {
                    tracing::warn!(
                        id = %id,
                        route = model.navigation.current().name(),
                        "selection not on screen"
                    );
                    return;
                }
            },

            Event::OpenEventLocation => {
                let Screen::EventDetail(fetch) = &model.screen else {
                    return;
                };
                let Some(location) = fetch.record().map(|e| e.location.clone()) else {
                    return;
                };
                Self::open_link(LinkTarget::Map, &location, model, caps);
            }

            Event::RegisterForEvent => {
                let Screen::EventDetail(fetch) = &model.screen else {
                    return;
                };
                let Some(event_title) = fetch.record().map(|e| e.title.clone()) else {
                    return;
                };
                Self::push(Route::EventRegistration { event_title }, model, caps);
            }

            Event::RegistrationFieldChanged { field, value } => {
                let Screen::EventRegistration(form) = &mut model.screen else {
                    return;
                };
                form.set(field, value);
            }

            Event::SubmitRegistration => {
                let Screen::EventRegistration(form) = &mut model.screen else {
                    return;
                };
                match form.submit() {
                    Submission::Ignored => return,
                    Submission::Invalid(e) => {
                        tracing::debug!(error = %AppError::from(e), "registration rejected");
                    }
                    Submission::Write(fields) => {
                        if let Err(e) = Self::create_in(COLLECTION_REGISTRATIONS, fields, model, caps)
                        {
                            tracing::error!(code = e.code(), error = %e, "registration not sent");
                            if let Screen::EventRegistration(form) = &mut model.screen {
                                form.finish_submit();
                            }
                            model.show_alert(Alert::new(
                                strings::ERROR_TITLE_HR,
                                strings::SAVE_FAILED,
                            ));
                        }
                    }
                }
            }

            Event::ReportFieldChanged { field, value } => {
                let Screen::DumpingReport(form) = &mut model.screen else {
                    return;
                };
                form.set(field, value);
            }

            Event::SubmitReport => {
                let Screen::DumpingReport(form) = &mut model.screen else {
                    return;
                };
                match form.submit() {
                    Submission::Ignored => return,
                    Submission::Invalid(e) => {
                        tracing::debug!(error = %AppError::from(e), "report rejected");
                    }
                    Submission::Write(fields) => {
                        match model.config.dumping_report_collection.clone() {
                            Some(collection) => {
                                if let Err(e) = Self::create_in(&collection, fields, model, caps) {
                                    tracing::error!(code = e.code(), error = %e, "report not sent");
                                    if let Screen::DumpingReport(form) = &mut model.screen {
                                        form.finish_submit();
                                    }
                                    model.show_alert(Alert::new(
                                        strings::ERROR_TITLE_HR,
                                        strings::SAVE_FAILED,
                                    ));
                                }
                            }
                            None => {
                                tracing::info!("no report collection configured, report discarded");
                                model.navigation.back();
                                Self::mount(model, caps);
                            }
                        }
                    }
                }
            }

            Event::Created { visit, result } => {
                if Self::is_stale(model, visit, event_name) {
                    return;
                }
                let (ok_title, ok_message) = match &mut model.screen {
                    Screen::EventRegistration(form) => {
                        form.finish_submit();
                        (strings::REGISTRATION_OK_TITLE, strings::REGISTRATION_OK_MESSAGE)
                    }
                    Screen::DumpingReport(form) => {
                        form.finish_submit();
                        (strings::REPORT_OK_TITLE, strings::REPORT_OK_MESSAGE)
                    }
                    _ => {
                        tracing::warn!("create result for a screen without a form");
                        return;
                    }
                };
                match Self::created_id(*result) {
                    Ok(id) => {
                        tracing::info!(id = %id, %visit, "document created");
                        model.show_alert(Alert::new(ok_title, ok_message));
                        model.navigation.back();
                        Self::mount(model, caps);
                    }
                    Err(e) => {
                        tracing::warn!(code = e.code(), error = %e, "create failed");
                        model.show_alert(Alert::new(strings::ERROR_TITLE_HR, strings::SAVE_FAILED));
                    }
                }
            }

            Event::NotificationsToggled { enabled } => {
                let Screen::AddressDetail(screen) = &mut model.screen else {
                    return;
                };
                screen.notifications = enabled;
            }

            Event::DeleteAddress => {
                let Screen::AddressDetail(screen) = &mut model.screen else {
                    return;
                };
                if screen.deleting {
                    return;
                }
                screen.deleting = true;

                let path = screen.fetch.path().clone();
                let mut fields = Fields::new();
                fields.insert(FIELD_FAVORITE.to_string(), Value::Bool(false));

                let visit = model.visit;
                tracing::info!(path = %path, %visit, "removing address from favourites");
                caps.store.update(path, fields, move |result| Event::Updated {
                    visit,
                    result: Box::new(result),
                });
            }

            Event::Updated { visit, result } => {
                if Self::is_stale(model, visit, event_name) {
                    return;
                }
                let Screen::AddressDetail(screen) = &mut model.screen else {
                    tracing::warn!("update result for a screen without an address");
                    return;
                };
                screen.deleting = false;

                match *result {
                    Ok(StoreOutput::Updated) => {
                        tracing::info!(%visit, "address removed from favourites");
                        model.navigation.go_to_listing(Route::Schedule);
                        Self::mount(model, caps);
                    }
                    other => {
                        let error = match other {
                            Err(e) => AppError::from(e),
                            Ok(output) => {
                                AppError::new(ErrorKind::InvalidState, "Unexpected store output")
                                    .with_internal(format!("{output:?}"))
                            }
                        };
                        tracing::warn!(code = error.code(), error = %error, "address update failed");
                        model.show_alert(Alert::new(
                            strings::ERROR_TITLE_HR,
                            strings::ADDRESS_UPDATE_FAILED,
                        ));
                    }
                }
            }

            Event::OpenCompanyWebsite => {
                let Screen::CompanyDetail(screen) = &model.screen else {
                    return;
                };
                let Some(company) = screen.company else {
                    return;
                };
                Self::open_link(LinkTarget::Website, company.website, model, caps);
            }

            Event::Fetched { visit, result } => {
                if Self::is_stale(model, visit, event_name) {
                    return;
                }
                let reaction = model.screen.apply_fetch(*result);
                Self::react(reaction, model, caps);
            }

            Event::LinkOpened {
                target,
                url,
                result,
            } => match Self::link_opened(target, &url, *result) {
                Some(alert) => {
                    tracing::warn!(url = %url, ?target, "link not opened");
                    model.show_alert(alert);
                }
                None => return,
            },
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::build(model)
    }
}
