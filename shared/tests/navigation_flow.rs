mod common;

use common::{Harness, MemoryStore};
use crux_core::testing::AppTester;
use serde_json::json;
use shared::{
    capabilities::{Document, StoreOutput},
    model::{CategoryId, ExampleId},
    view::{ScreenView, ViewStatus},
    App, AppConfig, Effect, Event, Model, Route,
};

fn advice_store() -> MemoryStore {
    let mut store = MemoryStore::default();
    store.insert(
        "savjeti",
        "plastika-id",
        json!({"title": "Plastika", "description": "Ambalaža od plastike"}),
    );
    store.insert(
        "savjeti/plastika-id/plastika",
        "boca",
        json!({"primjer": "PET boca", "description": "1. Isprazni. 2. Zgnječi."}),
    );
    store.insert(
        "savjeti",
        "boca",
        json!({"description": "1. Isprazni bocu. 2. Skini čep. 3. Zgnječi."}),
    );
    store
}

#[test]
fn test_events_before_start_are_ignored() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::Navigate(Route::Schedule), &mut model);

    assert!(update.effects.is_empty());
    assert_eq!(model.navigation.current(), &Route::Home);
}

#[test]
fn test_back_at_root_is_a_no_op() {
    let mut harness = Harness::started(MemoryStore::default());
    let calls = harness.store.calls.len();

    harness.run(Event::Back);

    assert_eq!(harness.model.navigation.depth(), 1);
    assert_eq!(harness.store.calls.len(), calls);
}

#[test]
fn test_back_remounts_and_refetches() {
    let mut harness = Harness::started(MemoryStore::default());
    harness.run(Event::Navigate(Route::Schedule));
    let queries = harness.store.count("query");

    harness.run(Event::Back);

    assert_eq!(harness.model.navigation.current(), &Route::Home);
    assert_eq!(harness.store.count("query"), queries + 1);
    assert!(!harness.view().can_go_back);
}

#[test]
fn test_response_after_leaving_screen_is_dropped() {
    let mut harness = Harness::started(MemoryStore::default());

    // schedule read left in flight
    let effects = harness.send(Event::Navigate(Route::Schedule));
    let mut request = effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::DocumentStore(request) => Some(request),
            _ => None,
        })
        .expect("schedule read issued");

    harness.run(Event::Back);
    assert_eq!(harness.model.navigation.current(), &Route::Home);

    let late = Ok(StoreOutput::Documents(vec![Document {
        id: "a1".into(),
        fields: json!({"naziv": "Korzo 1", "heart": true})
            .as_object()
            .cloned()
            .unwrap(),
    }]));
    let update = harness
        .app
        .resolve(&mut request, late)
        .expect("late response resolves");
    for event in update.events {
        let after = harness.app.update(event, &mut harness.model);
        assert!(after.effects.is_empty(), "stale response must not render");
    }

    assert!(matches!(harness.view().screen, ScreenView::Home { .. }));
    assert_eq!(harness.model.alert, None);
}

#[test]
fn test_stop_invalidates_in_flight_reads() {
    let mut harness = Harness::new(MemoryStore::default());
    let effects = harness.send(Event::AppStarted {
        config: Box::new(AppConfig::default()),
    });
    let mut request = effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::DocumentStore(request) => Some(request),
            _ => None,
        })
        .expect("home read issued");

    harness.send(Event::AppStopped);

    let update = harness
        .app
        .resolve(&mut request, Ok(StoreOutput::Documents(Vec::new())))
        .expect("response resolves");
    for event in update.events {
        harness.app.update(event, &mut harness.model);
    }
    assert!(matches!(harness.view().screen, ScreenView::Idle));
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let config = AppConfig {
        recent_events_limit: 0,
        ..AppConfig::default()
    };
    let harness = Harness::started_with(MemoryStore::default(), config);
    assert_eq!(harness.model.config, AppConfig::default());
}

#[test]
fn test_advice_flow_to_numbered_entries() {
    let mut harness = Harness::started(advice_store());

    harness.run(Event::Navigate(Route::AdviceCategories));
    let ScreenView::AdviceCategories { categories } = harness.view().screen else {
        panic!("expected categories");
    };
    assert_eq!(categories.items.len(), 2);

    harness.run(Event::ItemSelected {
        id: "plastika-id".into(),
    });
    assert_eq!(
        harness.model.navigation.current(),
        &Route::AdviceExamples {
            category_id: CategoryId::new("plastika-id"),
            title: "Plastika".into(),
        }
    );
    let ScreenView::AdviceExamples(examples) = harness.view().screen else {
        panic!("expected examples");
    };
    assert_eq!(examples.examples.items[0].title, "PET boca");

    harness.run(Event::ItemSelected { id: "boca".into() });
    assert_eq!(
        harness.model.navigation.current(),
        &Route::AdviceDetail {
            category_id: CategoryId::new("plastika-id"),
            category_title: "Plastika".into(),
            id: ExampleId::new("boca"),
            title: "PET boca".into(),
            description: Some("1. Isprazni. 2. Zgnječi.".into()),
        }
    );
    let ScreenView::AdviceDetail(detail) = harness.view().screen else {
        panic!("expected advice detail");
    };
    assert_eq!(detail.status, ViewStatus::Ready);
    assert_eq!(
        detail.entries,
        vec!["1. Isprazni bocu.", "2. Skini čep.", "3. Zgnječi."]
    );
    assert_eq!(detail.empty_message, None);
}

#[test]
fn test_advice_without_numbered_text_shows_empty_state() {
    let mut store = MemoryStore::default();
    store.insert("savjeti", "x", json!({"description": "Bez numeriranih savjeta"}));
    let mut harness = Harness::started(store);

    harness.run(Event::Navigate(Route::AdviceDetail {
        category_id: CategoryId::new("c"),
        category_title: "Staklo".into(),
        id: ExampleId::new("x"),
        title: "Staklenka".into(),
        description: None,
    }));

    let ScreenView::AdviceDetail(detail) = harness.view().screen else {
        panic!("expected advice detail");
    };
    assert!(detail.entries.is_empty());
    assert_eq!(
        detail.empty_message.as_deref(),
        Some("Trenutno nema detaljnog opisa!")
    );
}

#[test]
fn test_empty_examples_state() {
    let mut harness = Harness::started(advice_store());

    harness.run(Event::Navigate(Route::AdviceExamples {
        category_id: CategoryId::new("staklo-id"),
        title: "Staklo".into(),
    }));

    let ScreenView::AdviceExamples(view) = harness.view().screen else {
        panic!("expected examples");
    };
    assert_eq!(view.examples.status, ViewStatus::Ready);
    assert_eq!(
        view.examples.empty_message.as_deref(),
        Some("Trenutno nema primjera!")
    );
}

#[test]
fn test_alert_survives_navigation_until_dismissed() {
    let mut harness = Harness::started(MemoryStore::default());
    harness.run(Event::Navigate(Route::AddressDetail {
        id: shared::model::AddressId::new("gone"),
        image: None,
    }));
    assert!(harness.view().alert.is_some());

    harness.run(Event::Navigate(Route::CollectionInfo));
    assert!(harness.view().alert.is_some());

    harness.run(Event::AlertDismissed);
    assert_eq!(harness.view().alert, None);
    let ScreenView::CollectionInfo(info) = harness.view().screen else {
        panic!("expected collection info");
    };
    assert_eq!(info.title, "Kalendar odvoza");
}
