mod common;

use common::{Harness, MemoryStore};
use serde_json::json;
use shared::{
    capabilities::StoreError,
    model::AddressId,
    view::{ScreenView, ViewStatus},
    Event, Route,
};

fn addresses() -> MemoryStore {
    let mut store = MemoryStore::default();
    store.insert(
        "adresa",
        "a1",
        json!({"naziv": "Korzo 1", "odvoz": "Ponedjeljak", "slika": "https://img/a1.png", "heart": true}),
    );
    store.insert(
        "adresa",
        "a2",
        json!({"naziv": "Trpimirova 2", "odvoz": "Srijeda", "heart": false}),
    );
    store.insert(
        "adresa",
        "a3",
        json!({"naziv": "Zvonimirova 3", "odvoz": "Petak", "heart": "true"}),
    );
    store.insert(
        "adresa",
        "a4",
        json!({"naziv": "Krešimirova 4", "odvoz": "Utorak", "heart": true}),
    );
    store
}

fn schedule_ids(harness: &Harness) -> Vec<String> {
    let ScreenView::Schedule(view) = harness.view().screen else {
        panic!("expected schedule");
    };
    view.addresses.items.into_iter().map(|a| a.id).collect()
}

#[test]
fn test_schedule_lists_only_favourites() {
    let mut harness = Harness::started(addresses());

    harness.run(Event::Navigate(Route::Schedule));

    assert_eq!(schedule_ids(&harness), vec!["a1", "a4"]);
    let ScreenView::Schedule(view) = harness.view().screen else {
        panic!("expected schedule");
    };
    assert_eq!(view.addresses.items[0].pickup_label, "Ovaj tjedan: Ponedjeljak");
}

#[test]
fn test_delete_flips_flag_and_hides_address() {
    let mut harness = Harness::started(addresses());
    harness.run(Event::Navigate(Route::Schedule));

    harness.run(Event::ItemSelected { id: "a1".into() });
    assert_eq!(
        harness.model.navigation.current(),
        &Route::AddressDetail {
            id: AddressId::new("a1"),
            image: Some("https://img/a1.png".into()),
        }
    );
    let ScreenView::AddressDetail(detail) = harness.view().screen else {
        panic!("expected address detail");
    };
    assert_eq!(detail.status, ViewStatus::Ready);
    assert_eq!(detail.name, "Korzo 1");
    assert!(detail.notifications);

    harness.run(Event::DeleteAddress);

    // soft delete: the document stays, only the flag changes
    let doc = harness.store.doc("adresa", "a1").expect("document kept");
    assert_eq!(doc.fields["heart"], json!(false));
    assert_eq!(doc.fields["naziv"], json!("Korzo 1"));
    assert_eq!(harness.store.count("update"), 1);

    // back on the schedule, re-fetched, without the address
    assert_eq!(harness.model.navigation.current(), &Route::Schedule);
    assert_eq!(harness.model.navigation.depth(), 2);
    assert_eq!(schedule_ids(&harness), vec!["a4"]);
}

#[test]
fn test_delete_failure_alerts_and_stays() {
    let mut harness = Harness::started(addresses());
    harness.run(Event::Navigate(Route::Schedule));
    harness.run(Event::ItemSelected { id: "a4".into() });
    harness.store.fail(
        "update",
        StoreError::PermissionDenied {
            message: "rules".into(),
        },
    );

    harness.run(Event::DeleteAddress);

    assert_eq!(
        harness.alert_message().as_deref(),
        Some("Ne mogu izbrisati adresu.")
    );
    assert!(matches!(
        harness.model.navigation.current(),
        Route::AddressDetail { .. }
    ));
    let ScreenView::AddressDetail(detail) = harness.view().screen else {
        panic!("expected address detail");
    };
    assert!(!detail.deleting);
    assert_eq!(
        harness.store.doc("adresa", "a4").map(|d| d.fields["heart"].clone()),
        Some(json!(true))
    );
}

#[test]
fn test_missing_address_redirects_to_schedule() {
    let mut harness = Harness::started(addresses());
    harness.run(Event::Navigate(Route::Schedule));

    harness.run(Event::Navigate(Route::AddressDetail {
        id: AddressId::new("gone"),
        image: None,
    }));

    assert_eq!(harness.model.navigation.current(), &Route::Schedule);
    assert_eq!(harness.model.navigation.depth(), 2);
    assert_eq!(harness.alert_message().as_deref(), Some("No such document!"));
}

#[test]
fn test_notifications_toggle_is_local() {
    let mut harness = Harness::started(addresses());
    harness.run(Event::Navigate(Route::Schedule));
    harness.run(Event::ItemSelected { id: "a1".into() });
    let calls = harness.store.calls.len();

    harness.run(Event::NotificationsToggled { enabled: false });

    assert_eq!(harness.store.calls.len(), calls);
    let ScreenView::AddressDetail(detail) = harness.view().screen else {
        panic!("expected address detail");
    };
    assert!(!detail.notifications);
}

#[test]
fn test_empty_schedule_state() {
    let mut store = MemoryStore::default();
    store.insert("adresa", "a2", json!({"naziv": "Trpimirova 2", "heart": false}));
    let mut harness = Harness::started(store);

    harness.run(Event::Navigate(Route::Schedule));

    let ScreenView::Schedule(view) = harness.view().screen else {
        panic!("expected schedule");
    };
    assert!(view.addresses.items.is_empty());
    assert_eq!(
        view.addresses.empty_message.as_deref(),
        Some("Nema još dodanit adresa")
    );
    assert!(view.empty_hint.is_some());
}

#[test]
fn test_schedule_failure_alerts() {
    let mut harness = Harness::started(addresses());
    harness.store.fail("query", StoreError::Unavailable);

    harness.run(Event::Navigate(Route::Schedule));

    let alert = harness.model.alert.clone().expect("alert shown");
    assert_eq!(alert.title, "Greška");
    assert_eq!(alert.message, "Ne mogu dohvatiti adrese.");
}
