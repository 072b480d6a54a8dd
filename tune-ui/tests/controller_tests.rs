//! Controller workflow tests against a recording in-memory store
//!
//! Covers the load lifecycle, validation short-circuits, the
//! write-then-full-reload policy, delete confirmation, and stale-response
//! discarding, all without a network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use tune_common::model::{Artist, EntityKind, Song};
use tune_common::{Error, Result};
use tune_ui::controller::{
    AlwaysConfirm, ConfirmDelete, DeleteOutcome, EntityListController, LoadStatus, SubmitOutcome,
};
use tune_ui::form::{ArtistDraft, EntityDraft, SongDraft};
use tune_ui::store::RemoteStore;

/// RemoteStore double that records every call and serves a canned list
#[derive(Default)]
struct MockStore {
    calls: Mutex<Vec<String>>,
    list_body: Mutex<Vec<Value>>,
    fail_list: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockStore {
    fn with_list(list_body: Vec<Value>) -> Arc<Self> {
        Arc::new(MockStore {
            list_body: Mutex::new(list_body),
            ..Default::default()
        })
    }

    fn set_list(&self, list_body: Vec<Value>) {
        *self.list_body.lock().unwrap() = list_body;
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>> {
        self.record(format!("GET {}", kind.collection_path()));
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Api(500, "list failed".into()));
        }
        Ok(self.list_body.lock().unwrap().clone())
    }

    async fn create(&self, kind: EntityKind, _body: Value) -> Result<Value> {
        self.record(format!("POST {}", kind.item_path()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Api(400, "create rejected".into()));
        }
        Ok(json!({ "id": 100 }))
    }

    async fn update(&self, kind: EntityKind, id: i64, _body: Value) -> Result<()> {
        self.record(format!("PUT {}/{}", kind.item_path(), id));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Api(400, "update rejected".into()));
        }
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: i64) -> Result<()> {
        self.record(format!("DELETE {}/{}", kind.item_path(), id));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Api(400, "delete rejected".into()));
        }
        Ok(())
    }
}

struct DeclineConfirm;

impl ConfirmDelete for DeclineConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

fn artist_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "debutYear": 1970,
        "genre": "Rock",
        "country": "US"
    })
}

fn filled_artist_draft() -> ArtistDraft {
    ArtistDraft {
        id: None,
        name: "Test".into(),
        debut_year: "2020".into(),
        genre: "Rock".into(),
        country: "US".into(),
    }
}

#[tokio::test]
async fn activate_loads_full_snapshot_in_server_order() {
    let store = MockStore::with_list(vec![artist_json(2, "B"), artist_json(1, "A")]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());

    controller.activate().await;

    assert_eq!(*controller.load_status(), LoadStatus::Ready);
    let ids: Vec<_> = controller.items().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(2), Some(1)]);
    assert_eq!(store.calls(), vec!["GET /artists"]);
}

#[tokio::test]
async fn failed_load_is_terminal_until_reactivation() {
    let store = MockStore::with_list(vec![artist_json(1, "A")]);
    store.fail_list.store(true, Ordering::SeqCst);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());

    controller.activate().await;

    assert!(matches!(controller.load_status(), LoadStatus::Failed(_)));
    assert!(controller.items().is_empty());
    // no automatic retry happened
    assert_eq!(store.calls().len(), 1);

    // reactivation recovers
    store.fail_list.store(false, Ordering::SeqCst);
    controller.activate().await;
    assert_eq!(*controller.load_status(), LoadStatus::Ready);
    assert_eq!(controller.items().len(), 1);
}

#[tokio::test]
async fn submit_with_missing_field_makes_no_call() {
    let store = MockStore::with_list(vec![]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());

    let mut draft = filled_artist_draft();
    draft.country = String::new();
    *controller.draft_mut() = draft;

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(store.calls().is_empty());
    assert_eq!(controller.notice(), Some("Please fill all fields"));
}

#[tokio::test]
async fn successful_create_posts_then_reloads_and_resets_draft() {
    let store = MockStore::with_list(vec![artist_json(100, "Test")]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());
    *controller.draft_mut() = filled_artist_draft();

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(store.calls(), vec!["POST /artist", "GET /artists"]);

    // the displayed list is the server's reload result, never the draft
    assert_eq!(controller.items().len(), 1);
    assert_eq!(controller.items()[0].id, Some(100));
    assert_eq!(*controller.draft(), ArtistDraft::default());
}

#[tokio::test]
async fn submit_with_draft_id_updates_instead_of_creating() {
    let store = MockStore::with_list(vec![artist_json(7, "Seven")]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());

    controller.activate().await;
    let entity = controller.items()[0].clone();
    controller.begin_edit(&entity);
    controller.draft_mut().genre = "Jazz".into();

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(
        store.calls(),
        vec!["GET /artists", "PUT /artist/7", "GET /artists"]
    );
    assert_eq!(*controller.draft(), ArtistDraft::default());
}

#[tokio::test]
async fn failed_write_preserves_draft_and_items() {
    let store = MockStore::with_list(vec![artist_json(1, "A")]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());
    controller.activate().await;
    let before = controller.items().to_vec();

    *controller.draft_mut() = filled_artist_draft();
    store.fail_writes.store(true, Ordering::SeqCst);

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(*controller.draft(), filled_artist_draft());
    assert_eq!(controller.items(), &before[..]);
    // the write was attempted but no reload followed
    assert_eq!(store.calls(), vec!["GET /artists", "POST /artist"]);
    assert!(controller.notice().is_some());
}

#[tokio::test]
async fn non_numeric_artist_id_never_reaches_the_store() {
    let store = MockStore::with_list(vec![]);
    let mut controller = EntityListController::<Song, _>::new(store.clone());

    *controller.draft_mut() = SongDraft {
        id: Some(3),
        title: "T".into(),
        genre: "G".into(),
        duration: "180".into(),
        release_year: "1990".into(),
        artist_id: "abc".into(),
    };

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(store.calls().is_empty());
    assert!(controller.notice().is_some());
    // the in-progress edit survives for a retry
    assert_eq!(controller.draft().artist_id, "abc");
}

#[tokio::test]
async fn confirmed_delete_reloads_without_the_row() {
    let store = MockStore::with_list(vec![
        artist_json(5, "Five"),
        artist_json(7, "Seven"),
        artist_json(9, "Nine"),
    ]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());
    controller.activate().await;

    store.set_list(vec![artist_json(5, "Five"), artist_json(9, "Nine")]);
    let outcome = controller.request_delete(7, &AlwaysConfirm).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(
        store.calls(),
        vec!["GET /artists", "DELETE /artist/7", "GET /artists"]
    );
    let ids: Vec<_> = controller.items().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(5), Some(9)]);
}

#[tokio::test]
async fn declined_delete_makes_no_call() {
    let store = MockStore::with_list(vec![artist_json(5, "Five")]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());

    let outcome = controller.request_delete(5, &DeclineConfirm).await;

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn failed_delete_keeps_the_row_visible() {
    let store = MockStore::with_list(vec![artist_json(5, "Five")]);
    let mut controller = EntityListController::<Artist, _>::new(store.clone());
    controller.activate().await;

    store.fail_writes.store(true, Ordering::SeqCst);
    let outcome = controller.request_delete(5, &AlwaysConfirm).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(controller.items().len(), 1);
    assert_eq!(store.calls(), vec!["GET /artists", "DELETE /artist/5"]);
    assert!(controller.notice().is_some());
}

#[tokio::test]
async fn stale_load_response_is_discarded() {
    let store = MockStore::with_list(vec![]);
    let mut controller = EntityListController::<Artist, _>::new(store);

    let first = controller.begin_load();
    let second = controller.begin_load();

    let stale: Vec<Artist> =
        vec![serde_json::from_value(artist_json(1, "Stale")).unwrap()];
    controller.apply_load(first, Ok(stale));

    // the superseded response changed nothing
    assert_eq!(*controller.load_status(), LoadStatus::Loading);
    assert!(controller.items().is_empty());

    let fresh: Vec<Artist> =
        vec![serde_json::from_value(artist_json(2, "Fresh")).unwrap()];
    controller.apply_load(second, Ok(fresh));

    assert_eq!(*controller.load_status(), LoadStatus::Ready);
    assert_eq!(controller.items()[0].id, Some(2));
}

#[tokio::test]
async fn filter_applies_to_the_visible_view_only() {
    let store = MockStore::with_list(vec![
        artist_json(1, "Led Zeppelin"),
        artist_json(2, "Miles Davis"),
    ]);
    let mut controller = EntityListController::<Artist, _>::new(store);
    controller.activate().await;

    controller.set_filter(
        Some(tune_common::model::ArtistField::Name),
        "zeppelin",
    );

    assert_eq!(controller.visible().len(), 1);
    // the snapshot itself is untouched
    assert_eq!(controller.items().len(), 2);

    controller.set_filter(None, "");
    assert_eq!(controller.visible().len(), 2);
}

#[tokio::test]
async fn begin_edit_copies_the_in_memory_entity() {
    let store = MockStore::with_list(vec![artist_json(7, "Seven")]);
    let mut controller = EntityListController::<Artist, _>::new(store);
    controller.activate().await;

    let entity = controller.items()[0].clone();
    controller.begin_edit(&entity);

    assert_eq!(controller.draft().id(), Some(7));
    assert_eq!(controller.draft().name, "Seven");
    assert_eq!(controller.draft().debut_year, "1970");

    controller.cancel_edit();
    assert_eq!(*controller.draft(), ArtistDraft::default());
}
