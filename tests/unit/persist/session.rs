use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::{Pin, pin};
use std::task::{Context, Poll, Waker};

use serde_json::json;

use super::*;
use crate::persist::store::TransportError;

#[derive(Clone)]
enum Reply {
    Found(Value),
    Missing,
    Fail(&'static str),
}

struct Gate<'a>(&'a Cell<bool>);

impl Future for Gate<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.0.get() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

struct MockStore {
    replies: HashMap<RecordKind, Reply>,
    open: Cell<bool>,
    fail_upsert: bool,
    fetches: RefCell<Vec<(RecordKind, String)>>,
    upserts: RefCell<Vec<(RecordKind, Uuid, Value)>>,
}

impl MockStore {
    fn new(template: Reply, instance: Reply) -> Self {
        Self {
            replies: HashMap::from([
                (RecordKind::Template, template),
                (RecordKind::Instance, instance),
            ]),
            open: Cell::new(true),
            fail_upsert: false,
            fetches: RefCell::new(Vec::new()),
            upserts: RefCell::new(Vec::new()),
        }
    }

    fn gated(mut self) -> Self {
        self.open = Cell::new(false);
        self
    }

    fn release(&self) {
        self.open.set(true);
    }

    fn upsert_count(&self) -> usize {
        self.upserts.borrow().len()
    }
}

impl DocumentStore for MockStore {
    async fn fetch(
        &self,
        kind: RecordKind,
        key: &LookupKey,
    ) -> Result<Option<Value>, TransportError> {
        Gate(&self.open).await;
        self.fetches.borrow_mut().push((kind, key.to_string()));
        match self.replies.get(&kind).cloned().unwrap_or(Reply::Missing) {
            Reply::Found(v) => Ok(Some(v)),
            Reply::Missing => Ok(None),
            Reply::Fail(msg) => Err(TransportError(msg.to_owned())),
        }
    }

    async fn upsert(&self, kind: RecordKind, id: Uuid, record: Value) -> Result<(), TransportError> {
        if self.fail_upsert {
            return Err(TransportError("connection reset".to_owned()));
        }
        self.upserts.borrow_mut().push((kind, id, record));
        Ok(())
    }
}

fn populated(id: Uuid, slug: &str) -> Value {
    json!({
        "id": id.to_string(),
        "slug": slug,
        "name": "Ana & Ben",
        "sections": [{"id": "s1", "elements": [
            {"id": "L1", "type": "text", "content": "Hello", "width": 100, "height": 20}
        ]}],
        "layers": []
    })
}

fn shell() -> Value {
    json!({"sections": [], "layers": []})
}

fn cfg() -> EngineConfig {
    EngineConfig::default()
}

#[test]
fn empty_shell_in_primary_falls_back_to_secondary() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Found(shell()), Reply::Found(populated(id, "ana-ben")));
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.kind, Some(RecordKind::Instance));
    assert_eq!(outcome.document.sections.len(), 1);
    assert_eq!(outcome.document.layer_count(), 1);
    assert_eq!(session.phase(), LoadPhase::Loaded);
    assert_eq!(session.store().fetches.borrow().len(), 2);
}

#[test]
fn primary_hit_skips_fallback() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Found(populated(id, "x")), Reply::Fail("unreachable"));
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.kind, Some(RecordKind::Template));
    assert_eq!(session.store().fetches.borrow().len(), 1);
}

#[test]
fn primary_error_falls_back() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Fail("timeout"), Reply::Found(populated(id, "x")));
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.kind, Some(RecordKind::Instance));
}

#[test]
fn primary_error_without_fallback_record_is_typed_failure() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Fail("timeout"), Reply::Missing);
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let err = pollster::block_on(session.load()).unwrap_err();
    match &err {
        SceneError::Store {
            table,
            key,
            attempt,
            message,
        } => {
            assert_eq!(table, "templates");
            assert_eq!(key, &id.to_string());
            assert_eq!(*attempt, StoreAttempt::Primary);
            assert_eq!(message, "timeout");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.phase(), LoadPhase::Failed);

    let saved = pollster::block_on(session.save(&Document::default())).unwrap();
    assert_eq!(saved, SaveOutcome::Refused(SaveRefusal::LoadFailed));
    assert_eq!(session.store().upsert_count(), 0);
}

#[test]
fn fallback_error_reports_fallback_attempt() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Missing, Reply::Fail("503"));
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let err = pollster::block_on(session.load()).unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(
        err,
        SceneError::Store {
            attempt: StoreAttempt::Fallback,
            ..
        }
    ));
}

#[test]
fn total_miss_creates_document_with_seeded_id() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Missing, Reply::Missing);
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert!(outcome.is_new());
    assert_eq!(outcome.document.id, id.to_string());
    assert_eq!(session.phase(), LoadPhase::New);

    let saved = pollster::block_on(session.save(&outcome.document)).unwrap();
    assert_eq!(
        saved,
        SaveOutcome::Saved {
            id,
            kind: RecordKind::Template
        }
    );
    assert_eq!(session.store().upsert_count(), 1);
}

#[test]
fn shell_only_record_is_still_loaded() {
    let store = MockStore::new(Reply::Found(shell()), Reply::Missing);
    let session = SyncSession::new(store, Some("empty-draft"), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.kind, Some(RecordKind::Template));
    assert!(outcome.document.sections.is_empty());
}

#[test]
fn uuid_lookup_reports_canonical_slug() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Found(populated(id, "our-day")), Reply::Missing);
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.canonical_slug.as_deref(), Some("our-day"));
}

#[test]
fn slug_lookup_saves_under_hydrated_id() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Missing, Reply::Found(populated(id, "ana-ben")));
    let session = SyncSession::new(store, Some("ana-ben"), &cfg());

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.canonical_slug, None);

    let saved = pollster::block_on(session.save(&outcome.document)).unwrap();
    assert_eq!(
        saved,
        SaveOutcome::Saved {
            id,
            kind: RecordKind::Instance
        }
    );
    let upserts = session.store().upserts.borrow();
    let (_, _, record) = &upserts[0];
    assert_eq!(record["id"], json!(id.to_string()));
    assert_eq!(record["slug"], json!("ana-ben"));
    assert_eq!(record["layers"], json!([]));
    assert!(record["updatedAt"].is_string());
}

#[test]
fn save_before_load_is_refused() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Found(populated(id, "x")), Reply::Missing);
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let saved = pollster::block_on(session.save(&Document::default())).unwrap();
    assert_eq!(saved, SaveOutcome::Refused(SaveRefusal::NotLoaded));
    assert_eq!(session.store().upsert_count(), 0);
}

#[test]
fn save_during_load_is_refused() {
    let id = Uuid::new_v4();
    let store =
        MockStore::new(Reply::Found(populated(id, "x")), Reply::Missing).gated();
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg());

    let mut load = pin!(session.load());
    let mut cx = Context::from_waker(Waker::noop());
    assert!(load.as_mut().poll(&mut cx).is_pending());
    assert_eq!(session.phase(), LoadPhase::InFlight);

    let saved = pollster::block_on(session.save(&Document::default())).unwrap();
    assert_eq!(saved, SaveOutcome::Refused(SaveRefusal::LoadInFlight));
    assert_eq!(session.store().upsert_count(), 0);

    session.store().release();
    let outcome = pollster::block_on(load).unwrap();
    assert_eq!(outcome.document.layer_count(), 1);
    assert_eq!(session.phase(), LoadPhase::Loaded);
}

#[test]
fn new_document_without_identifier_reuses_generated_id() {
    let store = MockStore::new(Reply::Missing, Reply::Missing);
    let session = SyncSession::new(store, None, &cfg());
    let doc = Document::new("Fresh");

    let first = pollster::block_on(session.save(&doc)).unwrap();
    let second = pollster::block_on(session.save(&doc)).unwrap();
    let (SaveOutcome::Saved { id: a, .. }, SaveOutcome::Saved { id: b, .. }) = (first, second)
    else {
        panic!("saves should succeed");
    };
    assert_eq!(a, b);
    assert_eq!(session.store().upsert_count(), 2);
}

#[test]
fn upsert_failure_is_typed() {
    let mut store = MockStore::new(Reply::Missing, Reply::Missing);
    store.fail_upsert = true;
    let session = SyncSession::new(store, None, &cfg());

    let err = pollster::block_on(session.save(&Document::new("x"))).unwrap_err();
    assert!(matches!(
        err,
        SceneError::Store {
            attempt: StoreAttempt::Save,
            ..
        }
    ));
}

#[test]
fn configured_primary_kind_is_queried_first() {
    let id = Uuid::new_v4();
    let store = MockStore::new(Reply::Found(populated(id, "t")), Reply::Found(populated(id, "i")));
    let cfg = EngineConfig {
        primary_kind: RecordKind::Instance,
        ..EngineConfig::default()
    };
    let session = SyncSession::new(store, Some(&id.to_string()), &cfg);

    let outcome = pollster::block_on(session.load()).unwrap();
    assert_eq!(outcome.kind, Some(RecordKind::Instance));
    assert_eq!(outcome.document.slug, "i");
}
