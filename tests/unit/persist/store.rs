use serde_json::json;

use super::*;

#[test]
fn kinds_swap_and_name_tables() {
    assert_eq!(RecordKind::Template.other(), RecordKind::Instance);
    assert_eq!(RecordKind::Instance.other(), RecordKind::Template);
    assert_eq!(RecordKind::Instance.table(), "instances");
    assert_eq!(
        serde_json::to_value(RecordKind::Instance).unwrap(),
        json!("instance")
    );
}

#[test]
fn lookup_key_classifies_identifiers() {
    let id = Uuid::new_v4();
    assert_eq!(LookupKey::parse(&id.to_string()), Some(LookupKey::Id(id)));
    assert_eq!(
        LookupKey::parse(" ana-and-ben "),
        Some(LookupKey::Slug("ana-and-ben".to_owned()))
    );
    assert_eq!(LookupKey::parse("   "), None);
    assert_eq!(LookupKey::Slug("x".to_owned()).column(), "slug");
}

#[test]
fn memory_store_fetches_by_id_and_slug() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    store.insert(
        RecordKind::Template,
        id,
        json!({"id": id.to_string(), "slug": "garden"}),
    );

    let by_id = pollster::block_on(store.fetch(RecordKind::Template, &LookupKey::Id(id))).unwrap();
    assert!(by_id.is_some());
    let by_slug = pollster::block_on(
        store.fetch(RecordKind::Template, &LookupKey::Slug("garden".to_owned())),
    )
    .unwrap();
    assert!(by_slug.is_some());
    let other_kind =
        pollster::block_on(store.fetch(RecordKind::Instance, &LookupKey::Id(id))).unwrap();
    assert!(other_kind.is_none());
}

#[test]
fn memory_store_counts_upserts() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    pollster::block_on(store.upsert(RecordKind::Instance, id, json!({"id": id.to_string()})))
        .unwrap();
    assert_eq!(store.upsert_count(), 1);
    assert!(store.get(RecordKind::Instance, id).is_some());
}
