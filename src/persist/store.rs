use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use uuid::Uuid;

/// Record kind of the remote store. Both kinds share one schema.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Reusable designs.
    #[default]
    Template,
    /// Documents owned by an end user.
    Instance,
}

impl RecordKind {
    /// The kind queried when this one misses.
    pub fn other(self) -> Self {
        match self {
            Self::Template => Self::Instance,
            Self::Instance => Self::Template,
        }
    }

    /// Table name used in diagnostics.
    pub fn table(self) -> &'static str {
        match self {
            Self::Template => "templates",
            Self::Instance => "instances",
        }
    }
}

/// How a record is looked up.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// Primary-key lookup.
    Id(Uuid),
    /// Human-readable slug lookup.
    Slug(String),
}

impl LookupKey {
    /// Classify an identifier as a UUID or a slug. Blank identifiers yield `None`.
    pub fn parse(identifier: &str) -> Option<Self> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match Uuid::parse_str(trimmed) {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Slug(trimmed.to_owned()),
        })
    }

    /// Column the key is matched against.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Slug(_) => "slug",
        }
    }

    fn matches(&self, record: &Value) -> bool {
        let field = record.get(self.column()).and_then(Value::as_str);
        match self {
            Self::Id(id) => field.and_then(|s| Uuid::parse_str(s).ok()) == Some(*id),
            Self::Slug(slug) => field == Some(slug.as_str()),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

/// Failure reported by a store transport.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Remote document store with get-by-key and upsert-by-id over two record kinds.
///
/// Calls run on the single-threaded UI executor, so implementations take `&self` and
/// futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Fetch one raw record; `Ok(None)` when nothing matches.
    async fn fetch(
        &self,
        kind: RecordKind,
        key: &LookupKey,
    ) -> Result<Option<Value>, TransportError>;

    /// Insert or replace the record with primary key `id`.
    async fn upsert(&self, kind: RecordKind, id: Uuid, record: Value) -> Result<(), TransportError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    async fn fetch(
        &self,
        kind: RecordKind,
        key: &LookupKey,
    ) -> Result<Option<Value>, TransportError> {
        (**self).fetch(kind, key).await
    }

    async fn upsert(&self, kind: RecordKind, id: Uuid, record: Value) -> Result<(), TransportError> {
        (**self).upsert(kind, id, record).await
    }
}

/// In-process store keeping raw JSON records per kind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<(RecordKind, Uuid), Value>>,
    upserts: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record, bypassing the upsert counter.
    pub fn insert(&self, kind: RecordKind, id: Uuid, record: Value) {
        self.records.borrow_mut().insert((kind, id), record);
    }

    /// Raw record by id.
    pub fn get(&self, kind: RecordKind, id: Uuid) -> Option<Value> {
        self.records.borrow().get(&(kind, id)).cloned()
    }

    /// Number of upserts received.
    pub fn upsert_count(&self) -> usize {
        self.upserts.get()
    }
}

impl DocumentStore for MemoryStore {
    async fn fetch(
        &self,
        kind: RecordKind,
        key: &LookupKey,
    ) -> Result<Option<Value>, TransportError> {
        let records = self.records.borrow();
        let found = match key {
            LookupKey::Id(id) => records.get(&(kind, *id)).cloned(),
            LookupKey::Slug(_) => records
                .iter()
                .find(|((k, _), v)| *k == kind && key.matches(v))
                .map(|(_, v)| v.clone()),
        };
        Ok(found)
    }

    async fn upsert(&self, kind: RecordKind, id: Uuid, record: Value) -> Result<(), TransportError> {
        self.upserts.set(self.upserts.get() + 1);
        self.records.borrow_mut().insert((kind, id), record);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
