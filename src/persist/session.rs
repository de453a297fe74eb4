//! Load/save coordination against a [`DocumentStore`].
//!
//! A [`SyncSession`] is bound to the identifier the editor was opened with (a UUID, a slug,
//! or nothing for a brand-new document). Loading tries the primary record kind first and
//! falls back to the other kind. Saving is refused until the load for an existing
//! identifier has finished, so an empty just-opened document never overwrites stored data.

use std::cell::Cell;
use std::fmt;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    document::hydrate::{HydrateReport, hydrate_value, is_empty_shell},
    document::model::Document,
    foundation::config::EngineConfig,
    foundation::core::is_uuid,
    foundation::error::{SceneError, SceneResult, StoreAttempt},
    persist::store::{DocumentStore, LookupKey, RecordKind},
};

/// Progress of the session's load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// No load started.
    Idle,
    /// A load is awaiting the store.
    InFlight,
    /// A stored record was installed.
    Loaded,
    /// Nothing was stored under the identifier; an empty document was created.
    New,
    /// The last load hit a transport error.
    Failed,
}

/// Result of a successful [`SyncSession::load`].
#[derive(Clone, Debug)]
pub struct LoadOutcome {
    /// The hydrated document, or an empty one when nothing was found.
    pub document: Document,
    /// Kind the record was found in; `None` for a new document.
    pub kind: Option<RecordKind>,
    /// Advisory: the record was found by UUID and its slug differs, so the caller may
    /// rewrite the visible address to this slug.
    pub canonical_slug: Option<String>,
    /// Repairs applied while hydrating.
    pub report: HydrateReport,
}

impl LoadOutcome {
    /// Return `true` when nothing was stored and an empty document was created.
    pub fn is_new(&self) -> bool {
        self.kind.is_none()
    }
}

/// Why a save was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveRefusal {
    /// The load has not finished yet.
    LoadInFlight,
    /// The identifier names an existing document that was never loaded.
    NotLoaded,
    /// The load failed, so stored data may exist that this document does not reflect.
    LoadFailed,
}

impl fmt::Display for SaveRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadInFlight => f.write_str("load still in flight"),
            Self::NotLoaded => f.write_str("document not loaded yet"),
            Self::LoadFailed => f.write_str("previous load failed"),
        }
    }
}

/// Result of [`SyncSession::save`].
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    /// Record written.
    Saved {
        /// Primary key used for the upsert.
        id: Uuid,
        /// Kind written to.
        kind: RecordKind,
    },
    /// Guard refused the save; nothing was written.
    Refused(SaveRefusal),
}

/// Load/save session for one opened document.
pub struct SyncSession<S> {
    store: S,
    identifier: Option<String>,
    primary: RecordKind,
    phase: Cell<LoadPhase>,
    found_kind: Cell<Option<RecordKind>>,
    record_id: Cell<Option<Uuid>>,
}

impl<S: DocumentStore> SyncSession<S> {
    /// Open a session for `identifier` (UUID or slug), or for a new document when `None`.
    pub fn new(store: S, identifier: Option<&str>, cfg: &EngineConfig) -> Self {
        let identifier = identifier
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Self {
            store,
            identifier,
            primary: cfg.primary_kind,
            phase: Cell::new(LoadPhase::Idle),
            found_kind: Cell::new(None),
            record_id: Cell::new(None),
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Identifier the session was opened with.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Current load phase.
    pub fn phase(&self) -> LoadPhase {
        self.phase.get()
    }

    /// Load the document named by the identifier.
    ///
    /// Missing records are not errors: a total miss yields an empty document. Only
    /// transport failures (and records that are not JSON objects) surface as errors.
    #[tracing::instrument(skip(self), fields(identifier = ?self.identifier))]
    pub async fn load(&self) -> SceneResult<LoadOutcome> {
        self.phase.set(LoadPhase::InFlight);
        match self.load_inner().await {
            Ok(outcome) => {
                self.phase.set(if outcome.is_new() {
                    LoadPhase::New
                } else {
                    LoadPhase::Loaded
                });
                Ok(outcome)
            }
            Err(e) => {
                self.phase.set(LoadPhase::Failed);
                Err(e)
            }
        }
    }

    async fn load_inner(&self) -> SceneResult<LoadOutcome> {
        let Some(key) = self.identifier.as_deref().and_then(LookupKey::parse) else {
            tracing::info!("no identifier, starting a new document");
            return Ok(self.new_document(None));
        };

        let primary = self.primary;
        let secondary = primary.other();
        let mut shell: Option<(RecordKind, Value)> = None;

        let primary_err = match self.fetch(primary, &key, StoreAttempt::Primary).await {
            Ok(Some(record)) if !is_empty_shell(&record) => {
                return self.install(primary, &key, record);
            }
            Ok(Some(record)) => {
                tracing::debug!(
                    table = primary.table(),
                    %key,
                    "primary record is an empty shell"
                );
                shell = Some((primary, record));
                None
            }
            Ok(None) => None,
            Err(e) => Some(e),
        };

        match self.fetch(secondary, &key, StoreAttempt::Fallback).await {
            Ok(Some(record)) if !is_empty_shell(&record) => {
                return self.install(secondary, &key, record);
            }
            Ok(Some(record)) => {
                shell.get_or_insert((secondary, record));
            }
            Ok(None) => {}
            Err(e) => return Err(primary_err.unwrap_or(e)),
        }

        if let Some(e) = primary_err {
            return Err(e);
        }
        if let Some((kind, record)) = shell {
            return self.install(kind, &key, record);
        }
        tracing::info!(%key, "no record in either kind, starting a new document");
        Ok(self.new_document(Some(&key)))
    }

    async fn fetch(
        &self,
        kind: RecordKind,
        key: &LookupKey,
        attempt: StoreAttempt,
    ) -> SceneResult<Option<Value>> {
        self.store.fetch(kind, key).await.map_err(|e| {
            tracing::warn!(
                table = kind.table(),
                column = key.column(),
                %key,
                %attempt,
                error = %e,
                "store fetch failed"
            );
            SceneError::store(kind.table(), key.to_string(), attempt, e.0)
        })
    }

    fn install(
        &self,
        kind: RecordKind,
        key: &LookupKey,
        record: Value,
    ) -> SceneResult<LoadOutcome> {
        let (document, report) = hydrate_value(record)?;
        if !report.is_clean() {
            tracing::warn!(?report, "stored document needed repairs");
        }
        let canonical_slug = match key {
            LookupKey::Id(_) if !document.slug.is_empty() && !is_uuid(&document.slug) => {
                Some(document.slug.clone())
            }
            _ => None,
        };
        let hydrated_id = match key {
            LookupKey::Id(id) => Some(*id),
            LookupKey::Slug(_) => Uuid::parse_str(document.id.trim()).ok(),
        };
        self.record_id.set(hydrated_id);
        self.found_kind.set(Some(kind));
        tracing::info!(
            table = kind.table(),
            %key,
            layers = document.layer_count(),
            "document loaded"
        );
        Ok(LoadOutcome {
            document,
            kind: Some(kind),
            canonical_slug,
            report,
        })
    }

    fn new_document(&self, key: Option<&LookupKey>) -> LoadOutcome {
        let mut document = Document::default();
        match key {
            Some(LookupKey::Id(id)) => {
                document.id = id.to_string();
                self.record_id.set(Some(*id));
            }
            Some(LookupKey::Slug(slug)) => document.slug = slug.clone(),
            None => {}
        }
        self.found_kind.set(None);
        LoadOutcome {
            document,
            kind: None,
            canonical_slug: None,
            report: HydrateReport::default(),
        }
    }

    /// Persist `doc`, unless the guard refuses.
    ///
    /// The record id is the identifier when it is a UUID, else the id found on load, else the
    /// document's own id when it is a UUID, else a fresh UUID that later saves reuse. Slugs
    /// are never used as primary keys.
    #[tracing::instrument(skip(self, doc), fields(identifier = ?self.identifier))]
    pub async fn save(&self, doc: &Document) -> SceneResult<SaveOutcome> {
        if let Some(refusal) = self.refusal() {
            tracing::warn!(reason = %refusal, "save refused");
            return Ok(SaveOutcome::Refused(refusal));
        }

        let id = self.resolve_record_id(doc);
        let kind = self.found_kind.get().unwrap_or(self.primary);

        let mut record = doc.clone();
        record.id = id.to_string();
        record.updated_at = Some(Utc::now());
        let value = record.to_json_value()?;

        self.store.upsert(kind, id, value).await.map_err(|e| {
            tracing::warn!(table = kind.table(), %id, error = %e, "store upsert failed");
            SceneError::store(kind.table(), id.to_string(), StoreAttempt::Save, e.0)
        })?;

        self.record_id.set(Some(id));
        self.found_kind.set(Some(kind));
        tracing::info!(table = kind.table(), %id, "document saved");
        Ok(SaveOutcome::Saved { id, kind })
    }

    fn refusal(&self) -> Option<SaveRefusal> {
        match self.phase.get() {
            LoadPhase::InFlight => Some(SaveRefusal::LoadInFlight),
            LoadPhase::Failed => Some(SaveRefusal::LoadFailed),
            LoadPhase::Idle if self.identifier.is_some() => Some(SaveRefusal::NotLoaded),
            LoadPhase::Idle | LoadPhase::Loaded | LoadPhase::New => None,
        }
    }

    fn resolve_record_id(&self, doc: &Document) -> Uuid {
        if let Some(id) = self
            .identifier
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
        {
            return id;
        }
        if let Some(id) = self.record_id.get() {
            return id;
        }
        Uuid::parse_str(doc.id.trim()).unwrap_or_else(|_| Uuid::new_v4())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/session.rs"]
mod tests;
