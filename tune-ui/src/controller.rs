//! Entity list controller
//!
//! One controller instance is the single source of truth for what the user
//! currently sees on one catalog screen: the full-list snapshot, the load
//! lifecycle, the active filter, and the add/edit/delete workflow. The
//! controller is generic over the entity kind; Artists, Albums, and Songs
//! all run the same state machine.
//!
//! Consistency policy: full reload after every successful write. The
//! snapshot is never patched in place, so after any mutation it reflects
//! server state at the cost of one extra round trip. Swapping in
//! incremental patching later only needs to change `reload`; the external
//! contract stays the same.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tune_common::{Error, Result};

use crate::filter;
use crate::form::{Editable, EntityDraft};
use crate::store::RemoteStore;

/// How long a transient error message stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// List-load lifecycle.
///
/// A failed load is terminal until the controller is activated again;
/// there are no automatic retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Which path a submit took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Write accepted and the list reloaded
    Saved,
    /// Validation or parse failure; the store was never called
    Invalid,
    /// The store rejected the write; draft and items untouched
    Failed,
}

/// Which path a delete took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// User declined the confirmation; no call was made
    Cancelled,
    Failed,
}

/// Blocking yes/no confirmation seam for deletes
pub trait ConfirmDelete {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Unconditional confirmation, for `--yes` flags and tests
pub struct AlwaysConfirm;

impl ConfirmDelete for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Handle for one list fetch; a stale ticket is silently discarded when a
/// newer load has superseded it
#[derive(Debug)]
pub struct LoadTicket(u64);

/// Transient, auto-expiring user-visible message
struct Notice {
    text: String,
    raised: Instant,
}

impl Notice {
    fn expired(&self) -> bool {
        self.raised.elapsed() >= NOTICE_TTL
    }
}

/// List/filter/CRUD state machine for one entity kind
pub struct EntityListController<E: Editable, S: RemoteStore> {
    store: Arc<S>,
    items: Vec<E>,
    load_status: LoadStatus,
    notice: Option<Notice>,
    filter_field: Option<E::Field>,
    query_text: String,
    draft: E::Draft,
    load_seq: u64,
    write_pending: bool,
}

impl<E: Editable, S: RemoteStore> EntityListController<E, S> {
    pub fn new(store: Arc<S>) -> Self {
        EntityListController {
            store,
            items: Vec::new(),
            load_status: LoadStatus::Loading,
            notice: None,
            filter_field: None,
            query_text: String::new(),
            draft: E::Draft::default(),
            load_seq: 0,
            write_pending: false,
        }
    }

    // ========================================
    // List-load lifecycle
    // ========================================

    /// Load the full list from the store
    pub async fn activate(&mut self) {
        let ticket = self.begin_load();
        let result = self.fetch_list().await;
        self.apply_load(ticket, result);
    }

    /// Start a new load, superseding any earlier in-flight one
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.load_status = LoadStatus::Loading;
        LoadTicket(self.load_seq)
    }

    /// Apply a finished load. A response for anything but the most recent
    /// ticket arrives too late and is discarded without touching state.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<E>>) {
        if ticket.0 != self.load_seq {
            tracing::debug!(
                kind = E::KIND.label(),
                stale = ticket.0,
                current = self.load_seq,
                "Discarding stale list response"
            );
            return;
        }

        match result {
            Ok(items) => {
                tracing::debug!(kind = E::KIND.label(), count = items.len(), "List loaded");
                self.items = items;
                self.load_status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(kind = E::KIND.label(), error = %e, "List load failed");
                self.load_status =
                    LoadStatus::Failed(format!("Error fetching {}s", E::KIND.label()));
            }
        }
    }

    async fn fetch_list(&self) -> Result<Vec<E>> {
        let raw = self.store.list(E::KIND).await?;
        raw.into_iter()
            .map(|v| serde_json::from_value(v).map_err(|e| Error::Parse(e.to_string())))
            .collect()
    }

    // ========================================
    // Filtering
    // ========================================

    /// Pure state update; no I/O
    pub fn set_filter(&mut self, field: Option<E::Field>, query: impl Into<String>) {
        self.filter_field = field;
        self.query_text = query.into();
    }

    /// The filtered view of the snapshot, in server order
    pub fn visible(&self) -> Vec<&E> {
        self.items
            .iter()
            .filter(|e| filter::matches(*e, self.filter_field, &self.query_text))
            .collect()
    }

    // ========================================
    // Draft workflow
    // ========================================

    /// Copy an in-memory entity into the draft for editing. No fetch:
    /// concurrent server-side changes show up only after the next reload.
    pub fn begin_edit(&mut self, entity: &E) {
        self.draft.populate(entity);
    }

    /// Reset the draft to the empty, unsaved state; no I/O
    pub fn cancel_edit(&mut self) {
        self.draft.clear();
    }

    /// Create (draft id `None`) or update (draft id set), then reload.
    ///
    /// Validation and parse failures never reach the store. A rejected
    /// write leaves both draft and items untouched so the user can retry.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.write_pending {
            tracing::warn!(kind = E::KIND.label(), "Submit ignored: write already pending");
            return SubmitOutcome::Failed;
        }

        if !self.draft.missing_fields().is_empty() {
            self.raise_notice("Please fill all fields");
            return SubmitOutcome::Invalid;
        }

        let entity = match self.draft.to_entity() {
            Ok(entity) => entity,
            Err(e) => {
                self.raise_notice(e.to_string());
                return SubmitOutcome::Invalid;
            }
        };

        let body = match serde_json::to_value(&entity) {
            Ok(body) => body,
            Err(e) => {
                self.raise_notice(e.to_string());
                return SubmitOutcome::Invalid;
            }
        };

        self.write_pending = true;
        let write = match self.draft.id() {
            None => self.store.create(E::KIND, body).await.map(|created| {
                tracing::info!(
                    kind = E::KIND.label(),
                    id = ?created.get("id"),
                    "Created"
                );
            }),
            Some(id) => self.store.update(E::KIND, id, body).await,
        };
        self.write_pending = false;

        match write {
            Ok(()) => {
                self.reload().await;
                self.draft.clear();
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(kind = E::KIND.label(), error = %e, "Write failed");
                self.raise_notice(format!(
                    "Failed to save {}. Please try again.",
                    E::KIND.label()
                ));
                SubmitOutcome::Failed
            }
        }
    }

    /// Confirm, delete, reload. A declined confirmation makes no call; a
    /// rejected delete leaves the row visible, signaling it did not take
    /// effect.
    pub async fn request_delete(&mut self, id: i64, confirm: &dyn ConfirmDelete) -> DeleteOutcome {
        let prompt = format!("Are you sure you want to delete this {}?", E::KIND.label());
        if !confirm.confirm(&prompt) {
            return DeleteOutcome::Cancelled;
        }

        if self.write_pending {
            tracing::warn!(kind = E::KIND.label(), "Delete ignored: write already pending");
            return DeleteOutcome::Failed;
        }

        self.write_pending = true;
        let result = self.store.delete(E::KIND, id).await;
        self.write_pending = false;

        match result {
            Ok(()) => {
                self.reload().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(kind = E::KIND.label(), id, error = %e, "Delete failed");
                self.raise_notice(format!(
                    "Failed to delete {}. Please try again.",
                    E::KIND.label()
                ));
                DeleteOutcome::Failed
            }
        }
    }

    /// Full reload after a successful write; the displayed list is always
    /// the server's, never client-synthesized
    async fn reload(&mut self) {
        let ticket = self.begin_load();
        let result = self.fetch_list().await;
        self.apply_load(ticket, result);
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut E::Draft {
        &mut self.draft
    }

    pub fn filter_field(&self) -> Option<E::Field> {
        self.filter_field
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Current transient message, if it has not expired yet
    pub fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| !n.expired())
            .map(|n| n.text.as_str())
    }

    fn raise_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            raised: Instant::now(),
        });
    }
}
