//! The save lifecycle: load with fallback, debounced autosave, forced
//! manual save, coalescing, and the observable status.
//!
//! Mutations are synchronous and touch only the in-memory document; the
//! UI never waits on the network to see its own edit. Each accepted
//! mutation re-arms a debounce timer, and only the latest document is
//! ever scheduled for persistence. Saves are serialized through a gate:
//! a request arriving while a write is in flight waits for it, then
//! re-evaluates whether there is anything left to persist.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::{AdaIndividual, DefaultNotes, Gender, Group, HousingDocument, Room};
use crate::mutations::{self, MutationError};
use crate::store::{DocumentStore, StoreError};

use super::status::{SaveState, SyncStatus};

/// Quiet period between the last mutation and the autosave dispatch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

/// Owns the document and its save lifecycle.
///
/// Cheap to clone; clones share the same document and scheduler. Must
/// live inside a Tokio runtime (mutations spawn the debounce timer).
pub struct SyncEngine<S: DocumentStore + 'static> {
    inner: Arc<Inner<S>>,
}

impl<S: DocumentStore + 'static> Clone for SyncEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S> {
    store: S,
    debounce: Duration,
    document: Mutex<HousingDocument>,
    /// Bumped on every accepted mutation.
    generation: AtomicU64,
    /// Generation captured by the last successful save.
    saved_generation: AtomicU64,
    /// Bumped whenever the debounce timer is re-armed or superseded; a
    /// timer whose epoch no longer matches wakes and does nothing, so a
    /// stale timer never dispatches an outdated save.
    timer_epoch: AtomicU64,
    /// Serializes save dispatches.
    save_gate: tokio::sync::Mutex<()>,
    status_tx: watch::Sender<SyncStatus>,
}

impl<S: DocumentStore + 'static> SyncEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_debounce(store, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(store: S, debounce: Duration) -> Self {
        let (status_tx, _) = watch::channel(SyncStatus::default());
        Self {
            inner: Arc::new(Inner {
                store,
                debounce,
                document: Mutex::new(HousingDocument::default_skeleton()),
                generation: AtomicU64::new(0),
                saved_generation: AtomicU64::new(0),
                timer_epoch: AtomicU64::new(0),
                save_gate: tokio::sync::Mutex::new(()),
                status_tx,
            }),
        }
    }

    /// Fetch the document from the store, falling back to the default
    /// skeleton on any failure so the caller always has a document.
    /// The loaded document is treated as clean.
    pub async fn load(&self) {
        let document = match self.inner.store.load().await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "load failed, falling back to default skeleton");
                HousingDocument::default_skeleton()
            }
        };

        // Cancel any timer armed before the load finished.
        self.inner.timer_epoch.fetch_add(1, Ordering::SeqCst);
        *self.inner.document.lock() = document;
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.saved_generation.store(generation, Ordering::SeqCst);
        self.inner.status_tx.send_replace(SyncStatus::default());
    }

    /// Snapshot of the current document.
    pub fn document(&self) -> HousingDocument {
        self.inner.document.lock().clone()
    }

    /// Current save status.
    pub fn status(&self) -> SyncStatus {
        self.inner.status_tx.borrow().clone()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Apply a pure transform to the document and schedule an autosave.
    ///
    /// On error the document is unchanged and nothing is scheduled.
    pub fn apply<F>(&self, mutate: F) -> Result<(), MutationError>
    where
        F: FnOnce(&HousingDocument) -> Result<HousingDocument, MutationError>,
    {
        {
            let mut doc = self.inner.document.lock();
            let next = mutate(&doc)?;
            *doc = next;
        }
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner
            .status_tx
            .send_modify(|s| s.state = SaveState::Pending);
        self.arm_timer();
        Ok(())
    }

    /// Save immediately, bypassing the debounce window. Writes even if
    /// the document is clean, and returns the outcome to the caller.
    pub async fn save_now(&self) -> Result<(), StoreError> {
        // A manual save supersedes any pending timer.
        self.inner.timer_epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.save(true).await
    }

    fn arm_timer(&self) {
        let epoch = self.inner.timer_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if inner.timer_epoch.load(Ordering::SeqCst) != epoch {
                // Superseded by a later mutation, load, or manual save.
                return;
            }
            // Autosave outcome is reported through status only.
            let _ = inner.save(false).await;
        });
    }

    // --- mutation catalogue -------------------------------------------------

    pub fn add_group(&self, group: Group) -> Result<(), MutationError> {
        self.apply(|doc| mutations::add_group(doc, group))
    }

    pub fn update_group(&self, group: Group) -> Result<(), MutationError> {
        self.apply(|doc| mutations::update_group(doc, group))
    }

    pub fn delete_group(&self, group_id: &str) -> Result<(), MutationError> {
        self.apply(|doc| mutations::delete_group(doc, group_id))
    }

    pub fn add_room(&self, room: Room) -> Result<(), MutationError> {
        self.apply(|doc| mutations::add_room(doc, room))
    }

    pub fn update_room(&self, key: &str, room: Room) -> Result<(), MutationError> {
        self.apply(|doc| mutations::update_room(doc, key, room))
    }

    pub fn delete_room(&self, key: &str) -> Result<(), MutationError> {
        self.apply(|doc| mutations::delete_room(doc, key))
    }

    pub fn set_housing_assignment(
        &self,
        group_id: &str,
        gender: Gender,
        room_keys: Vec<String>,
    ) -> Result<(), MutationError> {
        self.apply(|doc| mutations::set_housing_assignment(doc, group_id, gender, room_keys))
    }

    pub fn toggle_housing_assignment(
        &self,
        group_id: &str,
        gender: Gender,
        room_key: &str,
    ) -> Result<(), MutationError> {
        self.apply(|doc| mutations::toggle_housing_assignment(doc, group_id, gender, room_key))
    }

    pub fn set_small_group_assignment(
        &self,
        group_id: &str,
        room_keys: Vec<String>,
    ) -> Result<(), MutationError> {
        self.apply(|doc| mutations::set_small_group_assignment(doc, group_id, room_keys))
    }

    pub fn toggle_small_group_assignment(
        &self,
        group_id: &str,
        room_key: &str,
    ) -> Result<(), MutationError> {
        self.apply(|doc| mutations::toggle_small_group_assignment(doc, group_id, room_key))
    }

    pub fn set_meal_color(&self, group_id: &str, color: &str) -> Result<(), MutationError> {
        self.apply(|doc| mutations::set_meal_color(doc, group_id, color))
    }

    pub fn set_default_notes(&self, notes: DefaultNotes) -> Result<(), MutationError> {
        self.apply(|doc| mutations::set_default_notes(doc, notes))
    }

    pub fn set_group_note(
        &self,
        group_id: &str,
        note: impl Into<String>,
    ) -> Result<(), MutationError> {
        let note = note.into();
        self.apply(|doc| mutations::set_group_note(doc, group_id, note))
    }

    pub fn add_ada_individual(&self, individual: AdaIndividual) -> Result<(), MutationError> {
        self.apply(|doc| mutations::add_ada_individual(doc, individual))
    }

    pub fn remove_ada_individual(&self, index: usize) -> Result<(), MutationError> {
        self.apply(|doc| mutations::remove_ada_individual(doc, index))
    }
}

impl<S: DocumentStore + 'static> Inner<S> {
    async fn save(&self, force: bool) -> Result<(), StoreError> {
        let _gate = self.save_gate.lock().await;

        let generation = self.generation.load(Ordering::SeqCst);
        if !force && generation == self.saved_generation.load(Ordering::SeqCst) {
            // A save that finished while we waited already covered this
            // state; nothing left to persist.
            return Ok(());
        }

        self.status_tx
            .send_modify(|s| s.state = SaveState::Saving);
        let snapshot = self.document.lock().clone();

        let result = match self.store.current_version_token().await {
            Ok(token) => self.store.write(&snapshot, token.as_deref()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => {
                self.saved_generation.store(generation, Ordering::SeqCst);
                let still_current = self.generation.load(Ordering::SeqCst) == generation;
                self.status_tx.send_modify(|s| {
                    // Mutations that landed mid-write re-armed the timer;
                    // their save is still pending.
                    s.state = if still_current {
                        SaveState::Idle
                    } else {
                        SaveState::Pending
                    };
                    s.last_saved_at = Some(Utc::now());
                    s.last_error = None;
                });
                debug!("document revision saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.status_tx.send_modify(|s| {
                    s.state = SaveState::Error;
                    s.last_error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }
}
