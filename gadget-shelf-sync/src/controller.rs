//! Session state: where the collection comes from at startup and where each
//! new version goes after a mutation.
//!
//! Startup reads the remote document first and falls back to the local cache,
//! then to the built-in defaults. Every mutation is pushed to the remote (when
//! a write token is configured) and always written to the local cache. The
//! two sources are never merged: whichever wins replaces the collection.
//!
//! A successful push followed by a failed local save leaves the cache one
//! version behind the remote until the next save; that window is accepted.

use gadget_shelf_catalog::{Collection, ItemFields, ItemId, default_collection};

use crate::cache::LocalStore;
use crate::client::DocumentStore;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::status::SyncStatus;

/// Lifecycle of a controller within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// A change requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert(ItemFields),
    Update { id: ItemId, fields: ItemFields },
    Delete(ItemId),
}

/// What the single open edit form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(ItemId),
}

impl std::fmt::Display for EditTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new item"),
            Self::Existing(id) => write!(f, "{}", id),
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Owns the in-memory collection and persists every new version of it.
pub struct SyncController<R, L> {
    remote: R,
    local: L,
    config: SyncConfig,
    collection: Collection,
    defaults: Collection,
    phase: Phase,
    status: SyncStatus,
    pending_edit: Option<EditTarget>,
    clock: fn() -> i64,
}

impl<R: DocumentStore, L: LocalStore> SyncController<R, L> {
    pub fn new(remote: R, local: L, config: SyncConfig) -> Self {
        let defaults = default_collection();
        Self {
            remote,
            local,
            config,
            collection: defaults.clone(),
            defaults,
            phase: Phase::Uninitialized,
            status: SyncStatus::idle(),
            pending_edit: None,
            clock: now_millis,
        }
    }

    /// Use `defaults` instead of the built-in starter items when neither the
    /// remote nor the cache has data.
    pub fn with_defaults(mut self, defaults: Collection) -> Self {
        if self.phase == Phase::Uninitialized {
            self.collection = defaults.clone();
        }
        self.defaults = defaults;
        self
    }

    /// Millisecond clock used for new item ids.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_sync_status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    /// Document id to read or update: configured id first, then the cached one.
    pub fn document_id(&self) -> Option<String> {
        if let Some(id) = &self.config.document_id {
            return Some(id.clone());
        }
        match self.local.load_document_id() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Could not read cached document id: {}", e);
                None
            }
        }
    }

    /// Decide the session's starting collection. Safe to call again: each
    /// call is a full reload.
    pub async fn initialize(&mut self) -> Result<&Collection, SyncError> {
        self.phase = Phase::Loading;
        self.status = SyncStatus::idle();
        self.pending_edit = None;

        let fetched = match self.document_id() {
            None => {
                log::debug!("No document id configured or cached; skipping remote load");
                None
            }
            Some(id) => match self.remote.fetch_document(&id).await {
                Ok(Some(collection)) => Some(collection),
                Ok(None) => {
                    log::info!("Document {} has no usable items; using local data", id);
                    None
                }
                Err(e) => {
                    log::warn!("Remote load of {} failed: {}", id, e);
                    self.status = SyncStatus::error(SyncStatus::LOAD_FAILED);
                    None
                }
            },
        };

        match fetched {
            Some(collection) => {
                log::info!("Loaded {} items from remote", collection.len());
                self.local.save(&collection)?;
                self.collection = collection;
                self.status = SyncStatus::success(SyncStatus::SYNCED);
            }
            None => self.load_local()?,
        }

        self.phase = Phase::Ready;
        Ok(&self.collection)
    }

    fn load_local(&mut self) -> Result<(), SyncError> {
        match self.local.load() {
            Ok(Some(collection)) => {
                log::debug!("Loaded {} items from local cache", collection.len());
                self.collection = collection;
            }
            Ok(None) => {
                // Not persisted: a remote that is only unreachable must not be
                // overwritten with the defaults.
                log::debug!("Local cache empty; using default items");
                self.collection = self.defaults.clone();
            }
            Err(e @ SyncError::CorruptCache { .. }) => {
                log::warn!("{}", e);
                self.collection = self.defaults.clone();
                self.status = SyncStatus::error(SyncStatus::CACHE_UNREADABLE);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Open the edit slot. Only one add/edit form may be open at a time.
    pub fn begin_edit(&mut self, target: EditTarget) -> Result<(), SyncError> {
        if self.phase != Phase::Ready {
            return Err(SyncError::NotReady);
        }
        if let Some(open) = self.pending_edit {
            return Err(SyncError::EditInProgress(open.to_string()));
        }
        if let EditTarget::Existing(id) = target {
            if self.collection.get(id).is_none() {
                return Err(SyncError::ItemNotFound(id));
            }
        }
        self.pending_edit = Some(target);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.pending_edit = None;
    }

    pub fn pending_edit(&self) -> Option<EditTarget> {
        self.pending_edit
    }

    /// Apply `mutation` and persist the result. Remote failures only change
    /// the sync status; `Err` means the mutation itself was invalid or the
    /// local cache could not be written.
    pub async fn apply_mutation(&mut self, mutation: Mutation) -> Result<&Collection, SyncError> {
        if self.phase != Phase::Ready {
            return Err(SyncError::NotReady);
        }

        let next = match mutation {
            Mutation::Insert(fields) => {
                let (next, item) = self.collection.insert(fields, (self.clock)());
                log::debug!("Inserted item {} ({})", item.id, item.name);
                next
            }
            Mutation::Update { id, fields } => self.collection.update(id, fields)?,
            Mutation::Delete(id) => self.collection.remove(id),
        };

        self.pending_edit = None;
        self.collection = next;
        self.persist().await?;
        Ok(&self.collection)
    }

    async fn persist(&mut self) -> Result<(), SyncError> {
        if !self.config.can_push() {
            log::debug!("No write token configured; saving locally only");
            return self.local.save(&self.collection);
        }

        let id = self.document_id();
        match self.remote.push_document(id.as_deref(), &self.collection).await {
            Ok(pushed_id) => {
                self.status = SyncStatus::success(SyncStatus::SYNCED);
                if id.as_deref() != Some(pushed_id.as_str()) {
                    log::info!("Created document {}", pushed_id);
                    // Not fatal: the snapshot save below must still run.
                    if let Err(e) = self.local.save_document_id(&pushed_id) {
                        log::warn!("Could not remember document id {}: {}", pushed_id, e);
                    }
                }
            }
            Err(e) => {
                log::warn!("Remote save failed: {}", e);
                self.status = SyncStatus::error(SyncStatus::PUSH_FAILED);
            }
        }

        self.local.save(&self.collection)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
