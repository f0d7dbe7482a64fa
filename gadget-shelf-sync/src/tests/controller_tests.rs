use std::cell::RefCell;

use gadget_shelf_catalog::{Appearance, Collection, Item, ItemFields, default_collection};

use super::*;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FetchReply {
    Items(usize),
    Empty,
    NotFound,
    Malformed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PushReply {
    Ok,
    Unprocessable,
}

struct FakeRemote {
    fetch_reply: FetchReply,
    push_reply: PushReply,
    fetches: RefCell<Vec<String>>,
    pushes: RefCell<Vec<(Option<String>, Collection)>>,
}

impl FakeRemote {
    fn new(fetch_reply: FetchReply, push_reply: PushReply) -> Self {
        Self {
            fetch_reply,
            push_reply,
            fetches: RefCell::new(Vec::new()),
            pushes: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.fetches.borrow().len() + self.pushes.borrow().len()
    }
}

fn remote_item(id: i64) -> Item {
    Item {
        id,
        name: format!("remote {}", id),
        description: "from the document store".to_string(),
        image: String::new(),
        category: "生活用品".to_string(),
        features: vec![],
        appearances: vec![],
    }
}

impl DocumentStore for FakeRemote {
    async fn fetch_document(&self, id: &str) -> Result<Option<Collection>, SyncError> {
        self.fetches.borrow_mut().push(id.to_string());
        match self.fetch_reply {
            FetchReply::Items(n) => Ok(Some(Collection::new(
                (0..n as i64).map(|i| remote_item(100 + i)).collect(),
            ))),
            FetchReply::Empty => Ok(None),
            FetchReply::NotFound => Err(SyncError::Status {
                status: 404,
                body: "Not Found".to_string(),
            }),
            FetchReply::Malformed => Err(SyncError::MalformedDocument("bad".to_string())),
        }
    }

    async fn push_document(
        &self,
        id: Option<&str>,
        collection: &Collection,
    ) -> Result<String, SyncError> {
        self.pushes
            .borrow_mut()
            .push((id.map(str::to_string), collection.clone()));
        match self.push_reply {
            PushReply::Ok => Ok(id.unwrap_or("created-doc").to_string()),
            PushReply::Unprocessable => Err(SyncError::Status {
                status: 422,
                body: "Validation Failed".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct MemoryCache {
    items: RefCell<Option<Collection>>,
    document_id: RefCell<Option<String>>,
    corrupt: bool,
    document_id_fails: bool,
    saves: RefCell<usize>,
}

impl MemoryCache {
    fn with_items(collection: Collection) -> Self {
        Self {
            items: RefCell::new(Some(collection)),
            ..Default::default()
        }
    }

    fn with_document_id(self, id: &str) -> Self {
        *self.document_id.borrow_mut() = Some(id.to_string());
        self
    }

    fn stored(&self) -> Option<Collection> {
        self.items.borrow().clone()
    }
}

impl LocalStore for MemoryCache {
    fn save(&self, collection: &Collection) -> Result<(), SyncError> {
        *self.items.borrow_mut() = Some(collection.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Collection>, SyncError> {
        if self.corrupt {
            let source = serde_json::from_str::<Collection>("{").unwrap_err();
            return Err(SyncError::CorruptCache {
                path: "memory".to_string(),
                source,
            });
        }
        Ok(self.items.borrow().clone())
    }

    fn save_document_id(&self, id: &str) -> Result<(), SyncError> {
        if self.document_id_fails {
            return Err(SyncError::Config("disk full".to_string()));
        }
        *self.document_id.borrow_mut() = Some(id.to_string());
        Ok(())
    }

    fn load_document_id(&self) -> Result<Option<String>, SyncError> {
        Ok(self.document_id.borrow().clone())
    }

    fn clear(&self) -> Result<(), SyncError> {
        *self.items.borrow_mut() = None;
        *self.document_id.borrow_mut() = None;
        Ok(())
    }
}

fn unconfigured() -> SyncConfig {
    SyncConfig::default()
}

fn with_token() -> SyncConfig {
    SyncConfig {
        token: Some("secret".to_string()),
        ..Default::default()
    }
}

fn with_token_and_doc() -> SyncConfig {
    SyncConfig {
        document_id: Some("doc-1".to_string()),
        ..with_token()
    }
}

fn fields(name: &str) -> ItemFields {
    ItemFields {
        name: name.to_string(),
        description: "新道具".to_string(),
        image: "https://example.com/x.png".to_string(),
        category: "娱乐道具".to_string(),
        features: vec!["fun".to_string()],
        appearances: vec![Appearance::season("第3季", "第12集")],
    }
}

fn three_local_items() -> Collection {
    Collection::new((1..=3).map(|i| remote_item(i * 10)).collect())
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn startup_without_credentials_or_ids_uses_local_and_skips_network() {
    let remote = FakeRemote::new(FetchReply::Items(1), PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, unconfigured());

    let loaded = ctl.initialize().await.unwrap().clone();

    assert_eq!(loaded, three_local_items());
    assert_eq!(ctl.remote().calls(), 0);
    assert_eq!(ctl.phase(), Phase::Ready);
    assert!(ctl.current_sync_status().is_idle());
}

#[tokio::test]
async fn startup_adopts_remote_and_backs_it_up_locally() {
    let remote = FakeRemote::new(FetchReply::Items(1), PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, with_token_and_doc());

    let loaded = ctl.initialize().await.unwrap().clone();

    assert_eq!(loaded.len(), 1);
    assert_eq!(ctl.local().stored(), Some(loaded));
    assert_eq!(*ctl.remote().fetches.borrow(), vec!["doc-1".to_string()]);
    assert_eq!(
        *ctl.current_sync_status(),
        SyncStatus::success(SyncStatus::SYNCED)
    );
}

#[tokio::test]
async fn startup_reads_cached_document_id_without_credentials() {
    let remote = FakeRemote::new(FetchReply::Items(2), PushReply::Ok);
    let local = MemoryCache::default().with_document_id("cached-doc");
    let mut ctl = SyncController::new(remote, local, unconfigured());

    assert_eq!(ctl.initialize().await.unwrap().len(), 2);
    assert_eq!(*ctl.remote().fetches.borrow(), vec!["cached-doc".to_string()]);
}

#[tokio::test]
async fn configured_document_id_wins_over_cached() {
    let remote = FakeRemote::new(FetchReply::Items(1), PushReply::Ok);
    let local = MemoryCache::default().with_document_id("cached-doc");
    let mut ctl = SyncController::new(remote, local, with_token_and_doc());

    ctl.initialize().await.unwrap();
    assert_eq!(*ctl.remote().fetches.borrow(), vec!["doc-1".to_string()]);
}

#[tokio::test]
async fn startup_404_with_empty_cache_falls_back_to_defaults_without_pushing() {
    let remote = FakeRemote::new(FetchReply::NotFound, PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), with_token_and_doc());

    let loaded = ctl.initialize().await.unwrap().clone();

    assert_eq!(loaded, default_collection());
    assert_eq!(loaded.len(), 3);
    assert!(ctl.remote().pushes.borrow().is_empty());
    assert_eq!(ctl.local().stored(), None, "defaults are not persisted");
    assert!(ctl.current_sync_status().is_error);
    assert_eq!(ctl.current_sync_status().message, SyncStatus::LOAD_FAILED);
}

#[tokio::test]
async fn startup_404_prefers_local_cache() {
    let remote = FakeRemote::new(FetchReply::NotFound, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, with_token_and_doc());

    assert_eq!(*ctl.initialize().await.unwrap(), three_local_items());
}

#[tokio::test]
async fn malformed_document_falls_back_like_missing_data() {
    let remote = FakeRemote::new(FetchReply::Malformed, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, with_token_and_doc());

    assert_eq!(*ctl.initialize().await.unwrap(), three_local_items());
    assert_eq!(ctl.phase(), Phase::Ready);
}

#[tokio::test]
async fn document_without_items_falls_back_silently() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, with_token_and_doc());

    assert_eq!(*ctl.initialize().await.unwrap(), three_local_items());
    assert!(!ctl.current_sync_status().is_error);
}

#[tokio::test]
async fn corrupt_cache_uses_defaults_and_reports_error() {
    let local = MemoryCache {
        corrupt: true,
        ..Default::default()
    };
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let mut ctl = SyncController::new(remote, local, unconfigured());

    assert_eq!(*ctl.initialize().await.unwrap(), default_collection());
    assert_eq!(
        *ctl.current_sync_status(),
        SyncStatus::error(SyncStatus::CACHE_UNREADABLE)
    );
}

#[tokio::test]
async fn custom_defaults_replace_builtin_ones() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let seed = Collection::new(vec![remote_item(5)]);
    let mut ctl =
        SyncController::new(remote, MemoryCache::default(), unconfigured()).with_defaults(seed.clone());

    assert_eq!(*ctl.initialize().await.unwrap(), seed);
}

#[tokio::test]
async fn initialize_twice_is_a_full_reload() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, unconfigured());

    ctl.initialize().await.unwrap();
    ctl.apply_mutation(Mutation::Delete(10)).await.unwrap();
    assert_eq!(ctl.collection().len(), 2);

    // Someone else rewrote the cache in between
    ctl.local().save(&three_local_items()).unwrap();
    assert_eq!(*ctl.initialize().await.unwrap(), three_local_items());
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn mutation_before_initialize_is_rejected() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), unconfigured());

    let err = ctl.apply_mutation(Mutation::Delete(1)).await.unwrap_err();
    assert!(matches!(err, SyncError::NotReady));
    assert_eq!(ctl.phase(), Phase::Uninitialized);
}

#[tokio::test]
async fn mutation_without_token_saves_locally_only() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), unconfigured())
        .with_clock(|| 1_700_000_000_000);
    ctl.initialize().await.unwrap();

    let after = ctl
        .apply_mutation(Mutation::Insert(fields("如意风铃")))
        .await
        .unwrap()
        .clone();

    assert_eq!(after.len(), 4);
    assert_eq!(after.items().last().unwrap().id, 1_700_000_000_000);
    assert_eq!(ctl.local().stored(), Some(after));
    assert_eq!(ctl.remote().calls(), 0);
    assert!(!ctl.current_sync_status().is_error);
}

#[tokio::test]
async fn push_failure_still_saves_locally_and_reports_error() {
    let remote = FakeRemote::new(FetchReply::Items(1), PushReply::Unprocessable);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), with_token_and_doc());
    ctl.initialize().await.unwrap();

    let after = ctl
        .apply_mutation(Mutation::Insert(fields("穿透环")))
        .await
        .unwrap()
        .clone();

    assert_eq!(after.len(), 2);
    assert_eq!(ctl.local().stored(), Some(after));
    assert_eq!(
        *ctl.current_sync_status(),
        SyncStatus::error(SyncStatus::PUSH_FAILED)
    );
}

#[tokio::test]
async fn push_success_updates_same_document_and_backs_up() {
    let remote = FakeRemote::new(FetchReply::Items(1), PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), with_token_and_doc());
    ctl.initialize().await.unwrap();

    let after = ctl.apply_mutation(Mutation::Delete(100)).await.unwrap().clone();

    assert!(after.is_empty());
    let pushes = ctl.remote().pushes.borrow();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].0.as_deref(), Some("doc-1"));
    assert_eq!(pushes[0].1, after);
    assert_eq!(ctl.local().stored(), Some(after.clone()));
    assert_eq!(*ctl.local().document_id.borrow(), None);
    assert_eq!(
        *ctl.current_sync_status(),
        SyncStatus::success(SyncStatus::SYNCED)
    );
}

#[tokio::test]
async fn first_push_creates_document_and_remembers_its_id() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), with_token());
    ctl.initialize().await.unwrap();
    assert_eq!(ctl.remote().calls(), 0, "no id known yet, nothing to fetch");

    ctl.apply_mutation(Mutation::Insert(fields("a"))).await.unwrap();
    ctl.apply_mutation(Mutation::Insert(fields("b"))).await.unwrap();

    let pushes = ctl.remote().pushes.borrow();
    assert_eq!(pushes[0].0, None);
    assert_eq!(pushes[1].0.as_deref(), Some("created-doc"));
    assert_eq!(
        ctl.local().document_id.borrow().as_deref(),
        Some("created-doc")
    );
}

#[tokio::test]
async fn created_document_is_backed_up_even_if_its_id_cannot_be_saved() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache {
        document_id_fails: true,
        ..Default::default()
    };
    let mut ctl = SyncController::new(remote, local, with_token());
    ctl.initialize().await.unwrap();

    let after = ctl
        .apply_mutation(Mutation::Insert(fields("a")))
        .await
        .unwrap()
        .clone();

    assert_eq!(ctl.remote().pushes.borrow().len(), 1);
    assert_eq!(ctl.local().stored(), Some(after));
    assert_eq!(ctl.local().document_id.borrow().as_deref(), None);
    assert_eq!(
        *ctl.current_sync_status(),
        SyncStatus::success(SyncStatus::SYNCED)
    );
}

#[tokio::test]
async fn update_keeps_position_and_persists() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, unconfigured());
    ctl.initialize().await.unwrap();

    let after = ctl
        .apply_mutation(Mutation::Update {
            id: 20,
            fields: fields("改良版"),
        })
        .await
        .unwrap()
        .clone();

    assert_eq!(after.len(), 3);
    assert_eq!(after.position(20), Some(1));
    assert_eq!(after.get(20).unwrap().name, "改良版");
    assert_eq!(ctl.local().stored(), Some(after));
}

#[tokio::test]
async fn update_of_missing_item_fails_and_persists_nothing() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, with_token());
    ctl.initialize().await.unwrap();
    let saves_before = *ctl.local().saves.borrow();

    let err = ctl
        .apply_mutation(Mutation::Update {
            id: 999,
            fields: fields("ghost"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::ItemNotFound(999)));
    assert_eq!(*ctl.collection(), three_local_items());
    assert_eq!(*ctl.local().saves.borrow(), saves_before);
    assert!(ctl.remote().pushes.borrow().is_empty());
}

#[tokio::test]
async fn delete_of_missing_item_is_a_noop_that_still_saves() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, unconfigured());
    ctl.initialize().await.unwrap();

    let after = ctl.apply_mutation(Mutation::Delete(999)).await.unwrap().clone();
    assert_eq!(after, three_local_items());
}

#[tokio::test]
async fn insert_then_delete_round_trips() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, unconfigured());
    ctl.initialize().await.unwrap();

    ctl.apply_mutation(Mutation::Insert(fields("tmp"))).await.unwrap();
    let new_id = ctl.collection().items().last().unwrap().id;
    let after = ctl.apply_mutation(Mutation::Delete(new_id)).await.unwrap();
    assert_eq!(*after, three_local_items());
}

// ============================================================================
// Edit slot
// ============================================================================

#[tokio::test]
async fn second_edit_is_rejected_while_one_is_open() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let local = MemoryCache::with_items(three_local_items());
    let mut ctl = SyncController::new(remote, local, unconfigured());
    ctl.initialize().await.unwrap();

    ctl.begin_edit(EditTarget::Existing(10)).unwrap();
    let err = ctl.begin_edit(EditTarget::New).unwrap_err();
    assert!(matches!(err, SyncError::EditInProgress(ref open) if open == "10"));

    ctl.apply_mutation(Mutation::Update {
        id: 10,
        fields: fields("done"),
    })
    .await
    .unwrap();
    assert_eq!(ctl.pending_edit(), None);
    ctl.begin_edit(EditTarget::New).unwrap();
}

#[tokio::test]
async fn cancel_edit_frees_the_slot() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), unconfigured());
    ctl.initialize().await.unwrap();

    ctl.begin_edit(EditTarget::New).unwrap();
    ctl.cancel_edit();
    assert_eq!(ctl.pending_edit(), None);
    ctl.begin_edit(EditTarget::Existing(1)).unwrap();
}

#[tokio::test]
async fn editing_unknown_item_or_before_ready_fails() {
    let remote = FakeRemote::new(FetchReply::Empty, PushReply::Ok);
    let mut ctl = SyncController::new(remote, MemoryCache::default(), unconfigured());
    assert!(matches!(
        ctl.begin_edit(EditTarget::New).unwrap_err(),
        SyncError::NotReady
    ));

    ctl.initialize().await.unwrap();
    assert!(matches!(
        ctl.begin_edit(EditTarget::Existing(404)).unwrap_err(),
        SyncError::ItemNotFound(404)
    ));
}
