//! Agent directory: a fallback id → name lookup for agent names that are
//! still corrupted after recovery.
//!
//! The directory is loaded at most once per instance. The first call to
//! [`AgentDirectory::ensure_loaded`] spawns the one fetch as its own task;
//! every concurrent or later caller waits on that same task. The fetch runs
//! to completion even if the caller that started it is cancelled. A failed
//! fetch is logged and leaves the directory empty for good: there is no
//! retry, no refresh, and no eviction. A stale name is only corrected by
//! building a new directory.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::api::ApiError;
use crate::model::Agent;
use crate::text::recover;

/// Where the directory's agents come from.
#[async_trait]
pub trait AgentSource: Send + Sync {
    /// List every agent.
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError>;
}

/// Lazily loaded, additive id → display-name map.
pub struct AgentDirectory<S> {
    shared: Arc<Shared<S>>,
    /// Taken by the caller that starts the load; `None` afterwards.
    start: Mutex<Option<watch::Sender<bool>>>,
    loaded: watch::Receiver<bool>,
}

/// State the load task writes into, outliving any one caller.
struct Shared<S> {
    source: S,
    names: RwLock<HashMap<String, String>>,
}

impl<S: AgentSource + 'static> AgentDirectory<S> {
    /// Load the directory if no load has happened yet.
    ///
    /// Single-flight: at most one fetch ever runs, and callers arriving
    /// while it's in flight wait for it. Always completes, even when the
    /// fetch fails. Cancelling a caller never cancels the fetch.
    pub async fn ensure_loaded(&self) {
        self.start_load();

        let mut loaded = self.loaded.clone();
        // Closed means the load task is gone; nothing more will arrive.
        let _ = loaded.wait_for(|done| *done).await;
    }

    fn start_load(&self) {
        let Some(done) = self
            .start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            shared.load().await;
            done.send_replace(true);
        });
    }
}

impl<S: AgentSource> Shared<S> {
    async fn load(&self) {
        match self.source.list_agents().await {
            Ok(agents) => {
                let added = self.insert_all(agents);
                log::info!("agent directory loaded with {added} names");
            }
            Err(e) => log::warn!("failed to load agent directory, continuing without it: {e}"),
        }
    }

    /// Insert recovered names, keeping whatever is already present.
    fn insert_all(&self, agents: Vec<Agent>) -> usize {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        let mut added = 0;
        for agent in agents {
            let name = recover(&agent.name);
            if agent.id.is_empty() || name.is_empty() {
                continue;
            }
            if let Entry::Vacant(slot) = names.entry(agent.id) {
                slot.insert(name);
                added += 1;
            }
        }
        added
    }
}

impl<S> AgentDirectory<S> {
    /// An empty directory that will load from `source` on first use.
    pub fn new(source: S) -> Self {
        let (done, loaded) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                source,
                names: RwLock::new(HashMap::new()),
            }),
            start: Mutex::new(Some(done)),
            loaded,
        }
    }

    /// The display name for `id`, from whatever is loaded right now.
    ///
    /// Never waits. Callers that need a populated directory should await
    /// [`AgentDirectory::ensure_loaded`] first.
    pub fn resolve(&self, id: &str) -> Option<String> {
        self.shared
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Whether the one load has completed, successfully or not.
    pub fn is_loaded(&self) -> bool {
        *self.loaded.borrow()
    }

    pub fn len(&self) -> usize {
        self.shared
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
