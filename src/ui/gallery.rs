use super::notify::{Notice, Notifier};
use crate::media::{Kind, MediaItem, MediaStoreClient};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Tells the gallery of `kind` that its collection changed on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSignal {
    pub kind: Kind,
}

pub type RefreshSender = mpsc::UnboundedSender<RefreshSignal>;
pub type RefreshReceiver = mpsc::UnboundedReceiver<RefreshSignal>;

/// What the gallery region should show.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryView {
    Loading,
    Empty,
    Items(Vec<MediaItem>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was started while this one was in flight.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Failed,
}

struct State {
    kind: Kind,
    generation: u64,
    loading: bool,
    items: Vec<MediaItem>,
    /// Ids deleted while fetch `generation` was in flight, as (generation, id)
    removed: Vec<(u64, i64)>,
}

/// Holds the collection of one kind and keeps it in step with the endpoint.
pub struct GalleryViewModel {
    client: MediaStoreClient,
    notifier: Arc<dyn Notifier>,
    state: Mutex<State>,
}

impl GalleryViewModel {
    pub fn new(kind: Kind, client: MediaStoreClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            state: Mutex::new(State {
                kind,
                generation: 0,
                loading: true,
                items: Vec::new(),
                removed: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn kind(&self) -> Kind {
        self.state().kind
    }

    pub fn view(&self) -> GalleryView {
        let state = self.state();
        if state.loading {
            GalleryView::Loading
        } else if state.items.is_empty() {
            GalleryView::Empty
        } else {
            GalleryView::Items(state.items.clone())
        }
    }

    /// Rebinds the gallery to another kind and fetches its collection.
    pub async fn set_kind(&self, kind: Kind) -> FetchOutcome {
        self.state().kind = kind;
        self.refresh().await
    }

    /// Fetches the collection once and replaces the local one with the
    /// result, unless a newer fetch was started in the meantime.
    pub async fn refresh(&self) -> FetchOutcome {
        let (kind, tag) = {
            let mut state = self.state();
            state.generation += 1;
            state.loading = true;
            (state.kind, state.generation)
        };

        let result = self.client.list(kind).await;

        let mut state = self.state();
        if state.generation != tag {
            debug!(
                "Discarding {} fetch #{}, #{} is current",
                kind, tag, state.generation
            );
            return FetchOutcome::Stale;
        }

        let mut items = match result {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to load {}: {}", kind, e);
                self.notifier
                    .notify(Notice::error("Error", "Could not load content"));
                Vec::new()
            }
        };

        // This fetch may have been answered before a delete it overlapped
        let removed: Vec<i64> = state
            .removed
            .drain(..)
            .filter(|(generation, _)| *generation == tag)
            .map(|(_, id)| id)
            .collect();
        items.retain(|item| !removed.contains(&item.id));

        state.items = items;
        state.loading = false;
        info!("Gallery {} ready with {} items", kind, state.items.len());
        FetchOutcome::Applied
    }

    /// Deletes on the server first and only then drops the item locally.
    /// Ids are only unique within a kind, so nothing is dropped if the
    /// gallery was rebound while the call was in flight.
    pub async fn request_delete(&self, id: i64) -> DeleteOutcome {
        let kind = self.kind();

        match self.client.remove(kind, id).await {
            Ok(()) => {
                {
                    let mut state = self.state();
                    if state.kind == kind {
                        state.items.retain(|item| item.id != id);
                        if state.loading {
                            let generation = state.generation;
                            state.removed.push((generation, id));
                        }
                    } else {
                        debug!("Gallery moved on to {}, keeping its items", state.kind);
                    }
                }
                self.notifier
                    .notify(Notice::success("Deleted", "Content deleted"));
                DeleteOutcome::Removed
            }
            Err(e) => {
                warn!("Failed to delete {} {}: {}", kind, id, e);
                self.notifier
                    .notify(Notice::error("Error", "Could not delete content"));
                DeleteOutcome::Failed
            }
        }
    }

    /// Refetches for every signal addressed to this gallery's kind until all
    /// senders are gone.
    pub async fn listen(&self, mut signals: RefreshReceiver) {
        while let Some(signal) = signals.recv().await {
            if signal.kind == self.kind() {
                self.refresh().await;
            } else {
                debug!("Ignoring refresh for {}", signal.kind);
            }
        }
    }
}
