use super::gallery::{RefreshSender, RefreshSignal};
use super::notify::{Notice, Notifier};
use crate::media::{Draft, DraftError, Field, Kind, MediaStoreClient, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    /// Required fields missing; nothing was sent.
    Invalid(DraftError),
    /// Another submit from this form is still in flight.
    Busy,
    Failed(StoreError),
}

/// Create form for one content kind.
pub struct UploadFormController {
    kind: Kind,
    client: MediaStoreClient,
    notifier: Arc<dyn Notifier>,
    refresh: RefreshSender,
    draft: Mutex<Draft>,
    open: AtomicBool,
    pending: AtomicBool,
}

/// Clears the in-flight flag however the submit ends.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UploadFormController {
    pub fn new(
        kind: Kind,
        client: MediaStoreClient,
        notifier: Arc<dyn Notifier>,
        refresh: RefreshSender,
    ) -> Self {
        Self {
            kind,
            client,
            notifier,
            refresh,
            draft: Mutex::new(Draft::empty(kind)),
            open: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    fn lock_draft(&self) -> MutexGuard<'_, Draft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    /// Closes the form without submitting; the draft is discarded.
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
        *self.lock_draft() = Draft::empty(self.kind);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn set_field(&self, field: Field, value: &str) -> Result<(), DraftError> {
        self.lock_draft().set(field, value)
    }

    pub fn draft(&self) -> Draft {
        self.lock_draft().clone()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.pending.swap(true, Ordering::AcqRel) {
            debug!("Ignoring {} submit, one is already in flight", self.kind);
            return SubmitOutcome::Busy;
        }
        let _pending = PendingGuard(&self.pending);

        let draft = self.draft();
        if let Err(e) = draft.validate() {
            self.notifier.notify(Notice::error("Error", e.to_string()));
            return SubmitOutcome::Invalid(e);
        }

        match self.client.create(&draft).await {
            Ok(()) => {
                *self.lock_draft() = Draft::empty(self.kind);
                self.open.store(false, Ordering::Release);
                if self.refresh.send(RefreshSignal { kind: self.kind }).is_err() {
                    debug!("No gallery listening for {} refreshes", self.kind);
                }
                info!("Uploaded {}", self.kind);
                self.notifier
                    .notify(Notice::success("Success!", "Content added"));
                SubmitOutcome::Created
            }
            Err(e) => {
                warn!("Failed to upload {}: {}", self.kind, e);
                self.notifier
                    .notify(Notice::error("Error", "Could not upload content"));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
