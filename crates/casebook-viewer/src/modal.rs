//! Fetch/render shell for a single case study.
//!
//! [`CaseStudyModal`] owns the open/closed state of one case-study dialog.
//! Opening it with an identifier starts a fetch on the tokio runtime;
//! the outcome is turned into a [`ModalState`] and broadcast on a watch
//! channel.
//!
//! Each `open` or `close` bumps a generation counter and aborts the
//! in-flight fetch. A response that still arrives for an older generation
//! is dropped, so the state always reflects the most recent request.
//!
//! # Usage
//!
//! ```rust
//! use std::time::Duration;
//! use casebook_client::MemorySource;
//! use casebook_core::CaseStudyRecord;
//! use casebook_viewer::modal::{CaseStudyModal, ModalState};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut record = CaseStudyRecord::new("cs-1", "Edge Caching");
//! record.content = Some("## Results\nPages load in 80ms.".into());
//!
//! let modal = CaseStudyModal::new(MemorySource::new(vec![record]));
//! modal.open("cs-1");
//!
//! let state = modal.wait_settled(Duration::from_secs(1)).await.unwrap();
//! match state {
//!     ModalState::Ready { view, .. } => assert_eq!(view.results, "Pages load in 80ms."),
//!     other => panic!("unexpected state: {other}"),
//! }
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use casebook_client::CaseStudySource;
use casebook_content::{CaseStudyViewModel, extract};
use casebook_core::{CaseStudyRecord, Result};

// ============================================================================
// ModalState
// ============================================================================

/// The mutually exclusive states of the dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState {
    /// Not showing anything.
    Closed,
    /// Fetching the record for `id`.
    Loading {
        /// Requested identifier
        id: String,
    },
    /// The fetch failed; `message` is shown with a dismiss action.
    Error {
        /// Requested identifier
        id: String,
        /// Reader-facing message
        message: String,
    },
    /// The record arrived and was extracted.
    Ready {
        /// Requested identifier
        id: String,
        /// The fetched record
        record: Arc<CaseStudyRecord>,
        /// The extracted view model
        view: Arc<CaseStudyViewModel>,
    },
}

impl ModalState {
    /// Returns `true` unless [`ModalState::Closed`].
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Returns `true` while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns `true` once the current open has a result (Ready or Error).
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Error { .. })
    }

    /// The identifier the dialog is showing, if open.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Loading { id } | Self::Error { id, .. } | Self::Ready { id, .. } => Some(id),
        }
    }
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Loading { id } => write!(f, "loading '{id}'"),
            Self::Error { id, message } => write!(f, "error '{id}': {message}"),
            Self::Ready { id, .. } => write!(f, "ready '{id}'"),
        }
    }
}

// ============================================================================
// CaseStudyModal
// ============================================================================

type CloseCallback = Box<dyn Fn() + Send + Sync>;

/// Handle for one case-study dialog.
///
/// Cheap to clone (Arc internals). `open` must be called from within a
/// tokio runtime.
pub struct CaseStudyModal<S> {
    inner: Arc<ModalInner<S>>,
}

struct ModalInner<S> {
    source: S,
    tx: watch::Sender<ModalState>,
    active: Mutex<ActiveFetch>,
    on_close: Mutex<Option<CloseCallback>>,
}

#[derive(Default)]
struct ActiveFetch {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl<S> Clone for CaseStudyModal<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CaseStudySource + 'static> CaseStudyModal<S> {
    /// Create a closed dialog over a source.
    pub fn new(source: S) -> Self {
        let (tx, _rx) = watch::channel(ModalState::Closed);
        Self {
            inner: Arc::new(ModalInner {
                source,
                tx,
                active: Mutex::new(ActiveFetch::default()),
                on_close: Mutex::new(None),
            }),
        }
    }

    /// Register the owner's callback, invoked on every [`close`](Self::close).
    pub fn on_close(&self, callback: impl Fn() + Send + Sync + 'static) {
        *lock(&self.inner.on_close) = Some(Box::new(callback));
    }

    /// Show the case study `id`, replacing whatever was open.
    ///
    /// The record is fetched fresh on every call.
    pub fn open(&self, id: impl Into<String>) {
        let id = id.into();
        let mut active = lock(&self.inner.active);
        let generation = active.invalidate();

        self.inner.set_state(ModalState::Loading { id: id.clone() });

        let inner = Arc::clone(&self.inner);
        active.task = Some(tokio::spawn(async move {
            let outcome = inner.source.fetch_by_id(&id).await;
            inner.complete(generation, id, outcome);
        }));
    }

    /// Close the dialog, drop any in-flight fetch, and notify the owner.
    pub fn close(&self) {
        {
            let mut active = lock(&self.inner.active);
            active.invalidate();
            self.inner.set_state(ModalState::Closed);
        }

        if let Some(callback) = lock(&self.inner.on_close).as_ref() {
            callback();
        }
    }

    /// Get the current state.
    pub fn state(&self) -> ModalState {
        self.inner.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.inner.tx.subscribe()
    }

    /// Wait until the current open settles (Ready or Error), or timeout.
    ///
    /// Fails if the dialog is or becomes closed while waiting.
    pub async fn wait_settled(&self, timeout: Duration) -> std::result::Result<ModalState, String> {
        let mut rx = self.subscribe();
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        // Check current state first
        {
            let state = rx.borrow_and_update().clone();
            if state.is_settled() {
                return Ok(state);
            }
            if !state.is_open() {
                return Err("Case study dialog is closed".to_string());
            }
        }

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    return Err(format!(
                        "Case study not settled after {timeout:?} (state: {})",
                        self.state()
                    ));
                }
                result = rx.changed() => {
                    if result.is_err() {
                        return Err("Case study dialog channel closed".to_string());
                    }
                    let state = rx.borrow().clone();
                    if state.is_settled() {
                        return Ok(state);
                    }
                    if !state.is_open() {
                        return Err("Case study dialog was closed".to_string());
                    }
                }
            }
        }
    }
}

impl<S> ModalInner<S> {
    fn set_state(&self, state: ModalState) {
        log::debug!("Case study modal → {state}");
        self.tx.send_replace(state);
    }

    /// Apply a fetch outcome unless a newer open or a close superseded it.
    fn complete(&self, generation: u64, id: String, outcome: Result<CaseStudyRecord>) {
        let mut active = lock(&self.active);
        if active.generation != generation {
            log::debug!("Discarding stale response for case study '{id}'");
            return;
        }
        active.task = None;

        let state = match outcome {
            Ok(record) => {
                let view = extract(&record);
                ModalState::Ready {
                    id,
                    record: Arc::new(record),
                    view: Arc::new(view),
                }
            }
            Err(e) => {
                log::warn!("Error fetching case study '{id}': {e}");
                ModalState::Error {
                    id,
                    message: e.user_message(),
                }
            }
        };
        self.set_state(state);
    }
}

impl ActiveFetch {
    /// Abort the in-flight fetch and return the new generation.
    fn invalidate(&mut self) -> u64 {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.generation
    }
}

impl<S> fmt::Debug for CaseStudyModal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseStudyModal")
            .field("state", &*self.inner.tx.borrow())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use casebook_core::Error;
    use tokio::sync::Notify;

    /// Serves records, holding back ids that have a gate until released.
    #[derive(Default)]
    struct GatedSource {
        records: HashMap<String, CaseStudyRecord>,
        gates: HashMap<String, Arc<Notify>>,
        fetches: AtomicUsize,
        failure: Option<String>,
    }

    impl GatedSource {
        fn with(ids: &[&str]) -> Self {
            let records = ids
                .iter()
                .map(|id| {
                    let mut r = CaseStudyRecord::new(*id, format!("Case {id}"));
                    r.content = Some(format!("## Challenge\nProblem {id}"));
                    (id.to_string(), r)
                })
                .collect();
            Self {
                records,
                ..Self::default()
            }
        }

        fn gate(mut self, id: &str) -> (Self, Arc<Notify>) {
            let notify = Arc::new(Notify::new());
            self.gates.insert(id.to_string(), Arc::clone(&notify));
            (self, notify)
        }
    }

    #[async_trait]
    impl CaseStudySource for GatedSource {
        async fn fetch_by_id(&self, id: &str) -> Result<CaseStudyRecord> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = self.gates.get(id) {
                gate.notified().await;
            }
            if let Some(message) = &self.failure {
                return Err(Error::transport(message.clone()));
            }
            self.records
                .get(id)
                .cloned()
                .ok_or_else(|| Error::not_found(id))
        }

        async fn fetch_by_slug(&self, _slug: &str) -> Result<Option<CaseStudyRecord>> {
            Ok(None)
        }

        async fn list_all(&self) -> Result<Vec<CaseStudyRecord>> {
            Ok(self.records.values().cloned().collect())
        }

        async fn list_by_category(
            &self,
            _category: &str,
            _exclude_id: &str,
            _limit: usize,
        ) -> Result<Vec<CaseStudyRecord>> {
            Ok(Vec::new())
        }
    }

    const WAIT: Duration = Duration::from_secs(1);

    fn ready_title(state: &ModalState) -> Option<String> {
        match state {
            ModalState::Ready { view, .. } => Some(view.title.clone()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // ModalState
    // ------------------------------------------------------------------------

    #[test]
    fn test_state_display() {
        assert_eq!(ModalState::Closed.to_string(), "closed");
        assert_eq!(
            ModalState::Loading { id: "a".into() }.to_string(),
            "loading 'a'"
        );
        assert_eq!(
            ModalState::Error {
                id: "a".into(),
                message: "boom".into()
            }
            .to_string(),
            "error 'a': boom"
        );
    }

    #[test]
    fn test_state_predicates() {
        let loading = ModalState::Loading { id: "a".into() };
        assert!(loading.is_open());
        assert!(loading.is_loading());
        assert!(!loading.is_settled());
        assert_eq!(loading.id(), Some("a"));

        assert!(!ModalState::Closed.is_open());
        assert_eq!(ModalState::Closed.id(), None);
    }

    #[tokio::test]
    async fn test_initial_state_closed() {
        let modal = CaseStudyModal::new(GatedSource::default());
        assert_eq!(modal.state(), ModalState::Closed);
    }

    // ------------------------------------------------------------------------
    // Open / settle
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_open_ready() {
        let modal = CaseStudyModal::new(GatedSource::with(&["a"]));
        modal.open("a");

        let state = modal.wait_settled(WAIT).await.unwrap();
        match state {
            ModalState::Ready { id, record, view } => {
                assert_eq!(id, "a");
                assert_eq!(record.title(), "Case a");
                assert_eq!(view.challenge, "Problem a");
            }
            other => panic!("unexpected state: {other}"),
        }
    }

    #[tokio::test]
    async fn test_loading_until_fetch_resolves() {
        let (source, gate) = GatedSource::with(&["a"]).gate("a");
        let modal = CaseStudyModal::new(source);
        modal.open("a");
        assert_eq!(modal.state(), ModalState::Loading { id: "a".into() });

        gate.notify_one();
        let state = modal.wait_settled(WAIT).await.unwrap();
        assert_eq!(ready_title(&state).as_deref(), Some("Case a"));
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let modal = CaseStudyModal::new(GatedSource::default());
        modal.open("missing");

        let state = modal.wait_settled(WAIT).await.unwrap();
        assert_eq!(
            state,
            ModalState::Error {
                id: "missing".into(),
                message: "Case study not found".into()
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_message() {
        let source = GatedSource {
            failure: Some("connection reset by peer".to_string()),
            ..GatedSource::with(&["a"])
        };
        let modal = CaseStudyModal::new(source);
        modal.open("a");

        match modal.wait_settled(WAIT).await.unwrap() {
            ModalState::Error { message, .. } => assert_eq!(message, "connection reset by peer"),
            other => panic!("unexpected state: {other}"),
        }
    }

    #[tokio::test]
    async fn test_reopen_fetches_fresh() {
        let modal = CaseStudyModal::new(GatedSource::with(&["a"]));
        modal.open("a");
        modal.wait_settled(WAIT).await.unwrap();
        modal.open("a");
        modal.wait_settled(WAIT).await.unwrap();
        assert_eq!(modal.inner.source.fetches.load(Ordering::SeqCst), 2);
    }

    // ------------------------------------------------------------------------
    // Stale responses
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_open_b_before_a_resolves_shows_b() {
        let (source, gate_a) = GatedSource::with(&["a", "b"]).gate("a");
        let modal = CaseStudyModal::new(source);

        modal.open("a");
        modal.open("b");
        let state = modal.wait_settled(WAIT).await.unwrap();
        assert_eq!(ready_title(&state).as_deref(), Some("Case b"));

        gate_a.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(ready_title(&modal.state()).as_deref(), Some("Case b"));
    }

    #[tokio::test]
    async fn test_late_response_for_old_generation_discarded() {
        let modal = CaseStudyModal::new(GatedSource::with(&["a", "b"]));
        modal.open("a");
        modal.open("b");
        modal.wait_settled(WAIT).await.unwrap();

        // A response from the first open arriving after the second settled
        let late = CaseStudyRecord::new("a", "Late A");
        modal.inner.complete(1, "a".to_string(), Ok(late));
        assert_eq!(ready_title(&modal.state()).as_deref(), Some("Case b"));
    }

    #[tokio::test]
    async fn test_response_after_close_discarded() {
        let (source, gate) = GatedSource::with(&["a"]).gate("a");
        let modal = CaseStudyModal::new(source);

        modal.open("a");
        modal.close();
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(modal.state(), ModalState::Closed);

        modal.inner.complete(1, "a".to_string(), Ok(CaseStudyRecord::new("a", "Late")));
        assert_eq!(modal.state(), ModalState::Closed);
    }

    // ------------------------------------------------------------------------
    // Close
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_close_invokes_callback() {
        let modal = CaseStudyModal::new(GatedSource::with(&["a"]));
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&closed);
        modal.on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        modal.open("a");
        modal.wait_settled(WAIT).await.unwrap();
        modal.close();

        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wait_settled_when_closed() {
        let modal = CaseStudyModal::new(GatedSource::default());
        let err = modal.wait_settled(WAIT).await.unwrap_err();
        assert!(err.contains("closed"));
    }

    #[tokio::test]
    async fn test_wait_settled_interrupted_by_close() {
        let (source, _gate) = GatedSource::with(&["a"]).gate("a");
        let modal = CaseStudyModal::new(source);
        modal.open("a");

        let closer = modal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            closer.close();
        });

        let err = modal.wait_settled(WAIT).await.unwrap_err();
        assert!(err.contains("closed"));
    }

    #[tokio::test]
    async fn test_wait_settled_timeout() {
        let (source, _gate) = GatedSource::with(&["a"]).gate("a");
        let modal = CaseStudyModal::new(source);
        modal.open("a");

        let err = modal
            .wait_settled(Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(err.contains("not settled after"));
    }

    #[tokio::test]
    async fn test_subscribe_sees_transitions() {
        let modal = CaseStudyModal::new(GatedSource::with(&["a"]));
        let mut rx = modal.subscribe();
        assert_eq!(*rx.borrow_and_update(), ModalState::Closed);

        modal.open("a");
        modal.wait_settled(WAIT).await.unwrap();
        assert!(rx.borrow_and_update().is_settled());
    }

    // Compile-time check: the handle must be shareable across tasks
    fn _assert_send_sync<T: Send + Sync>() {}
    #[test]
    fn test_modal_send_sync() {
        _assert_send_sync::<CaseStudyModal<GatedSource>>();
        _assert_send_sync::<ModalState>();
    }
}
