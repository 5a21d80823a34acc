//! Published snapshot with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads. A rebuild constructs a complete
//! [`Snapshot`] off to the side and swaps it in with one store; readers that
//! loaded the previous snapshot keep a consistent view until they drop it.
//!
//! ```text
//!  rebuild ──build──▶ Snapshot(n+1) ──publish──▶ ArcSwap ──load──▶ readers
//!                                                   │
//!                                                   └──notify──▶ subscribers
//! ```

use super::ContentIndex;
use crate::content::ContentKind;
use crate::diagnostics::BuildReport;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Everything one rebuild produced.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Monotonic build counter; 0 is the empty startup snapshot.
    pub generation: u64,
    pub notes: ContentIndex,
    pub portfolio: ContentIndex,
    pub report: BuildReport,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            generation: 0,
            notes: ContentIndex::empty(ContentKind::Note),
            portfolio: ContentIndex::empty(ContentKind::Portfolio),
            report: BuildReport::default(),
        }
    }

    pub const fn collection(&self, kind: ContentKind) -> &ContentIndex {
        match kind {
            ContentKind::Note => &self.notes,
            ContentKind::Portfolio => &self.portfolio,
        }
    }
}

/// Sent to subscribers after each publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexUpdated {
    pub generation: u64,
}

/// Shared holder of the current snapshot.
pub struct IndexHandle {
    current: ArcSwap<Snapshot>,
    generation: AtomicU64,
    subscribers: Mutex<Vec<Sender<IndexUpdated>>>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::empty()),
            generation: AtomicU64::new(0),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Current snapshot. Wait-free.
    #[inline]
    pub fn load(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Generation number for the next build.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Replace the current snapshot and notify subscribers.
    ///
    /// Subscribers whose receiver was dropped are forgotten.
    pub fn publish(&self, snapshot: Snapshot) {
        let generation = snapshot.generation;
        self.current.store(Arc::new(snapshot));

        let message = IndexUpdated { generation };
        self.subscribers.lock().retain(|tx| tx.send(message).is_ok());
    }

    /// Receive an [`IndexUpdated`] after every future publish.
    pub fn subscribe(&self) -> Receiver<IndexUpdated> {
        let (tx, rx) = channel();
        self.subscribers.lock().push(tx);
        rx
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new()
    }
}
