use crate::data::{
    student_record::{StudentRecord, UpdateOutcome},
    update::RecordUpdate,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

///sole owner of one card's [`StudentRecord`]
///
///every mutation goes through [`FormStore::apply`] while holding the lock, so updates for
///one card never interleave - including ones posted later by image decoding tasks
#[derive(Clone, Debug)]
pub struct FormStore {
    inner: Arc<Mutex<StoreInner>>,
    watchers: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct StoreInner {
    record: StudentRecord,
    last_touched: Instant,
}

impl FormStore {
    pub fn new(record: StudentRecord) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                record,
                last_touched: Instant::now(),
            })),
            watchers: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn apply(&self, update: RecordUpdate) -> UpdateOutcome {
        let mut inner = self.inner.lock().await;
        inner.last_touched = Instant::now();
        inner.record.apply(update)
    }

    pub async fn snapshot(&self) -> StudentRecord {
        let mut inner = self.inner.lock().await;
        inner.last_touched = Instant::now();
        inner.record.clone()
    }

    pub async fn idle_for(&self) -> Duration {
        self.inner.lock().await.last_touched.elapsed()
    }

    ///counts as an open page until the guard is dropped
    pub fn watch(&self) -> WatchGuard {
        self.watchers.fetch_add(1, Ordering::SeqCst);
        WatchGuard {
            watchers: Arc::clone(&self.watchers),
        }
    }

    pub fn is_watched(&self) -> bool {
        self.watchers.load(Ordering::SeqCst) > 0
    }
}

///held by a live event feed, so the card isn't reaped from under an open page
#[derive(Debug)]
pub struct WatchGuard {
    watchers: Arc<AtomicUsize>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.watchers.fetch_sub(1, Ordering::SeqCst);
    }
}
