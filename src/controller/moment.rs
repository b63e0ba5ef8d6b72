//! Watched moment channel.
//!
//! The chart publishes the day under the cursor; readers see the latest value
//! and can await changes.

use chrono::NaiveDate;
use tokio::sync::watch;

/// Publisher side of the watched moment.
#[derive(Debug)]
pub struct MomentWatcher {
    tx: watch::Sender<NaiveDate>,
}

impl MomentWatcher {
    /// Create a watcher starting at `initial`.
    pub fn new(initial: NaiveDate) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current watched moment.
    pub fn current(&self) -> NaiveDate {
        *self.tx.borrow()
    }

    /// Publish a new moment. Unchanged values do not notify.
    pub fn set(&self, moment: NaiveDate) {
        self.tx.send_if_modified(|current| {
            if *current == moment {
                false
            } else {
                *current = moment;
                true
            }
        });
    }

    /// Subscribe to moment changes.
    pub fn subscribe(&self) -> watch::Receiver<NaiveDate> {
        self.tx.subscribe()
    }
}
