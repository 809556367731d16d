use log::{debug, warn};
use rotations::prelude::{SharedRotation, Snapshot};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Background thread that polls a `SharedRotation` and hands each new
/// revision to a sink. Stopped and joined on drop.
pub struct Monitor {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Monitor {
    pub fn spawn<F>(shared: SharedRotation, refresh: Duration, mut sink: F) -> Self
    where
        F: FnMut(&Snapshot) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = stop.clone();
            thread::spawn(move || {
                let mut last_revision = None;
                while !stop.load(Ordering::Relaxed) {
                    let snapshot = shared.snapshot();
                    if last_revision != Some(snapshot.revision) {
                        last_revision = Some(snapshot.revision);
                        sink(&snapshot);
                    }
                    thread::sleep(refresh);
                }
            })
        };
        debug!("status monitor started, refreshing every {} ms", refresh.as_millis());
        Self { stop, handle: Some(handle) }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("status monitor thread panicked");
            }
        }
    }
}
