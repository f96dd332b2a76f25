//! Work queue wiring.
//!
//! tokio's mpsc channel has a single receiver, so workers share it behind an
//! async mutex. The sender side belongs to the producer task alone.

use crate::catalog::Descriptor;

use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Consumer side of the work queue, shared by every worker.
#[derive(Debug, Clone)]
pub(crate) struct WorkQueue {
    rx: Arc<Mutex<mpsc::Receiver<Descriptor>>>,
}

/// Creates a queue holding at most `capacity` descriptors.
pub(crate) fn channel(capacity: usize) -> (mpsc::Sender<Descriptor>, WorkQueue) {
    let (tx, rx) = mpsc::channel(capacity);
    let queue = WorkQueue {
        rx: Arc::new(Mutex::new(rx)),
    };
    (tx, queue)
}

impl WorkQueue {
    /// Waits for the next descriptor.
    ///
    /// Cancel safe: dropping the future never loses a descriptor. `None`
    /// means the producer is gone and the queue is empty; callers treat it
    /// as "nothing to receive" rather than as a stop signal.
    pub(crate) async fn next(&self) -> Option<Descriptor> {
        self.rx.lock().await.recv().await
    }
}

/// Spawns the producer, which pushes every descriptor in order.
///
/// It blocks whenever the queue is full and finishes after the last send.
/// The handle resolves to the number of descriptors enqueued.
pub(crate) fn spawn_producer<S>(tx: mpsc::Sender<Descriptor>, descriptors: S) -> JoinHandle<usize>
where
    S: Stream<Item = Descriptor> + Send + 'static,
{
    tokio::spawn(async move {
        let mut descriptors = Box::pin(descriptors);
        let mut sent = 0;
        while let Some(descriptor) = descriptors.next().await {
            if tx.send(descriptor).await.is_err() {
                break;
            }
            sent += 1;
        }
        debug!(sent, "Producer finished");
        sent
    })
}
