use std::{sync::Arc, thread};

use crossbeam_channel::{select, Receiver, Sender};
use parking_lot::Mutex;
use tracing::warn;

/// A cancellation flag that can be waited on inside `select!`.
///
/// Nothing is ever sent on the inner channel: cancelling drops the sender,
/// which makes every clone of the receiver ready with a disconnect.
#[derive(Clone, Debug)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    tx: Mutex<Option<Sender<()>>>,
    rx: Receiver<()>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                tx: Mutex::new(Some(tx)),
                rx,
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.tx.lock().take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.tx.lock().is_none()
    }

    /// Becomes ready (with a `RecvError`) once the token is cancelled.
    pub fn cancelled(&self) -> &Receiver<()> {
        &self.inner.rx
    }

    /// A token that is cancelled together with `self`, but can also be
    /// cancelled on its own without touching `self`.
    pub fn child(&self) -> CancelToken {
        let child = CancelToken::new();
        if self.is_cancelled() {
            child.cancel();
            return child;
        }
        let parent = self.cancelled().clone();
        let watched = child.clone();
        let spawned = thread::Builder::new()
            .name("cancel-watch".into())
            .spawn(move || {
                select! {
                    recv(parent) -> _ => watched.cancel(),
                    recv(watched.cancelled()) -> _ => {}
                }
            });
        if let Err(err) = spawned {
            // without a watcher the child could outlive its parent
            warn!(error = %err, "failed to spawn cancel watcher, child starts cancelled");
            child.cancel();
        }
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::TryRecvError;
    use std::time::Duration;

    #[test]
    fn test_cancel() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert_eq!(token.cancelled().try_recv(), Err(TryRecvError::Empty));
        token.clone().cancel();
        assert!(token.is_cancelled());
        assert!(token.cancelled().recv().is_err());
        token.cancel();
    }

    #[test]
    fn test_parent_cancels_child() {
        let parent = CancelToken::new();
        let child = parent.child();
        parent.cancel();
        assert!(child
            .cancelled()
            .recv_timeout(Duration::from_secs(5))
            .is_err());
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_child_leaves_parent() {
        let parent = CancelToken::new();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());
        assert!(!parent.child().is_cancelled());
    }

    #[test]
    fn test_child_of_cancelled() {
        let parent = CancelToken::new();
        parent.cancel();
        assert!(parent.child().is_cancelled());
    }
}
