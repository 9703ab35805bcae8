//! Change notification as an iterator.
//!
//! A [`Watcher`] is a lazy, infinite, non-restartable sequence of wait
//! results: each `next()` issues one long-polling wait and yields whatever
//! came back, errors included. The caller's loop is the policy layer; it
//! decides whether a store error or transport failure means break, retry,
//! or ignore. A [`WatchHandle`] provides an explicit cancellation channel
//! on top, usable from another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use etcd2_transport::HttpExecutor;

use crate::error::Error;
use crate::session::{Session, WaitOptions};
use crate::types::GetResponse;

/// Cancellation handle for a [`Watcher`].
///
/// Clonable and shareable; once cancelled, the watcher returns `None`
/// before its next wait. Cancellation cannot interrupt a wait already in
/// flight — bounding that is the transport's timeout concern.
#[derive(Debug, Clone, Default)]
pub struct WatchHandle {
    cancelled: Arc<AtomicBool>,
}

impl WatchHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Infinite iterator of change notifications for one key or subtree.
///
/// Created by [`Session::watch`]; borrows the session for its lifetime,
/// so the session is unusable for other operations until the watcher is
/// dropped.
pub struct Watcher<'a, E: HttpExecutor> {
    session: &'a mut Session<E>,
    key: String,
    recursive: bool,
    handle: WatchHandle,
}

impl<'a, E: HttpExecutor> Watcher<'a, E> {
    pub(crate) fn new(session: &'a mut Session<E>, key: &str, recursive: bool) -> Self {
        Self {
            session,
            key: key.to_string(),
            recursive,
            handle: WatchHandle::default(),
        }
    }

    /// A handle that cancels this watcher, usable from another thread.
    pub fn handle(&self) -> WatchHandle {
        self.handle.clone()
    }
}

impl<E: HttpExecutor> Iterator for Watcher<'_, E> {
    type Item = Result<GetResponse, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.handle.is_cancelled() {
            return None;
        }

        let options = WaitOptions::default().recursive(self.recursive);
        Some(self.session.wait_with(&self.key, options))
    }
}
