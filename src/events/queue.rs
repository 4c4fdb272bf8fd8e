//! Unbounded multi-producer, single-consumer event queue.
//!
//! Items sit in a `VecDeque` behind an `embassy-sync` blocking mutex,
//! so any thread can post without blocking on the consumer.  Every post
//! also raises a readiness [`Signal`] which the driver awaits when it
//! finds nothing to do.
//!
//! ```text
//!  producer ─┐
//!  producer ─┼─▶ post() ──▶ [ VecDeque ] ──▶ try_take() ──▶ consumer
//!  producer ─┘        └──▶ ready signal ──▶ ready().await
//! ```
//!
//! Only one consumer may call [`EventQueue::try_take`] at a time.  The
//! queue does not enforce this; FIFO order is only meaningful with a
//! single consumer.

use core::cell::RefCell;
use std::collections::VecDeque;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

pub struct EventQueue<T> {
    items: Mutex<CriticalSectionRawMutex, RefCell<VecDeque<T>>>,
    ready: Signal<CriticalSectionRawMutex, ()>,
}

impl<T> EventQueue<T> {
    pub const fn new() -> Self {
        Self {
            items: Mutex::new(RefCell::new(VecDeque::new())),
            ready: Signal::new(),
        }
    }

    /// Append `item` at the tail.  Never blocks, never fails.
    pub fn post(&self, item: T) {
        self.items.lock(|q| q.borrow_mut().push_back(item));
        self.ready.signal(());
    }

    /// Remove and return the head item, or `None` when empty.
    pub fn try_take(&self) -> Option<T> {
        self.items.lock(|q| q.borrow_mut().pop_front())
    }

    /// Snapshot; may be stale by the time the caller acts on it.
    pub fn is_empty(&self) -> bool {
        self.items.lock(|q| q.borrow().is_empty())
    }

    pub fn len(&self) -> usize {
        self.items.lock(|q| q.borrow().len())
    }

    /// Resolves once something has been posted since the last time this
    /// future resolved.  Posts that happen before the await are latched,
    /// so a consumer that checks, finds nothing, then waits cannot miss
    /// a wakeup.
    pub async fn ready(&self) {
        self.ready.wait().await;
    }

    /// Remove every pending item, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.items.lock(|q| q.borrow_mut().drain(..).collect())
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
