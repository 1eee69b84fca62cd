// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A non-blocking FIFO with bounded local reordering ("shuffle queue").
//!
//! Consecutive puts of distinct items may be reordered within the queue so
//! that consumers see a randomized interleaving of producers' outputs.
//! This is deliberate: it breaks per-producer ordering to improve fairness
//! under bursty producers (see spec §4.2). A put inserts at a random
//! position within the last `SHUFFLE_WINDOW` slots instead of strictly at
//! the back; a get always pops from the front, so FIFO order holds
//! approximately but not exactly.

use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::Rng;

/// Default local-reordering window. Large enough to blur per-producer
/// ordering under bursty writers, small enough that gets still look
/// approximately FIFO.
pub const SHUFFLE_WINDOW: usize = 8;

pub struct ShuffleQueue<T> {
    inner: Mutex<VecDeque<T>>,
    window: usize,
}

impl<T> Default for ShuffleQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ShuffleQueue<T> {
    pub fn new() -> Self {
        Self::with_window(SHUFFLE_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        Self { inner: Mutex::new(VecDeque::new()), window: window.max(1) }
    }

    /// Insert `item`, landing at a random position within the last `window`
    /// slots of the queue (i.e. close to, but not necessarily at, the back).
    pub fn put_nowait(&self, item: T) {
        let mut guard = self.inner.lock();
        let len = guard.len();
        if len == 0 {
            guard.push_back(item);
            return;
        }
        let reach = self.window.min(len);
        let offset = rand::thread_rng().gen_range(0..=reach);
        guard.insert(len - offset, item);
    }

    /// Pop the front item, if any.
    pub fn get_nowait(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain every queued item without disturbing order, for status/debug
    /// reporting only — per spec §9, callers must treat this as an
    /// approximate snapshot since it is not atomic with concurrent puts.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.lock().iter().cloned().collect()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
