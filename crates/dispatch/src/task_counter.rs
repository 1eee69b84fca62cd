// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-flight work unit counter for quiescence detection (spec §4.3).
//!
//! Not a semaphore: `count()` never blocks and never bounds concurrency,
//! it only tracks how many labeled units are currently open so [`Dispatcher`]
//! can answer "is anything still running". The guard decrements on every
//! exit path, including panics during the held scope, via `Drop`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct TaskCounter {
    value: AtomicI64,
}

impl TaskCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Acquire one slot, labeled for status-reporter introspection. The
    /// label is currently unused beyond documentation purposes. Returns
    /// immediately; the slot is released when the returned guard drops.
    pub fn count(self: &Arc<Self>, _label: impl Into<String>) -> TaskCounterGuard {
        self.value.fetch_add(1, Ordering::SeqCst);
        TaskCounterGuard { counter: Arc::clone(self) }
    }

    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }
}

pub struct TaskCounterGuard {
    counter: Arc<TaskCounter>,
}

impl Drop for TaskCounterGuard {
    fn drop(&mut self) {
        self.counter.value.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "task_counter_tests.rs"]
mod tests;
