// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders and fakes (spec §10), gated behind `test-support` so
//! downstream crates can depend on them without pulling test code into
//! release builds.

#![cfg(any(test, feature = "test-support"))]

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::event::{Event, EventId};
use crate::module::{ModulePort, ModuleStatus, QueuedEvent};
use crate::queue::ShuffleQueue;
use crate::scan::{MemoryStatus, ScanConfig, ScanPort};

crate::builder! {
    pub struct EventBuilder => Event {
        into {
            event_type: String = "TEST_EVENT",
            data: String = "test-data",
            module: String = "test-module",
        }
        set {
            scope_distance: u32 = 0,
            internal: bool = false,
            dummy: bool = false,
            graph_important: bool = false,
            always_emit: bool = false,
            quick_emit: bool = false,
            module_priority: i64 = 0,
        }
        option {
            source: EventId = None,
            host: String = None,
        }
        computed {
            id: EventId = EventId::new(),
            tags: HashSet<String> = HashSet::new(),
        }
    }
}

/// A module fake that records every queued event and serves a
/// pre-loaded outgoing queue, for exercising the dispatcher end-to-end
/// without a real module implementation.
pub struct FakeModule {
    name: String,
    priority: i64,
    hook: bool,
    suppress_dupes: bool,
    accept_dupes: bool,
    memory_usage: u64,
    outgoing: ShuffleQueue<Event>,
    received: Mutex<Vec<QueuedEvent>>,
    status: Mutex<ModuleStatus>,
    graph_important_types: Mutex<HashSet<String>>,
}

impl FakeModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: 3,
            hook: false,
            suppress_dupes: false,
            accept_dupes: false,
            memory_usage: 0,
            outgoing: ShuffleQueue::new(),
            received: Mutex::new(Vec::new()),
            status: Mutex::new(ModuleStatus::Running),
            graph_important_types: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_hook(mut self, hook: bool) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_suppress_dupes(mut self, suppress: bool) -> Self {
        self.suppress_dupes = suppress;
        self
    }

    pub fn with_accept_dupes(mut self, accept: bool) -> Self {
        self.accept_dupes = accept;
        self
    }

    pub fn with_memory_usage(mut self, bytes: u64) -> Self {
        self.memory_usage = bytes;
        self
    }

    pub fn mark_graph_important(&self, event_type: impl Into<String>) {
        self.graph_important_types.lock().insert(event_type.into());
    }

    pub fn emit(&self, event: Event) {
        self.outgoing.put_nowait(event);
    }

    pub fn received(&self) -> Vec<QueuedEvent> {
        self.received.lock().clone()
    }
}

#[async_trait]
impl ModulePort for FakeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i64 {
        self.priority
    }

    fn is_hook(&self) -> bool {
        self.hook
    }

    fn suppress_dupes(&self) -> bool {
        self.suppress_dupes
    }

    fn accept_dupes(&self) -> bool {
        self.accept_dupes
    }

    async fn queue_event(&self, event: QueuedEvent) {
        self.received.lock().push(event);
    }

    fn outgoing_event_queue(&self) -> &ShuffleQueue<Event> {
        &self.outgoing
    }

    fn outgoing_dedup_hash(&self, _event: &Event) -> Option<u64> {
        None
    }

    fn is_graph_important(&self, event: &Event) -> bool {
        self.graph_important_types.lock().contains(&event.event_type)
    }

    fn status(&self) -> ModuleStatus {
        self.status.lock().clone()
    }

    fn memory_usage(&self) -> u64 {
        self.memory_usage
    }

    async fn set_error_state(&self, message: String, clear_outgoing_queue: bool) {
        *self.status.lock() = ModuleStatus::Errored { message };
        if clear_outgoing_queue {
            while self.outgoing.get_nowait().is_some() {}
        }
    }
}

/// A scan fake with in-memory blacklist/whitelist sets and a root event,
/// sufficient to drive the dispatcher's precheck and distribution logic
/// in integration tests.
pub struct FakeScan {
    config: ScanConfig,
    modules: HashMap<String, Arc<dyn ModulePort>>,
    root: EventId,
    targets: Vec<EventId>,
    stopped: AtomicBool,
    finished_init: AtomicBool,
    blacklist: Mutex<HashSet<String>>,
    whitelist: Mutex<HashSet<String>>,
    emitted_counts: Mutex<HashMap<String, u64>>,
    word_cloud_hits: AtomicU64,
}

impl FakeScan {
    pub fn new(root: EventId, config: ScanConfig) -> Self {
        Self {
            config,
            modules: HashMap::new(),
            root,
            targets: Vec::new(),
            stopped: AtomicBool::new(false),
            finished_init: AtomicBool::new(false),
            blacklist: Mutex::new(HashSet::new()),
            whitelist: Mutex::new(HashSet::new()),
            emitted_counts: Mutex::new(HashMap::new()),
            word_cloud_hits: AtomicU64::new(0),
        }
    }

    pub fn with_module(mut self, module: Arc<dyn ModulePort>) -> Self {
        self.modules.insert(module.name().to_string(), module);
        self
    }

    pub fn with_target(mut self, event: EventId) -> Self {
        self.targets.push(event);
        self
    }

    pub fn blacklist_data(&self, data: impl Into<String>) {
        self.blacklist.lock().insert(data.into());
    }

    pub fn whitelist_data(&self, data: impl Into<String>) {
        self.whitelist.lock().insert(data.into());
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn emitted_count(&self, event_type: &str) -> u64 {
        *self.emitted_counts.lock().get(event_type).unwrap_or(&0)
    }

    pub fn word_cloud_hits(&self) -> u64 {
        self.word_cloud_hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanPort for FakeScan {
    fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn finished_init(&self) -> bool {
        self.finished_init.load(Ordering::SeqCst)
    }

    fn mark_finished_init(&self) {
        self.finished_init.store(true, Ordering::SeqCst);
    }

    fn config(&self) -> &ScanConfig {
        &self.config
    }

    fn modules(&self) -> &HashMap<String, Arc<dyn ModulePort>> {
        &self.modules
    }

    fn target_events(&self) -> Vec<EventId> {
        self.targets.clone()
    }

    fn root_event(&self) -> EventId {
        self.root.clone()
    }

    fn blacklisted(&self, event: &Event) -> bool {
        self.blacklist.lock().contains(&event.data)
    }

    fn whitelisted(&self, event: &Event) -> bool {
        let whitelist = self.whitelist.lock();
        whitelist.is_empty() || whitelist.contains(&event.data)
    }

    fn memory_status(&self) -> MemoryStatus {
        MemoryStatus { used_bytes: 0, total_bytes: 1, percent_used: 0 }
    }

    async fn absorb_word_cloud(&self, _event: &Event) {
        self.word_cloud_hits.fetch_add(1, Ordering::SeqCst);
    }

    fn record_emitted(&self, event_type: &str) {
        *self.emitted_counts.lock().entry(event_type.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
