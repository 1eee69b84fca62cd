// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;

use super::*;

struct StubModule {
    name: String,
    priority: i64,
    queue: ShuffleQueue<Event>,
}

#[async_trait]
impl ModulePort for StubModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i64 {
        self.priority
    }

    fn is_hook(&self) -> bool {
        false
    }

    fn suppress_dupes(&self) -> bool {
        false
    }

    fn accept_dupes(&self) -> bool {
        false
    }

    async fn queue_event(&self, queued: QueuedEvent) {
        self.queue.put_nowait(queued.event);
    }

    fn outgoing_event_queue(&self) -> &ShuffleQueue<Event> {
        &self.queue
    }

    fn outgoing_dedup_hash(&self, _event: &Event) -> Option<u64> {
        None
    }

    fn is_graph_important(&self, _event: &Event) -> bool {
        false
    }

    fn status(&self) -> ModuleStatus {
        ModuleStatus::Running
    }

    fn memory_usage(&self) -> u64 {
        0
    }

    async fn set_error_state(&self, _message: String, clear_outgoing_queue: bool) {
        if clear_outgoing_queue {
            while self.queue.get_nowait().is_some() {}
        }
    }
}

#[tokio::test]
async fn queue_event_lands_on_outgoing_queue_when_looped_back() {
    let module = StubModule { name: "stub".into(), priority: 5, queue: ShuffleQueue::new() };
    let event = Event::new("IP_ADDRESS", "1.2.3.4", "stub");
    module.queue_event(QueuedEvent { event, priority: 5 }).await;
    assert_eq!(module.outgoing_event_queue().len(), 1);
}

#[test]
fn module_status_errored_detection() {
    assert!(!ModuleStatus::Running.is_errored());
    assert!(ModuleStatus::Errored { message: "boom".into() }.is_errored());
}
