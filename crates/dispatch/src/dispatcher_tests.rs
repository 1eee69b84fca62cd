// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use dispatch_core::{Event, EventId, FakeModule, FakeScan, ModulePort, ScanConfig, ScanPort};

use super::*;

#[tokio::test]
async fn end_to_end_seed_then_run_delivers_to_modules() {
    let root = Event::new("SCAN_INFO", "example.com", "TARGET");
    let module = Arc::new(FakeModule::new("consumer"));
    let scan = Arc::new(
        FakeScan::new(root.id, ScanConfig::default()).with_module(module.clone() as Arc<dyn ModulePort>),
    );

    let dispatcher = Arc::new(Dispatcher::new(scan.clone()));
    dispatcher.register(root.clone());

    dispatcher.seed().await;
    assert!(scan.finished_init());

    let runner = dispatcher.clone();
    let handle = tokio::spawn(async move { runner.run().await });
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    scan.stop();
    handle.await.unwrap().unwrap();

    let received = module.received();
    assert!(!received.is_empty());
    assert_eq!(received[0].event.event_type, "SCAN_INFO");
}

#[tokio::test]
async fn kill_module_clears_backlog_and_sets_errored() {
    let module = Arc::new(FakeModule::new("victim"));
    module.emit(Event::new("DNS_NAME", "a.com", "victim"));
    let scan = Arc::new(
        FakeScan::new(EventId::new(), ScanConfig::default()).with_module(module.clone() as Arc<dyn ModulePort>),
    );
    let dispatcher = Dispatcher::new(scan);

    dispatcher.kill_module("victim", "policy violation").await;

    assert!(module.status().is_errored());
    assert_eq!(module.outgoing_event_queue().len(), 0);
}

#[tokio::test]
async fn status_reports_task_count_and_module_state() {
    let module = Arc::new(FakeModule::new("m"));
    let scan = Arc::new(
        FakeScan::new(EventId::new(), ScanConfig::default()).with_module(module as Arc<dyn ModulePort>),
    );
    let dispatcher = Dispatcher::new(scan);

    let status = dispatcher.status().await;
    assert_eq!(dispatcher.task_count(), 0);
    assert!(!status.finished);
}
