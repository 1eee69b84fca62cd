use std::sync::Arc;

use dispatch_core::{Event, FakeModule, FakeScan, ModulePort, ScanConfig};
use dispatch_engine::{Dispatcher, EmitOptions};

/// S3 — ancestor promotion cascade: an internal ancestor is re-queued and
/// cleared once a graph-important descendant surfaces.
#[tokio::test]
async fn graph_important_descendant_promotes_internal_ancestor_and_requeues_it() {
    let consumer = Arc::new(FakeModule::new("consumer"));
    let scan = Arc::new(
        FakeScan::new(dispatch_core::EventId::new(), ScanConfig::default())
            .with_module(consumer.clone() as Arc<dyn ModulePort>),
    ); // scope_report_distance defaults to 1

    let dispatcher = Dispatcher::new(scan.clone());

    let root = Event::new("DNS_NAME", "example.com", "TARGET");
    let root_id = dispatcher.register(root);

    let mut ancestor = Event::new("DNS_NAME", "sub.example.com", "moduleA");
    ancestor.source = Some(root_id);
    ancestor.scope_distance = 1;
    ancestor.internal = true;
    let ancestor_id = dispatcher.register(ancestor);

    let mut leaf = Event::new("DNS_NAME", "leaf.sub.example.com", "moduleB");
    leaf.source = Some(ancestor_id);
    leaf.scope_distance = 2;
    leaf.graph_important = true;

    dispatcher.emit(leaf, EmitOptions::default(), None).await;

    // the promoted ancestor must have been re-queued onto the shared
    // ingress: run the loop briefly and confirm it reaches the consumer.
    let dispatcher = Arc::new(dispatcher);
    let runner = dispatcher.clone();
    let handle = tokio::spawn(async move { runner.run().await });
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    scan.stop();
    handle.await.unwrap().unwrap();

    let received = consumer.received();
    assert!(received.iter().any(|q| q.event.event_type == "DNS_NAME" && q.event.data == "sub.example.com"));
}
