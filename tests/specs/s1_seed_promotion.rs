use std::sync::Arc;
use std::time::Duration;

use dispatch_core::{Event, FakeModule, FakeScan, ModulePort, ScanConfig, ScanPort};
use dispatch_engine::Dispatcher;

/// S1 — seed promotion: a seed event lands at scope_distance=0, internal
/// false, delivered to every non-hook consumer exactly once.
#[tokio::test]
async fn seed_event_is_delivered_to_every_consumer_exactly_once() {
    let root = Event::new("DNS_NAME", "example.com", "TARGET");
    let root_id = root.id;
    let module_a = Arc::new(FakeModule::new("a"));
    let module_b = Arc::new(FakeModule::new("b"));
    let scan = Arc::new(
        FakeScan::new(root_id, ScanConfig::default())
            .with_module(module_a.clone() as Arc<dyn ModulePort>)
            .with_module(module_b.clone() as Arc<dyn ModulePort>),
    );

    let dispatcher = Arc::new(Dispatcher::new(scan.clone()));
    dispatcher.register(root);
    dispatcher.seed().await;
    assert!(scan.finished_init());

    let runner = dispatcher.clone();
    let handle = tokio::spawn(async move { runner.run().await });
    tokio::time::sleep(Duration::from_millis(150)).await;
    scan.stop();
    handle.await.unwrap().unwrap();

    for module in [&module_a, &module_b] {
        let received = module.received();
        let summary: Vec<(&str, u32, bool)> =
            received.iter().map(|q| (q.event.data.as_str(), q.event.scope_distance, q.event.internal)).collect();
        similar_asserts::assert_eq!(summary, vec![("example.com", 0, false)]);
    }
    assert_eq!(scan.emitted_count("DNS_NAME"), 1);
}
