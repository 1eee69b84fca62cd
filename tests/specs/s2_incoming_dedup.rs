use std::sync::Arc;

use dispatch_core::{Event, FakeModule, FakeScan, ModulePort, ScanConfig};
use dispatch_engine::{EmitOptions, Dispatcher};

/// S2 — incoming dedup: module X (suppress_dupes=true) emits the same
/// event twice; the distributor runs only once.
#[tokio::test]
async fn duplicate_from_suppressing_module_reaches_distributor_once() {
    let producer = Arc::new(FakeModule::new("X").with_suppress_dupes(true));
    let consumer = Arc::new(FakeModule::new("consumer"));
    let scan = Arc::new(
        FakeScan::new(dispatch_core::EventId::new(), ScanConfig::default())
            .with_module(producer.clone() as Arc<dyn ModulePort>)
            .with_module(consumer.clone() as Arc<dyn ModulePort>),
    );
    let dispatcher = Dispatcher::new(scan.clone());

    let first = Event::new("DNS_NAME", "a.example.com", "X");
    let second = Event::new("DNS_NAME", "a.example.com", "X");

    dispatcher.emit(first, EmitOptions::default(), Some(producer.as_ref() as &dyn ModulePort)).await;
    dispatcher.emit(second, EmitOptions::default(), Some(producer.as_ref() as &dyn ModulePort)).await;

    assert_eq!(consumer.received().len(), 1);
    assert_eq!(scan.emitted_count("DNS_NAME"), 1);
}
