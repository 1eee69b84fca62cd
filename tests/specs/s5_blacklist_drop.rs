use std::sync::Arc;

use dispatch_core::{Event, FakeModule, FakeScan, ModulePort, ScanConfig};
use dispatch_engine::{Dispatcher, EmitOptions};

/// S5 — blacklist drop: a blacklisted event is dropped silently, with no
/// fan-out and no word-cloud absorption.
#[tokio::test]
async fn blacklisted_event_produces_no_fanout_and_no_word_cloud_hit() {
    let consumer = Arc::new(FakeModule::new("consumer"));
    let scan = Arc::new(
        FakeScan::new(dispatch_core::EventId::new(), ScanConfig::default())
            .with_module(consumer.clone() as Arc<dyn ModulePort>),
    );
    scan.blacklist_data("evil.example.com");
    let dispatcher = Dispatcher::new(scan.clone());

    let mut event = Event::new("DNS_NAME", "evil.example.com", "m");
    event.host = Some("evil.example.com".into());
    dispatcher.emit(event, EmitOptions::default(), None).await;

    assert!(consumer.received().is_empty());
    assert_eq!(scan.word_cloud_hits(), 0);
    assert_eq!(scan.emitted_count("DNS_NAME"), 0);
}
