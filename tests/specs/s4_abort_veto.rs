use std::sync::Arc;

use dispatch_core::{AbortIf, CallbackResult, Event, FakeModule, FakeScan, ModulePort, ScanConfig};
use dispatch_engine::{Dispatcher, EmitOptions};

/// S4 — abort veto with reason: a vetoing `abort_if` prevents distribution.
#[tokio::test]
async fn abort_if_veto_with_reason_prevents_distribution() {
    let consumer = Arc::new(FakeModule::new("consumer"));
    let scan = Arc::new(
        FakeScan::new(dispatch_core::EventId::new(), ScanConfig::default())
            .with_module(consumer.clone() as Arc<dyn ModulePort>),
    );
    let dispatcher = Dispatcher::new(scan.clone());

    let event = Event::new("DNS_NAME", "a.example.com", "m");
    let options = EmitOptions {
        abort_if: Some(AbortIf::sync(|_e| CallbackResult::Veto(Some("user policy".into())))),
        ..Default::default()
    };
    dispatcher.emit(event, options, None).await;

    assert!(consumer.received().is_empty());
    assert_eq!(scan.emitted_count("DNS_NAME"), 0);
}
