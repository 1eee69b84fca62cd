use std::sync::Arc;

use dispatch_core::{Event, FakeModule, ModulePort};
use dispatch_engine::QueueBundle;

/// S6 — weighted pickup: queue A (priority 1, weight 5), queue B (priority
/// 5, weight 1), shared ingress (weight 5), kept persistently full. Over
/// 10,000 draws, A and ingress each land near 45%, B near 10%.
#[test]
fn weighted_pickup_matches_expected_proportions_over_many_draws() {
    let module_a = Arc::new(FakeModule::new("A").with_priority(1));
    let module_b = Arc::new(FakeModule::new("B").with_priority(5));
    let bundle = QueueBundle::new(vec![module_a.clone() as Arc<dyn ModulePort>, module_b.clone() as Arc<dyn ModulePort>]);

    const DRAWS: usize = 10_000;
    let mut ingress_hits = 0usize;
    let mut a_hits = 0usize;
    let mut b_hits = 0usize;

    for i in 0..DRAWS {
        bundle.shared_ingress().put_nowait(Event::new("DNS_NAME", format!("ingress-{i}"), "m"));
        module_a.emit(Event::new("DNS_NAME", format!("a-{i}"), "A"));
        module_b.emit(Event::new("DNS_NAME", format!("b-{i}"), "B"));

        let picked = bundle.pickup().expect("all three queues are non-empty");
        match picked.module.as_str() {
            "m" => ingress_hits += 1,
            "A" => a_hits += 1,
            "B" => b_hits += 1,
            other => panic!("unexpected source module: {other}"),
        }
    }

    let ingress_frac = ingress_hits as f64 / DRAWS as f64;
    let a_frac = a_hits as f64 / DRAWS as f64;
    let b_frac = b_hits as f64 / DRAWS as f64;

    assert!((ingress_frac - 0.45).abs() < 0.08, "ingress fraction {ingress_frac} out of bounds");
    assert!((a_frac - 0.45).abs() < 0.08, "module A fraction {a_frac} out of bounds");
    assert!((b_frac - 0.10).abs() < 0.08, "module B fraction {b_frac} out of bounds");
}
