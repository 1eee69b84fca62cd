// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scope-distance internalization, ancestor promotion, scan-global dedup,
//! and fan-out to consumer modules (spec §4.6).

use dispatch_core::{Event, QueuedEvent, ScanPort};

use crate::dedup::DedupTracker;
use crate::event_arena::EventArena;
use crate::ingress;
use crate::queue_bundle::QueueBundle;

pub async fn distribute(
    mut event: Event,
    arena: &EventArena,
    dedup: &DedupTracker,
    scan: &dyn ScanPort,
    bundle: &QueueBundle,
) {
    let scope_report_distance = scan.scope_report_distance();

    // 1. Report-distance internalization.
    let will_output = event.always_emit || event.scope_distance <= scope_report_distance;
    if !will_output {
        tracing::debug!(
            event_type = %event.event_type,
            scope_distance = event.scope_distance,
            scope_report_distance,
            "making event internal, outside report distance"
        );
        event.internal = true;
    }

    // 2. Ancestor promotion: preserve the chain of parents if we just
    // discovered something interesting from an internal event.
    if let Some(source_id) = event.source {
        if let Some(mut source) = arena.get(&source_id) {
            let event_externally_visible = !event.internal || event.graph_important;
            if source.internal && event_externally_visible {
                if source.scope_distance <= scope_report_distance {
                    source.internal = false;
                }
                if !source.graph_important {
                    source.graph_important = true;
                    tracing::debug!(
                        ancestor_type = %source.event_type,
                        event_type = %event.event_type,
                        "re-queuing internal ancestor with promoted descendant"
                    );
                    ingress::queue_event(source, arena, scan, bundle);
                } else {
                    let internal = source.internal;
                    arena.update(&source_id, |s| s.internal = internal);
                }
            }
        }
    }

    arena.insert(event.clone());

    // 3. Scan-global dedup.
    let is_outgoing_duplicate = dedup.check_and_add_outgoing(&event);
    if is_outgoing_duplicate {
        tracing::debug!(module = %event.module, event_type = %event.event_type, "duplicate event");
    }

    // 4. Word-cloud absorption: in-scope (scope_distance == 0) and not a
    // duplicate. `scope_distance` is unsigned here, so the original's
    // `-1 < scope_distance < 1` window collapses to exactly zero.
    if !is_outgoing_duplicate && event.scope_distance == 0 {
        scan.absorb_word_cloud(&event).await;
    }

    // 5. Fan-out to non-hook modules.
    for module in bundle.non_hook_modules() {
        let acceptable_dup = !is_outgoing_duplicate || module.accept_dupes();
        let graph_important = module.is_graph_important(&event);
        if acceptable_dup || graph_important {
            module
                .queue_event(QueuedEvent { event: event.clone(), priority: event.module_priority })
                .await;
        }
    }

    scan.record_emitted(&event.event_type);
}

#[cfg(test)]
#[path = "distributor_tests.rs"]
mod tests;
