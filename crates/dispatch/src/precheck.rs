// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cheap rejection of dummy, self-parented, or already-seen events before
//! the expensive emit pipeline runs (spec §4.4).

use dispatch_core::{Event, ModulePort};

use crate::dedup::DedupTracker;
use crate::event_arena::EventArena;

/// Returns `true` iff `event` should proceed to the emit pipeline. As a
/// side effect of acceptance, the incoming dedup fingerprint is recorded
/// (mirrors the original precheck's `add=True` behavior — it always
/// records, even on the graph-important fast path).
pub fn precheck(
    event: &Event,
    arena: &EventArena,
    dedup: &DedupTracker,
    module: Option<&dyn ModulePort>,
) -> bool {
    if event.dummy {
        tracing::warn!(event_type = %event.event_type, data = %event.data, "cannot emit dummy event");
        return false;
    }

    if let Some(source_id) = event.source {
        if let Some(source) = arena.get(&source_id) {
            if *event == source {
                tracing::debug!(event_type = %event.event_type, "skipping event with self as source");
                return false;
            }
        }
    }

    if event.graph_important {
        return true;
    }

    let custom_hash = module.and_then(|m| m.outgoing_dedup_hash(event));
    let suppress_dupes = module.map(|m| m.suppress_dupes()).unwrap_or(true);
    if dedup.check_and_add_incoming(event, custom_hash, suppress_dupes) {
        tracing::debug!(
            event_type = %event.event_type,
            module = %event.module,
            "skipping event because it was already emitted by its module"
        );
        return false;
    }

    true
}

#[cfg(test)]
#[path = "precheck_tests.rs"]
mod tests;
