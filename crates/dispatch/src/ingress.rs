// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatcher's own ingress admission (spec §4.7, last paragraph).
//!
//! Shared by the public `Dispatcher::queue_event` entry point and by the
//! distributor's ancestor re-queue step (spec §4.6 step 2) — both need the
//! same priority-nerf-then-recompute-scope-distance treatment before an
//! event lands on the shared ingress.

use dispatch_core::{Event, ScanPort};

use crate::event_arena::EventArena;
use crate::queue_bundle::QueueBundle;

/// Admit `event` onto the shared ingress, nerfing its priority if it looks
/// out of scope and recomputing its scope distance from its current
/// source. Also writes the updated event back into the arena so later
/// ancestor lookups see the fresh state.
pub fn queue_event(mut event: Event, arena: &EventArena, scan: &dyn ScanPort, bundle: &QueueBundle) {
    if event.scope_distance > 0 {
        let in_scope = scan.whitelisted(&event) && !scan.blacklisted(&event);
        if !in_scope {
            event.module_priority += event.scope_distance as i64;
        }
    }

    let parent_distance =
        event.source.and_then(|source_id| arena.get(&source_id)).map(|source| source.scope_distance).unwrap_or(0);
    event.scope_distance = parent_distance + 1;

    arena.insert(event.clone());
    bundle.shared_ingress().put_nowait(event);
}

#[cfg(test)]
#[path = "ingress_tests.rs"]
mod tests;
