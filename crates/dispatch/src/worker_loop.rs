// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The main pull loop and the one-time seed step (spec §4.7).

use std::sync::Arc;
use std::time::Duration;

use dispatch_core::{DispatchError, Event, ModulePort, ScanPort};

use crate::dedup::DedupTracker;
use crate::emit::{self, EmitOptions};
use crate::event_arena::EventArena;
use crate::queue_bundle::QueueBundle;
use crate::task_counter::TaskCounter;

/// Cooperative sleep when every queue came up empty on a pickup attempt.
pub const EMPTY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Post-seed settle delay before the scan is marked initialized. The
/// original carries this same duration with no documented rationale; it is
/// preserved as a yield point rather than reverse-engineered into something
/// it might not be.
pub const SEED_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Computes the priority-sorted hook-module chain once; callers memoize
/// the result (see `Dispatcher::hook_modules`) rather than re-filtering
/// `scan.modules()` on every pickup.
pub fn compute_hook_modules(scan: &dyn ScanPort) -> Vec<Arc<dyn ModulePort>> {
    let mut hooks: Vec<_> = scan.modules().values().filter(|m| m.is_hook()).cloned().collect();
    hooks.sort_by_key(|m| m.priority());
    hooks
}

/// One pickup attempt: drain the last hook module's queue if hooks are
/// configured (the hook chain is itself the dispatcher's sole producer in
/// that case), otherwise defer to the weighted-pickup policy.
fn pickup(hooks: &[Arc<dyn ModulePort>], bundle: &QueueBundle) -> Option<Event> {
    match hooks.last() {
        Some(hook) => hook.outgoing_event_queue().get_nowait(),
        None => bundle.pickup(),
    }
}

/// Runs the dispatcher's pull loop until the scan reports `stopped()`.
///
/// Only an internal, unrecoverable failure returns `Err` here — matching
/// the fail-stop-only-at-the-top policy; validation and callback failures
/// are caught and logged inside `emit()` and never propagate this far.
pub async fn run(
    arena: &EventArena,
    dedup: &DedupTracker,
    scan: &dyn ScanPort,
    bundle: &QueueBundle,
    hooks: &[Arc<dyn ModulePort>],
    tasks: &Arc<TaskCounter>,
) -> Result<(), DispatchError> {
    while !scan.stopped() {
        let picked = {
            let _guard = tasks.count("pickup");
            pickup(hooks, bundle)
        };

        let Some(event) = picked else {
            tokio::time::sleep(EMPTY_POLL_INTERVAL).await;
            continue;
        };

        let _guard = tasks.count(event.event_type.clone());
        let producer_module = scan.modules().get(&event.module).map(|m| m.as_ref());
        emit::emit(event, EmitOptions::default(), arena, dedup, scan, bundle, producer_module).await;
    }
    Ok(())
}

/// Seeds initial target events: sorted by payload length ascending,
/// prefixed by the scan's root event, forced to scope-distance zero, fed
/// into the first hook module if hooks exist or the shared ingress
/// otherwise. Bypasses [`crate::ingress::queue_event`]'s recompute — seed
/// scope distance is fixed, not derived from a source.
pub async fn seed(arena: &EventArena, scan: &dyn ScanPort, bundle: &QueueBundle, hooks: &[Arc<dyn ModulePort>]) {
    let mut targets: Vec<Event> = scan.target_events().iter().filter_map(|id| arena.get(id)).collect();
    targets.sort_by_key(|event| event.data.len());

    let mut seeds = Vec::with_capacity(targets.len() + 1);
    if let Some(root) = arena.get(&scan.root_event()) {
        seeds.push(root);
    }
    seeds.extend(targets);

    let sink = hooks.first();
    for mut event in seeds {
        event.scope_distance = 0;
        event.internal = false;
        arena.insert(event.clone());
        match &sink {
            Some(hook) => hook.outgoing_event_queue().put_nowait(event),
            None => bundle.shared_ingress().put_nowait(event),
        }
    }

    tokio::time::sleep(SEED_SETTLE_DELAY).await;
    scan.mark_finished_init();
}

#[cfg(test)]
#[path = "worker_loop_tests.rs"]
mod tests;
