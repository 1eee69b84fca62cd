// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The top-level dispatcher: owns the arena, dedup tracker, task counter
//! and queue bundle, and exposes the public operations a scan drives it
//! through (spec §2, §4).

use std::sync::{Arc, OnceLock};

use dispatch_core::{DispatchError, Event, ModulePort, ScanPort};

use crate::dedup::DedupTracker;
use crate::emit::{self, EmitOptions};
use crate::event_arena::EventArena;
use crate::ingress;
use crate::queue_bundle::QueueBundle;
use crate::status;
use crate::task_counter::TaskCounter;
use crate::worker_loop;

/// Coordinates event flow between a scan's modules. Construct once per
/// scan; `non_hook_modules` seeds the weighted-pickup bundle, hook modules
/// are discovered from `scan.modules()` directly since they bypass the
/// bundle's weighting entirely (spec §4.7).
pub struct Dispatcher {
    arena: EventArena,
    dedup: DedupTracker,
    tasks: Arc<TaskCounter>,
    bundle: QueueBundle,
    scan: Arc<dyn ScanPort>,
    /// Priority-sorted hook chain, resolved once from `scan.modules()` on
    /// first use and reused for the lifetime of the dispatcher — the
    /// module set is fixed once a scan starts, so there is nothing to
    /// invalidate the cache for.
    hook_modules: OnceLock<Vec<Arc<dyn ModulePort>>>,
}

impl Dispatcher {
    pub fn new(scan: Arc<dyn ScanPort>) -> Self {
        let non_hook_modules: Vec<Arc<dyn ModulePort>> =
            scan.modules().values().filter(|m| !m.is_hook()).cloned().collect();

        Self {
            arena: EventArena::new(),
            dedup: DedupTracker::new(),
            tasks: TaskCounter::new(),
            bundle: QueueBundle::new(non_hook_modules),
            scan,
            hook_modules: OnceLock::new(),
        }
    }

    /// Memoized, priority-sorted hook-module chain (spec §4.7).
    pub fn hook_modules(&self) -> &[Arc<dyn ModulePort>] {
        self.hook_modules.get_or_init(|| worker_loop::compute_hook_modules(self.scan.as_ref()))
    }

    /// Registers `event` directly in the arena without touching any queue,
    /// for bootstrapping the root/target events a scan already knows about
    /// before the seed step runs. Not part of the normal event-flow path.
    pub fn register(&self, event: Event) -> dispatch_core::EventId {
        self.arena.insert(event)
    }

    /// The dispatcher's own ingress admission (spec §4.7, final paragraph):
    /// nerf priority if out of scope, recompute scope distance, enqueue.
    pub fn queue_event(&self, event: Event) {
        ingress::queue_event(event, &self.arena, self.scan.as_ref(), &self.bundle);
    }

    /// Runs the emit pipeline directly for `event`, bypassing the ingress
    /// queue — the entry point producer modules call after raising an
    /// event, mirroring the original's `Scan.emit_event`.
    pub async fn emit(&self, event: Event, options: EmitOptions, producer_module: Option<&dyn ModulePort>) {
        emit::emit(event, options, &self.arena, &self.dedup, self.scan.as_ref(), &self.bundle, producer_module).await;
    }

    /// Seeds initial target events once at scan start (spec §4.7).
    pub async fn seed(&self) {
        worker_loop::seed(&self.arena, self.scan.as_ref(), &self.bundle, self.hook_modules()).await;
    }

    /// Runs the main pull loop until the scan reports `stopped()`.
    pub async fn run(&self) -> Result<(), DispatchError> {
        worker_loop::run(&self.arena, &self.dedup, self.scan.as_ref(), &self.bundle, self.hook_modules(), &self.tasks)
            .await
    }

    /// A point-in-time introspection snapshot (spec §4.8).
    pub async fn status(&self) -> status::ModulesStatusReport {
        status::report(self.scan.as_ref(), &self.tasks, &self.bundle).await
    }

    pub fn task_count(&self) -> i64 {
        self.tasks.value()
    }

    /// Forces `module` into an errored state and clears its outgoing
    /// queue, cancelling its outstanding work synchronously from the
    /// dispatcher's perspective (spec §5 "Cancellation and timeout").
    pub async fn kill_module(&self, name: &str, reason: impl Into<String>) {
        if let Some(module) = self.scan.modules().get(name) {
            module.set_error_state(reason.into(), true).await;
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
