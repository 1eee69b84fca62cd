// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The module collaborator contract (spec §3, §6).
//!
//! Module implementations themselves are out of scope; this crate only
//! defines the surface the dispatcher drives. A module is a concurrently
//! running producer/consumer: the dispatcher pushes accepted events onto
//! its incoming queue via `queue_event`, and later pulls whatever the
//! module emitted off its `outgoing_event_queue`.

use async_trait::async_trait;

use crate::event::Event;
use crate::queue::ShuffleQueue;

/// Coarse module health, surfaced by the status reporter (spec §4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    Running,
    Finished,
    Errored { message: String },
}

impl ModuleStatus {
    pub fn is_errored(&self) -> bool {
        matches!(self, ModuleStatus::Errored { .. })
    }
}

/// An event queued for delivery to a module, paired with the priority it
/// was queued at (spec §4.2's "priority nerf": a module may be handed a
/// lower effective priority than its static configured priority).
#[derive(Debug, Clone)]
pub struct QueuedEvent {
    pub event: Event,
    pub priority: i64,
}

/// The contract the dispatcher drives every registered module through.
///
/// Dyn-compatible (object-safe) so the dispatcher can hold
/// `Arc<dyn ModulePort>` for a heterogeneous set of modules, matching the
/// original's duck-typed `BaseModule` collaborator.
#[async_trait]
pub trait ModulePort: Send + Sync {
    fn name(&self) -> &str;

    /// Static priority; lower numbers run first (spec §4.2).
    fn priority(&self) -> i64;

    /// Hook modules observe every event but do not alter scan state
    /// (spec §4.7, "hook modules run before non-hook modules").
    fn is_hook(&self) -> bool;

    /// Whether this module wants duplicate (already-seen) events
    /// delivered anyway (spec §4.1 "per-module dedup override").
    fn suppress_dupes(&self) -> bool;

    /// Whether this module's own re-emitted duplicates should be accepted
    /// into the outgoing dedup pass rather than dropped (spec §4.1).
    fn accept_dupes(&self) -> bool;

    /// Hand an accepted event to the module's incoming queue.
    async fn queue_event(&self, event: QueuedEvent);

    /// The module's outgoing queue, polled by the worker loop (spec §4.7).
    fn outgoing_event_queue(&self) -> &ShuffleQueue<Event>;

    /// Approximate depth of the module's own incoming queue, used only for
    /// status-reporter introspection (spec §4.8). Defaults to 0 for modules
    /// that do not track this separately from processing.
    fn incoming_qsize(&self) -> usize {
        0
    }

    /// Module-specific override of the outgoing dedup key; `None` means
    /// "use the event's canonical hash" (spec §4.1).
    fn outgoing_dedup_hash(&self, event: &Event) -> Option<u64>;

    /// Whether this event must be retained/promoted regardless of scope
    /// distance, because this module depends on the event's ancestry
    /// (spec §4.6 "graph-important events are never pruned").
    fn is_graph_important(&self, event: &Event) -> bool;

    fn status(&self) -> ModuleStatus;

    /// Approximate resident memory attributable to this module, used only
    /// for status-reporter memory-pressure warnings (spec §4.8).
    fn memory_usage(&self) -> u64;

    /// Force the module into an errored state and optionally drop whatever
    /// it has queued for outgoing delivery (spec §5 "Cancellation").
    async fn set_error_state(&self, message: String, clear_outgoing_queue: bool);
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
