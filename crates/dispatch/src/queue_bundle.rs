// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The composite view over the shared ingress queue and every non-hook
//! module's outgoing queue, plus the weighted-random pickup policy
//! (spec §4.2).
//!
//! Weights are `[5, 6-p₁, 6-p₂, …]`: the shared ingress always carries
//! weight 5, lower module priority numbers (which run first) carry higher
//! weight. Pickup draws a weighted permutation without replacement and
//! returns the first non-empty queue's front item, using the
//! Efraimidis-Spirakis key trick (`u^(1/w)`, take the largest key first) —
//! a single pass that avoids reshuffling a live weight vector.

use std::sync::Arc;

use dispatch_core::{Event, ModulePort, ShuffleQueue};
use rand::Rng;

pub const SHARED_INGRESS_WEIGHT: i64 = 5;

/// Draws a weighted permutation of `0..weights.len()` without replacement.
fn weighted_permutation(weights: &[i64]) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    let mut keyed: Vec<(f64, usize)> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let w = (w.max(1)) as f64;
            let u: f64 = rng.gen_range(0.0..1.0_f64).max(f64::MIN_POSITIVE);
            (u.powf(1.0 / w), i)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    keyed.into_iter().map(|(_, i)| i).collect()
}

/// The dispatcher's ingress queue plus a cached, priority-sorted view of
/// non-hook modules' outgoing queues.
pub struct QueueBundle {
    shared_ingress: ShuffleQueue<Event>,
    modules_by_priority: Vec<Arc<dyn ModulePort>>,
}

impl QueueBundle {
    pub fn new(mut non_hook_modules: Vec<Arc<dyn ModulePort>>) -> Self {
        non_hook_modules.sort_by_key(|m| m.priority());
        Self { shared_ingress: ShuffleQueue::new(), modules_by_priority: non_hook_modules }
    }

    pub fn shared_ingress(&self) -> &ShuffleQueue<Event> {
        &self.shared_ingress
    }

    /// Non-hook modules sorted by priority ascending — the fan-out target
    /// list for the distributor (spec §4.6 step 5).
    pub fn non_hook_modules(&self) -> &[Arc<dyn ModulePort>] {
        &self.modules_by_priority
    }

    /// Weights parallel to `[shared_ingress] + modules_by_priority`.
    pub fn weights(&self) -> Vec<i64> {
        let mut weights = vec![SHARED_INGRESS_WEIGHT];
        weights.extend(self.modules_by_priority.iter().map(|m| 6 - m.priority()));
        weights
    }

    /// Pop one event via weighted-random pickup across all queues. `None`
    /// if every queue is currently empty.
    pub fn pickup(&self) -> Option<Event> {
        let weights = self.weights();
        for idx in weighted_permutation(&weights) {
            let popped = if idx == 0 {
                self.shared_ingress.get_nowait()
            } else {
                self.modules_by_priority[idx - 1].outgoing_event_queue().get_nowait()
            };
            if popped.is_some() {
                return popped;
            }
        }
        None
    }

    /// Approximate, non-atomic total queued-event count across every
    /// queue (spec §11's `incoming_qsize`), for status reporting only.
    pub fn approx_total_len(&self) -> usize {
        let mut total = self.shared_ingress.len();
        for module in &self.modules_by_priority {
            total += module.outgoing_event_queue().len();
        }
        total
    }

    /// Approximate, non-atomic per-event-type breakdown of
    /// [`Self::approx_total_len`], for status reporting only. Snapshots
    /// each queue's contents without draining it, so it can disagree with
    /// `approx_total_len` by whatever moved between the two passes.
    pub fn queued_event_types(&self) -> std::collections::HashMap<String, usize> {
        let mut counts = std::collections::HashMap::new();
        for event in self.shared_ingress.snapshot() {
            *counts.entry(event.event_type.clone()).or_insert(0) += 1;
        }
        for module in &self.modules_by_priority {
            for event in module.outgoing_event_queue().snapshot() {
                *counts.entry(event.event_type.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
#[path = "queue_bundle_tests.rs"]
mod tests;
