// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incoming (per-producer) and outgoing (scan-global) dedup fingerprint
//! tracking (spec §4.1).

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use dispatch_core::Event;
use parking_lot::Mutex;

/// Tracks the two independent dedup regimes the dispatcher enforces.
///
/// `incoming` entries never shrink for the life of a scan — the spec calls
/// this out explicitly (invariant 4) since modules may legitimately want
/// to know "have I raised this exact event before" for as long as they run.
#[derive(Default)]
pub struct DedupTracker {
    incoming: Mutex<HashSet<u64>>,
    outgoing: Mutex<HashSet<u64>>,
}

fn incoming_fingerprint(event: &Event, custom_hash: Option<u64>) -> u64 {
    match custom_hash {
        Some(h) => h,
        None => {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            event.canonical_hash().hash(&mut hasher);
            event.module.hash(&mut hasher);
            hasher.finish()
        }
    }
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks and records the incoming fingerprint. `custom_hash` is the
    /// module's `outgoing_dedup_hash` override, if any. Returns `true` iff
    /// the fingerprint was already present AND `suppress_dupes` is set —
    /// i.e. this event should be treated as a duplicate.
    pub fn check_and_add_incoming(&self, event: &Event, custom_hash: Option<u64>, suppress_dupes: bool) -> bool {
        let fingerprint = incoming_fingerprint(event, custom_hash);
        let mut incoming = self.incoming.lock();
        let already_present = incoming.contains(&fingerprint);
        incoming.insert(fingerprint);
        suppress_dupes && already_present
    }

    /// Like [`Self::check_and_add_incoming`] but without mutating state.
    pub fn is_incoming_duplicate(&self, event: &Event, custom_hash: Option<u64>) -> bool {
        let fingerprint = incoming_fingerprint(event, custom_hash);
        self.incoming.lock().contains(&fingerprint)
    }

    /// Checks and records the scan-global fingerprint. Returns `true` iff
    /// an event with the same canonical identity was already recorded.
    pub fn check_and_add_outgoing(&self, event: &Event) -> bool {
        let fingerprint = event.canonical_hash();
        let mut outgoing = self.outgoing.lock();
        let already_present = outgoing.contains(&fingerprint);
        outgoing.insert(fingerprint);
        already_present
    }

    pub fn is_outgoing_duplicate(&self, event: &Event) -> bool {
        self.outgoing.lock().contains(&event.canonical_hash())
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
