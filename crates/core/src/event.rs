// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The discovery event: the unit that flows through the dispatcher.
//!
//! Events form a DAG through their `source` back-reference. The DAG is
//! never materialized as a tree of owned nodes — events live in an
//! [`EventArena`] and refer to each other by [`EventId`], so the
//! dispatcher can promote or re-tag an ancestor without fighting the
//! borrow checker over a cyclic owning structure.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::define_id;

define_id! {
    /// Opaque arena key for an [`Event`].
    pub struct EventId("evt-");
}

/// Synthetic module name used for events injected directly by the seed step.
pub const TARGET_MODULE: &str = "TARGET";

/// A unit of discovery, carrying typed data and lineage.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub event_type: String,
    pub data: String,
    /// Parent event in the causal chain. `None` only for the scan's root event.
    pub source: Option<EventId>,
    /// Name of the producer module, or [`TARGET_MODULE`] for seeds.
    pub module: String,
    pub scope_distance: u32,
    pub internal: bool,
    pub tags: HashSet<String>,
    pub host: Option<String>,
    pub dummy: bool,
    pub graph_important: bool,
    pub always_emit: bool,
    pub quick_emit: bool,
    /// Mutated by the queueing policy to deprioritize likely-out-of-scope events.
    pub module_priority: i64,
}

impl Event {
    pub fn new(event_type: impl Into<String>, data: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            event_type: event_type.into(),
            data: data.into(),
            source: None,
            module: module.into(),
            scope_distance: 0,
            internal: false,
            tags: HashSet::new(),
            host: None,
            dummy: false,
            graph_important: false,
            always_emit: false,
            quick_emit: false,
            module_priority: 0,
        }
    }

    /// Canonical identity hash of `(type, data)`, per spec: two events are
    /// equal iff this hash matches, irrespective of lineage or module.
    pub fn canonical_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.event_type.hash(&mut hasher);
        self.data.hash(&mut hasher);
        hasher.finish()
    }

    pub fn is_blacklisted_tag(&self) -> bool {
        self.tags.contains("blacklisted")
    }
}

impl PartialEq for Event {
    /// Equality matches the spec's canonical identity: `(type, data)` only.
    /// Two distinct arena entries with identical type/data compare equal,
    /// which is exactly what the self-parent check in the precheck filter
    /// relies on when comparing an event against its own source snapshot.
    fn eq(&self, other: &Self) -> bool {
        self.canonical_hash() == other.canonical_hash()
    }
}

impl Eq for Event {}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
