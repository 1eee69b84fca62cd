// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Arena of all events the dispatcher has ever seen, keyed by [`EventId`].
//!
//! Events form a DAG through their `source` field, but nothing owns that
//! DAG as a tree: an event's parent may need updating (scope distance,
//! `internal`, `graph_important`) long after the event itself was handed
//! off to modules. Keeping every event in one arena and passing IDs around
//! means ancestor promotion (spec's Distributor step 2) is a plain map
//! mutation instead of a borrow-checker fight over shared ownership.

use std::collections::HashMap;

use dispatch_core::{Event, EventId};
use parking_lot::Mutex;

#[derive(Default)]
pub struct EventArena {
    events: Mutex<HashMap<EventId, Event>>,
}

impl EventArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an event under its own ID.
    pub fn insert(&self, event: Event) -> EventId {
        let id = event.id;
        self.events.lock().insert(id, event);
        id
    }

    pub fn get(&self, id: &EventId) -> Option<Event> {
        self.events.lock().get(id).cloned()
    }

    /// Apply `f` to the stored event for `id`, if present, returning its result.
    pub fn update<R>(&self, id: &EventId, f: impl FnOnce(&mut Event) -> R) -> Option<R> {
        self.events.lock().get_mut(id).map(f)
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "event_arena_tests.rs"]
mod tests;
