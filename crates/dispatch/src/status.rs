// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status reporter (spec §4.8): an introspection snapshot of liveness,
//! memory pressure, and queued-event statistics, with side effects.

use std::collections::HashMap;
use std::sync::Arc;

use dispatch_core::{MemoryStatus, ModuleStatus, ScanPort};

use crate::queue_bundle::QueueBundle;
use crate::task_counter::TaskCounter;

/// Memory-pressure threshold above which the reporter warns (spec §4.8).
pub const MEMORY_PRESSURE_WARN_PERCENT: u8 = 90;

/// Per-module snapshot surfaced alongside the aggregate [`ModulesStatusReport`].
#[derive(Debug, Clone)]
pub struct ModuleStatusEntry {
    pub running: bool,
    pub incoming_qsize: usize,
    pub outgoing_qsize: usize,
    pub errored: bool,
    pub error_message: Option<String>,
    pub memory_bytes: u64,
}

/// A point-in-time snapshot of the dispatcher and every registered module,
/// modeled on the original's verbose status-log rendering: per-module
/// liveness, memory usage ranked descending, and outstanding error
/// messages, plus an approximate per-event-type breakdown of what's
/// currently queued.
#[derive(Debug, Clone)]
pub struct ModulesStatusReport {
    pub modules: HashMap<String, ModuleStatusEntry>,
    pub finished: bool,
    pub tasks: i64,
    pub memory: MemoryStatus,
    pub queued_event_types: HashMap<String, usize>,
}

impl ModulesStatusReport {
    /// `running`: tasks in flight OR events queued anywhere (P5).
    pub fn running(&self) -> bool {
        self.tasks > 0 || self.modules.values().any(|m| m.incoming_qsize > 0 || m.outgoing_qsize > 0)
    }

    /// `active`: running OR any module not yet finished (P5).
    pub fn active(&self) -> bool {
        self.running() || self.modules.values().any(|m| m.running)
    }

    /// Module names ranked by memory usage, highest first.
    fn modules_by_memory_desc(&self) -> Vec<(&str, &ModuleStatusEntry)> {
        let mut ranked: Vec<_> = self.modules.iter().map(|(name, entry)| (name.as_str(), entry)).collect();
        ranked.sort_by(|a, b| b.1.memory_bytes.cmp(&a.1.memory_bytes).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl std::fmt::Display for ModulesStatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "dispatcher: finished={} tasks={}", self.finished, self.tasks)?;

        let mut types: Vec<_> = self.queued_event_types.iter().collect();
        types.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        if !types.is_empty() {
            write!(f, "  queued:")?;
            for (event_type, count) in types {
                write!(f, " {event_type}={count}")?;
            }
            writeln!(f)?;
        }

        for (name, entry) in self.modules_by_memory_desc() {
            writeln!(
                f,
                "  {name}: running={} in={} out={} mem={}B",
                entry.running, entry.incoming_qsize, entry.outgoing_qsize, entry.memory_bytes
            )?;
            if let Some(message) = &entry.error_message {
                writeln!(f, "    errored: {message}")?;
            }
        }
        Ok(())
    }
}

/// Builds a status snapshot. Side effects mirror the original's status
/// loop: a memory-pressure warning above [`MEMORY_PRESSURE_WARN_PERCENT`],
/// and clearing the outgoing queue of a module that is errored but still
/// has events backed up behind it, so a dead module doesn't sit holding
/// memory for events nobody will ever pull.
pub async fn report(scan: &dyn ScanPort, tasks: &Arc<TaskCounter>, bundle: &QueueBundle) -> ModulesStatusReport {
    let memory = scan.memory_status();
    if memory.percent_used >= MEMORY_PRESSURE_WARN_PERCENT {
        tracing::warn!(percent_used = memory.percent_used, "memory pressure high");
    }

    let mut modules = HashMap::new();
    let mut any_running = false;
    for (name, module) in scan.modules() {
        let status = module.status();
        let errored = status.is_errored();
        let running = matches!(status, ModuleStatus::Running);
        any_running |= running;

        let outgoing_qsize = module.outgoing_event_queue().len();
        let error_message = if let ModuleStatus::Errored { message } = &status {
            if outgoing_qsize > 0 {
                tracing::warn!(module = %name, "clearing outgoing queue of errored module");
                module.set_error_state(message.clone(), true).await;
            }
            Some(message.clone())
        } else {
            None
        };

        modules.insert(
            name.clone(),
            ModuleStatusEntry {
                running,
                incoming_qsize: module.incoming_qsize(),
                outgoing_qsize: module.outgoing_event_queue().len(),
                errored,
                error_message,
                memory_bytes: module.memory_usage(),
            },
        );
    }

    ModulesStatusReport {
        modules,
        finished: !any_running,
        tasks: tasks.value(),
        memory,
        queued_event_types: bundle.queued_event_types(),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
