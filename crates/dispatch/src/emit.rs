// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The public `emit()` operation: blacklist/whitelist scoping, callback
//! invocation, abort evaluation, then handoff to the distributor
//! (spec §4.5).

use dispatch_core::{AbortIf, CallbackResult, DispatchError, Event, ModulePort, OnSuccess, ScanPort};

use crate::dedup::DedupTracker;
use crate::distributor;
use crate::event_arena::EventArena;
use crate::precheck::precheck;
use crate::queue_bundle::QueueBundle;
use crate::scope::acatch;

/// Rejects an event whose mandatory fields were left empty, e.g. by an
/// `on_success` hook that cleared `data` while rewriting it. The only
/// source of `DispatchError::Validation` in the pipeline.
fn validate(event: &Event) -> Result<(), DispatchError> {
    if event.event_type.trim().is_empty() {
        return Err(DispatchError::Validation("event_type is empty".into()));
    }
    if event.data.trim().is_empty() {
        return Err(DispatchError::Validation("data is empty".into()));
    }
    Ok(())
}

/// Optional per-call callbacks accepted by [`emit`], mirroring the
/// original's `abort_if`/`on_success_callback`/`quick` keyword arguments.
#[derive(Default)]
pub struct EmitOptions {
    pub abort_if: Option<AbortIf>,
    pub on_success_callback: Option<OnSuccess>,
    pub quick: bool,
}

impl EmitOptions {
    fn callbacks_requested(&self) -> bool {
        self.abort_if.is_some() || self.on_success_callback.is_some()
    }
}

pub async fn emit(
    mut event: Event,
    options: EmitOptions,
    arena: &EventArena,
    dedup: &DedupTracker,
    scan: &dyn ScanPort,
    bundle: &QueueBundle,
    producer_module: Option<&dyn ModulePort>,
) {
    let quick = (options.quick || event.quick_emit) && !options.callbacks_requested();

    if !precheck(&event, arena, dedup, producer_module) {
        return;
    }

    tracing::debug!(module = %event.module, event_type = %event.event_type, "module raised event");

    if quick {
        tracing::debug!(event_type = %event.event_type, "quick-emitting");
        distributor::distribute(event, arena, dedup, scan, bundle).await;
        return;
    }

    // Blacklist.
    let event_blacklisted = scan.blacklisted(&event) || event.is_blacklisted_tag();
    if event_blacklisted {
        tracing::debug!(event_type = %event.event_type, "omitting blacklisted event");
        return;
    }

    // Whitelist / scope promotion.
    if event.host.is_some() && scan.whitelisted(&event) {
        tracing::debug!(event_type = %event.event_type, "making event in-scope, matches scan target");
        event.scope_distance = 0;
    }

    // Abort check. A failing predicate is swallowed by the failure-absorbing
    // scope and treated as Allow — a broken `abort_if` must not block an
    // otherwise-valid event.
    if let Some(abort_if) = &options.abort_if {
        let outcome = acatch("abort_if", abort_if.call(&event)).await;
        if let Some(CallbackResult::Veto(reason)) = outcome {
            tracing::info!(
                module = %event.module,
                event_type = %event.event_type,
                reason = reason.as_deref().unwrap_or(""),
                "not raising event due to custom criteria in abort_if()"
            );
            return;
        }
    }

    // Success callback, before distribution so it may mutate tags/data. A
    // failing hook is swallowed; the event proceeds unmutated by it.
    if let Some(on_success) = &options.on_success_callback {
        acatch("on_success", on_success.call(&mut event)).await;
    }

    if acatch("validate", std::future::ready(validate(&event))).await.is_none() {
        return;
    }

    distributor::distribute(event, arena, dedup, scan, bundle).await;
}

#[cfg(test)]
#[path = "emit_tests.rs"]
mod tests;
