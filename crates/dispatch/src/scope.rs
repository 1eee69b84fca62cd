// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure-absorbing scope for user-supplied work (spec §7), the direct
//! analogue of the original's `scan._acatch`: run a fallible future,
//! log-and-swallow any error instead of propagating it. `emit()` wraps
//! every callback invocation (`abort_if`, `on_success`) and the validation
//! step in this scope, so a single bad callback or a validation failure
//! drops the offending event instead of taking down the worker loop.

use std::fmt;
use std::future::Future;

use dispatch_core::DispatchError;

/// Runs `fut` to completion; on `Err`, logs at warning and returns `None`.
pub async fn acatch<T, F>(context: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, DispatchError>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(context, error = %err, "swallowed failure in failure-absorbing scope");
            None
        }
    }
}

/// Like [`acatch`] but for errors that do not already carry a [`DispatchError`].
pub async fn acatch_display<T, E, F>(context: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(context, error = %err, "swallowed failure in failure-absorbing scope");
            None
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
