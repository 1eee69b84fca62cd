// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher error taxonomy.
//!
//! `Validation` and user-callback failures are caught at the call site
//! (see `dispatch::scope::acatch`) and logged; they never escape `emit()`.
//! `Internal` exists so `WorkerLoop::run`'s `Result<(), DispatchError>`
//! has somewhere for a future dispatcher-level failure to surface, but no
//! code path in this crate constructs it today.

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("event validation failed: {0}")]
    Validation(String),

    #[error("dispatcher loop failed: {0}")]
    Internal(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
