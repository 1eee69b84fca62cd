// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-supplied callbacks attached to an individual `emit()` call.
//!
//! Callbacks may be synchronous or asynchronous (spec §4.5, Design Notes
//! "Callable polymorphism"). Both shapes are modeled as a tagged variant so
//! the emit pipeline can await either uniformly without boxing every call
//! site's future type at the call site itself.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::event::Event;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of an `abort_if` predicate: either allow distribution to
/// continue, or veto it with an optional human-readable reason for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackResult {
    Allow,
    Veto(Option<String>),
}

impl CallbackResult {
    pub fn is_veto(&self) -> bool {
        matches!(self, CallbackResult::Veto(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            CallbackResult::Veto(reason) => reason.as_deref(),
            CallbackResult::Allow => None,
        }
    }
}

/// A predicate evaluated before distribution; a `Veto` drops the event.
/// Fallible: a user-supplied predicate may itself fail, which the emit
/// pipeline runs through a failure-absorbing scope (spec §7) rather than
/// propagating.
#[derive(Clone)]
pub enum AbortIf {
    Sync(Arc<dyn Fn(&Event) -> Result<CallbackResult, DispatchError> + Send + Sync>),
    Async(Arc<dyn for<'a> Fn(&'a Event) -> BoxFuture<'a, Result<CallbackResult, DispatchError>> + Send + Sync>),
}

impl AbortIf {
    pub fn sync(f: impl Fn(&Event) -> CallbackResult + Send + Sync + 'static) -> Self {
        AbortIf::Sync(Arc::new(move |event| Ok(f(event))))
    }

    /// Like [`Self::sync`] but for a predicate that may itself fail.
    pub fn fallible(f: impl Fn(&Event) -> Result<CallbackResult, DispatchError> + Send + Sync + 'static) -> Self {
        AbortIf::Sync(Arc::new(f))
    }

    pub fn async_fn(
        f: impl for<'a> Fn(&'a Event) -> BoxFuture<'a, CallbackResult> + Send + Sync + 'static,
    ) -> Self {
        AbortIf::Async(Arc::new(move |event| {
            let fut = f(event);
            Box::pin(async move { Ok(fut.await) })
        }))
    }

    pub async fn call(&self, event: &Event) -> Result<CallbackResult, DispatchError> {
        match self {
            AbortIf::Sync(f) => f(event),
            AbortIf::Async(f) => f(event).await,
        }
    }
}

/// A success hook run just before distribution, with mutable access to the
/// event so it can add tags or otherwise adjust data (spec §4.5 step 5).
/// Fallible for the same reason as [`AbortIf`].
#[derive(Clone)]
pub enum OnSuccess {
    Sync(Arc<dyn Fn(&mut Event) -> Result<(), DispatchError> + Send + Sync>),
    Async(Arc<dyn for<'a> Fn(&'a mut Event) -> BoxFuture<'a, Result<(), DispatchError>> + Send + Sync>),
}

impl OnSuccess {
    pub fn sync(f: impl Fn(&mut Event) + Send + Sync + 'static) -> Self {
        OnSuccess::Sync(Arc::new(move |event| {
            f(event);
            Ok(())
        }))
    }

    /// Like [`Self::sync`] but for a hook that may itself fail.
    pub fn fallible(f: impl Fn(&mut Event) -> Result<(), DispatchError> + Send + Sync + 'static) -> Self {
        OnSuccess::Sync(Arc::new(f))
    }

    pub fn async_fn(f: impl for<'a> Fn(&'a mut Event) -> BoxFuture<'a, ()> + Send + Sync + 'static) -> Self {
        OnSuccess::Async(Arc::new(move |event| {
            let fut = f(event);
            Box::pin(async move {
                fut.await;
                Ok(())
            })
        }))
    }

    pub async fn call(&self, event: &mut Event) -> Result<(), DispatchError> {
        match self {
            OnSuccess::Sync(f) => f(event),
            OnSuccess::Async(f) => f(event).await,
        }
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
