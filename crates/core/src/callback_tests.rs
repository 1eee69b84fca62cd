// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::error::DispatchError;
use crate::event::Event;

#[tokio::test]
async fn sync_abort_if_allows() {
    let cb = AbortIf::sync(|_e| CallbackResult::Allow);
    let e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    assert_eq!(cb.call(&e).await.unwrap(), CallbackResult::Allow);
}

#[tokio::test]
async fn sync_abort_if_vetoes_with_reason() {
    let cb = AbortIf::sync(|_e| CallbackResult::Veto(Some("blocked".into())));
    let e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    let result = cb.call(&e).await.unwrap();
    assert!(result.is_veto());
    assert_eq!(result.reason(), Some("blocked"));
}

#[tokio::test]
async fn async_abort_if_runs() {
    let cb = AbortIf::async_fn(|e| {
        let blacklisted = e.is_blacklisted_tag();
        Box::pin(async move {
            if blacklisted {
                CallbackResult::Veto(Some("blacklisted tag".into()))
            } else {
                CallbackResult::Allow
            }
        })
    });
    let mut e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    e.tags.insert("blacklisted".to_string());
    assert!(cb.call(&e).await.unwrap().is_veto());
}

#[tokio::test]
async fn fallible_abort_if_propagates_its_error() {
    let cb = AbortIf::fallible(|_e| Err(DispatchError::Validation("bad predicate".into())));
    let e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    assert!(cb.call(&e).await.is_err());
}

#[tokio::test]
async fn sync_on_success_mutates_event() {
    let cb = OnSuccess::sync(|e| {
        e.tags.insert("touched".to_string());
    });
    let mut e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    cb.call(&mut e).await.unwrap();
    assert!(e.tags.contains("touched"));
}

#[tokio::test]
async fn async_on_success_mutates_event() {
    let cb = OnSuccess::async_fn(|e| {
        e.tags.insert("async-touched".to_string());
        Box::pin(async {})
    });
    let mut e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    cb.call(&mut e).await.unwrap();
    assert!(e.tags.contains("async-touched"));
}

#[tokio::test]
async fn fallible_on_success_propagates_its_error() {
    let cb = OnSuccess::fallible(|_e| Err(DispatchError::Internal("hook blew up".into())));
    let mut e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    assert!(cb.call(&mut e).await.is_err());
}
