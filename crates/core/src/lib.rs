// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-core: shared types for the scan event dispatcher.
//!
//! Defines the `Event` the dispatcher moves, the `ModulePort`/`ScanPort`
//! collaborator contracts it drives, the callback adapters used by
//! `emit()`, and the shuffle queue used for fair-queueing. The dispatch
//! loop itself lives in `dispatch-engine`; this crate only holds the
//! vocabulary both that crate and module implementations share.

pub mod macros;

pub mod callback;
pub mod error;
pub mod event;
pub mod id;
pub mod module;
pub mod queue;
pub mod scan;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use callback::{AbortIf, BoxFuture, CallbackResult, OnSuccess};
pub use error::DispatchError;
pub use event::{Event, EventId, TARGET_MODULE};
pub use id::{short, IdGen, SequentialIdGen, UuidIdGen};
pub use module::{ModulePort, ModuleStatus, QueuedEvent};
pub use queue::{ShuffleQueue, SHUFFLE_WINDOW};
pub use scan::{MemoryStatus, ScanConfig, ScanConfigBuilder, ScanPort};

#[cfg(any(test, feature = "test-support"))]
pub use test_support::{EventBuilder, FakeModule, FakeScan};
