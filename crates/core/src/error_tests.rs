// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn validation_error_displays_message() {
    let err = DispatchError::Validation("missing event_type".into());
    assert_eq!(err.to_string(), "event validation failed: missing event_type");
}

#[test]
fn internal_error_displays_message() {
    let err = DispatchError::Internal("queue closed".into());
    assert_eq!(err.to_string(), "dispatcher loop failed: queue closed");
}
