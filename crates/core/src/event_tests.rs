// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn canonical_hash_ignores_lineage() {
    let mut a = Event::new("DNS_NAME", "a.example.com", "moduleA");
    let mut b = Event::new("DNS_NAME", "a.example.com", "moduleB");
    a.source = Some(EventId::new());
    b.source = Some(EventId::new());
    assert_eq!(a.canonical_hash(), b.canonical_hash());
    assert_eq!(a, b);
}

#[test]
fn canonical_hash_differs_on_type_or_data() {
    let a = Event::new("DNS_NAME", "a.example.com", "m");
    let b = Event::new("URL", "a.example.com", "m");
    let c = Event::new("DNS_NAME", "b.example.com", "m");
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn blacklisted_tag_detected() {
    let mut e = Event::new("IP_ADDRESS", "1.2.3.4", "m");
    assert!(!e.is_blacklisted_tag());
    e.tags.insert("blacklisted".to_string());
    assert!(e.is_blacklisted_tag());
}

#[test]
fn new_event_has_sane_defaults() {
    let e = Event::new("DNS_NAME", "example.com", "m");
    assert_eq!(e.scope_distance, 0);
    assert!(!e.internal);
    assert!(!e.dummy);
    assert!(!e.graph_important);
    assert!(e.source.is_none());
}
