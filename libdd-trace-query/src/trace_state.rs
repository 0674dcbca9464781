// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Keyed access into a W3C `tracestate` list (`key1=value1,key2=value2`).
//!
//! A member's value is everything after its first `=`, so values may themselves contain `=`.
//! Blank members and whitespace around members are skipped when looking a key up.

use std::ops::Range;

/// Byte range of the value of the first member named `key`, excluding the member's trailing
/// whitespace.
fn value_range(trace_state: &str, key: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    for raw in trace_state.split(',') {
        let member = raw.trim();
        if let Some((k, _)) = member.split_once('=') {
            if k.trim_end() == key {
                let member_start = offset + raw.len() - raw.trim_start().len();
                return Some(member_start + k.len() + 1..member_start + member.len());
            }
        }
        offset += raw.len() + 1;
    }
    None
}

/// Returns the value of the first member named `key`.
pub(crate) fn get<'a>(trace_state: &'a str, key: &str) -> Option<&'a str> {
    value_range(trace_state, key).map(|range| trace_state[range].trim_start())
}

/// Rewrites the value of the first member named `key`. The rest of the list is kept byte for
/// byte. An absent key is added as the leftmost member.
pub(crate) fn set(trace_state: &str, key: &str, value: &str) -> String {
    match value_range(trace_state, key) {
        Some(range) => {
            let mut rewritten = trace_state.to_owned();
            rewritten.replace_range(range, value);
            rewritten
        }
        None if trace_state.trim().is_empty() => format!("{key}={value}"),
        None => format!("{key}={value},{trace_state}"),
    }
}
