// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Static field tables for the span, its resource and its instrumentation scope.
//!
//! Each known field name maps to a [`FieldDescriptor`]. A descriptor either carries the
//! operations of a leaf field, or points at the table of a nested record (`resource`,
//! `instrumentation_scope`). Leaf operations are plain function pointers taking the whole
//! [`SpanTransformContext`], so a compiled accessor only stores references into these tables.

use crate::context::SpanTransformContext;
use crate::error::SetError;
use crate::record::{AttributeMap, AttributeValue, SpanId, SpanKind, StatusCode, TraceId};
use crate::trace_state;
use crate::value::{Composite, Value};
use bytes::Bytes;

pub(crate) type Getter = fn(&SpanTransformContext<'_>) -> Value;
pub(crate) type Setter = fn(&mut SpanTransformContext<'_>, Value) -> Result<(), SetError>;
pub(crate) type EntryGetter = fn(&SpanTransformContext<'_>, &str) -> Option<Value>;
pub(crate) type EntrySetter = fn(&mut SpanTransformContext<'_>, &str, Value) -> Result<(), SetError>;

pub(crate) struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

pub(crate) enum FieldKind {
    Leaf(FieldOps),
    /// Delegates the following segment to the table of a nested record.
    Record {
        record: &'static str,
        fields: &'static [FieldDescriptor],
    },
}

pub(crate) struct FieldOps {
    pub get: Getter,
    pub set: Setter,
    /// Present on map shaped fields: access to a single entry through a map key.
    pub entry: Option<EntryOps>,
    /// Named sub-fields, e.g. `string` below `trace_id` or `code` below `status`.
    pub children: &'static [FieldDescriptor],
}

pub(crate) struct EntryOps {
    pub get: EntryGetter,
    pub set: EntrySetter,
}

pub(crate) fn lookup(
    fields: &'static [FieldDescriptor],
    name: &str,
) -> Option<&'static FieldDescriptor> {
    fields.iter().find(|field| field.name == name)
}

const fn leaf(name: &'static str, get: Getter, set: Setter) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Leaf(FieldOps {
            get,
            set,
            entry: None,
            children: &[],
        }),
    }
}

const fn map_leaf(
    name: &'static str,
    get: Getter,
    set: Setter,
    entry_get: EntryGetter,
    entry_set: EntrySetter,
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Leaf(FieldOps {
            get,
            set,
            entry: Some(EntryOps {
                get: entry_get,
                set: entry_set,
            }),
            children: &[],
        }),
    }
}

const fn parent(
    name: &'static str,
    get: Getter,
    set: Setter,
    children: &'static [FieldDescriptor],
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Leaf(FieldOps {
            get,
            set,
            entry: None,
            children,
        }),
    }
}

pub(crate) const SPAN_FIELDS: &[FieldDescriptor] = &[
    parent("trace_id", get_trace_id, set_trace_id, TRACE_ID_FIELDS),
    parent("span_id", get_span_id, set_span_id, SPAN_ID_FIELDS),
    map_leaf(
        "trace_state",
        get_trace_state,
        set_trace_state,
        get_trace_state_entry,
        set_trace_state_entry,
    ),
    parent(
        "parent_span_id",
        get_parent_span_id,
        set_parent_span_id,
        PARENT_SPAN_ID_FIELDS,
    ),
    leaf("name", get_name, set_name),
    leaf("kind", get_kind, set_kind),
    leaf(
        "start_time_unix_nano",
        get_start_time_unix_nano,
        set_start_time_unix_nano,
    ),
    leaf(
        "end_time_unix_nano",
        get_end_time_unix_nano,
        set_end_time_unix_nano,
    ),
    map_leaf(
        "attributes",
        get_attributes,
        set_attributes,
        get_attribute,
        set_attribute,
    ),
    leaf(
        "dropped_attributes_count",
        get_dropped_attributes_count,
        set_dropped_attributes_count,
    ),
    leaf("events", get_events, set_events),
    leaf(
        "dropped_events_count",
        get_dropped_events_count,
        set_dropped_events_count,
    ),
    leaf("links", get_links, set_links),
    leaf(
        "dropped_links_count",
        get_dropped_links_count,
        set_dropped_links_count,
    ),
    parent("status", get_status, set_status, STATUS_FIELDS),
    FieldDescriptor {
        name: "resource",
        kind: FieldKind::Record {
            record: "resource",
            fields: RESOURCE_FIELDS,
        },
    },
    FieldDescriptor {
        name: "instrumentation_scope",
        kind: FieldKind::Record {
            record: "instrumentation_scope",
            fields: SCOPE_FIELDS,
        },
    },
];

const TRACE_ID_FIELDS: &[FieldDescriptor] =
    &[leaf("string", get_trace_id_string, set_trace_id_string)];

const SPAN_ID_FIELDS: &[FieldDescriptor] =
    &[leaf("string", get_span_id_string, set_span_id_string)];

const PARENT_SPAN_ID_FIELDS: &[FieldDescriptor] = &[leaf(
    "string",
    get_parent_span_id_string,
    set_parent_span_id_string,
)];

const STATUS_FIELDS: &[FieldDescriptor] = &[
    leaf("code", get_status_code, set_status_code),
    leaf("message", get_status_message, set_status_message),
];

const RESOURCE_FIELDS: &[FieldDescriptor] = &[
    map_leaf(
        "attributes",
        get_resource_attributes,
        set_resource_attributes,
        get_resource_attribute,
        set_resource_attribute,
    ),
    leaf(
        "dropped_attributes_count",
        get_resource_dropped_attributes_count,
        set_resource_dropped_attributes_count,
    ),
];

const SCOPE_FIELDS: &[FieldDescriptor] = &[
    leaf("name", get_scope_name, set_scope_name),
    leaf("version", get_scope_version, set_scope_version),
    map_leaf(
        "attributes",
        get_scope_attributes,
        set_scope_attributes,
        get_scope_attribute,
        set_scope_attribute,
    ),
    leaf(
        "dropped_attributes_count",
        get_scope_dropped_attributes_count,
        set_scope_dropped_attributes_count,
    ),
];

// Conversions shared by the field operations below.

fn mismatch(field: &'static str, expected: &'static str, found: &Value) -> SetError {
    SetError::TypeMismatch {
        field,
        expected,
        found: found.kind_name(),
    }
}

fn expect_string(field: &'static str, value: Value) -> Result<String, SetError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(field, "string", &other)),
    }
}

fn expect_int(field: &'static str, value: Value) -> Result<i64, SetError> {
    match value {
        Value::Int(i) => Ok(i),
        other => Err(mismatch(field, "int", &other)),
    }
}

fn expect_u32(field: &'static str, value: Value) -> Result<u32, SetError> {
    let value = expect_int(field, value)?;
    u32::try_from(value).map_err(|_| SetError::OutOfRange { field, value })
}

fn expect_u64(field: &'static str, value: Value) -> Result<u64, SetError> {
    let value = expect_int(field, value)?;
    u64::try_from(value).map_err(|_| SetError::OutOfRange { field, value })
}

fn unsigned_value(value: u64) -> Value {
    Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
}

fn id_value(bytes: &[u8]) -> Value {
    Value::Bytes(Bytes::copy_from_slice(bytes))
}

macro_rules! id_conversions {
    ($raw:ident, $hex:ident, $id:ty) => {
        fn $raw(field: &'static str, value: Value) -> Result<$id, SetError> {
            match value {
                Value::Bytes(bytes) => {
                    <$id>::try_from(&bytes[..]).map_err(|_| SetError::InvalidIdLength {
                        field,
                        expected: <$id>::WIDTH,
                        found: bytes.len(),
                    })
                }
                other => Err(mismatch(field, "bytes", &other)),
            }
        }

        fn $hex(field: &'static str, value: Value) -> Result<$id, SetError> {
            let text = expect_string(field, value)?;
            <$id>::from_hex(&text).map_err(|source| SetError::InvalidHex { field, source })
        }
    };
}

id_conversions!(expect_trace_id, expect_trace_id_hex, TraceId);
id_conversions!(expect_span_id, expect_span_id_hex, SpanId);

fn map_value(map: &AttributeMap) -> Value {
    Value::Composite(Composite::Map(map.clone()))
}

fn replace_map(field: &'static str, map: &mut AttributeMap, value: Value) -> Result<(), SetError> {
    match value {
        Value::Composite(Composite::Map(replacement)) => {
            map.clear();
            map.extend(replacement);
            Ok(())
        }
        other => Err(mismatch(field, "map", &other)),
    }
}

fn entry_value(map: &AttributeMap, key: &str) -> Option<Value> {
    map.get(key).cloned().map(Value::from)
}

fn upsert_entry(
    field: &'static str,
    map: &mut AttributeMap,
    key: &str,
    value: Value,
) -> Result<(), SetError> {
    let value = AttributeValue::try_from(value)
        .map_err(|rejected| mismatch(field, "attribute", &rejected))?;
    map.insert(key.to_owned(), value);
    Ok(())
}

// Span fields.

fn get_trace_id(ctx: &SpanTransformContext<'_>) -> Value {
    id_value(ctx.span.trace_id.as_bytes())
}

fn set_trace_id(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.trace_id = expect_trace_id("trace_id", value)?;
    Ok(())
}

fn get_trace_id_string(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.span.trace_id.to_hex())
}

fn set_trace_id_string(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.trace_id = expect_trace_id_hex("trace_id.string", value)?;
    Ok(())
}

fn get_span_id(ctx: &SpanTransformContext<'_>) -> Value {
    id_value(ctx.span.span_id.as_bytes())
}

fn set_span_id(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.span_id = expect_span_id("span_id", value)?;
    Ok(())
}

fn get_span_id_string(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.span.span_id.to_hex())
}

fn set_span_id_string(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.span_id = expect_span_id_hex("span_id.string", value)?;
    Ok(())
}

fn get_parent_span_id(ctx: &SpanTransformContext<'_>) -> Value {
    id_value(ctx.span.parent_span_id.as_bytes())
}

fn set_parent_span_id(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.parent_span_id = expect_span_id("parent_span_id", value)?;
    Ok(())
}

fn get_parent_span_id_string(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.span.parent_span_id.to_hex())
}

fn set_parent_span_id_string(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.span.parent_span_id = expect_span_id_hex("parent_span_id.string", value)?;
    Ok(())
}

fn get_trace_state(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.span.trace_state.clone())
}

fn set_trace_state(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.trace_state = expect_string("trace_state", value)?;
    Ok(())
}

fn get_trace_state_entry(ctx: &SpanTransformContext<'_>, key: &str) -> Option<Value> {
    trace_state::get(&ctx.span.trace_state, key).map(Value::from)
}

fn set_trace_state_entry(
    ctx: &mut SpanTransformContext<'_>,
    key: &str,
    value: Value,
) -> Result<(), SetError> {
    let value = expect_string("trace_state", value)?;
    ctx.span.trace_state = trace_state::set(&ctx.span.trace_state, key, &value);
    Ok(())
}

fn get_name(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.span.name.clone())
}

fn set_name(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.name = expect_string("name", value)?;
    Ok(())
}

fn get_kind(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.span.kind.code())
}

fn set_kind(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    let code = expect_int("kind", value)?;
    ctx.span.kind = SpanKind::try_from(code)
        .map_err(|code| SetError::UnknownEnumCode { field: "kind", code })?;
    Ok(())
}

fn get_start_time_unix_nano(ctx: &SpanTransformContext<'_>) -> Value {
    unsigned_value(ctx.span.start_time_unix_nano)
}

fn set_start_time_unix_nano(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.span.start_time_unix_nano = expect_u64("start_time_unix_nano", value)?;
    Ok(())
}

fn get_end_time_unix_nano(ctx: &SpanTransformContext<'_>) -> Value {
    unsigned_value(ctx.span.end_time_unix_nano)
}

fn set_end_time_unix_nano(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.span.end_time_unix_nano = expect_u64("end_time_unix_nano", value)?;
    Ok(())
}

fn get_attributes(ctx: &SpanTransformContext<'_>) -> Value {
    map_value(&ctx.span.attributes)
}

fn set_attributes(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    replace_map("attributes", &mut ctx.span.attributes, value)
}

fn get_attribute(ctx: &SpanTransformContext<'_>, key: &str) -> Option<Value> {
    entry_value(&ctx.span.attributes, key)
}

fn set_attribute(
    ctx: &mut SpanTransformContext<'_>,
    key: &str,
    value: Value,
) -> Result<(), SetError> {
    upsert_entry("attributes", &mut ctx.span.attributes, key, value)
}

fn get_dropped_attributes_count(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.span.dropped_attributes_count.into())
}

fn set_dropped_attributes_count(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.span.dropped_attributes_count = expect_u32("dropped_attributes_count", value)?;
    Ok(())
}

fn get_events(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Composite(Composite::Events(ctx.span.events.clone()))
}

fn set_events(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    match value {
        Value::Composite(Composite::Events(events)) => {
            ctx.span.events.clear();
            ctx.span.events.extend(events);
            Ok(())
        }
        other => Err(mismatch("events", "events", &other)),
    }
}

fn get_dropped_events_count(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.span.dropped_events_count.into())
}

fn set_dropped_events_count(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.span.dropped_events_count = expect_u32("dropped_events_count", value)?;
    Ok(())
}

fn get_links(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Composite(Composite::Links(ctx.span.links.clone()))
}

fn set_links(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    match value {
        Value::Composite(Composite::Links(links)) => {
            ctx.span.links.clear();
            ctx.span.links.extend(links);
            Ok(())
        }
        other => Err(mismatch("links", "links", &other)),
    }
}

fn get_dropped_links_count(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.span.dropped_links_count.into())
}

fn set_dropped_links_count(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.span.dropped_links_count = expect_u32("dropped_links_count", value)?;
    Ok(())
}

fn get_status(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Composite(Composite::Status(ctx.span.status.clone()))
}

fn set_status(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    match value {
        Value::Composite(Composite::Status(status)) => {
            ctx.span.status = status;
            Ok(())
        }
        other => Err(mismatch("status", "status", &other)),
    }
}

fn get_status_code(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.span.status.code.code())
}

fn set_status_code(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    let code = expect_int("status.code", value)?;
    ctx.span.status.code = StatusCode::try_from(code).map_err(|code| {
        SetError::UnknownEnumCode {
            field: "status.code",
            code,
        }
    })?;
    Ok(())
}

fn get_status_message(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.span.status.message.clone())
}

fn set_status_message(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.span.status.message = expect_string("status.message", value)?;
    Ok(())
}

// Resource fields.

fn get_resource_attributes(ctx: &SpanTransformContext<'_>) -> Value {
    map_value(&ctx.resource.attributes)
}

fn set_resource_attributes(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    replace_map("resource.attributes", &mut ctx.resource.attributes, value)
}

fn get_resource_attribute(ctx: &SpanTransformContext<'_>, key: &str) -> Option<Value> {
    entry_value(&ctx.resource.attributes, key)
}

fn set_resource_attribute(
    ctx: &mut SpanTransformContext<'_>,
    key: &str,
    value: Value,
) -> Result<(), SetError> {
    upsert_entry(
        "resource.attributes",
        &mut ctx.resource.attributes,
        key,
        value,
    )
}

fn get_resource_dropped_attributes_count(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.resource.dropped_attributes_count.into())
}

fn set_resource_dropped_attributes_count(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.resource.dropped_attributes_count =
        expect_u32("resource.dropped_attributes_count", value)?;
    Ok(())
}

// Instrumentation scope fields.

fn get_scope_name(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.instrumentation_scope.name.clone())
}

fn set_scope_name(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.instrumentation_scope.name = expect_string("instrumentation_scope.name", value)?;
    Ok(())
}

fn get_scope_version(ctx: &SpanTransformContext<'_>) -> Value {
    Value::String(ctx.instrumentation_scope.version.clone())
}

fn set_scope_version(ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
    ctx.instrumentation_scope.version = expect_string("instrumentation_scope.version", value)?;
    Ok(())
}

fn get_scope_attributes(ctx: &SpanTransformContext<'_>) -> Value {
    map_value(&ctx.instrumentation_scope.attributes)
}

fn set_scope_attributes(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    replace_map(
        "instrumentation_scope.attributes",
        &mut ctx.instrumentation_scope.attributes,
        value,
    )
}

fn get_scope_attribute(ctx: &SpanTransformContext<'_>, key: &str) -> Option<Value> {
    entry_value(&ctx.instrumentation_scope.attributes, key)
}

fn set_scope_attribute(
    ctx: &mut SpanTransformContext<'_>,
    key: &str,
    value: Value,
) -> Result<(), SetError> {
    upsert_entry(
        "instrumentation_scope.attributes",
        &mut ctx.instrumentation_scope.attributes,
        key,
        value,
    )
}

fn get_scope_dropped_attributes_count(ctx: &SpanTransformContext<'_>) -> Value {
    Value::Int(ctx.instrumentation_scope.dropped_attributes_count.into())
}

fn set_scope_dropped_attributes_count(
    ctx: &mut SpanTransformContext<'_>,
    value: Value,
) -> Result<(), SetError> {
    ctx.instrumentation_scope.dropped_attributes_count =
        expect_u32("instrumentation_scope.dropped_attributes_count", value)?;
    Ok(())
}
