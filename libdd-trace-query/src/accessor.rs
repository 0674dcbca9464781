// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::context::SpanTransformContext;
use crate::error::{CompileError, SetError};
use crate::fields::{lookup, EntryOps, FieldDescriptor, FieldKind, FieldOps, SPAN_FIELDS};
use crate::path::{Path, PathSegment};
use crate::value::Value;
use std::fmt;
use tracing::debug;

/// Reads and writes the span field a [`Path`] refers to.
///
/// Built once by [`compile`]; the path is validated and resolved at that point, so `get` and
/// `set` do no lookup of their own. An accessor holds no mutable state: it can be shared across
/// threads and applied to any number of spans.
pub struct CompiledAccessor {
    path: Path,
    binding: Binding,
}

enum Binding {
    Field(&'static FieldOps),
    Entry { ops: &'static EntryOps, key: String },
}

/// Compiles `path` against the span schema.
///
/// The first segment names a span field, or `resource` / `instrumentation_scope` followed by a
/// field of that record. Any mismatch with the schema fails here, never at evaluation time.
pub fn compile(path: &Path) -> Result<CompiledAccessor, CompileError> {
    let binding = bind(SPAN_FIELDS, "span", path.segments())?;
    debug!(path = %path, "Compiled span path accessor");
    Ok(CompiledAccessor {
        path: path.clone(),
        binding,
    })
}

fn bind(
    fields: &'static [FieldDescriptor],
    record: &'static str,
    segments: &[PathSegment],
) -> Result<Binding, CompileError> {
    let (segment, rest) = segments.split_first().ok_or(CompileError::EmptyPath)?;
    let field = lookup(fields, &segment.name).ok_or_else(|| CompileError::UnknownField {
        record,
        field: segment.name.clone(),
    })?;

    match &field.kind {
        FieldKind::Record { record, fields } => {
            if segment.map_key.is_some() {
                return Err(CompileError::MapKeyNotSupported { field: field.name });
            }
            if rest.is_empty() {
                return Err(CompileError::MissingNestedField { field: field.name });
            }
            bind(fields, record, rest)
        }
        FieldKind::Leaf(ops) => match (&segment.map_key, rest.first()) {
            (None, None) => Ok(Binding::Field(ops)),
            (Some(key), None) => match &ops.entry {
                Some(entry) => Ok(Binding::Entry {
                    ops: entry,
                    key: key.clone(),
                }),
                None => Err(CompileError::MapKeyNotSupported { field: field.name }),
            },
            (None, Some(_)) if !ops.children.is_empty() => bind(ops.children, field.name, rest),
            (_, Some(next)) => Err(CompileError::UnexpectedSegment {
                field: field.name,
                segment: next.name.clone(),
            }),
        },
    }
}

impl CompiledAccessor {
    /// The path this accessor was compiled from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the field.
    ///
    /// Returns `None` only for a map entry that is not present; whole fields always have a value.
    /// Record-shaped values are copies, changing them does not change the span.
    pub fn get(&self, ctx: &SpanTransformContext<'_>) -> Option<Value> {
        match &self.binding {
            Binding::Field(ops) => Some((ops.get)(ctx)),
            Binding::Entry { ops, key } => (ops.get)(ctx, key),
        }
    }

    /// Writes the field.
    ///
    /// Map entries are upserted and leave the rest of the map untouched. Whole maps and lists are
    /// replaced, not merged. On error the span is left unchanged.
    pub fn set(&self, ctx: &mut SpanTransformContext<'_>, value: Value) -> Result<(), SetError> {
        match &self.binding {
            Binding::Field(ops) => (ops.set)(ctx, value),
            Binding::Entry { ops, key } => (ops.set)(ctx, key, value),
        }
    }
}

impl fmt::Debug for CompiledAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledAccessor")
            .field("path", &self.path.to_string())
            .finish()
    }
}

impl TryFrom<&Path> for CompiledAccessor {
    type Error = CompileError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        compile(path)
    }
}
