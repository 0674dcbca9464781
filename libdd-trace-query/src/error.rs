// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Error types for `libdd-trace-query`.

use thiserror::Error;

/// A path that does not match the span schema. Raised once, when the path is compiled.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    /// The path has no segment at all.
    #[error("path must contain at least one segment")]
    EmptyPath,

    /// A segment names a field the record does not have.
    #[error("unknown field \"{field}\" on {record}")]
    UnknownField {
        /// The record, or parent field, the name was looked up in.
        record: &'static str,
        field: String,
    },

    /// A map key was given on a field that is not a key/value map.
    #[error("field \"{field}\" does not support map key access")]
    MapKeyNotSupported { field: &'static str },

    /// `resource` or `instrumentation_scope` was not followed by one of its own fields.
    #[error("\"{field}\" must be followed by a field of the nested record")]
    MissingNestedField { field: &'static str },

    /// A segment follows a field that has no children, or follows a map key.
    #[error("unexpected segment \"{segment}\" after field \"{field}\"")]
    UnexpectedSegment {
        field: &'static str,
        segment: String,
    },
}

/// A value that cannot be written to the field an accessor is bound to.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum SetError {
    #[error("field \"{field}\" expects a {expected} value, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field \"{field}\" expects {expected} bytes, got {found}")]
    InvalidIdLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("field \"{field}\" expects a hex encoded identifier")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("value {value} is out of range for field \"{field}\"")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("code {code} is not a member of the enumeration of field \"{field}\"")]
    UnknownEnumCode { field: &'static str, code: i64 },
}

/// Enum symbol lookup failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("enum symbol is missing")]
    MissingSymbol,

    #[error("enum symbol not found: {0}")]
    UnknownSymbol(String),
}

/// Failure to extract a single value from a client request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    #[error("{0} source keys found in the context, can't determine which one to use")]
    AmbiguousValues(usize),
}
