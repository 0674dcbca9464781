// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! In-memory span model the accessors operate on.
//!
//! The layout follows the OTLP trace data model: a span carries fixed-width identifiers, a W3C
//! `tracestate` string, enum-coded kind and status, and insertion-ordered attribute maps. Events
//! and links are owned sub-records. The resource and instrumentation scope a span belongs to are
//! separate records, handed to accessors alongside the span.

use crate::value::ArrayValue;
use bytes::Bytes;
use hex::FromHex;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Attribute map preserving insertion order. Upserting an existing key keeps its position.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// Stored form of an attribute value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Bytes(Bytes),
    Array(ArrayValue),
    Map(AttributeMap),
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $width:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name([u8; $width]);

        impl $name {
            /// Width of the identifier in bytes.
            pub const WIDTH: usize = $width;

            pub const fn new(bytes: [u8; $width]) -> Self {
                $name(bytes)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Decodes a hex string of exactly `2 * WIDTH` characters.
            pub fn from_hex(text: &str) -> Result<Self, hex::FromHexError> {
                <[u8; $width]>::from_hex(text).map($name)
            }

            /// Lowercase hex encoding.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// An all-zero identifier is the "unset" value.
            pub fn is_empty(&self) -> bool {
                self.0 == [0; $width]
            }
        }

        impl From<[u8; $width]> for $name {
            fn from(bytes: [u8; $width]) -> Self {
                $name(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; $width]>::try_from(bytes).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

identifier!(
    /// 16 byte trace identifier.
    TraceId,
    16
);
identifier!(
    /// 8 byte span identifier.
    SpanId,
    8
);

/// Span kind, stored by its OTLP code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum SpanKind {
    #[default]
    Unspecified = 0,
    Internal = 1,
    Server = 2,
    Client = 3,
    Producer = 4,
    Consumer = 5,
}

impl SpanKind {
    pub const ALL: [SpanKind; 6] = [
        SpanKind::Unspecified,
        SpanKind::Internal,
        SpanKind::Server,
        SpanKind::Client,
        SpanKind::Producer,
        SpanKind::Consumer,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    /// Symbolic name used by query statements.
    pub fn symbol(self) -> &'static str {
        match self {
            SpanKind::Unspecified => "SPAN_KIND_UNSPECIFIED",
            SpanKind::Internal => "SPAN_KIND_INTERNAL",
            SpanKind::Server => "SPAN_KIND_SERVER",
            SpanKind::Client => "SPAN_KIND_CLIENT",
            SpanKind::Producer => "SPAN_KIND_PRODUCER",
            SpanKind::Consumer => "SPAN_KIND_CONSUMER",
        }
    }
}

impl TryFrom<i64> for SpanKind {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, i64> {
        SpanKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(code)
    }
}

/// Status code, stored by its OTLP code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum StatusCode {
    #[default]
    Unset = 0,
    Ok = 1,
    Error = 2,
}

impl StatusCode {
    pub const ALL: [StatusCode; 3] = [StatusCode::Unset, StatusCode::Ok, StatusCode::Error];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn symbol(self) -> &'static str {
        match self {
            StatusCode::Unset => "STATUS_CODE_UNSET",
            StatusCode::Ok => "STATUS_CODE_OK",
            StatusCode::Error => "STATUS_CODE_ERROR",
        }
    }
}

impl TryFrom<i64> for StatusCode {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, i64> {
        StatusCode::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or(code)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SpanEvent {
    pub time_unix_nano: u64,
    pub name: String,
    pub attributes: AttributeMap,
    pub dropped_attributes_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SpanLink {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub trace_state: String,
    pub attributes: AttributeMap,
    pub dropped_attributes_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Span {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    /// W3C `tracestate` list, `key=value` members separated by commas.
    pub trace_state: String,
    pub parent_span_id: SpanId,
    pub name: String,
    pub kind: SpanKind,
    pub start_time_unix_nano: u64,
    pub end_time_unix_nano: u64,
    pub attributes: AttributeMap,
    pub dropped_attributes_count: u32,
    pub events: Vec<SpanEvent>,
    pub dropped_events_count: u32,
    pub links: Vec<SpanLink>,
    pub dropped_links_count: u32,
    pub status: Status,
}

/// The entity that produced the span.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Resource {
    pub attributes: AttributeMap,
    pub dropped_attributes_count: u32,
}

/// The instrumentation library that produced the span.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InstrumentationScope {
    pub name: String,
    pub version: String,
    pub attributes: AttributeMap,
    pub dropped_attributes_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_id_hex() {
        let id = TraceId::new([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(id.to_hex(), "0102030405060708090a0b0c0d0e0f10");
        assert_eq!(id.to_string(), id.to_hex());
        assert_eq!(TraceId::from_hex(&id.to_hex()), Ok(id));
        assert_eq!(TraceId::from_hex("0102030405060708090A0B0C0D0E0F10"), Ok(id));
    }

    #[test]
    fn test_span_id_rejects_wrong_width() {
        assert!(SpanId::from_hex("0102").is_err());
        assert!(SpanId::from_hex("zz02030405060708").is_err());
        assert!(SpanId::try_from([1_u8, 2, 3].as_slice()).is_err());
        assert_eq!(
            SpanId::try_from([1_u8, 2, 3, 4, 5, 6, 7, 8].as_slice()).ok(),
            Some(SpanId::new([1, 2, 3, 4, 5, 6, 7, 8]))
        );
    }

    #[test]
    fn test_empty_identifier() {
        assert!(TraceId::default().is_empty());
        assert!(!SpanId::new([0, 0, 0, 0, 0, 0, 0, 1]).is_empty());
    }

    #[test]
    fn test_span_kind_codes() {
        for kind in SpanKind::ALL {
            assert_eq!(SpanKind::try_from(kind.code()), Ok(kind));
        }
        assert_eq!(SpanKind::Server.code(), 2);
        assert_eq!(SpanKind::try_from(6), Err(6));
    }

    #[test]
    fn test_status_code_codes() {
        for status in StatusCode::ALL {
            assert_eq!(StatusCode::try_from(status.code()), Ok(status));
        }
        assert_eq!(StatusCode::try_from(-1), Err(-1));
    }

    #[test]
    fn test_identifiers_serialize_as_hex() {
        let link = SpanLink {
            span_id: SpanId::new([8, 7, 6, 5, 4, 3, 2, 1]),
            ..Default::default()
        };
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["span_id"], "0807060504030201");
        assert_eq!(json["trace_id"], "00000000000000000000000000000000");
    }
}
