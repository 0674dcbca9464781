// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::record::{AttributeMap, AttributeValue, SpanEvent, SpanLink, Status};
use bytes::Bytes;
use serde::Serialize;

/// A value read from, or written to, a span field through a compiled accessor.
///
/// Every scalar kind has exactly one variant. Arrays are homogeneous by construction (see
/// [`ArrayValue`]). Record-shaped fields (attribute maps, event and link lists, the status block)
/// travel as a [`Composite`] and are never decomposed by the accessor layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    /// Immutable, reference counted buffer. Storing it into a span never aliases memory the
    /// caller can still mutate.
    Bytes(Bytes),
    Array(ArrayValue),
    Composite(Composite),
}

/// A homogeneous array: one variant per scalar kind, so kinds can never be mixed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayValue {
    String(Vec<String>),
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Double(Vec<f64>),
    Bytes(Vec<Bytes>),
}

/// Opaque handle over a record-shaped field.
///
/// Getters hand out copies, so mutating a composite obtained from `get` never affects the span it
/// was read from; write it back with `set` instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Composite {
    Map(AttributeMap),
    Events(Vec<SpanEvent>),
    Links(Vec<SpanLink>),
    Status(Status),
}

impl Value {
    /// Short name of the value kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::Array(array) => array.kind_name(),
            Value::Composite(composite) => composite.kind_name(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl ArrayValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ArrayValue::String(_) => "array of string",
            ArrayValue::Bool(_) => "array of bool",
            ArrayValue::Int(_) => "array of int",
            ArrayValue::Double(_) => "array of double",
            ArrayValue::Bytes(_) => "array of bytes",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayValue::String(v) => v.len(),
            ArrayValue::Bool(v) => v.len(),
            ArrayValue::Int(v) => v.len(),
            ArrayValue::Double(v) => v.len(),
            ArrayValue::Bytes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Composite {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Composite::Map(_) => "map",
            Composite::Events(_) => "events",
            Composite::Links(_) => "links",
            Composite::Status(_) => "status",
        }
    }
}

macro_rules! impl_from {
    ($($source:ty => |$v:ident| $body:expr;)*) => {
        $(
            impl From<$source> for Value {
                fn from($v: $source) -> Self {
                    $body
                }
            }
        )*
    };
}

impl_from! {
    &str => |v| Value::String(v.to_owned());
    String => |v| Value::String(v);
    bool => |v| Value::Bool(v);
    i64 => |v| Value::Int(v);
    f64 => |v| Value::Double(v);
    Bytes => |v| Value::Bytes(v);
    Vec<u8> => |v| Value::Bytes(Bytes::from(v));
    &[u8] => |v| Value::Bytes(Bytes::copy_from_slice(v));
    Vec<String> => |v| Value::Array(ArrayValue::String(v));
    Vec<&str> => |v| Value::Array(ArrayValue::String(v.into_iter().map(str::to_owned).collect()));
    Vec<bool> => |v| Value::Array(ArrayValue::Bool(v));
    Vec<i64> => |v| Value::Array(ArrayValue::Int(v));
    Vec<f64> => |v| Value::Array(ArrayValue::Double(v));
    Vec<Bytes> => |v| Value::Array(ArrayValue::Bytes(v));
    Vec<Vec<u8>> => |v| Value::Array(ArrayValue::Bytes(v.into_iter().map(Bytes::from).collect()));
    ArrayValue => |v| Value::Array(v);
    Composite => |v| Value::Composite(v);
    AttributeMap => |v| Value::Composite(Composite::Map(v));
    Vec<SpanEvent> => |v| Value::Composite(Composite::Events(v));
    Vec<SpanLink> => |v| Value::Composite(Composite::Links(v));
    Status => |v| Value::Composite(Composite::Status(v));
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(s) => Value::String(s),
            AttributeValue::Bool(b) => Value::Bool(b),
            AttributeValue::Int(i) => Value::Int(i),
            AttributeValue::Double(d) => Value::Double(d),
            AttributeValue::Bytes(b) => Value::Bytes(b),
            AttributeValue::Array(a) => Value::Array(a),
            AttributeValue::Map(m) => Value::Composite(Composite::Map(m)),
        }
    }
}

/// Attribute maps only hold scalars, homogeneous arrays and nested maps. Any other composite is
/// handed back unchanged as the error.
impl TryFrom<Value> for AttributeValue {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(AttributeValue::String(s)),
            Value::Bool(b) => Ok(AttributeValue::Bool(b)),
            Value::Int(i) => Ok(AttributeValue::Int(i)),
            Value::Double(d) => Ok(AttributeValue::Double(d)),
            Value::Bytes(b) => Ok(AttributeValue::Bytes(b)),
            Value::Array(a) => Ok(AttributeValue::Array(a)),
            Value::Composite(Composite::Map(m)) => Ok(AttributeValue::Map(m)),
            other @ Value::Composite(_) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duplicate::duplicate_item;

    #[duplicate_item(
        test_name                  input                              expected;
        [test_kind_string]         [Value::from("a")]                 ["string"];
        [test_kind_bool]           [Value::from(true)]                ["bool"];
        [test_kind_int]            [Value::from(1_i64)]               ["int"];
        [test_kind_double]         [Value::from(1.5_f64)]             ["double"];
        [test_kind_bytes]          [Value::from(vec![1_u8, 2])]       ["bytes"];
        [test_kind_string_array]   [Value::from(vec!["a", "b"])]      ["array of string"];
        [test_kind_bytes_array]    [Value::from(vec![vec![1_u8]])]    ["array of bytes"];
        [test_kind_map]            [Value::from(AttributeMap::new())] ["map"];
        [test_kind_status]         [Value::from(Status::default())]   ["status"];
    )]
    #[test]
    fn test_name() {
        assert_eq!(input.kind_name(), expected);
    }

    #[test]
    fn test_attribute_value_conversion_keeps_shape() {
        let mut nested = AttributeMap::new();
        nested.insert("inner".to_owned(), AttributeValue::Int(1));

        for value in [
            Value::from("text"),
            Value::from(false),
            Value::from(-3_i64),
            Value::from(0.25_f64),
            Value::from(vec![9_u8, 8]),
            Value::from(vec![1.0_f64, 2.0]),
            Value::from(nested),
        ] {
            let attribute = AttributeValue::try_from(value.clone()).unwrap();
            assert_eq!(Value::from(attribute), value);
        }
    }

    #[test]
    fn test_non_map_composite_is_not_an_attribute() {
        let events = Value::from(vec![SpanEvent::default()]);
        assert_eq!(AttributeValue::try_from(events.clone()), Err(events));
    }

    #[test]
    fn test_bytes_do_not_alias_source() {
        let mut source = vec![1_u8, 2, 3];
        let value = Value::from(source.as_slice());
        source[0] = 42;
        assert_eq!(value.as_bytes(), Some([1_u8, 2, 3].as_slice()));
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Value::from("bear").as_str(), Some("bear"));
        assert_eq!(Value::Int(10).as_int(), Some(10));
        assert_eq!(Value::Int(10).as_str(), None);
        assert_eq!(Value::from("10").as_int(), None);
        assert_eq!(Value::Double(1.0).as_int(), None);
        assert_eq!(Value::from("bytes").as_bytes(), None);
    }

    #[test]
    fn test_array_len() {
        assert!(ArrayValue::Int(vec![]).is_empty());
        assert_eq!(ArrayValue::Bool(vec![true, false]).len(), 2);
    }
}
