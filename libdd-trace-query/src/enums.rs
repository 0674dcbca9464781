// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Resolution of enum symbols such as `SPAN_KIND_SERVER` or `STATUS_CODE_ERROR` to the integer
//! codes stored on spans.

use crate::error::ResolveError;
use crate::record::{SpanKind, StatusCode};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::trace;

/// A closed enumeration whose members can be named in statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumFamily {
    SpanKind,
    StatusCode,
}

impl EnumFamily {
    pub const ALL: [EnumFamily; 2] = [EnumFamily::SpanKind, EnumFamily::StatusCode];

    /// Symbols and codes of every member, in code order.
    pub fn members(self) -> Vec<(&'static str, i64)> {
        match self {
            EnumFamily::SpanKind => SpanKind::ALL
                .iter()
                .map(|kind| (kind.symbol(), kind.code()))
                .collect(),
            EnumFamily::StatusCode => StatusCode::ALL
                .iter()
                .map(|status| (status.symbol(), status.code()))
                .collect(),
        }
    }

    pub fn symbols(self) -> Vec<&'static str> {
        self.members().into_iter().map(|(symbol, _)| symbol).collect()
    }
}

static ENUM_TABLE: LazyLock<HashMap<&'static str, (EnumFamily, i64)>> = LazyLock::new(|| {
    EnumFamily::ALL
        .into_iter()
        .flat_map(|family| {
            family
                .members()
                .into_iter()
                .map(move |(symbol, code)| (symbol, (family, code)))
        })
        .collect()
});

fn lookup(symbol: Option<&str>) -> Result<(EnumFamily, i64), ResolveError> {
    let symbol = symbol.ok_or(ResolveError::MissingSymbol)?;
    ENUM_TABLE.get(symbol).copied().ok_or_else(|| {
        trace!(symbol, "Unknown enum symbol");
        ResolveError::UnknownSymbol(symbol.to_owned())
    })
}

/// Returns the code of an enum symbol, across all families.
///
/// Matching is exact and case sensitive. `None` stands for a statement that names no symbol.
pub fn resolve_enum(symbol: Option<&str>) -> Result<i64, ResolveError> {
    lookup(symbol).map(|(_, code)| code)
}

/// Like [`resolve_enum`], but only accepts members of `family`.
pub fn resolve_enum_in(family: EnumFamily, symbol: &str) -> Result<i64, ResolveError> {
    match lookup(Some(symbol))? {
        (found, code) if found == family => Ok(code),
        _ => Err(ResolveError::UnknownSymbol(symbol.to_owned())),
    }
}
