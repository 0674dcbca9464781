// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a [`Path`]: a field name, optionally narrowed to a single entry of a map field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_key: Option<String>,
}

impl PathSegment {
    pub fn new(name: impl Into<String>) -> Self {
        PathSegment {
            name: name.into(),
            map_key: None,
        }
    }

    /// A segment addressing the `key` entry of the map field `name`.
    pub fn keyed(name: impl Into<String>, key: impl Into<String>) -> Self {
        PathSegment {
            name: name.into(),
            map_key: Some(key.into()),
        }
    }
}

/// A non-empty, already parsed field path such as `status.code` or `attributes["http.method"]`.
///
/// Deserializes from the structured form produced by the statement parser, a JSON array of
/// `{"name": ..., "map_key": ...}` objects. The [`Display`](fmt::Display) rendering is canonical:
/// two paths are equal exactly when their renderings are, which makes it suitable as a cache key
/// for compiled accessors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Result<Self, CompileError> {
        if segments.is_empty() {
            return Err(CompileError::EmptyPath);
        }
        Ok(Path(segments))
    }

    /// Builds a path of plain field names, e.g. `["status", "code"]`.
    pub fn from_names<I, S>(names: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path::new(names.into_iter().map(PathSegment::new).collect())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<PathSegment>> for Path {
    type Error = CompileError;

    fn try_from(segments: Vec<PathSegment>) -> Result<Self, Self::Error> {
        Path::new(segments)
    }
}

impl From<Path> for Vec<PathSegment> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.name)?;
            if let Some(key) = &segment.map_key {
                write!(f, "[{key:?}]")?;
            }
        }
        Ok(())
    }
}
