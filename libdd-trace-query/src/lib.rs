// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! `libdd-trace-query` binds field paths of trace query and transformation statements to the
//! span data they name.
//!
//! A [`Path`] such as `attributes["http.method"]` or `resource.attributes["service.name"]` is
//! compiled once into a [`CompiledAccessor`]. The accessor then reads and writes that field on
//! any span handed to it through a [`SpanTransformContext`], without looking the path up again.
//! Enum symbols used in statements (`SPAN_KIND_SERVER`, `STATUS_CODE_ERROR`, ...) resolve to
//! their codes with [`resolve_enum`].
//!
//! ```
//! use libdd_trace_query::{compile, Path, PathSegment, SpanTransformContext, Value};
//! use libdd_trace_query::record::{InstrumentationScope, Resource, Span};
//!
//! let path = Path::new(vec![PathSegment::keyed("attributes", "http.method")]).unwrap();
//! let accessor = compile(&path).unwrap();
//!
//! let (mut span, mut scope, mut resource) =
//!     (Span::default(), InstrumentationScope::default(), Resource::default());
//! let mut ctx = SpanTransformContext::new(&mut span, &mut scope, &mut resource);
//! assert_eq!(accessor.get(&ctx), None);
//! accessor.set(&mut ctx, Value::from("GET")).unwrap();
//! assert_eq!(accessor.get(&ctx), Some(Value::from("GET")));
//! ```

mod accessor;
mod context;
mod enums;
pub mod error;
mod fields;
pub mod header_source;
mod path;
pub mod record;
mod trace_state;
mod value;

pub use accessor::{compile, CompiledAccessor};
pub use context::SpanTransformContext;
pub use enums::{resolve_enum, resolve_enum_in, EnumFamily};
pub use error::{CompileError, ResolveError, SetError, SourceError};
pub use path::{Path, PathSegment};
pub use value::{ArrayValue, Composite, Value};
