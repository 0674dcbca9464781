// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::record::{InstrumentationScope, Resource, Span};

/// The records a compiled accessor reads from and writes to while one span is evaluated.
///
/// The context only borrows: the span, its instrumentation scope and its resource stay owned by
/// the caller, and the borrows end with the evaluation. Holding the span mutably for the lifetime
/// of the context gives a single writer per record at any time.
#[derive(Debug)]
pub struct SpanTransformContext<'a> {
    pub span: &'a mut Span,
    pub instrumentation_scope: &'a mut InstrumentationScope,
    pub resource: &'a mut Resource,
}

impl<'a> SpanTransformContext<'a> {
    pub fn new(
        span: &'a mut Span,
        instrumentation_scope: &'a mut InstrumentationScope,
        resource: &'a mut Resource,
    ) -> Self {
        SpanTransformContext {
            span,
            instrumentation_scope,
            resource,
        }
    }
}
