// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use criterion::{black_box, criterion_group, Criterion};
use libdd_trace_query::record::{AttributeValue, InstrumentationScope, Resource, Span};
use libdd_trace_query::{compile, Path, PathSegment, SpanTransformContext, Value};

fn paths() -> Vec<Path> {
    [
        vec![PathSegment::new("name")],
        vec![PathSegment::new("trace_id"), PathSegment::new("string")],
        vec![PathSegment::new("status"), PathSegment::new("code")],
        vec![PathSegment::keyed("attributes", "http.method")],
        vec![PathSegment::keyed("trace_state", "dd")],
        vec![
            PathSegment::new("resource"),
            PathSegment::keyed("attributes", "service.name"),
        ],
    ]
    .into_iter()
    .filter_map(|segments| Path::new(segments).ok())
    .collect()
}

fn span() -> Span {
    let mut span = Span {
        name: "GET /users/:id".to_owned(),
        trace_state: "dd=s:1;o:rum,vendor=abc".to_owned(),
        ..Default::default()
    };
    for i in 0..32 {
        span.attributes
            .insert(format!("attr.{i}"), AttributeValue::Int(i));
    }
    span.attributes.insert(
        "http.method".to_owned(),
        AttributeValue::String("GET".to_owned()),
    );
    span
}

fn compile_benchmark(c: &mut Criterion) {
    let paths = paths();
    c.bench_function("accessor/compile", |b| {
        b.iter(|| {
            for path in &paths {
                let _ = black_box(compile(black_box(path)));
            }
        })
    });
}

fn get_set_benchmark(c: &mut Criterion) {
    let accessors: Vec<_> = paths().iter().filter_map(|p| compile(p).ok()).collect();
    let mut span = span();
    let mut scope = InstrumentationScope::default();
    let mut resource = Resource::default();
    let mut ctx = SpanTransformContext::new(&mut span, &mut scope, &mut resource);

    let mut group = c.benchmark_group("accessor");
    group.bench_function("get", |b| {
        b.iter(|| {
            for accessor in &accessors {
                black_box(accessor.get(&ctx));
            }
        })
    });

    let Some(attribute) = accessors.get(3) else {
        return;
    };
    group.bench_function("set_attribute", |b| {
        b.iter(|| {
            let _ = black_box(attribute.set(&mut ctx, Value::from("POST")));
        })
    });
    group.finish();
}

criterion_group!(benches, compile_benchmark, get_set_benchmark);
