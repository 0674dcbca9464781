// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use criterion::{black_box, criterion_group, Criterion};
use libdd_trace_query::{resolve_enum, EnumFamily};

fn resolve_enum_benchmark(c: &mut Criterion) {
    let mut symbols: Vec<&str> = EnumFamily::ALL
        .iter()
        .flat_map(|family| family.symbols())
        .collect();
    symbols.push("not an enum");

    c.bench_function("resolve_enum", |b| {
        b.iter(|| {
            for symbol in &symbols {
                let _ = black_box(resolve_enum(black_box(Some(*symbol))));
            }
        })
    });
}

criterion_group!(benches, resolve_enum_benchmark);
