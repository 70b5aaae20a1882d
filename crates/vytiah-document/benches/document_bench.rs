// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the vytiah-document content-stream engine.
// Benchmarks the tokenize-then-filter hot path on a synthetic stream the
// size of a typical registry extract page.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::{Stream, dictionary};

use vytiah_document::pdf::content;
use vytiah_document::pdf::filter::{RemovalCriterion, filter_operations};

/// A content stream with 500 text lines, every tenth one a watermark.
fn synthetic_stream() -> Stream {
    let mut body = String::from("BT\n");
    for line in 0..500 {
        if line % 10 == 0 {
            body.push_str(&format!("(Користувач Петренко {line}) Tj\n"));
        } else {
            body.push_str(&format!("(record line {line}) Tj\n"));
        }
    }
    body.push_str("ET\n");
    Stream::new(dictionary! {}, body.into_bytes())
}

fn bench_tokenize_and_filter(c: &mut Criterion) {
    let stream = synthetic_stream();
    let criterion = RemovalCriterion::text(["Користувач "]);

    c.bench_function("tokenize (500-op stream)", |b| {
        b.iter(|| {
            let ops = content::tokenize(black_box(&stream)).unwrap();
            black_box(ops);
        });
    });

    let operations = content::tokenize(&stream).unwrap();
    c.bench_function("filter (500-op stream, 50 matches)", |b| {
        b.iter(|| {
            let survivors = filter_operations(black_box(&operations), &criterion);
            black_box(survivors);
        });
    });
}

criterion_group!(benches, bench_tokenize_and_filter);
criterion_main!(benches);
