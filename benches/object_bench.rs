// Criterion benchmark suite for regex objects.
//
// Run: cargo bench
// Specific group: cargo bench -- exec
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use regexobj::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn log_lines(n: usize) -> String {
    (0..n)
        .map(|i| format!("2024-05-{:02} level=info id={} msg=\"request {}\"\n", i % 28 + 1, i, i))
        .collect()
}

// ---------------------------------------------------------------------------
// 1. compile -- construction cost, plain vs JIT hint
// ---------------------------------------------------------------------------

fn bench_compile(c: &mut Criterion) {
    let patterns: &[(&str, &str)] = &[
        ("literal", "hello"),
        ("date", r"(?<y>\d{4})-(?<m>\d{2})-(?<d>\d{2})"),
        ("backref", r"(\w+)\s+\1"),
    ];

    let mut group = c.benchmark_group("compile");
    for (name, pattern) in patterns {
        group.bench_with_input(BenchmarkId::new("plain", name), pattern, |b, p| {
            b.iter(|| RegexObject::new(black_box(p), "g").unwrap())
        });
        group.bench_with_input(BenchmarkId::new("jit", name), pattern, |b, p| {
            b.iter(|| RegexObject::new_jit(black_box(p), "g").unwrap())
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 2. exec -- cursor-driven iteration vs test
// ---------------------------------------------------------------------------

fn bench_exec(c: &mut Criterion) {
    let text = log_lines(200);
    let mut group = c.benchmark_group("exec");

    group.bench_function("exec_loop", |b| {
        let mut re = RegexObject::new(r"id=(?<id>\d+)", "g").unwrap();
        b.iter(|| {
            let mut count = 0;
            while let Some(m) = re.exec(black_box(&text)).unwrap() {
                count += m.len();
            }
            count
        })
    });

    group.bench_function("test_loop", |b| {
        let mut re = RegexObject::new(r"id=\d+", "g").unwrap();
        b.iter(|| {
            re.set_last_index(0);
            let mut count = 0;
            while re.test(black_box(&text)).unwrap() {
                count += 1;
            }
            count
        })
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// 3. match_all / replace
// ---------------------------------------------------------------------------

fn bench_collect_and_replace(c: &mut Criterion) {
    let text = log_lines(200);
    let mut group = c.benchmark_group("collect_replace");

    group.bench_function("match_all", |b| {
        let mut re = RegexObject::new(r"level=\w+", "g").unwrap();
        b.iter(|| re.match_all(black_box(&text)).unwrap())
    });

    group.bench_function("replace_literal", |b| {
        let re = RegexObject::new(r"(\d{4})-(\d{2})-(\d{2})", "g").unwrap();
        b.iter(|| re.replace(black_box(&text), "$3/$2/$1").unwrap())
    });

    group.bench_function("replace_callback", |b| {
        let re = RegexObject::new(r"(\d{4})-(\d{2})-(\d{2})", "g").unwrap();
        b.iter(|| {
            re.replace(
                black_box(&text),
                Replacement::callback(|args| {
                    Ok(format!(
                        "{}/{}/{}",
                        args.get(3).unwrap_or(""),
                        args.get(2).unwrap_or(""),
                        args.get(1).unwrap_or("")
                    ))
                }),
            )
            .unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_compile, bench_exec, bench_collect_and_replace);
criterion_main!(benches);
