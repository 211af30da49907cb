use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use vote_tally_pipeline::processor::{resolve_delta_str, success_rate};

/// Benchmark scoring a single target
fn single_score(c: &mut Criterion) {
    c.bench_function("success_rate_single", |b| {
        b.iter(|| success_rate(black_box(1_234), black_box(87)))
    });
}

/// Benchmark scoring a page of targets with mixed vote distributions
fn page_of_scores(c: &mut Criterion) {
    let counters: Vec<(u64, u64)> = (0..500u64).map(|i| (i * 7 % 311, i * 3 % 97)).collect();

    c.bench_function("success_rate_page_500", |b| {
        b.iter_batched(
            || counters.clone(),
            |counters| {
                counters
                    .iter()
                    .map(|(up, down)| success_rate(*up, *down))
                    .sum::<f64>()
            },
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark resolving deltas from operation names
fn delta_resolution(c: &mut Criterion) {
    let transitions = [
        ("create", Some(true), None),
        ("update", Some(false), Some(true)),
        ("update", Some(true), Some(true)),
        ("delete", None, Some(false)),
    ];

    c.bench_function("resolve_delta_str", |b| {
        b.iter(|| {
            for (operation, new_value, old_value) in transitions {
                let _ = black_box(resolve_delta_str(operation, new_value, old_value));
            }
        })
    });
}

criterion_group!(benches, single_score, page_of_scores, delta_resolution);
criterion_main!(benches);
