use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ghfreq::normalize::{group_by_author, normalize_churn, normalize_commit_activity};
use ghfreq::scale::scale_factor;
use serde_json::{json, Value};

const WEEK: i64 = 604_800;

fn code_frequency(weeks: i64) -> Value {
    Value::Array(
        (0..weeks)
            .map(|i| json!([i * WEEK, (i * 37) % 900, -((i * 13) % 400)]))
            .collect(),
    )
}

fn contributors(authors: usize, weeks: i64) -> Value {
    Value::Array(
        (0..authors)
            .map(|a| {
                let weeks: Vec<Value> = (0..weeks)
                    .map(|i| json!({"w": i * WEEK, "a": 0, "d": 0, "c": (i as usize + a) % 12}))
                    .collect();
                json!({"author": {"login": format!("user{a}")}, "weeks": weeks})
            })
            .collect(),
    )
}

fn bench_pipeline(c: &mut Criterion) {
    // Roughly ten years of history with a hundred contributors.
    let freq = code_frequency(520);
    let contrib = contributors(100, 520);

    c.bench_function("normalize_churn", |b| b.iter(|| normalize_churn(black_box(&freq)).unwrap()));
    c.bench_function("normalize_commit_activity", |b| {
        b.iter(|| normalize_commit_activity(black_box(&contrib)).unwrap())
    });

    let churn = normalize_churn(&freq).unwrap();
    let commits = normalize_commit_activity(&contrib).unwrap();
    c.bench_function("group_and_scale", |b| {
        b.iter(|| {
            let groups = group_by_author(black_box(&commits));
            (groups.len(), scale_factor(&churn, &commits).unwrap())
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
