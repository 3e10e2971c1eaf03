use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jt_truncator::{ConfigOverrides, Truncator, Value};

fn generate_log_response(entries: usize) -> Value {
    let base = "The quick brown fox jumps over the lazy dog. Request handled by upstream /api/v2/items with latency spikes and retries. ";
    let rows: Vec<Value> = (0..entries)
        .map(|i| {
            Value::mapping([
                ("id", Value::from(i as i64)),
                ("level", Value::from(if i % 7 == 0 { "error" } else { "info" })),
                ("message", Value::from(base.repeat(1 + i % 5))),
                ("tags", Value::from(vec!["http", "upstream", "retry", "cache"])),
            ])
        })
        .collect();
    Value::mapping([("status", Value::from("ok")), ("data", Value::Sequence(rows))])
}

fn bench_fits_first_try(c: &mut Criterion) {
    let value = generate_log_response(20);
    let truncator = Truncator::default();
    c.bench_function("report_fits_20_entries", |b| {
        b.iter(|| black_box(truncator.report(black_box(&value))))
    });
}

fn bench_shrink_passes(c: &mut Criterion) {
    let value = generate_log_response(2_000);
    for &(name, max_length) in &[("4kb", 4_096), ("16kb", 16_384), ("64kb", 65_536)] {
        let overrides = ConfigOverrides::new()
            .max_length(max_length)
            .max_item_length(2_000)
            .max_items(50)
            .ellipsis("...[%overage%]");
        let truncator = Truncator::new(&overrides).expect("valid bench configuration");
        c.bench_function(&format!("report_2000_entries_{name}"), |b| {
            b.iter(|| black_box(truncator.report(black_box(&value))))
        });
    }
}

fn bench_json_text(c: &mut Criterion) {
    let text = serde_json::to_string(&generate_log_response(500)).expect("serializable fixture");
    let truncator = Truncator::new(&ConfigOverrides::new().max_length(8_192).max_item_length(1_000)).expect("valid bench configuration");
    c.bench_function("report_json_str_500_entries", |b| {
        b.iter(|| black_box(truncator.report_json_str(black_box(&text))))
    });
}

criterion_group!(benches, bench_fits_first_try, bench_shrink_passes, bench_json_text);
criterion_main!(benches);
