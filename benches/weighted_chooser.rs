#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use swarmctl::services::weighted_chooser::{binary_mask, choose, WeightLayer};

fn domain_layer(n: usize) -> WeightLayer {
    (0..n).map(|i| (format!("domain-{i}"), 1.0 + (i % 7) as f64)).collect()
}

fn bench_single_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_chooser/single_layer");
    for &n in &[10usize, 100, 1_000] {
        let layer = domain_layer(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &layer, |b, layer| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| criterion::black_box(choose(std::slice::from_ref(layer), &mut rng).unwrap()));
        });
    }
    group.finish();
}

fn bench_focus_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_chooser/with_focus_layer");
    for &n in &[10usize, 100, 1_000] {
        let domain = domain_layer(n);
        let focus_keys: Vec<String> = domain.keys().step_by(4).cloned().collect();
        let focus = binary_mask(domain.keys(), &focus_keys);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(domain, focus), |b, (domain, focus)| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| criterion::black_box(choose(&[domain.clone(), focus.clone()], &mut rng).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_layer, bench_focus_layer);
criterion_main!(benches);
