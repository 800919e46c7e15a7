use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use cluemap::{KdTree, LinearIndex, Point, SpatialIndex};

// Benchmark parameters:
const SEED: u64 = 0;
const NUM_POINTS: usize = 10000; // Number of points in the index
const NUM_QUERIES: usize = 1000;
const DUPLICATE_PROB: f64 = 0.1; // Probability of reusing an earlier point (same address)
const RADIUS: f64 = 0.01;

fn build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("build");
    group.sample_size(10);

    let points = dataset();
    group.bench_function("kdtree", |b| {
        b.iter(|| build_index::<KdTree<usize>>(&points));
    });
    group.bench_function("linear", |b| {
        b.iter(|| build_index::<LinearIndex<usize>>(&points));
    });
    group.finish();
}

fn query(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("query");
    group.sample_size(10);

    let points = dataset();
    let queries = queries();
    let kdtree = build_index::<KdTree<usize>>(&points);
    group.bench_function("kdtree", |b| {
        b.iter(|| query_nearest(&kdtree, &queries));
    });

    let linear = build_index::<LinearIndex<usize>>(&points);
    group.bench_function("linear", |b| {
        b.iter(|| query_nearest(&linear, &queries));
    });
    group.finish();
}

fn query_radius(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("query_radius");
    group.sample_size(10);

    let points = dataset();
    let queries = queries();
    let kdtree = build_index::<KdTree<usize>>(&points);
    group.bench_function("kdtree", |b| {
        b.iter(|| query_within_radius(&kdtree, &queries));
    });

    let linear = build_index::<LinearIndex<usize>>(&points);
    group.bench_function("linear", |b| {
        b.iter(|| query_within_radius(&linear, &queries));
    });
    group.finish();
}

criterion_group!(benches, build, query, query_radius);
criterion_main!(benches);

fn build_index<I: SpatialIndex<usize> + Default>(points: &[Point]) -> I {
    let mut index = I::default();
    for (id, point) in points.iter().enumerate() {
        index.insert(*point, id);
    }
    index
}

fn query_nearest<I: SpatialIndex<usize>>(index: &I, queries: &[Point]) -> usize {
    let mut comparisons = 0;
    for query in queries {
        let (chain, count) = index.nearest(query);
        black_box(chain);
        comparisons += count;
    }
    comparisons
}

fn query_within_radius<I: SpatialIndex<usize>>(index: &I, queries: &[Point]) -> usize {
    let mut found = 0;
    for query in queries {
        index.within_radius(query, RADIUS, |chain| found += chain.len());
    }
    found
}

fn dataset() -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut points: Vec<Point> = Vec::with_capacity(NUM_POINTS);
    for _ in 0..NUM_POINTS {
        if !points.is_empty() && rng.gen_bool(DUPLICATE_PROB) {
            points.push(points[rng.gen_range(0..points.len())]);
        } else {
            points.push(Point::new(rng.gen(), rng.gen()));
        }
    }
    points
}

fn queries() -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    (0..NUM_QUERIES)
        .map(|_| Point::new(rng.gen(), rng.gen()))
        .collect()
}
