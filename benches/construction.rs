//! Benchmarks for CSR construction, storage maintenance and core numbers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sparrow::{build_csr_from_source, core_numbers, symmetrize, CsrMatrix, NonzeroSource, TripletMatrix};

/// Random square triplet list with about `avg_degree` entries per row, unordered
fn random_triplets(n: usize, avg_degree: usize) -> TripletMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let nnz = n * avg_degree;
    let mut triplets = TripletMatrix::new(n, n);
    for _ in 0..nnz {
        triplets.push(rng.gen_range(0..n), rng.gen_range(0..n), rng.gen::<f64>());
    }
    triplets
}

/// Row degrees of a triplet list, as a side-channel file would hold them
fn row_degrees(n: usize, triplets: &TripletMatrix<f64>) -> Vec<usize> {
    let mut degrees = vec![0; n];
    for nz in triplets.nonzeros() {
        degrees[nz.row] += 1;
    }
    degrees
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for &n in &[1_000usize, 10_000, 100_000] {
        let triplets = random_triplets(n, 8);
        let degrees = row_degrees(n, &triplets);
        group.throughput(Throughput::Elements((n * 8) as u64));

        group.bench_with_input(BenchmarkId::new("counted", n), &triplets, |b, t| {
            b.iter(|| build_csr_from_source(black_box(t), None).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("known_degrees", n), &triplets, |b, t| {
            b.iter(|| build_csr_from_source(black_box(t), Some(degrees.as_slice())).unwrap())
        });
    }

    group.finish();
}

fn bench_maintenance(c: &mut Criterion) {
    let mut group = c.benchmark_group("maintenance");

    for &n in &[1_000usize, 10_000, 100_000] {
        let built: CsrMatrix<f64> = build_csr_from_source(&random_triplets(n, 8), None).unwrap();

        group.bench_with_input(BenchmarkId::new("pack", n), &built, |b, m| {
            b.iter(|| {
                let mut m = m.clone();
                m.pack();
                m
            })
        });

        group.bench_with_input(BenchmarkId::new("sort", n), &built, |b, m| {
            b.iter(|| {
                let mut m = m.clone();
                m.sort();
                m
            })
        });
    }

    group.finish();
}

fn bench_core_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_numbers");

    for &n in &[1_000usize, 10_000, 100_000] {
        let directed = build_csr_from_source(&random_triplets(n, 8), None).unwrap();
        let graph = symmetrize(&directed).unwrap();

        group.bench_with_input(BenchmarkId::new("symmetric", n), &graph, |b, g| {
            b.iter(|| core_numbers(black_box(g)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_maintenance, bench_core_numbers);
criterion_main!(benches);
