use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use logit_etl::backend::{matmul, random_normal_seeded, scale_or_vector_multiply, Matrix};
use logit_etl::model::{LogisticModel, LogisticParams};
use logit_etl::trainer::LogisticRegressionTrainer;

/// `n` standardized-looking rows split evenly between two classes.
fn synthetic(n: usize) -> (Matrix, Matrix) {
    let mut x = random_normal_seeded(n, 2, 0.0, 0.3, 11).expect("valid std");
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let shift = if i % 2 == 0 { -1.0 } else { 1.0 };
        x.set(i, 0, x.get(i, 0) + shift);
        x.set(i, 1, x.get(i, 1) + shift);
        labels.push(if shift > 0.0 { 1.0 } else { 0.0 });
    }
    (x, Matrix::column(&labels))
}

fn bench_train_step(c: &mut Criterion) {
    let model = LogisticModel::new(0.01);
    let params = LogisticParams::zeros(2);
    for n in [100, 1_000, 10_000] {
        let (x, y) = synthetic(n);
        c.bench_with_input(BenchmarkId::new("train_step", n), &n, |b, _| {
            b.iter(|| model.train_step(black_box(&params), &x, &y).expect("shapes match"));
        });
    }
}

fn bench_fit(c: &mut Criterion) {
    let (x, y) = synthetic(1_000);
    c.bench_function("fit_1000x2_100_epochs", |b| {
        b.iter(|| {
            let mut trainer = LogisticRegressionTrainer::with_seed(2, 0.01, 42);
            trainer.fit(black_box(&x), &y, 100).expect("shapes match");
            trainer.loss()
        });
    });
}

fn bench_ops(c: &mut Criterion) {
    let (x, y) = synthetic(10_000);
    let w = Matrix::column(&[0.5, -0.5]);
    c.bench_function("matmul_10000x2", |b| b.iter(|| matmul(black_box(&x), &w)));
    c.bench_function("vector_multiply_10000x2", |b| {
        b.iter(|| scale_or_vector_multiply(black_box(&y), &x))
    });
}

criterion_group!(benches, bench_train_step, bench_fit, bench_ops);
criterion_main!(benches);
