use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use tenxor_tensor::Tensor;
use tenxor_tensor_ops::{pointwise, reduce};

fn bench_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum");
    let mut rng = rand::rng();

    for size in [8, 64, 256] {
        let data: Vec<f32> = (0..size * size).map(|_| rng.random::<f32>()).collect();
        let t = Tensor::from_shape_vec(&[size, size], data).unwrap();

        group.bench_function(format!("f32_rows_{}", size), |bencher| {
            bencher.iter(|| black_box(reduce::sum(black_box(&t), 1).unwrap()))
        });

        group.bench_function(format!("f32_cols_{}", size), |bencher| {
            bencher.iter(|| black_box(reduce::sum(black_box(&t), 0).unwrap()))
        });
    }

    group.finish();
}

fn bench_pointwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointwise");
    let mut rng = rand::rng();

    for size in [8, 64, 256] {
        let a: Vec<f32> = (0..size * size).map(|_| rng.random::<f32>()).collect();
        let b: Vec<f32> = (0..size).map(|_| rng.random::<f32>()).collect();
        let a_tensor = Tensor::from_shape_vec(&[size, size], a).unwrap();
        let b_tensor = Tensor::from_shape_vec(&[size], b).unwrap();
        let column = Tensor::from_shape_slice(&[size, 1], b_tensor.as_slice()).unwrap();

        group.bench_function(format!("add_same_shape_{}", size), |bencher| {
            bencher.iter(|| black_box(pointwise::add(&a_tensor, &a_tensor).unwrap()))
        });

        group.bench_function(format!("add_broadcast_row_{}", size), |bencher| {
            bencher.iter(|| black_box(pointwise::add(&a_tensor, &b_tensor).unwrap()))
        });

        group.bench_function(format!("outer_sum_{}", size), |bencher| {
            bencher.iter(|| {
                black_box(pointwise::pointwise(&column, &b_tensor, |x, y| x + y).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sum, bench_pointwise);
criterion_main!(benches);
