use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use crossbeam::channel;
use kvnode::{interpret, RayonThreadPool, SharedQueueThreadPool, Store, ThreadPool};
use rand::prelude::*;

fn interpreter_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpret");

    group.bench_function("put", |b| {
        b.iter_batched(
            Store::new,
            |store| {
                for i in 0..100 {
                    interpret(&format!("PUT key{i} some value"), &store);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("get", |b| {
        let store = Store::new();
        for i in 0..100 {
            interpret(&format!("PUT key{i} some value"), &store);
        }
        let mut rng = thread_rng();
        b.iter(|| {
            for _ in 0..100 {
                interpret(&format!("GET key{}", rng.gen_range(0..100)), &store);
            }
        });
    });

    group.finish();
}

fn run_jobs<P: ThreadPool>(pool: &P, store: &Store, jobs: usize) {
    let (tx, rx) = channel::unbounded();
    for i in 0..jobs {
        let store = store.clone();
        let tx = tx.clone();
        pool.spawn(move || {
            let response = interpret(&format!("PUT key{i} value"), &store);
            tx.send(response).unwrap();
        });
    }
    drop(tx);
    assert_eq!(rx.iter().count(), jobs);
}

fn pool_bench(c: &mut Criterion) {
    let threads = num_cpus::get() as u32;
    let mut group = c.benchmark_group("pool");

    group.bench_function("shared_queue", |b| {
        let pool = SharedQueueThreadPool::new(threads).unwrap();
        let store = Store::new();
        b.iter(|| run_jobs(&pool, &store, 1000));
    });

    group.bench_function("rayon", |b| {
        let pool = RayonThreadPool::new(threads).unwrap();
        let store = Store::new();
        b.iter(|| run_jobs(&pool, &store, 1000));
    });

    group.finish();
}

criterion_group!(benches, interpreter_bench, pool_bench);
criterion_main!(benches);
