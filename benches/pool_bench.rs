use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pktbuf::{BoundedQueue, SlabPool, WaitPolicy};
use std::{sync::Arc, thread};

fn benchmark_slab_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("SlabPool");

    for count in [64, 256, 1024].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(
            BenchmarkId::new("alloc_free_all", count),
            count,
            |b, &count| {
                let pool = SlabPool::new("bench", count, || [0u8; 128]).unwrap();

                b.iter(|| {
                    let mut nodes = Vec::with_capacity(count);
                    for _ in 0..count {
                        nodes.push(pool.alloc(WaitPolicy::NoWait).unwrap());
                    }
                    for node in nodes {
                        pool.free(node);
                    }
                });
            },
        );
    }

    group.finish();
}

fn benchmark_slab_pool_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("SlabPool_Contended");
    group.sample_size(20);

    group.bench_function("4_threads_cycling", |b| {
        let pool = Arc::new(SlabPool::new("bench", 64, || [0u8; 128]).unwrap());

        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let pool = Arc::clone(&pool);
                    thread::spawn(move || {
                        for _ in 0..250 {
                            let node = pool.alloc(WaitPolicy::Forever).unwrap();
                            pool.free(node);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

fn benchmark_bounded_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("BoundedQueue");

    for capacity in [16, 256, 4096].iter() {
        group.throughput(Throughput::Elements(*capacity as u64));
        group.bench_with_input(
            BenchmarkId::new("send_recv_u64", capacity),
            capacity,
            |b, &capacity| {
                let q: BoundedQueue<u64> = BoundedQueue::new("bench", capacity).unwrap();

                b.iter(|| {
                    for i in 0..capacity {
                        q.send(i as u64, WaitPolicy::NoWait).unwrap();
                    }
                    for _ in 0..capacity {
                        q.recv(WaitPolicy::NoWait).unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_slab_pool,
    benchmark_slab_pool_contended,
    benchmark_bounded_queue
);
criterion_main!(benches);
