//! Queue throughput: interrupt-side enqueue and foreground drain

use criterion::{criterion_group, criterion_main, Criterion};
use lightboard_queue::{RingBuffer, SharedQueue};
use std::hint::black_box;

fn bench_ring(c: &mut Criterion) {
    c.bench_function("ring_enqueue_dequeue", |b| {
        let mut ring: RingBuffer = RingBuffer::new();
        b.iter(|| {
            for byte in 0..128u8 {
                ring.enqueue(black_box(byte));
            }
            while let Ok(byte) = ring.dequeue() {
                black_box(byte);
            }
        });
    });

    c.bench_function("ring_overwrite", |b| {
        let mut ring: RingBuffer = RingBuffer::new();
        for byte in 0..=255u8 {
            ring.enqueue(byte);
        }
        b.iter(|| ring.enqueue(black_box(0x5A)));
    });
}

fn bench_shared(c: &mut Criterion) {
    static QUEUE: SharedQueue = SharedQueue::new();

    c.bench_function("shared_push_received", |b| {
        b.iter(|| QUEUE.enqueue(black_box(0x42)));
    });

    c.bench_function("shared_read_pair", |b| {
        b.iter(|| {
            QUEUE.enqueue(0x42);
            black_box(QUEUE.pending_count());
            black_box(QUEUE.dequeue())
        });
    });
}

criterion_group!(benches, bench_ring, bench_shared);
criterion_main!(benches);
