//! Benchmarks for the indexed priority queue.
//!
//! Compares steady-state churn at a few queue sizes against
//! `std::collections::BinaryHeap`, which has no name lookup.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use admission_collections::{IndexedPriorityQueue, Position, QueueEntry};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

#[derive(Debug)]
struct Entry {
    name: String,
    priority: i64,
    seq: u64,
    pos: u32,
}

impl QueueEntry for Entry {
    type Priority = i64;

    fn key(&self) -> &str {
        &self.name
    }
    fn priority(&self) -> i64 {
        self.priority
    }
    fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }
    fn queue_pos(&self) -> u32 {
        self.pos
    }
    fn set_queue_pos(&mut self, pos: u32) {
        self.pos = pos;
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Entry {}

fn entry(i: usize) -> Entry {
    Entry {
        name: format!("customer-{i}"),
        priority: ((i * 7 + 13) % 1000) as i64, // Deterministic scramble
        seq: i as u64,
        pos: u32::NONE,
    }
}

fn filled(size: usize) -> IndexedPriorityQueue<Entry> {
    let mut queue = IndexedPriorityQueue::with_capacity(size + 1);
    for i in 0..size {
        queue.insert(entry(i)).unwrap();
    }
    queue
}

// ============================================================================
// Churn: extract the max, insert a replacement
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    for size in [64usize, 1024, 16384] {
        group.bench_with_input(BenchmarkId::new("indexed", size), &size, |b, &size| {
            let mut queue = filled(size);
            let mut next = size;
            b.iter(|| {
                let out = queue.extract_max().unwrap();
                black_box(&out);
                queue.insert(entry(next)).unwrap();
                next += 1;
            });
        });

        group.bench_with_input(BenchmarkId::new("binary_heap", size), &size, |b, &size| {
            let mut heap: BinaryHeap<Entry> = (0..size).map(entry).collect();
            let mut next = size;
            b.iter(|| {
                let out = heap.pop().unwrap();
                black_box(&out);
                heap.push(entry(next));
                next += 1;
            });
        });
    }

    group.finish();
}

// ============================================================================
// Keyed operations
// ============================================================================

fn bench_keyed(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed");

    for size in [64usize, 1024, 16384] {
        group.bench_with_input(BenchmarkId::new("remove_reinsert", size), &size, |b, &size| {
            let mut queue = filled(size);
            let mut i = 0;
            b.iter(|| {
                let name = format!("customer-{}", i % size);
                let out = queue.remove(black_box(&name)).unwrap();
                queue.insert(out).unwrap();
                i += 1;
            });
        });

        group.bench_with_input(BenchmarkId::new("update_priority", size), &size, |b, &size| {
            let mut queue = filled(size);
            let mut i = 0usize;
            b.iter(|| {
                let name = format!("customer-{}", i % size);
                queue.update_priority(black_box(&name), (i % 997) as i64);
                i += 1;
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_churn, bench_keyed);
criterion_main!(benches);
