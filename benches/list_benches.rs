use core::ptr::NonNull;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use linkage_collections::{
    BidirectionalLink, ForwardLink, IntrusiveForwardList, IntrusiveStack, Linked, Unchecked,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SIZES: [usize; 3] = [64, 1_024, 16_384];

#[derive(Linked)]
struct Entry {
    key: u32,
    queued: ForwardLink<0>,
    ready: BidirectionalLink<1>,
}

fn entries(len: usize, seed: u64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| Entry {
            key: rng.random_range(0..1_000_000),
            queued: ForwardLink::new(),
            ready: BidirectionalLink::new(),
        })
        .collect()
}

fn stack_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_push_pop");

    for len in SIZES {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut nodes = entries(len, 1);
            let ptrs: Vec<NonNull<Entry>> = nodes.iter_mut().map(NonNull::from).collect();
            let mut stack = IntrusiveStack::<Entry, ForwardLink<0>, Unchecked>::new();

            b.iter(|| {
                for &node in &ptrs {
                    unsafe { stack.push(node).ok() };
                }
                while let Ok(node) = stack.pop() {
                    black_box(node);
                }
            });
        });
    }

    group.finish();
}

fn list_sort_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_sort");

    for len in SIZES {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("forward", len), &len, |b, &len| {
            let mut nodes = entries(len, 2);
            let ptrs: Vec<NonNull<Entry>> = nodes.iter_mut().map(NonNull::from).collect();
            let mut list = IntrusiveForwardList::<Entry, ForwardLink<0>, Unchecked>::new();

            b.iter(|| {
                unsafe { list.assign(ptrs.iter().copied()).ok() };
                list.sort_by(|a, b| a.key.cmp(&b.key));
                black_box(list.front().map(|entry| entry.key));
            });
            list.clear();
        });

        group.bench_with_input(BenchmarkId::new("bidirectional", len), &len, |b, &len| {
            let mut nodes = entries(len, 3);
            let ptrs: Vec<NonNull<Entry>> = nodes.iter_mut().map(NonNull::from).collect();
            let mut list = IntrusiveForwardList::<Entry, BidirectionalLink<1>, Unchecked>::new();

            b.iter(|| {
                unsafe { list.assign(ptrs.iter().copied()).ok() };
                list.sort_by(|a, b| a.key.cmp(&b.key));
                black_box(list.front().map(|entry| entry.key));
            });
            list.clear();
        });
    }

    group.finish();
}

fn list_reverse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_reverse");

    for len in SIZES {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut nodes = entries(len, 4);
            let ptrs: Vec<NonNull<Entry>> = nodes.iter_mut().map(NonNull::from).collect();
            let mut list = IntrusiveForwardList::<Entry, ForwardLink<0>>::new();
            unsafe { list.assign(ptrs.iter().copied()).ok() };

            b.iter(|| {
                list.reverse();
                black_box(list.len());
            });
            list.clear();
        });
    }

    group.finish();
}

criterion_group!(benches, stack_benchmark, list_sort_benchmark, list_reverse_benchmark);
criterion_main!(benches);
