use blockdeque::Deque;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn criterion_benchmarks(c: &mut Criterion) {
    c.bench_function("bench_new", |b| {
        b.iter(|| {
            let deq: Deque<i32> = Deque::new();
            black_box(deq);
        })
    });

    // 1025 front pushes cross two block boundaries and grow the map once
    c.bench_function("bench_grow_front_1025", |b| {
        b.iter(|| {
            let mut deq = Deque::new();
            for i in 0..1025 {
                deq.push_front(i);
            }
            black_box(deq);
        })
    });

    c.bench_function("bench_grow_back_8192", |b| {
        b.iter(|| {
            let mut deq = Deque::new();
            for i in 0..8192 {
                deq.push_back(i);
            }
            black_box(deq);
        })
    });

    let deq: Deque<_> = (0..4096).collect();
    c.bench_function("bench_iter_4096", |b| {
        b.iter(|| {
            let mut sum = 0;
            for &i in &deq {
                sum += i;
            }
            black_box(sum);
        })
    });

    let mut deq: Deque<_> = (0..4096).collect();
    c.bench_function("bench_mut_iter_4096", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in &mut deq {
                sum += *i;
            }
            black_box(sum);
        })
    });

    let deq: Deque<_> = (0..4096usize).collect();
    c.bench_function("bench_index_4096", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..deq.len() {
                sum += deq[i];
            }
            black_box(sum);
        })
    });

    // steady-state queue: the window slides through the map without the
    // payload ever moving
    c.bench_function("bench_queue_walk_4096", |b| {
        let mut deq: Deque<_> = (0..1024).collect();
        b.iter(|| {
            for i in 0..4096 {
                deq.push_back(i);
                black_box(deq.pop_front());
            }
        })
    });

    const N: usize = 1000;
    let mut array: [usize; N] = [0; N];
    for i in 0..N {
        array[i] = i;
    }
    c.bench_function("bench_from_array_1000", |b| {
        b.iter(|| {
            let deq: Deque<_> = array.into();
            black_box(deq);
        })
    });

    let mut deq: Deque<u8> = Deque::with_capacity(1000);
    let input: &[u8] = &[128; 512];
    c.bench_function("bench_extend_bytes", |b| {
        b.iter(|| {
            deq.clear();
            deq.extend(black_box(input));
        })
    });

    let mut deq: Deque<u16> = Deque::with_capacity(1000);
    c.bench_function("bench_extend_range", |b| {
        b.iter(|| {
            deq.clear();
            deq.extend(black_box(0..512));
        })
    });

    c.bench_function("bench_insert_middle_1024", |b| {
        b.iter(|| {
            let mut deq: Deque<_> = (0..1024).collect();
            deq.insert(512, black_box(-1));
            black_box(deq);
        })
    });
}

criterion_group!(benches, criterion_benchmarks);
criterion_main!(benches);
