use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use segmented_hashmap::SegmentedHashMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("segmented_hashmap_insert_10k", |b| {
        b.iter_batched(
            SegmentedHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("segmented_hashmap_get_hit", |b| {
        let mut m = SegmentedHashMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            m.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_churn(c: &mut Criterion) {
    c.bench_function("segmented_hashmap_churn_in_place", |b| {
        // Remove/insert pairs that stay inside the existing capacity, so
        // this measures the free-list path rather than growth.
        let mut m = SegmentedHashMap::new();
        let keys: Vec<_> = lcg(13).take(10_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            m.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = m.remove(k).unwrap();
            m.insert(k.clone(), v);
        })
    });
}

criterion_group!(benches, bench_insert, bench_get_hit, bench_churn);
criterion_main!(benches);
