use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_map::ProbeMap;

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
    c.bench_function("probe_map_insert_10k", |b| {
        b.iter_batched(
            ProbeMap::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as i64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("probe_map_get_hit", |b| {
        let mut m = ProbeMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.clone(), i as i64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("probe_map_get_miss", |b| {
        let mut m = ProbeMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.insert(key(x), i as i64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

// Removal leaves tombstones on the probe chains, so this measures walks
// through tombstoned slots as well as fresh inserts.
fn bench_remove_insert_churn(c: &mut Criterion) {
    c.bench_function("probe_map_remove_insert_churn_1k", |b| {
        b.iter_batched(
            || {
                let mut m = ProbeMap::new();
                let keys: Vec<_> = lcg(3).take(1_000).map(key).collect();
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k.clone(), i as i64).unwrap();
                }
                (m, keys)
            },
            |(mut m, keys)| {
                for k in &keys {
                    let v = m.remove(k).unwrap();
                    m.insert(k.clone(), v + 1).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_get_hit,
    bench_get_miss,
    bench_remove_insert_churn
);
criterion_main!(benches);
