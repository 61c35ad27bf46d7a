use chain_table::{ChainedTable, TableConfig};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (ChainedTable<u64>, Vec<String>) {
    let mut t = ChainedTable::new();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.insert(k, i as u64);
    }
    (t, keys)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(100_000).map(key).collect();
    c.bench_function("chain_table::insert_fresh_100k", |b| {
        b.iter_batched(
            ChainedTable::<u64>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized_100k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(2).take(100_000).map(key).collect();
    let cfg = TableConfig::new().with_initial_capacity(32_768);
    c.bench_function("chain_table::insert_presized_100k", |b| {
        b.iter_batched(
            || ChainedTable::<u64>::with_config(cfg).unwrap(),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    let (t, keys) = filled(7, 10_000);
    c.bench_function("chain_table::get_hit", |b| {
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    let (t, _) = filled(11, 10_000);
    let mut miss = lcg(0xdead_beef);
    c.bench_function("chain_table::get_miss", |b| {
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(t.get(&k));
        })
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    let (mut t, keys) = filled(13, 10_000);
    c.bench_function("chain_table::remove_reinsert", |b| {
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.remove(k).unwrap();
            t.insert(k, black_box(v));
        })
    });
}

fn bench_iterate_10k(c: &mut Criterion) {
    let (t, _) = filled(17, 10_000);
    c.bench_function("chain_table::iterate_10k", |b| {
        b.iter(|| black_box(t.values().sum::<u64>()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_presized_100k, bench_get_hit,
        bench_get_miss, bench_remove_reinsert, bench_iterate_10k
}
criterion_main!(benches);
