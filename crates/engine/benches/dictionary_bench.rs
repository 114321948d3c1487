use criterion::{criterion_group, criterion_main, Criterion};
use dictionary::{codec, CursorStatus, DictionaryConfig, KeyType, Predicate, Record, StructureType};
use engine::Engine;
use tempfile::tempdir;

fn config() -> DictionaryConfig {
    DictionaryConfig {
        id: 1,
        key_type: KeyType::SignedInt,
        key_size: 4,
        value_size: 8,
        size: 16,
    }
}

fn skiplist_insert_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let engine = Engine::new(dir.path()).unwrap();
    c.bench_function("skiplist_insert_10k", |b| {
        b.iter(|| {
            let mut dict = engine.create(StructureType::SkipList, &config()).unwrap();
            for i in 0..10_000i32 {
                dict.insert(&codec::encode_i32(i), &codec::encode_u64(i as u64))
                    .unwrap();
            }
        });
    });
}

fn skiplist_get_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let engine = Engine::new(dir.path()).unwrap();
    let mut dict = engine.create(StructureType::SkipList, &config()).unwrap();
    for i in 0..10_000i32 {
        dict.insert(&codec::encode_i32(i), &codec::encode_u64(i as u64))
            .unwrap();
    }
    let mut value = [0u8; 8];
    c.bench_function("skiplist_get_10k", |b| {
        b.iter(|| {
            for i in 0..10_000i32 {
                dict.get(&codec::encode_i32(i), &mut value).unwrap();
            }
        });
    });
}

fn skiplist_scan_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let engine = Engine::new(dir.path()).unwrap();
    let mut dict = engine.create(StructureType::SkipList, &config()).unwrap();
    for i in 0..10_000i32 {
        dict.insert(&codec::encode_i32(i), &codec::encode_u64(i as u64))
            .unwrap();
    }
    c.bench_function("skiplist_scan_10k", |b| {
        b.iter(|| {
            let mut cursor = dict.find(Predicate::all_records()).unwrap();
            let mut record = Record::for_info(&dict.record_info());
            let mut count = 0usize;
            while cursor.next(&mut record) == CursorStatus::Active {
                count += 1;
            }
            assert_eq!(count, 10_000);
        });
    });
}

fn close_open_round_trip_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let engine = Engine::new(dir.path()).unwrap();
    c.bench_function("close_open_round_trip_1k", |b| {
        b.iter(|| {
            let mut dict = engine.create(StructureType::SkipList, &config()).unwrap();
            for i in 0..1_000i32 {
                dict.insert(&codec::encode_i32(i), &codec::encode_u64(i as u64))
                    .unwrap();
            }
            engine.close(&mut dict).unwrap();
            let reopened = engine.open(StructureType::SkipList, &config()).unwrap();
            let mut value = [0u8; 8];
            reopened.get(&codec::encode_i32(999), &mut value).unwrap();
        });
    });
}

criterion_group!(
    benches,
    skiplist_insert_benchmark,
    skiplist_get_benchmark,
    skiplist_scan_benchmark,
    close_open_round_trip_benchmark
);
criterion_main!(benches);
