use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rusty_customers::prelude::{
    CustomerFields, CustomerRecord, CustomerStore, RecordStore,
    stores::{JsonStorage, TxtStorage},
};
use tempfile::tempdir;

fn customers(n: i32) -> Vec<CustomerRecord> {
    (0..n)
        .map(|i| {
            CustomerRecord::new(
                i,
                format!("User{i}"),
                "08885499529",
                format!("user{i}@yahoo.com"),
                "M9A 4Y1",
            )
        })
        .collect()
}

// Store prepopulated with `n` customers, no disk involved.
fn make_store_with_n(n: i32) -> RecordStore {
    let mut store = RecordStore::new();
    for record in customers(n).into_iter().rev() {
        let _ = store.add(record);
    }
    store
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("Adding to 5k customers (single add)", |b| {
        b.iter_batched(
            || make_store_with_n(5_000),
            |mut store| {
                let _ = store.add(CustomerRecord::new(
                    9_999_999,
                    "Zoe",
                    "08885499529",
                    "zoe@gmail.com",
                    "11111",
                ));
                black_box(store.len());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_edit(c: &mut Criterion) {
    c.bench_function("Editing 5k customers (single edit)", |b| {
        let mut store = make_store_with_n(5_000);
        let fields = CustomerFields::new("User100-edited", "08885499529", "e@yahoo.com", "22222");
        b.iter(|| {
            let index = store.edit(100, fields.clone());
            black_box(index.ok());
        });
    });
}

fn bench_lookup(c: &mut Criterion) {
    c.bench_function("Looking up by ID in 5k customers", |b| {
        let store = make_store_with_n(5_000);
        b.iter(|| black_box(store.get_by_id(black_box(4_321))));
    });
}

fn bench_save_json(c: &mut Criterion) {
    c.bench_function("save_5k_json_customers", |b| {
        let records = customers(5_000);
        b.iter_batched(
            || {
                let dir = tempdir().expect("create temp dir");
                (JsonStorage::new(dir.path().join("customers.jsonl")), dir)
            },
            |(storage, _dir)| {
                black_box(storage.save(&records).is_ok());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_read_json(c: &mut Criterion) {
    c.bench_function("read_5k_json_customers", |b| {
        let dir = tempdir().expect("create temp dir");
        let storage = JsonStorage::new(dir.path().join("customers.jsonl"));
        storage.save(&customers(5_000)).expect("setup save failed");
        b.iter(|| black_box(storage.load().map(|records| records.len()).ok()));
    });
}

fn bench_read_txt(c: &mut Criterion) {
    c.bench_function("read_5k_txt_customers", |b| {
        let dir = tempdir().expect("create temp dir");
        let storage = TxtStorage::new(dir.path().join("customers.txt"));
        storage.save(&customers(5_000)).expect("setup save failed");
        b.iter(|| black_box(storage.load().map(|records| records.len()).ok()));
    });
}

fn configure() -> Criterion {
    Criterion::default()
    // .sample_size(10)
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_add, bench_edit, bench_lookup, bench_save_json, bench_read_json, bench_read_txt
}
criterion_main!(benches);
