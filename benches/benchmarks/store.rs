use criterion::Criterion;
use rand::seq::SliceRandom;
use tempdir::TempDir;

use sessfile::{Config, FileStore};

pub fn bench(c: &mut Criterion) {
    let dir = TempDir::new("sessfile-").unwrap();
    let store = FileStore::open(Config {
        path: dir.path().to_path_buf(),
        ..Default::default()
    })
    .unwrap();

    let mut ids: Vec<String> = (1..500).map(|x| format!("sess_{}", x)).collect();
    let records: Vec<_> = ids
        .iter()
        .map(|id| {
            let mut record = store.create(id.clone());
            record.set_attribute("user", format!("user_{}", id).into_bytes());
            record
        })
        .collect();

    c.bench_function("store.write", |b| {
        b.iter(|| {
            for record in &records {
                store.write(record).unwrap();
            }
        })
    });

    let mut rng = rand::thread_rng();
    ids.shuffle(&mut rng);

    c.bench_function("store.read", |b| {
        b.iter(|| {
            for id in &ids {
                store.read(id).unwrap();
            }
        })
    });
}
