use std::sync::Arc;

use criterion::Criterion;
use rand::seq::SliceRandom;
use tempdir::TempDir;

use xcfg::{Config, ConfigStore, OsFilesystem};

pub fn bench(c: &mut Criterion) {
    let mut pairs: Vec<(String, String)> = (1..500).map(|x| (format!("k_{}", x), format!("val_{}", x))).collect();
    let home = TempDir::new("xcfg-").unwrap();
    let fs = Arc::new(OsFilesystem::with_home(home.path()));
    let mut store = ConfigStore::open_with("bench", Config::default(), fs).unwrap();

    c.bench_function("store.set", |b| b.iter(|| {
        for (k, v) in pairs.iter() {
            store.set(k, v.as_str(), false).unwrap();
        }
    }));

    let mut rng = rand::thread_rng();
    pairs.shuffle(&mut rng);

    c.bench_function("store.get", |b| b.iter(|| {
        for (k, _) in pairs.iter() {
            store.get(k).unwrap();
        }
    }));

    c.bench_function("store.save", |b| b.iter(|| {
        store.save().wait().unwrap();
    }));
}
