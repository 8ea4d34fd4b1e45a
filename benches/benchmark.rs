use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use flexrecord::{AttributeAccess, Flexible, Key, Record, Value};

fn filled(n: i64) -> Record {
    Record::from_pairs((0..n).map(|i| (format!("key{}", i), Value::Int(i)))).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("set 1k", |b| {
        b.iter(|| {
            let mut record = Record::new();
            for i in 0..1000 {
                record.set_attr(&format!("f{}", i), i).unwrap();
            }
            black_box(record.len())
        })
    });
    for n in [1_000, 100_000] {
        let record = filled(n);
        let key = Key::from(format!("key{}", n / 2));
        c.bench_function(&format!("get {}", n), |b| b.iter(|| record.get(black_box(&key))));
        c.bench_function(&format!("attr {}", n), |b| b.iter(|| record.attr(black_box("key1"))));
        c.bench_function(&format!("iterate {}", n), |b| b.iter(|| record.entries().count()));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
