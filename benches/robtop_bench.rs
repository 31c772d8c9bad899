use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use robtop::binary::{from_bytes, to_bytes, BinaryOptions};
use robtop::compression::Identity;
use robtop::database::Database;
use robtop::models::{Editor, Object};
use robtop::plist::{parse, PlistWriter};
use robtop::text::RobTopString;

const OBJECT: &str = "1,901,2,135,3,45,51,2,28,30,29,0,10,0.5,57,2.4,85,2";

fn level_string(objects: usize) -> String {
    let mut out = String::from("kA4,1,kA2,0,kA3,0;");
    for i in 0..objects {
        out.push_str(&format!("1,{},2,{},3,15,57,{};", 1 + i % 8, 15 + i * 30, 1 + i % 10));
    }
    out
}

fn save() -> (Vec<u8>, Vec<u8>) {
    let mut database = Database::default();
    database.player_name = String::from("Kappa");
    for id in 0..500 {
        database.followed.insert(id);
        database.values.cubes.insert(id);
    }
    database.custom_objects.push(vec![Object::new(1, 15.0, 15.0); 50]);
    database.dump(&Identity, false).unwrap()
}

pub fn object_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("object");
    let object = Object::from_robtop(OBJECT).unwrap();
    let options = BinaryOptions::new();
    let data = to_bytes(&object, &options).unwrap();

    group.bench_function("from_robtop", |b| {
        b.iter(|| Object::from_robtop(black_box(OBJECT)).unwrap())
    });
    group.bench_function("to_robtop", |b| b.iter(|| black_box(&object).to_robtop()));
    group.bench_function("from_binary", |b| {
        b.iter(|| from_bytes::<Object>(black_box(&data), &options).unwrap())
    });
    group.bench_function("to_binary", |b| b.iter(|| to_bytes(black_box(&object), &options).unwrap()));
    group.finish();
}

pub fn level_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("level");
    let options = BinaryOptions::new();
    for size in [10, 100, 1000, 10000].iter() {
        let text = level_string(*size);
        let editor = Editor::from_robtop(&text).unwrap();
        let data = to_bytes(&editor, &options).unwrap();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &text, |b, text| {
            b.iter(|| Editor::from_robtop(text).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("binary", size), &data, |b, data| {
            b.iter(|| from_bytes::<Editor>(data, &options).unwrap())
        });
    }
    group.finish();
}

pub fn plist_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("plist");
    let (main, _) = save();
    let dict = parse(&main).unwrap();
    let writer = PlistWriter::builder().build();

    group.throughput(Throughput::Bytes(main.len() as u64));
    group.bench_function("parse", |b| b.iter(|| parse(black_box(&main)).unwrap()));
    group.bench_function("write", |b| b.iter(|| writer.write(black_box(&dict))));
    group.finish();
}

pub fn database_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("database");
    let (main, levels) = save();
    let database = Database::load(&main, &levels, &Identity, false).unwrap();
    let options = BinaryOptions::new();
    let data = to_bytes(&database, &options).unwrap();

    group.bench_function("load", |b| {
        b.iter(|| Database::load(black_box(&main), black_box(&levels), &Identity, false).unwrap())
    });
    group.bench_function("from_binary", |b| {
        b.iter(|| from_bytes::<Database>(black_box(&data), &options).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    object_benchmark,
    level_benchmark,
    plist_benchmark,
    database_benchmark
);
criterion_main!(benches);
