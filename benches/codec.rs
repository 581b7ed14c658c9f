use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rcn::protocol::{
    decode, encode_broadcast, encode_directed_absolute, encode_directed_relative,
};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    group.bench_function("encode_broadcast", |b| {
        b.iter(|| {
            black_box(encode_broadcast(black_box(1), black_box(3), black_box(200)));
        });
    });

    group.bench_function("encode_directed_absolute", |b| {
        b.iter(|| {
            black_box(encode_directed_absolute(
                black_box(5),
                black_box(3),
                black_box(200),
            ));
        });
    });

    group.bench_function("encode_directed_relative", |b| {
        b.iter(|| {
            black_box(encode_directed_relative(
                black_box(5),
                black_box(3),
                black_box(-10),
            ));
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let absolute = encode_directed_absolute(5, 3, 200);
    group.bench_function("decode_absolute", |b| {
        b.iter(|| {
            black_box(decode(absolute.header.as_u8(), black_box(&absolute.payload)).unwrap());
        });
    });

    let relative = encode_directed_relative(5, 3, -10);
    group.bench_function("decode_relative", |b| {
        b.iter(|| {
            black_box(decode(relative.header.as_u8(), black_box(&relative.payload)).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
