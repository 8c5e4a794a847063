use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_aztec::reed_solomon::{
    AZTEC_DATA_6, AZTEC_DATA_8, AZTEC_DATA_10, AZTEC_DATA_12, AZTEC_PARAM, GaloisField,
    ReedSolomonDecoder, ReedSolomonEncoder,
};

/// Encoded block of `total` codewords with `ec` check words and `errors`
/// corrupted data words
fn damaged_block(field: &GaloisField, total: usize, ec: usize, errors: usize) -> Vec<u32> {
    let max = field.size() as u32 - 1;
    let mut block: Vec<u32> = (0..total).map(|i| (i as u32 * 7 + 3) % max + 1).collect();
    ReedSolomonEncoder::new(field).encode(&mut block, ec).unwrap();
    for i in 0..errors {
        block[i * 2] ^= 1 + i as u32 % max;
    }
    block
}

fn bench_field(c: &mut Criterion, name: &str, field: &GaloisField, total: usize, ec: usize) {
    let clean = damaged_block(field, total, ec, 0);
    let damaged = damaged_block(field, total, ec, ec / 4);
    let decoder = ReedSolomonDecoder::new(field);

    c.bench_function(&format!("rs_decode_{name}_clean"), |b| {
        b.iter(|| {
            let mut block = clean.clone();
            decoder.decode(black_box(&mut block), black_box(ec))
        })
    });
    c.bench_function(&format!("rs_decode_{name}_damaged"), |b| {
        b.iter(|| {
            let mut block = damaged.clone();
            decoder.decode(black_box(&mut block), black_box(ec))
        })
    });
}

fn bench_decode_param(c: &mut Criterion) {
    bench_field(c, "gf16", &AZTEC_PARAM, 10, 6);
}

fn bench_decode_data_6(c: &mut Criterion) {
    bench_field(c, "gf64", &AZTEC_DATA_6, 40, 24);
}

fn bench_decode_data_8(c: &mut Criterion) {
    bench_field(c, "gf256", &AZTEC_DATA_8, 120, 60);
}

fn bench_decode_data_10(c: &mut Criterion) {
    bench_field(c, "gf1024", &AZTEC_DATA_10, 500, 200);
}

fn bench_decode_data_12(c: &mut Criterion) {
    bench_field(c, "gf4096", &AZTEC_DATA_12, 1400, 400);
}

fn bench_encode(c: &mut Criterion) {
    let data: Vec<u32> = (0..300).map(|i| i % 255 + 1).collect();
    let mut encoder = ReedSolomonEncoder::new(&AZTEC_DATA_8);
    c.bench_function("rs_encode_gf256_300", |b| {
        b.iter(|| {
            let mut block = data.clone();
            encoder.encode(black_box(&mut block), black_box(100))
        })
    });
}

criterion_group!(
    benches,
    bench_decode_param,
    bench_decode_data_6,
    bench_decode_data_8,
    bench_decode_data_10,
    bench_decode_data_12,
    bench_encode
);
criterion_main!(benches);
