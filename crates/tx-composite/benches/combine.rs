use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tx_composite::{BlendMode, EdgeRepairConfig, combine, fix_transparent_edges};
use tx_core::PixelBuffer;

fn build_rgba(width: usize, height: usize, seed: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for i in 0..(width * height) {
        let v = i + seed;
        data.extend_from_slice(&[(v % 251) as u8, (v % 127) as u8, (v % 61) as u8, (v % 256) as u8]);
    }
    PixelBuffer::from_vec(width, height, 4, data).expect("valid buffer")
}

fn bench_combine_rgb(c: &mut Criterion) {
    let overlay = build_rgba(1280, 1024, 17);
    let mut target = build_rgba(1280, 1024, 0);

    c.bench_function("combine_rgb_rgba_1280x1024", |b| {
        b.iter(|| {
            let outcome = combine(&mut target, black_box(&overlay), BlendMode::Rgb, 0.5)
                .expect("matching buffers");
            black_box(outcome);
        });
    });
}

fn bench_fix_edges(c: &mut Criterion) {
    let img = build_rgba(1280, 1024, 3);
    let cfg = EdgeRepairConfig::default();

    c.bench_function("fix_transparent_edges_rgba_1280x1024", |b| {
        b.iter(|| {
            let out = fix_transparent_edges(black_box(&img), black_box(&cfg)).expect("rgba");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_combine_rgb, bench_fix_edges);
criterion_main!(benches);
