use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tx_core::PixelBuffer;
use tx_resample::{ResampleFilter, resample_filtered, resample_nearest};

fn build_rgb(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 3);
    for i in 0..(width * height) {
        data.extend_from_slice(&[(i % 251) as u8, (i % 127) as u8, (i % 61) as u8]);
    }
    PixelBuffer::from_vec(width, height, 3, data).expect("valid buffer")
}

fn bench_nearest(c: &mut Criterion) {
    let img = build_rgb(1280, 1024);

    c.bench_function("resample_nearest_rgb_1280x1024_to_640x512", |b| {
        b.iter(|| {
            let out = resample_nearest(black_box(&img), 640, 512).expect("valid size");
            black_box(out);
        });
    });
}

fn bench_filtered(c: &mut Criterion) {
    let img = build_rgb(1280, 1024);

    c.bench_function("resample_catmullrom_rgb_1280x1024_to_640x512", |b| {
        b.iter(|| {
            let out = resample_filtered(black_box(&img), 640, 512, ResampleFilter::CatmullRom)
                .expect("rgb");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_nearest, bench_filtered);
criterion_main!(benches);
