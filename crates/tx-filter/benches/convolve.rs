use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tx_core::PixelBuffer;
use tx_filter::{ConvolutionKernel, blur, convolve, sharpen};

fn build_rgba(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for i in 0..(width * height) {
        data.extend_from_slice(&[(i % 251) as u8, (i % 127) as u8, (i % 61) as u8, 255]);
    }
    PixelBuffer::from_vec(width, height, 4, data).expect("valid buffer")
}

fn bench_convolve_rgba(c: &mut Criterion) {
    let img = build_rgba(1024, 1024);
    let edge = ConvolutionKernel::new([-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0], 1.0, 0.0)
        .expect("nonzero scale");

    c.bench_function("convolve_laplacian_rgba_1024x1024", |b| {
        b.iter(|| {
            let out = convolve(black_box(&img), black_box(&edge), 1).expect("rgba");
            black_box(out);
        });
    });
}

fn bench_blur_iterations(c: &mut Criterion) {
    let img = build_rgba(1024, 1024);

    c.bench_function("blur_rgba_4_iterations_1024x1024", |b| {
        b.iter(|| {
            let out = blur(black_box(&img), 4).expect("rgba");
            black_box(out);
        });
    });
}

fn bench_sharpen(c: &mut Criterion) {
    let img = build_rgba(1024, 1024);

    c.bench_function("sharpen_rgba_1024x1024", |b| {
        b.iter(|| {
            let out = sharpen(black_box(&img), 1.5, 1).expect("rgba");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_convolve_rgba, bench_blur_iterations, bench_sharpen);
criterion_main!(benches);
