//! Benchmarks for page encoding.
//!
//! Run with: cargo bench --package pdf-to-image-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgb, RgbImage};
use pdf_to_image_core::encoder::encode_page;
use pdf_to_image_core::{OutputFormat, RenderConfig};
use std::time::Duration;

fn letter_page(dpi: u32) -> RgbImage {
    let (w, h) = pdf_to_image_core::pdf_renderer::pixel_dimensions(612.0, 792.0, dpi);
    RgbImage::from_fn(w, h, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([20, 20, 20])
        }
    })
}

fn benchmark_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_page");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    let page = letter_page(150);
    let config = RenderConfig::default();

    for format in OutputFormat::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(format), &format, |b, &format| {
            b.iter(|| encode_page(black_box(&page), format, &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_encoding);
criterion_main!(benches);
