// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the docscan-document scanning pipeline.
// Runs boundary detection and rectification on a synthetic photo of a tilted
// page at the working resolution, so the resize step is skipped and the
// numbers reflect detection and warping alone.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use docscan_core::ScanConfig;
use docscan_document::DocumentScanner;
use docscan_document::scan::{DestinationFrame, boundary, rectify};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 1300x800 dark background with a light, slightly skewed page on it.
fn tilted_page_photo() -> DynamicImage {
    let mut img = RgbImage::from_pixel(1300, 800, Rgb([25, 25, 30]));
    let page = [
        Point::new(260, 110),
        Point::new(1010, 70),
        Point::new(1080, 700),
        Point::new(210, 730),
    ];
    draw_polygon_mut(&mut img, &page, Rgb([235, 235, 228]));
    DynamicImage::ImageRgb8(img)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_boundary_detection(c: &mut Criterion) {
    let photo = tilted_page_photo();
    let config = ScanConfig::default();

    c.bench_function("detect_boundary (1300x800)", |b| {
        b.iter(|| {
            let quad = boundary::detect_boundary(black_box(&photo), &config);
            black_box(quad.ok());
        });
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let photo = tilted_page_photo();
    let scanner = DocumentScanner::default();

    c.bench_function("scan (1300x800 -> 800x800)", |b| {
        b.iter(|| {
            let outcome = scanner.scan(black_box(&photo));
            black_box(outcome.ok());
        });
    });
}

fn bench_rectify_only(c: &mut Criterion) {
    let photo = tilted_page_photo();
    let scanner = DocumentScanner::default();
    let Ok(outcome) = scanner.scan(&photo) else {
        return;
    };
    let frame = DestinationFrame::default();

    c.bench_function("rectify (800x800)", |b| {
        b.iter(|| {
            let out = rectify(black_box(&photo), &outcome.corners, &frame);
            black_box(out.ok());
        });
    });
}

criterion_group!(
    benches,
    bench_boundary_detection,
    bench_full_scan,
    bench_rectify_only
);
criterion_main!(benches);
