//! Benchmarks for page binarization and archive assembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xtc_rs::{Archive, Page};

/// Deterministic grayscale grid at the device resolution
fn device_samples(seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..480usize * 800).map(|_| rng.gen()).collect()
}

fn benchmark_page_encode(c: &mut Criterion) {
    let samples = device_samples(7);

    c.bench_function("page_encode_480x800", |b| {
        b.iter(|| {
            let page = Page::from_luma(480, 800, black_box(&samples), 200).unwrap();
            black_box(page.to_bytes())
        });
    });
}

fn benchmark_page_decode(c: &mut Criterion) {
    let samples = device_samples(11);
    let bytes = Page::from_luma(480, 800, &samples, 200).unwrap().to_bytes();

    c.bench_function("page_decode_480x800", |b| {
        b.iter(|| Page::from_bytes(black_box(&bytes)).unwrap());
    });
}

fn benchmark_archive_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_build");

    for page_count in [4, 16, 64].iter() {
        let pages: Vec<Page> = (0..*page_count)
            .map(|i| Page::from_luma(480, 800, &device_samples(i as u64), 200).unwrap())
            .collect();
        let mut archive = Archive::new(pages);
        archive.thumbnail = Some(1);

        group.bench_with_input(
            BenchmarkId::from_parameter(page_count),
            &archive,
            |b, archive| {
                b.iter(|| black_box(archive.to_bytes().unwrap()));
            },
        );
    }

    group.finish();
}

fn benchmark_archive_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_parse");

    for page_count in [4, 16, 64].iter() {
        let pages: Vec<Page> = (0..*page_count)
            .map(|i| Page::from_luma(480, 800, &device_samples(i as u64), 200).unwrap())
            .collect();
        let bytes = Archive::new(pages).to_bytes().unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(page_count),
            &bytes,
            |b, bytes| {
                b.iter(|| black_box(Archive::from_bytes(bytes).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_page_encode,
    benchmark_page_decode,
    benchmark_archive_build,
    benchmark_archive_parse
);
criterion_main!(benches);
