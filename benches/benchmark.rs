use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gdal::raster::Buffer;
use vi_raster::processing::indices::{CanopyCover, ExcessGreen, IndexCalculator, MSAVI, NDI};
use vi_raster::processing::{BandRole, BandSet, ImageType};

fn synthetic_bands(image_type: ImageType, size: (usize, usize)) -> BandSet {
    let mut bands = BandSet::new(image_type);
    for (offset, role) in image_type.band_order().iter().enumerate() {
        // Fill with some test values, different per band
        let data = (0..size.0 * size.1)
            .map(|i| 0.05 + ((i + offset * 37) % 100) as f32 / 200.0)
            .collect();
        bands.insert(*role, Buffer::new(size, data)).unwrap();
    }
    bands
}

/// Benchmark the core index calculations in isolation
fn benchmark_index_calculation(c: &mut Criterion) {
    let size = (1024, 1024);
    let multi = synthetic_bands(ImageType::Multi, size);
    let rgb = synthetic_bands(ImageType::Rgb, size);

    let ndvi = NDI::ndvi();
    c.bench_function("ndvi_core_calculation", |b| {
        b.iter(|| ndvi.calculate(black_box(&multi)))
    });

    c.bench_function("msavi_core_calculation", |b| {
        b.iter(|| MSAVI.calculate(black_box(&multi)))
    });

    let exgr = ExcessGreen::exgr();
    c.bench_function("exgr_core_calculation", |b| {
        b.iter(|| exgr.calculate(black_box(&rgb)))
    });

    let cc = CanopyCover::default();
    c.bench_function("cc_core_calculation", |b| {
        b.iter(|| cc.calculate(black_box(&rgb)))
    });
}

criterion_group!(benches, benchmark_index_calculation);
criterion_main!(benches);
