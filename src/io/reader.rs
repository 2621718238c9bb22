// src/io/reader.rs
use std::path::{Path, PathBuf};

use gdal::Dataset;
use tracing::debug;

use crate::error::Result;
use crate::processing::bands::{BandSet, ImageType};

const IDENTITY_TRANSFORM: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Georeferencing of a source image, passed unchanged to every product.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoInfo {
    pub projection: String,
    pub geo_transform: [f64; 6],
    pub width: usize,
    pub height: usize,
}

/// A decoded orthomosaic: its bands by role plus georeferencing.
pub struct SourceImage {
    pub path: PathBuf,
    pub geo_info: GeoInfo,
    pub bands: BandSet,
}

/// Read every band of `path` the way `image_type` orders them.
///
/// RGB: red, green, blue and an optional alpha. MULTI: blue, green, red,
/// rededge, nir. Bands past those are ignored.
pub fn read_image(path: &Path, image_type: ImageType) -> Result<SourceImage> {
    let dataset = Dataset::open(path)?;
    let (width, height) = dataset.raster_size();
    let projection = dataset.projection();
    let geo_transform = dataset.geo_transform().unwrap_or(IDENTITY_TRANSFORM);

    let available = dataset.raster_count() as usize;
    let wanted = available.min(image_type.band_order().len());
    debug!(
        "Reading {} of {} bands from {} ({}x{})",
        wanted,
        available,
        path.display(),
        width,
        height
    );

    let mut bands = Vec::with_capacity(wanted);
    for index in 1..=wanted {
        let band = dataset.rasterband(index)?;
        let buffer = band.read_as::<f32>((0, 0), (width, height), (width, height), None)?;
        bands.push(buffer);
    }

    let geo_info = GeoInfo {
        projection,
        geo_transform,
        width,
        height,
    };

    Ok(SourceImage {
        path: path.to_path_buf(),
        geo_info,
        bands: BandSet::from_ordered(image_type, bands)?,
    })
}
