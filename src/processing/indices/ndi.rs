// src/processing/indices/ndi.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map2, IndexCalculator};

/// Normalized Difference Index (NDI) calculator: (A - B) / (A + B)
///
/// Covers NDVI, NDRE, GNDVI and GRVI, which differ only in their bands.
pub struct NDI {
    bands: [BandRole; 2],
    name: String,
    carries_alpha: bool,
}

impl NDI {
    pub fn new(band_a: BandRole, band_b: BandRole, name: &str) -> Self {
        Self {
            bands: [band_a, band_b],
            name: name.to_string(),
            carries_alpha: false,
        }
    }

    /// Pass the source alpha band through with the result (RGB products).
    pub fn with_alpha(mut self) -> Self {
        self.carries_alpha = true;
        self
    }

    pub fn ndvi() -> Self {
        Self::new(BandRole::Nir, BandRole::Red, "ndvi")
    }

    pub fn ndre() -> Self {
        Self::new(BandRole::Nir, BandRole::RedEdge, "ndre")
    }

    pub fn gndvi() -> Self {
        Self::new(BandRole::Nir, BandRole::Green, "gndvi")
    }

    /// Green-Red Vegetation Index, shared by RGB and MULTI images
    pub fn grvi() -> Self {
        Self::new(BandRole::Green, BandRole::Red, "grvi")
    }
}

impl IndexCalculator for NDI {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let band_a = bands.get(self.bands[0])?;
        let band_b = bands.get(self.bands[1])?;

        Ok(map2(band_a, band_b, |a, b| (a - b) / (a + b)))
    }

    fn required_bands(&self) -> &[BandRole] {
        &self.bands
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn carries_alpha(&self) -> bool {
        self.carries_alpha
    }
}
