// src/processing/indices/savi.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map2, IndexCalculator};

const BANDS: [BandRole; 2] = [BandRole::Nir, BandRole::Red];

/// Soil Adjusted Vegetation Index (SAVI) calculator
///
/// `gain * (NIR - RED) / (NIR + RED + L)`. SAVI uses L = 0.5 with gain 1.5,
/// OSAVI uses L = 0.16 with gain 1.16.
pub struct SAVI {
    soil_factor: f32,
    gain: f32,
    name: String,
}

impl SAVI {
    pub fn new(soil_factor: f32, gain: f32, name: &str) -> Self {
        Self {
            soil_factor,
            gain,
            name: name.to_string(),
        }
    }

    pub fn savi() -> Self {
        Self::new(0.5, 1.5, "savi")
    }

    pub fn osavi() -> Self {
        Self::new(0.16, 1.16, "osavi")
    }
}

impl IndexCalculator for SAVI {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let nir = bands.get(BandRole::Nir)?;
        let red = bands.get(BandRole::Red)?;
        let l = self.soil_factor;
        let gain = self.gain;

        Ok(map2(nir, red, |nir_val, red_val| {
            ((nir_val - red_val) * gain) / (nir_val + red_val + l)
        }))
    }

    fn required_bands(&self) -> &[BandRole] {
        &BANDS
    }

    fn name(&self) -> &str {
        &self.name
    }
}
