// src/processing/indices/msavi.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map2, IndexCalculator};

const BANDS: [BandRole; 2] = [BandRole::Nir, BandRole::Red];

/// Modified Soil Adjusted Vegetation Index (MSAVI) calculator
/// MSAVI = 0.5 * (2 * NIR + 1 - sqrt((2 * NIR + 1)^2 - 8 * (NIR - RED)))
///
/// A negative discriminant gives NaN for that pixel.
pub struct MSAVI;

impl IndexCalculator for MSAVI {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let nir = bands.get(BandRole::Nir)?;
        let red = bands.get(BandRole::Red)?;

        Ok(map2(nir, red, |nir_val, red_val| {
            let two_nir_plus_one = 2.0 * nir_val + 1.0;
            let discriminant = two_nir_plus_one * two_nir_plus_one - 8.0 * (nir_val - red_val);
            0.5 * (two_nir_plus_one - discriminant.sqrt())
        }))
    }

    fn required_bands(&self) -> &[BandRole] {
        &BANDS
    }

    fn name(&self) -> &str {
        "msavi"
    }
}
