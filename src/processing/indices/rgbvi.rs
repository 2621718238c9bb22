// src/processing/indices/rgbvi.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map2, map3, IndexCalculator};

const MGRVI_BANDS: [BandRole; 2] = [BandRole::Green, BandRole::Red];
const RGBVI_BANDS: [BandRole; 3] = [BandRole::Red, BandRole::Green, BandRole::Blue];

/// Modified Green-Red Vegetation Index: (G² - R²) / (G² + R²)
pub struct MGRVI;

impl IndexCalculator for MGRVI {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let green = bands.get(BandRole::Green)?;
        let red = bands.get(BandRole::Red)?;

        Ok(map2(green, red, |g, r| {
            let g2 = g * g;
            let r2 = r * r;
            (g2 - r2) / (g2 + r2)
        }))
    }

    fn required_bands(&self) -> &[BandRole] {
        &MGRVI_BANDS
    }

    fn name(&self) -> &str {
        "mgrvi"
    }

    fn carries_alpha(&self) -> bool {
        true
    }
}

/// Red Green Blue Vegetation Index: (G² - R * B) / (G² + R * B)
pub struct RGBVI;

impl IndexCalculator for RGBVI {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let red = bands.get(BandRole::Red)?;
        let green = bands.get(BandRole::Green)?;
        let blue = bands.get(BandRole::Blue)?;

        Ok(map3(red, green, blue, |r, g, b| {
            let g2 = g * g;
            let rb = r * b;
            (g2 - rb) / (g2 + rb)
        }))
    }

    fn required_bands(&self) -> &[BandRole] {
        &RGBVI_BANDS
    }

    fn name(&self) -> &str {
        "rgbvi"
    }

    fn carries_alpha(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bands::ImageType;
    use crate::processing::indices::test_support::{assert_close, band_set};

    fn bands() -> BandSet {
        band_set(
            ImageType::Rgb,
            &[
                (BandRole::Red, &[1.0, 3.0, 0.0]),
                (BandRole::Green, &[3.0, 1.0, 0.0]),
                (BandRole::Blue, &[1.0, 2.0, 0.0]),
            ],
        )
    }

    #[test]
    fn test_mgrvi_calculation() {
        let result = MGRVI.calculate(&bands()).unwrap();
        let data = result.data();

        assert_close(&data[..2], &[0.8, -0.8]);
        assert!(data[2].is_nan());
    }

    #[test]
    fn test_rgbvi_calculation() {
        // (9 - 1) / (9 + 1) and (1 - 6) / (1 + 6)
        let result = RGBVI.calculate(&bands()).unwrap();
        assert_close(&result.data()[..2], &[0.8, -0.714286]);
    }
}
