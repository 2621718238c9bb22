// src/processing/indices/canopy_cover.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map3, IndexCalculator};

const BANDS: [BandRole; 3] = [BandRole::Red, BandRole::Green, BandRole::Blue];

/// Canopy cover mask from RGB band ratios
///
/// A pixel is canopy (1.0) when `R/G < th1`, `B/G < th2` and
/// `2G - B - R > th3`, otherwise 0.0. Comparisons against NaN are false, so
/// the output is always exactly 0 or 1. The mask never carries alpha.
pub struct CanopyCover {
    red_ratio: f32,
    blue_ratio: f32,
    excess_green: f32,
}

impl CanopyCover {
    pub fn new(red_ratio: f32, blue_ratio: f32, excess_green: f32) -> Self {
        Self {
            red_ratio,
            blue_ratio,
            excess_green,
        }
    }
}

impl Default for CanopyCover {
    fn default() -> Self {
        Self::new(0.95, 0.95, 20.0)
    }
}

impl IndexCalculator for CanopyCover {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let red = bands.get(BandRole::Red)?;
        let green = bands.get(BandRole::Green)?;
        let blue = bands.get(BandRole::Blue)?;
        let (th1, th2, th3) = (self.red_ratio, self.blue_ratio, self.excess_green);

        Ok(map3(red, green, blue, |r, g, b| {
            let canopy = r / g < th1 && b / g < th2 && 2.0 * g - b - r > th3;
            if canopy {
                1.0
            } else {
                0.0
            }
        }))
    }

    fn required_bands(&self) -> &[BandRole] {
        &BANDS
    }

    fn name(&self) -> &str {
        "cc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bands::ImageType;
    use crate::processing::indices::test_support::band_set;

    #[test]
    fn test_canopy_cover_thresholds() {
        let bands = band_set(
            ImageType::Rgb,
            &[
                // canopy, red too high, excess green too low, zero green, all zero
                (BandRole::Red, &[50.0, 120.0, 9.0, 10.0, 0.0]),
                (BandRole::Green, &[100.0, 100.0, 10.0, 0.0, 0.0]),
                (BandRole::Blue, &[40.0, 40.0, 9.0, 10.0, 0.0]),
            ],
        );

        let result = CanopyCover::default().calculate(&bands).unwrap();
        assert_eq!(result.data(), &[1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_output_is_binary() {
        let values: Vec<f32> = (0..64).map(|v| (v * 7 % 251) as f32 + 1.0).collect();
        let shifted: Vec<f32> = values.iter().rev().copied().collect();
        let bands = band_set(
            ImageType::Rgb,
            &[
                (BandRole::Red, shifted.as_slice()),
                (BandRole::Green, values.as_slice()),
                (BandRole::Blue, values.as_slice()),
            ],
        );

        let result = CanopyCover::default().calculate(&bands).unwrap();
        assert!(result.data().iter().all(|v| *v == 0.0 || *v == 1.0));
        assert!(!CanopyCover::default().carries_alpha());
    }
}
