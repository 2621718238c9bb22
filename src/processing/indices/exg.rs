// src/processing/indices/exg.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map3, IndexCalculator};

const BANDS: [BandRole; 3] = [BandRole::Red, BandRole::Green, BandRole::Blue];

/// Excess Green calculators on normalized chromaticity
///
/// With `r_s = R / (R + G + B)` (and likewise for G, B):
/// ExG = 2 * g_s - r_s - b_s, ExGR = ExG - 1.4 * r_s - g_s
pub struct ExcessGreen {
    minus_red: bool,
}

impl ExcessGreen {
    pub fn exg() -> Self {
        Self { minus_red: false }
    }

    pub fn exgr() -> Self {
        Self { minus_red: true }
    }
}

impl IndexCalculator for ExcessGreen {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let red = bands.get(BandRole::Red)?;
        let green = bands.get(BandRole::Green)?;
        let blue = bands.get(BandRole::Blue)?;
        let minus_red = self.minus_red;

        Ok(map3(red, green, blue, |r, g, b| {
            let total = r + g + b;
            let r_s = r / total;
            let g_s = g / total;
            let b_s = b / total;

            let exg = 2.0 * g_s - r_s - b_s;
            if minus_red {
                exg - 1.4 * r_s - g_s
            } else {
                exg
            }
        }))
    }

    fn required_bands(&self) -> &[BandRole] {
        &BANDS
    }

    fn name(&self) -> &str {
        if self.minus_red {
            "exgr"
        } else {
            "exg"
        }
    }

    fn carries_alpha(&self) -> bool {
        true
    }
}
