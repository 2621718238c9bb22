// src/processing/indices/ratio.rs
use gdal::raster::Buffer;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};
use crate::processing::indices::{map2, IndexCalculator};

/// Chlorophyll index calculator: NIR / BAND - 1
pub struct ChlorophyllIndex {
    bands: [BandRole; 2],
    name: String,
}

impl ChlorophyllIndex {
    pub fn new(band: BandRole, name: &str) -> Self {
        Self {
            bands: [BandRole::Nir, band],
            name: name.to_string(),
        }
    }

    /// Green chlorophyll index
    pub fn gci() -> Self {
        Self::new(BandRole::Green, "gci")
    }

    /// Red-edge chlorophyll index
    pub fn reci() -> Self {
        Self::new(BandRole::RedEdge, "reci")
    }
}

impl IndexCalculator for ChlorophyllIndex {
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>> {
        let nir = bands.get(self.bands[0])?;
        let other = bands.get(self.bands[1])?;

        Ok(map2(nir, other, |nir_val, other_val| nir_val / other_val - 1.0))
    }

    fn required_bands(&self) -> &[BandRole] {
        &self.bands
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bands::ImageType;
    use crate::processing::indices::test_support::{assert_close, band_set};

    #[test]
    fn test_gci_and_reci() {
        let bands = band_set(
            ImageType::Multi,
            &[
                (BandRole::Nir, &[0.6, 0.4]),
                (BandRole::Green, &[0.2, 0.4]),
                (BandRole::RedEdge, &[0.3, 0.5]),
            ],
        );

        let gci = ChlorophyllIndex::gci().calculate(&bands).unwrap();
        assert_close(gci.data(), &[2.0, 0.0]);

        let reci = ChlorophyllIndex::reci().calculate(&bands).unwrap();
        assert_close(reci.data(), &[1.0, -0.2]);
    }

    #[test]
    fn test_zero_green_gives_infinity() {
        let bands = band_set(
            ImageType::Multi,
            &[(BandRole::Nir, &[0.6]), (BandRole::Green, &[0.0])],
        );

        let gci = ChlorophyllIndex::gci().calculate(&bands).unwrap();
        assert_eq!(gci.data()[0], f32::INFINITY);
    }
}
