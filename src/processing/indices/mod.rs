// src/processing/indices/mod.rs
use gdal::raster::Buffer;
use rayon::prelude::*;

use crate::error::Result;
use crate::processing::bands::{BandRole, BandSet};

pub mod canopy_cover;
pub mod exg;
pub mod msavi;
pub mod ndi;
pub mod ratio;
pub mod rgbvi;
pub mod savi;

// Re-export indices
pub use canopy_cover::CanopyCover;
pub use exg::ExcessGreen;
pub use msavi::MSAVI;
pub use ndi::NDI;
pub use ratio::ChlorophyllIndex;
pub use rgbvi::{MGRVI, RGBVI};
pub use savi::SAVI;

/// Trait for vegetation index calculators
///
/// Calculators are pure: no I/O and no masking of arithmetic results. A zero
/// denominator yields NaN or ±inf in the affected pixel only.
pub trait IndexCalculator: Send + Sync {
    /// Calculate the index from the bands of one image
    fn calculate(&self, bands: &BandSet) -> Result<Buffer<f32>>;

    /// Band roles the formula reads
    fn required_bands(&self) -> &[BandRole];

    /// Return the name of the index
    fn name(&self) -> &str;

    /// Return true if the product passes the source alpha band through
    fn carries_alpha(&self) -> bool {
        false
    }
}

/// Apply `f` to every pixel of two co-registered bands.
pub(crate) fn map2<F>(a: &Buffer<f32>, b: &Buffer<f32>, f: F) -> Buffer<f32>
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    let shape = a.shape();
    let a_data = a.data();
    let b_data = b.data();

    let mut result_data = vec![0.0f32; shape.0 * shape.1];
    result_data
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, result)| *result = f(a_data[i], b_data[i]));

    Buffer::new(shape, result_data)
}

/// Apply `f` to every pixel of three co-registered bands.
pub(crate) fn map3<F>(a: &Buffer<f32>, b: &Buffer<f32>, c: &Buffer<f32>, f: F) -> Buffer<f32>
where
    F: Fn(f32, f32, f32) -> f32 + Sync,
{
    let shape = a.shape();
    let a_data = a.data();
    let b_data = b.data();
    let c_data = c.data();

    let mut result_data = vec![0.0f32; shape.0 * shape.1];
    result_data
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, result)| *result = f(a_data[i], b_data[i], c_data[i]));

    Buffer::new(shape, result_data)
}

#[cfg(test)]
pub(crate) mod test_support {
    use gdal::raster::Buffer;

    use crate::processing::bands::{BandRole, BandSet, ImageType};

    /// Build a band set whose bands all have shape `(values.len(), 1)`.
    pub fn band_set(image_type: ImageType, bands: &[(BandRole, &[f32])]) -> BandSet {
        let mut set = BandSet::new(image_type);
        for (role, values) in bands {
            set.insert(*role, Buffer::new((values.len(), 1), values.to_vec()))
                .unwrap();
        }
        set
    }

    pub fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < 1e-5,
                "Expected {}, got {} at index {}",
                e,
                a,
                i
            );
        }
    }
}
