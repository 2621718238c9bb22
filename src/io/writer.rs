// src/io/writer.rs
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{DriverManager, Metadata};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reader::GeoInfo;
use crate::error::{Error, Result};

/// Number of leading characters of the source file stem kept in product names.
///
/// Sources sharing those characters map to the same product path; the later
/// write replaces the earlier one.
pub const STEM_LEN: usize = 8;

/// Container format of the written index rasters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// ENVI raw binary (`.dat`) with a `.hdr` sidecar
    #[default]
    Envi,
    /// GeoTIFF (`.tif`)
    #[value(name = "gtiff")]
    GTiff,
}

impl RasterFormat {
    pub fn driver_name(&self) -> &'static str {
        match self {
            RasterFormat::Envi => "ENVI",
            RasterFormat::GTiff => "GTiff",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RasterFormat::Envi => "dat",
            RasterFormat::GTiff => "tif",
        }
    }

    fn creation_options(&self) -> RasterCreationOptions {
        match self {
            RasterFormat::Envi => RasterCreationOptions::new(),
            RasterFormat::GTiff => RasterCreationOptions::from_iter(["COMPRESS=DEFLATE", "TILED=YES"]),
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterFormat::Envi => write!(f, "envi"),
            RasterFormat::GTiff => write!(f, "gtiff"),
        }
    }
}

/// First [`STEM_LEN`] characters of the image file name without extension.
pub fn output_stem(image_path: &Path) -> String {
    image_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().chars().take(STEM_LEN).collect())
        .unwrap_or_default()
}

/// `out_root/<index>/<stem>_<index>.<ext>`
pub fn output_path(out_root: &Path, index_name: &str, stem: &str, format: RasterFormat) -> PathBuf {
    out_root
        .join(index_name)
        .join(format!("{}_{}.{}", stem, index_name, format.extension()))
}

/// Write one index product as a two-band float32 raster.
///
/// Band 1 holds `values`, band 2 holds `alpha` or zeros when there is none.
/// The dataset is flushed and closed before returning.
pub fn write_raster(
    out_root: &Path,
    index_name: &str,
    stem: &str,
    geo_info: &GeoInfo,
    values: &Buffer<f32>,
    alpha: Option<&Buffer<f32>>,
    format: RasterFormat,
) -> Result<PathBuf> {
    let size = (geo_info.width, geo_info.height);
    check_shape("value", values, size)?;
    if let Some(alpha) = alpha {
        check_shape("alpha", alpha, size)?;
    }

    fs::create_dir_all(out_root.join(index_name))?;
    let output_path = output_path(out_root, index_name, stem, format);
    let write_failure = |source| Error::WriteFailure {
        path: output_path.clone(),
        source,
    };

    let driver = DriverManager::get_driver_by_name(format.driver_name()).map_err(write_failure)?;
    let mut out_ds = driver
        .create_with_band_type_with_options::<f32, _>(
            &output_path,
            geo_info.width,
            geo_info.height,
            2,
            &format.creation_options(),
        )
        .map_err(write_failure)?;

    out_ds
        .set_geo_transform(&geo_info.geo_transform)
        .map_err(write_failure)?;
    if !geo_info.projection.is_empty() {
        out_ds
            .set_projection(&geo_info.projection)
            .map_err(write_failure)?;
    }

    {
        let mut band = out_ds.rasterband(1).map_err(write_failure)?;
        band.set_description(index_name).map_err(write_failure)?;
        let mut buffer = Buffer::new(size, values.data().to_vec());
        band.write((0, 0), size, &mut buffer).map_err(write_failure)?;
    }

    {
        let mut band = out_ds.rasterband(2).map_err(write_failure)?;
        band.set_description("alpha").map_err(write_failure)?;
        let data = match alpha {
            Some(alpha) => alpha.data().to_vec(),
            None => vec![0.0f32; size.0 * size.1],
        };
        let mut buffer = Buffer::new(size, data);
        band.write((0, 0), size, &mut buffer).map_err(write_failure)?;
    }

    out_ds.flush_cache().map_err(write_failure)?;
    drop(out_ds);

    debug!("Wrote {}", output_path.display());
    Ok(output_path)
}

fn check_shape(band: &str, buffer: &Buffer<f32>, expected: (usize, usize)) -> Result<()> {
    let found = buffer.shape();
    if found != expected {
        return Err(Error::ShapeMismatch {
            band: band.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}
