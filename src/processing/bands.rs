// src/processing/bands.rs
use std::collections::HashMap;
use std::fmt;

use clap::ValueEnum;
use gdal::raster::Buffer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of orthomosaic being processed. Decides the source band order and
/// which indices are available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ImageType {
    #[serde(rename = "RGB", alias = "rgb")]
    Rgb,
    #[serde(rename = "MULTI", alias = "multi")]
    Multi,
}

impl ImageType {
    /// Band roles in the order the source file stores them (band 1 first).
    ///
    /// RGB: red, green, blue, alpha. MULTI: blue, green, red, rededge, nir.
    pub fn band_order(&self) -> &'static [BandRole] {
        match self {
            ImageType::Rgb => &[BandRole::Red, BandRole::Green, BandRole::Blue, BandRole::Alpha],
            ImageType::Multi => &[
                BandRole::Blue,
                BandRole::Green,
                BandRole::Red,
                BandRole::RedEdge,
                BandRole::Nir,
            ],
        }
    }

    /// Number of leading bands a source must have. The RGB alpha band is optional.
    pub fn required_band_count(&self) -> usize {
        match self {
            ImageType::Rgb => 3,
            ImageType::Multi => 5,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageType::Rgb => write!(f, "RGB"),
            ImageType::Multi => write!(f, "MULTI"),
        }
    }
}

/// Canonical spectral role of a band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BandRole {
    Red,
    Green,
    Blue,
    Alpha,
    RedEdge,
    Nir,
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BandRole::Red => "red",
            BandRole::Green => "green",
            BandRole::Blue => "blue",
            BandRole::Alpha => "alpha",
            BandRole::RedEdge => "rededge",
            BandRole::Nir => "nir",
        };
        f.write_str(name)
    }
}

/// Co-registered bands of one image, keyed by role. Every band shares one shape.
pub struct BandSet {
    image_type: ImageType,
    shape: Option<(usize, usize)>,
    bands: HashMap<BandRole, Buffer<f32>>,
}

impl BandSet {
    pub fn new(image_type: ImageType) -> Self {
        Self {
            image_type,
            shape: None,
            bands: HashMap::new(),
        }
    }

    /// Map bands given in source order onto their roles.
    pub fn from_ordered(image_type: ImageType, bands: Vec<Buffer<f32>>) -> Result<Self> {
        let order = image_type.band_order();
        if bands.len() < image_type.required_band_count() {
            return Err(Error::MissingBand {
                role: order[bands.len()],
                image_type,
            });
        }

        let mut set = Self::new(image_type);
        for (role, band) in order.iter().zip(bands) {
            set.insert(*role, band)?;
        }
        Ok(set)
    }

    /// Add a band. The first band fixes the shape of the set.
    pub fn insert(&mut self, role: BandRole, band: Buffer<f32>) -> Result<()> {
        let found = band.shape();
        match self.shape {
            Some(expected) if expected != found => {
                return Err(Error::ShapeMismatch {
                    band: role.to_string(),
                    expected,
                    found,
                });
            }
            Some(_) => {}
            None => self.shape = Some(found),
        }
        self.bands.insert(role, band);
        Ok(())
    }

    pub fn get(&self, role: BandRole) -> Result<&Buffer<f32>> {
        self.bands.get(&role).ok_or(Error::MissingBand {
            role,
            image_type: self.image_type,
        })
    }

    pub fn alpha(&self) -> Option<&Buffer<f32>> {
        self.bands.get(&BandRole::Alpha)
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    /// `(width, height)` shared by every band, `None` while empty.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

/// One computed index: the value band plus, for RGB products, the source alpha.
pub struct IndexRaster<'a> {
    pub name: String,
    pub values: Buffer<f32>,
    pub alpha: Option<&'a Buffer<f32>>,
}
