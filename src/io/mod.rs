// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{read_image, GeoInfo, SourceImage};
pub use writer::{output_path, output_stem, write_raster, RasterFormat};
