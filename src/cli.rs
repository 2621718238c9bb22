use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::io::RasterFormat;
use crate::processing::bands::ImageType;

#[derive(Parser)]
#[command(name = "vi-raster", version)]
#[command(about = "Vegetation index rasters from RGB and multispectral orthomosaics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Worker threads for pixel computation (default: all CPUs)
    #[arg(long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indices for one or more orthomosaics
    Run {
        /// Image type: rgb (red, green, blue[, alpha]) or multi (blue, green, red, rededge, nir)
        #[arg(short = 't', long, value_enum, ignore_case = true)]
        image_type: ImageType,

        /// Output root; products land in <out>/<index>/<stem>_<index>.<ext>
        #[arg(short, long)]
        out: PathBuf,

        /// Index names, repeated or comma separated (e.g. -i ndvi,ndre)
        #[arg(short, long = "index", value_delimiter = ',', required = true)]
        indices: Vec<String>,

        /// Output raster format
        #[arg(short, long, value_enum, default_value_t = RasterFormat::Envi)]
        format: RasterFormat,

        /// Source orthomosaics
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Run the jobs of a JSON batch file
    Batch {
        /// Batch file path
        config: PathBuf,
    },

    /// List the index names available per image type
    List {
        /// Only list this image type
        #[arg(short = 't', long, value_enum, ignore_case = true)]
        image_type: Option<ImageType>,
    },
}
