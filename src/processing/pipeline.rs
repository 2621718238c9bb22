// src/processing/pipeline.rs
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::io::{output_stem, read_image, write_raster, RasterFormat, SourceImage};
use crate::processing::bands::ImageType;
use crate::processing::registry::IndexRegistry;

/// A validated set of choices for one batch: which images, which indices, where to.
///
/// Built once and passed by value into [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct VegetationRequest {
    image_type: ImageType,
    images: Vec<PathBuf>,
    out_dir: PathBuf,
    indices: Vec<String>,
    format: RasterFormat,
}

impl VegetationRequest {
    /// Validate and normalize a request.
    ///
    /// Index names are lowercased and deduplicated in order. Any name not
    /// defined for `image_type` fails the whole request with `UnknownIndex`.
    pub fn new<I, S>(
        image_type: ImageType,
        images: Vec<PathBuf>,
        out_dir: impl Into<PathBuf>,
        indices: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if images.is_empty() {
            return Err(Error::InvalidRequest("no input images".to_string()));
        }
        if let Some(path) = images.iter().find(|path| output_stem(path).is_empty()) {
            return Err(Error::InvalidRequest(format!(
                "{} has no file name to name products after",
                path.display()
            )));
        }

        let indices: Vec<String> = indices
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .unique()
            .collect();
        if indices.is_empty() {
            return Err(Error::InvalidRequest("no indices requested".to_string()));
        }

        let registry = IndexRegistry::for_image_type(image_type);
        for name in &indices {
            registry.get(name)?;
        }

        Ok(Self {
            image_type,
            images,
            out_dir: out_dir.into(),
            indices,
            format: RasterFormat::default(),
        })
    }

    pub fn with_format(mut self, format: RasterFormat) -> Self {
        self.format = format;
        self
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    pub fn format(&self) -> RasterFormat {
        self.format
    }
}

/// One (image, index) unit that did not produce a raster.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFailure {
    pub image: PathBuf,
    pub index: String,
    pub kind: &'static str,
    pub message: String,
}

impl UnitFailure {
    fn new(image: &Path, index: &str, error: &Error) -> Self {
        Self {
            image: image.to_path_buf(),
            index: index.to_string(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}: {}: {}",
            self.image.display(),
            self.index,
            self.kind,
            self.message
        )
    }
}

/// Outcome of a single (image, index) unit.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitStatus {
    Written {
        image: PathBuf,
        index: String,
        path: PathBuf,
    },
    Failed(UnitFailure),
}

/// Written products and failed units of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, status: &UnitStatus) {
        match status {
            UnitStatus::Written { path, .. } => self.written.push(path.clone()),
            UnitStatus::Failed(failure) => self.failures.push(failure.clone()),
        }
    }
}

/// Sequential image × index driver. Pixel arithmetic runs on the owned thread pool.
pub struct Pipeline {
    pool: rayon::ThreadPool,
}

impl Pipeline {
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let threads = threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| Error::Config(format!("thread pool: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn run(&self, request: VegetationRequest) -> BatchReport {
        self.run_observed(request, |_| {})
    }

    /// Run every unit of `request`, reporting each outcome to `observer` as it happens.
    ///
    /// A failed image fails all of its indices; a failed unit never stops the batch.
    pub fn run_observed<F>(&self, request: VegetationRequest, mut observer: F) -> BatchReport
    where
        F: FnMut(&UnitStatus),
    {
        let registry = IndexRegistry::for_image_type(request.image_type);
        let mut report = BatchReport::default();
        let mut stems: HashMap<String, &Path> = HashMap::new();

        info!(
            "Processing {} {} image(s): {}",
            request.images.len(),
            request.image_type,
            request.indices.iter().join(", ")
        );

        for path in &request.images {
            let stem = output_stem(path);
            if let Some(previous) = stems.insert(stem.clone(), path.as_path()) {
                warn!(
                    "{} and {} share output stem `{}`; later products replace earlier ones",
                    previous.display(),
                    path.display(),
                    stem
                );
            }

            match read_image(path, request.image_type) {
                Ok(image) => {
                    self.process_units(&request, &registry, &image, &mut report, &mut observer)
                }
                Err(e) => {
                    warn!("Failed to read {}: {} ({})", path.display(), e, e.kind());
                    for index in &request.indices {
                        let status = UnitStatus::Failed(UnitFailure::new(path, index, &e));
                        report.record(&status);
                        observer(&status);
                    }
                }
            }
        }

        info!(
            "Batch complete: {} written, {} failed",
            report.written.len(),
            report.failures.len()
        );
        report
    }

    fn process_units<F>(
        &self,
        request: &VegetationRequest,
        registry: &IndexRegistry,
        image: &SourceImage,
        report: &mut BatchReport,
        observer: &mut F,
    ) where
        F: FnMut(&UnitStatus),
    {
        let stem = output_stem(&image.path);

        for index in &request.indices {
            let status = match self.process_unit(request, registry, image, &stem, index) {
                Ok(path) => {
                    info!("{} / {} -> {}", image.path.display(), index, path.display());
                    UnitStatus::Written {
                        image: image.path.clone(),
                        index: index.clone(),
                        path,
                    }
                }
                Err(e) => {
                    let failure = UnitFailure::new(&image.path, index, &e);
                    warn!("Failed {}", failure);
                    UnitStatus::Failed(failure)
                }
            };
            report.record(&status);
            observer(&status);
        }
    }

    fn process_unit(
        &self,
        request: &VegetationRequest,
        registry: &IndexRegistry,
        image: &SourceImage,
        stem: &str,
        index: &str,
    ) -> Result<PathBuf> {
        debug!("Computing {} for {}", index, image.path.display());
        let raster = self.pool.install(|| registry.compute(index, &image.bands))?;

        write_raster(
            &request.out_dir,
            &raster.name,
            stem,
            &image.geo_info,
            &raster.values,
            raster.alpha,
            request.format,
        )
    }
}
