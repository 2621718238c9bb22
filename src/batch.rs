// src/batch.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::io::RasterFormat;
use crate::processing::bands::ImageType;
use crate::processing::pipeline::{BatchReport, Pipeline, UnitStatus, VegetationRequest};
use crate::processing::worker::{BatchWorker, StatusEvent};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub jobs: Vec<JobSpec>,
}

#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct GlobalParams {
    #[serde(default)]
    pub format: RasterFormat,
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct JobSpec {
    pub image_type: ImageType,
    pub images: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub indices: Vec<String>,
    pub format: Option<RasterFormat>,
}

impl JobSpec {
    /// Validate into a request, falling back to the global format.
    pub fn into_request(self, global: &GlobalParams) -> Result<VegetationRequest> {
        let format = self.format.unwrap_or(global.format);
        Ok(VegetationRequest::new(self.image_type, self.images, self.out_dir, self.indices)?
            .with_format(format))
    }
}

impl BatchConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validate every job up front; one bad job rejects the file.
    pub fn into_requests(self) -> Result<Vec<VegetationRequest>> {
        let global = self.global;
        self.jobs
            .into_iter()
            .enumerate()
            .map(|(i, job)| {
                job.into_request(&global)
                    .map_err(|e| Error::Config(format!("job {}: {}", i + 1, e)))
            })
            .collect()
    }
}

/// Run every job of a batch file on a background worker, in order.
pub fn process_batch(config_path: &Path, threads: Option<usize>) -> Result<Vec<BatchReport>> {
    let config = BatchConfig::load(config_path)?;
    let threads = threads.or(config.global.threads);
    let requests = config.into_requests()?;

    info!("Starting batch processing with {} jobs...", requests.len());

    let mut worker = BatchWorker::spawn(Pipeline::new(threads)?);
    let ids = requests
        .into_iter()
        .map(|request| worker.submit(request))
        .collect::<Result<Vec<_>>>()?;

    let total = ids.len();
    let mut reports = Vec::with_capacity(total);
    for id in ids {
        let report = worker.wait_for(id, |event| match event {
            StatusEvent::Started { job } => info!("[{}/{}] Started", job + 1, total),
            StatusEvent::Unit {
                job,
                status: UnitStatus::Failed(failure),
            } => warn!("[{}/{}] {}", job + 1, total, failure),
            StatusEvent::Unit { .. } => {}
            StatusEvent::Finished { job, report } => info!(
                "[{}/{}] Finished: {} written, {} failed",
                job + 1,
                total,
                report.written.len(),
                report.failures.len()
            ),
        });
        match report {
            Some(report) => reports.push(report),
            None => return Err(Error::Config("worker stopped before finishing".to_string())),
        }
    }

    worker.shutdown();
    info!("Batch processing complete!");
    Ok(reports)
}
