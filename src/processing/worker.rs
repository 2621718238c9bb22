// src/processing/worker.rs
use std::panic;
use std::thread::{self, JoinHandle};

use flume::{Receiver, Sender};
use tracing::debug;

use crate::error::{Error, Result};
use crate::processing::pipeline::{BatchReport, Pipeline, UnitStatus, VegetationRequest};

/// Progress of submitted jobs, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    Started { job: usize },
    Unit { job: usize, status: UnitStatus },
    Finished { job: usize, report: BatchReport },
}

struct Job {
    id: usize,
    request: VegetationRequest,
}

/// Runs submitted requests one after another on a single background thread.
///
/// One worker per output root: writes are never issued concurrently.
pub struct BatchWorker {
    job_tx: Option<Sender<Job>>,
    event_rx: Receiver<StatusEvent>,
    handle: Option<JoinHandle<()>>,
    next_id: usize,
}

impl BatchWorker {
    pub fn spawn(pipeline: Pipeline) -> Self {
        let (job_tx, job_rx) = flume::unbounded::<Job>();
        let (event_tx, event_rx) = flume::unbounded();

        let handle = thread::spawn(move || {
            for Job { id, request } in job_rx {
                debug!("Worker starting job {}", id);
                // A dropped event receiver only means nobody is listening.
                let _ = event_tx.send(StatusEvent::Started { job: id });

                let report = pipeline.run_observed(request, |status| {
                    let _ = event_tx.send(StatusEvent::Unit {
                        job: id,
                        status: status.clone(),
                    });
                });

                let _ = event_tx.send(StatusEvent::Finished { job: id, report });
            }
        });

        Self {
            job_tx: Some(job_tx),
            event_rx,
            handle: Some(handle),
            next_id: 0,
        }
    }

    /// Queue a request and return its job id.
    pub fn submit(&mut self, request: VegetationRequest) -> Result<usize> {
        let id = self.next_id;
        let job_tx = self
            .job_tx
            .as_ref()
            .ok_or_else(|| Error::InvalidRequest("worker is shut down".to_string()))?;
        job_tx
            .send(Job { id, request })
            .map_err(|_| Error::InvalidRequest("worker has stopped".to_string()))?;

        self.next_id += 1;
        Ok(id)
    }

    pub fn events(&self) -> &Receiver<StatusEvent> {
        &self.event_rx
    }

    /// Block until job `id` finishes, forwarding every event to `on_event`.
    pub fn wait_for<F>(&self, id: usize, mut on_event: F) -> Option<BatchReport>
    where
        F: FnMut(&StatusEvent),
    {
        for event in self.event_rx.iter() {
            on_event(&event);
            if let StatusEvent::Finished { job, report } = event {
                if job == id {
                    return Some(report);
                }
            }
        }
        None
    }

    /// Stop accepting jobs, let queued ones finish and join the thread.
    pub fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        drop(self.job_tx.take());
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                panic::resume_unwind(e);
            }
        }
    }
}

impl Drop for BatchWorker {
    fn drop(&mut self) {
        if !thread::panicking() {
            self.join();
        }
    }
}
