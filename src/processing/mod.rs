// src/processing/mod.rs
pub mod bands;
pub mod indices;
pub mod pipeline;
pub mod registry;
pub mod worker;

// Re-export main components
pub use bands::{BandRole, BandSet, ImageType, IndexRaster};
pub use pipeline::{BatchReport, Pipeline, UnitFailure, UnitStatus, VegetationRequest};
pub use registry::IndexRegistry;
pub use worker::{BatchWorker, StatusEvent};
