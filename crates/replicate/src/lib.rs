//! REST client for the external image-generation job service.
//!
//! Provides typed prediction states and HTTP wrappers for submitting a
//! generation job, polling its status, and downloading the output. Jobs
//! are owned by the service; this crate only creates and observes them.

pub mod api;
pub mod prediction;

pub use api::{ReplicateApi, ReplicateApiError};
pub use prediction::{Prediction, PredictionInput, PredictionStatus};
