//! The image generation pipeline and its collaborator seams.
//!
//! [`generate::ImagePipeline`] turns one prompt into one durably
//! recorded image post: cache check, job submission, fixed-interval
//! polling under a wall-clock budget, blob re-upload, cache write, and a
//! non-fatal database write. Collaborators (cache, blob store, job
//! service, durable stores) are injected behind traits in [`stores`];
//! in-memory implementations live in [`memory`], Postgres adapters in
//! [`pg`], and the HTTP blob client in [`blob`].
//!
//! Prompt generation against the external completion service lives in
//! [`completion`] and [`prompts`]; feed-snapshot sharing in [`share`].

pub mod blob;
pub mod completion;
pub mod generate;
pub mod memory;
pub mod pg;
pub mod prompts;
pub mod share;
pub mod stores;

pub use generate::{GeneratedImage, GenerationRequest, ImagePipeline, PipelineConfig};
pub use share::FeedSharer;
