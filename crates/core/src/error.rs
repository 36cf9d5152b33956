/// Typed failure kinds for the generation pipeline and its callers.
///
/// Every externally-facing operation returns `Result<_, GenError>` rather
/// than panicking; the API layer maps each kind to an HTTP status and a
/// short human-readable message.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// No authenticated session; anonymous generation is not allowed.
    #[error("Not signed in")]
    Unauthenticated,

    /// A required provider credential or endpoint is missing.
    #[error("Service not configured: {0}")]
    Unconfigured(String),

    /// Job creation was rejected (non-2xx) or failed before submission.
    #[error("Failed to start image generation: {0}")]
    SubmissionFailed(String),

    /// A status poll returned non-2xx.
    #[error("Failed to check generation status: {0}")]
    PollFailed(String),

    /// The job service reported a terminal `failed` state, or reported
    /// success without an output.
    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    /// No terminal state within the polling budget.
    #[error("Image generation timed out")]
    Timeout,

    /// The durable store rejected a write after a successful generation.
    /// Logged and swallowed inside the pipeline; callers never see it for
    /// `generate`, but repositories surface it for direct mutations.
    #[error("Failed to persist: {0}")]
    PersistenceFailed(String),

    /// The referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl GenError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            GenError::Unauthenticated => "UNAUTHENTICATED",
            GenError::Unconfigured(_) => "UNCONFIGURED",
            GenError::SubmissionFailed(_) => "SUBMISSION_FAILED",
            GenError::PollFailed(_) => "POLL_FAILED",
            GenError::GenerationFailed(_) => "GENERATION_FAILED",
            GenError::Timeout => "TIMEOUT",
            GenError::PersistenceFailed(_) => "PERSISTENCE_FAILED",
            GenError::NotFound(_) => "NOT_FOUND",
        }
    }
}
