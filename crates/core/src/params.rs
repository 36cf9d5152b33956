//! Generation parameter resolution.
//!
//! Turns stored (or default) user preferences into a validated
//! configuration for one job submission. The resolver never rejects:
//! out-of-range values are clamped into the selected model's bounds, and
//! a model-type change re-clamps the previous step count into the new
//! range rather than resetting it.

use serde::{Deserialize, Serialize};

/// Guidance scale bounds, independent of model.
pub const GUIDANCE_MIN: f64 = 3.0;
pub const GUIDANCE_MAX: f64 = 6.0;

/// Default aspect ratio, also assumed for cache hits.
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Default guidance scale for new preference rows.
pub const DEFAULT_GUIDANCE_SCALE: f64 = 5.5;

/// Which image model a job is submitted to.
///
/// The model is part of the submission *target* (the endpoint path), not
/// just a body parameter, so it is typed: an unknown model name fails
/// parsing instead of being silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    /// Few-step distilled model; cheap and fast.
    Fast,
    /// Full model; more steps, higher fidelity.
    HighQuality,
}

impl ModelType {
    /// Submission target under `/models/{name}/predictions`.
    pub fn model_name(self) -> &'static str {
        match self {
            ModelType::Fast => "black-forest-labs/flux-schnell",
            ModelType::HighQuality => "black-forest-labs/flux-dev",
        }
    }

    /// Short identifier as stored in `user_preferences.model_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Fast => "flux-schnell",
            ModelType::HighQuality => "flux-dev",
        }
    }

    /// Parse a stored model identifier. Returns `None` for anything
    /// outside the known set — callers must fail closed, never default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "flux-schnell" => Some(ModelType::Fast),
            "flux-dev" => Some(ModelType::HighQuality),
            _ => None,
        }
    }

    /// Inclusive `(min, max)` inference-step bounds for this model.
    pub fn step_bounds(self) -> (i32, i32) {
        match self {
            ModelType::Fast => (2, 4),
            ModelType::HighQuality => (18, 50),
        }
    }

    /// Whether the service's fast path should be requested for this model.
    pub fn go_fast(self) -> bool {
        matches!(self, ModelType::Fast)
    }
}

/// Fully-resolved parameters for one job submission. Always produced via
/// [`GenerationConfig::resolve`], so steps and guidance are in bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: ModelType,
    pub inference_steps: i32,
    pub guidance_scale: f64,
    pub aspect_ratio: String,
    pub safety_checker_enabled: bool,
}

impl GenerationConfig {
    /// Clamp raw preference values into the selected model's bounds.
    ///
    /// When the model type changes, the previous numeric step value is
    /// preserved where possible (`clamp(old, new_min, new_max)`), never
    /// reset to a fixed default.
    pub fn resolve(
        model: ModelType,
        inference_steps: i32,
        guidance_scale: f64,
        aspect_ratio: &str,
        safety_checker_enabled: bool,
    ) -> Self {
        let (min_steps, max_steps) = model.step_bounds();
        Self {
            model,
            inference_steps: inference_steps.clamp(min_steps, max_steps),
            guidance_scale: guidance_scale.clamp(GUIDANCE_MIN, GUIDANCE_MAX),
            aspect_ratio: aspect_ratio.to_string(),
            safety_checker_enabled,
        }
    }
}

impl Default for GenerationConfig {
    /// Defaults for lazily-created preference rows: fast model, 2 steps,
    /// guidance 5.5, square ratio, safety checker on.
    fn default() -> Self {
        GenerationConfig::resolve(ModelType::Fast, 2, DEFAULT_GUIDANCE_SCALE, DEFAULT_ASPECT_RATIO, true)
    }
}
