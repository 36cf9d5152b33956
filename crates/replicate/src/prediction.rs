//! Typed prediction (job) states and request bodies.

use serde::{Deserialize, Serialize};

/// Lifecycle of an external generation job:
/// `starting → processing → {succeeded, failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    /// The service may also report `canceled`; treated as terminal failure.
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

/// A job as reported by the service's create and poll endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Opaque server-assigned job id.
    pub id: String,
    pub status: PredictionStatus,
    /// Output URLs on success. Exactly one (`output[0]`) is expected.
    #[serde(default)]
    pub output: Option<Vec<String>>,
    /// Service-provided failure message, if any.
    #[serde(default)]
    pub error: Option<String>,
}

impl Prediction {
    /// First output URL, if the service produced one.
    pub fn first_output(&self) -> Option<&str> {
        self.output
            .as_deref()
            .and_then(|urls| urls.first())
            .map(String::as_str)
    }
}

/// Request body for job submission (`input` object of the create call).
#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    pub prompt: String,
    pub num_outputs: u32,
    pub guidance_scale: f64,
    pub num_inference_steps: i32,
    pub output_format: String,
    pub output_quality: u32,
    pub disable_safety_checker: bool,
    pub aspect_ratio: String,
    pub go_fast: bool,
}

impl PredictionInput {
    /// Standard single-output request: webp at quality 80, one image.
    pub fn single(
        prompt: &str,
        guidance_scale: f64,
        num_inference_steps: i32,
        aspect_ratio: &str,
        safety_checker_enabled: bool,
        go_fast: bool,
    ) -> Self {
        Self {
            prompt: prompt.to_string(),
            num_outputs: 1,
            guidance_scale,
            num_inference_steps,
            output_format: "webp".to_string(),
            output_quality: 80,
            disable_safety_checker: !safety_checker_enabled,
            aspect_ratio: aspect_ratio.to_string(),
            go_fast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_lowercase_wire_values() {
        let p: Prediction = serde_json::from_str(
            r#"{ "id": "j1", "status": "processing", "output": null, "error": null }"#,
        )
        .unwrap();
        assert_eq!(p.status, PredictionStatus::Processing);
        assert!(!p.status.is_terminal());
        assert!(p.first_output().is_none());
    }

    #[test]
    fn succeeded_prediction_exposes_first_output() {
        let p: Prediction = serde_json::from_str(
            r#"{ "id": "j1", "status": "succeeded", "output": ["https://job/out.webp"], "error": null }"#,
        )
        .unwrap();
        assert!(p.status.is_terminal());
        assert_eq!(p.first_output(), Some("https://job/out.webp"));
    }

    #[test]
    fn single_input_inverts_safety_flag() {
        let input = PredictionInput::single("a cat", 5.5, 4, "1:1", true, true);
        assert!(!input.disable_safety_checker);
        assert_eq!(input.num_outputs, 1);
        assert_eq!(input.output_format, "webp");
        assert_eq!(input.output_quality, 80);
    }
}
