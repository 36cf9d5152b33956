//! Prompt generation from a creator profile.
//!
//! Thin wrappers over the completion service: subject and style lists
//! are comma-separated, image prompts newline-separated. The completion
//! text is otherwise opaque — no schema validation.

use std::sync::Arc;

use aistagram_core::profile::{split_comma_list, split_prompt_lines, CreatorProfile};

use crate::completion::{CompletionClient, CompletionError};

/// Default number of image prompts per feed.
pub const DEFAULT_PROMPT_COUNT: usize = 20;

const SUBJECTS_SYSTEM: &str =
    "You are a creative AI assistant specializing in photography and social media content.";
const STYLES_SYSTEM: &str =
    "You are a creative AI assistant specializing in photography styles and visual aesthetics.";
const PROMPTS_SYSTEM: &str =
    "You are a creative prompt engineer for an AI that generates Instagram-style images.";

/// Produces subject/style/prompt lists for a creator persona.
pub struct PromptGenerator {
    completions: Arc<dyn CompletionClient>,
}

impl PromptGenerator {
    pub fn new(completions: Arc<dyn CompletionClient>) -> Self {
        Self { completions }
    }

    /// Ten diverse photo subjects for an AI creator type.
    pub async fn photo_subjects(&self, ai_type: &str) -> Result<Vec<String>, CompletionError> {
        let prompt = format!(
            "Given an AI type of \"{ai_type}\", generate a list of 10 diverse and interesting \
             photo subjects that this AI might post about on Instagram. Each subject should be \
             concise (1-3 words). Separate each subject with a comma."
        );
        let completion = self.completions.generate(SUBJECTS_SYSTEM, &prompt).await?;
        Ok(split_comma_list(&completion.text))
    }

    /// Eight photo styles suiting a creator type and subject.
    pub async fn photo_styles(
        &self,
        ai_type: &str,
        photo_subject: &str,
    ) -> Result<Vec<String>, CompletionError> {
        let prompt = format!(
            "Given an AI type of \"{ai_type}\" focusing on the photo subject \"{photo_subject}\", \
             generate a list of 8 diverse and interesting photo styles that would suit this \
             combination. Each style should be concise (1-3 words). Separate each style with a comma."
        );
        let completion = self.completions.generate(STYLES_SYSTEM, &prompt).await?;
        Ok(split_comma_list(&completion.text))
    }

    /// `count` short image prompts tailored to the profile, one per line.
    pub async fn image_prompts(
        &self,
        profile: &CreatorProfile,
        count: usize,
    ) -> Result<Vec<String>, CompletionError> {
        let prompt = format!(
            "Generate {count} unique, descriptive prompts for image generation based on the \
             following AI profile:\n\
             - AI Type: {}\n\
             - Photo Subject: {}\n\
             - Photo Style: {}\n\
             - AI Name: {}\n\n\
             Each prompt should be tailored to this AI's characteristics and preferences. Keep \
             each prompt under 100 characters. Focus on visual elements, style, and mood. Return \
             exactly the requested number of prompts, one per line.",
            profile.ai_type, profile.photo_subject, profile.photo_style, profile.name
        );
        let completion = self.completions.generate(PROMPTS_SYSTEM, &prompt).await?;
        Ok(split_prompt_lines(&completion.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Completion;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Completion stub that records requests and replays a fixed answer.
    struct FixedCompletion {
        text: String,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl FixedCompletion {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for FixedCompletion {
        async fn generate(
            &self,
            system: &str,
            prompt: &str,
        ) -> Result<Completion, CompletionError> {
            self.requests
                .lock()
                .await
                .push((system.to_string(), prompt.to_string()));
            Ok(Completion {
                text: self.text.clone(),
                usage: None,
            })
        }
    }

    #[tokio::test]
    async fn subjects_are_comma_split() {
        let stub = Arc::new(FixedCompletion::new("mountain lakes, city skylines , dogs"));
        let generator = PromptGenerator::new(stub.clone());

        let subjects = generator.photo_subjects("nature photographer").await.unwrap();
        assert_eq!(subjects, vec!["mountain lakes", "city skylines", "dogs"]);

        let requests = stub.requests.lock().await;
        assert_eq!(requests[0].0, SUBJECTS_SYSTEM);
        assert!(requests[0].1.contains("nature photographer"));
    }

    #[tokio::test]
    async fn prompts_are_newline_split_with_blanks_dropped() {
        let stub = Arc::new(FixedCompletion::new(
            "red bicycle on a beach, golden hour\n\nfoggy pier at dawn\n",
        ));
        let generator = PromptGenerator::new(stub);

        let profile = CreatorProfile {
            ai_type: "travel ai".to_string(),
            photo_subject: "coastlines".to_string(),
            photo_style: "cinematic".to_string(),
            name: "Wander".to_string(),
        };
        let prompts = generator.image_prompts(&profile, 2).await.unwrap();
        assert_eq!(
            prompts,
            vec!["red bicycle on a beach, golden hour", "foggy pier at dawn"]
        );
    }
}
