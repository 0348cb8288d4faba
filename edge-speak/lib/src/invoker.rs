//! Runs a single synthesis and saves the audio.
//!
//! Failures are logged and reported through [`SynthesisOutcome`]; nothing
//! is propagated as an error and nothing is retried.

use std::path::{Path, PathBuf};

use crate::backend::SpeechBackend;
use crate::error::TtsError;
use crate::logging::LogContext;
use crate::request::{OUTPUT_EXTENSION, SynthesisRequest};

/// How a synthesis attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// Audio was written to `output_path`.
    Success {
        output_path: PathBuf,
        bytes_written: usize,
    },
    /// The backend or the file write failed; no audio was saved by this run.
    Failure { description: String },
}

impl SynthesisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SynthesisOutcome::Success { .. })
    }
}

/// Sends a [`SynthesisRequest`] to a backend and writes the result to disk.
#[derive(Debug)]
pub struct SynthesisInvoker<B> {
    backend: B,
    logging: LogContext,
}

impl<B: SpeechBackend> SynthesisInvoker<B> {
    pub fn new(backend: B, logging: LogContext) -> Self {
        Self { backend, logging }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Synthesizes `request` and saves the audio to its output path.
    ///
    /// The file is only created once the backend has returned all audio, so
    /// a backend failure leaves no file behind.
    pub async fn invoke(&self, request: &SynthesisRequest) -> SynthesisOutcome {
        self.logging.instrument(self.run(request)).await
    }

    async fn run(&self, request: &SynthesisRequest) -> SynthesisOutcome {
        tracing::info!(
            format = request.format.encoding_id(),
            "Synthesizing speech: voice={}, rate={}, output_file={}",
            request.voice_id,
            request.rate,
            request.output_path.display()
        );

        if request.format.is_pcm() && has_mp3_name(&request.output_path) {
            tracing::warn!(
                "Output format {} is PCM but the file is named {}",
                request.format,
                request.output_path.display()
            );
        }

        match self.synthesize_to_file(request).await {
            Ok(bytes_written) => {
                tracing::info!(
                    bytes = bytes_written,
                    "Speech saved to {}",
                    request.output_path.display()
                );
                SynthesisOutcome::Success {
                    output_path: request.output_path.clone(),
                    bytes_written,
                }
            }
            Err(error) => {
                tracing::error!("Speech synthesis failed: {error}");
                SynthesisOutcome::Failure {
                    description: error.to_string(),
                }
            }
        }
    }

    async fn synthesize_to_file(&self, request: &SynthesisRequest) -> Result<usize, TtsError> {
        let audio = self.backend.synthesize(request).await?;
        tokio::fs::write(&request.output_path, &audio).await?;
        Ok(audio.len())
    }
}

fn has_mp3_name(path: &Path) -> bool {
    path.to_string_lossy().ends_with(OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_mp3_name() {
        assert!(has_mp3_name(Path::new("a/b.mp3")));
        assert!(!has_mp3_name(Path::new("a/b.wav")));
    }

    #[test]
    fn test_outcome_is_success() {
        let success = SynthesisOutcome::Success {
            output_path: "x.mp3".into(),
            bytes_written: 3,
        };
        let failure = SynthesisOutcome::Failure {
            description: "boom".into(),
        };
        assert!(success.is_success());
        assert!(!failure.is_success());
    }
}
