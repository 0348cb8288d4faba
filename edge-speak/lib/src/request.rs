//! The synthesis request handed from the collector to the invoker.

use std::path::PathBuf;

use crate::catalog::OutputFormat;
use crate::rate::SpeechRate;

/// File name used when the user leaves the prompt blank.
pub const DEFAULT_OUTPUT_FILE: &str = "output.mp3";

/// Extension forced onto every output file name.
pub const OUTPUT_EXTENSION: &str = ".mp3";

/// Everything needed for a single synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Text to speak. May be empty.
    pub text: String,
    /// Service voice name from the voice catalog.
    pub voice_id: String,
    /// Tempo adjustment.
    pub rate: SpeechRate,
    /// Encoding the service should return.
    pub format: OutputFormat,
    /// Where the audio is written.
    pub output_path: PathBuf,
}

/// Normalizes the output file name typed by the user.
///
/// The name is trimmed, defaults to [`DEFAULT_OUTPUT_FILE`] when blank, and
/// gets [`OUTPUT_EXTENSION`] appended when it does not already end with it.
/// The extension is forced for PCM encodings as well.
///
/// ## Examples
///
/// ```
/// use edge_speak_lib::request::normalize_output_path;
///
/// assert_eq!(normalize_output_path("  "), "output.mp3");
/// assert_eq!(normalize_output_path("greeting"), "greeting.mp3");
/// assert_eq!(normalize_output_path("greeting.mp3"), "greeting.mp3");
/// assert_eq!(normalize_output_path("greeting.wav"), "greeting.wav.mp3");
/// ```
pub fn normalize_output_path(input: &str) -> String {
    let name = input.trim();
    if name.is_empty() {
        return DEFAULT_OUTPUT_FILE.to_string();
    }
    if name.ends_with(OUTPUT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{OUTPUT_EXTENSION}")
    }
}
