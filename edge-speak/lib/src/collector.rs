//! Interactive, line-oriented collection of synthesis preferences.
//!
//! The collector reads one answer per prompt from any [`BufRead`] and writes
//! prompts to any [`Write`], so the binary can hand it stdin/stdout while
//! tests hand it in-memory buffers.

use std::io::{BufRead, Write};

use owo_colors::OwoColorize;

use crate::catalog::{Gender, OutputFormat, VoiceCatalog};
use crate::error::CollectError;
use crate::rate::{MAX_RATE, MIN_RATE, SpeechRate, format_signed, parse_bounded};
use crate::request::{SynthesisRequest, normalize_output_path};

/// Rate used when the answer is blank or unusable.
const DEFAULT_RATE: i64 = 0;

/// What the prompt flow produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectOutcome {
    /// All answers were collected.
    Ready(SynthesisRequest),
    /// The language has no voices; nothing should be synthesized.
    Aborted {
        /// The normalized language code the user typed.
        language: String,
    },
}

/// Prompts the user for each synthesis preference in turn.
pub struct InputCollector<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> InputCollector<R, W> {
    /// Builds a collector with colour disabled.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
        }
    }

    /// Styles the banner and warnings with ANSI colours.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Runs the full prompt sequence.
    ///
    /// An unsupported language ends the flow immediately with
    /// [`CollectOutcome::Aborted`]. Unknown menu keys and unusable rates are
    /// recovered with defaults.
    ///
    /// ## Errors
    ///
    /// Returns [`CollectError::Io`] if reading an answer or writing a prompt
    /// fails. End of input is treated as a blank answer.
    pub fn collect(&mut self) -> Result<CollectOutcome, CollectError> {
        let banner = "Welcome to the Edge TTS speech synthesizer!";
        if self.color {
            writeln!(self.output, "{}", banner.bold())?;
        } else {
            writeln!(self.output, "{banner}")?;
        }

        let language = self
            .ask(&format!(
                "Enter the voice language code (e.g. {}): ",
                VoiceCatalog::languages().join(", ")
            ))?
            .to_lowercase();
        if !VoiceCatalog::supports(&language) {
            writeln!(
                self.output,
                "Sorry, no voices are available for language '{language}'."
            )?;
            return Ok(CollectOutcome::Aborted { language });
        }

        writeln!(self.output, "Choose a voice type:")?;
        writeln!(self.output, "[1] Male")?;
        writeln!(self.output, "[2] Female")?;
        let gender = Gender::from_selection_key(&self.ask("Enter your choice (1 or 2): ")?);
        let Some(voice_id) = VoiceCatalog::voice_id(&language, gender) else {
            // every catalog language carries both genders
            return Ok(CollectOutcome::Aborted { language });
        };

        let text = self.ask("Enter the text to synthesize: ")?;

        let rate = self.ask(&format!(
            "Enter the speech rate ({MIN_RATE} to {MAX_RATE}): "
        ))?;
        let rate = parse_bounded(&rate, DEFAULT_RATE, MIN_RATE, MAX_RATE);
        if rate.fell_back {
            let warning = format!(
                "Invalid value. Using the default ({}).",
                format_signed(DEFAULT_RATE, "%")
            );
            if self.color {
                writeln!(self.output, "{}", warning.yellow())?;
            } else {
                writeln!(self.output, "{warning}")?;
            }
        }

        writeln!(self.output, "Choose an output format:")?;
        for format in OutputFormat::ALL {
            writeln!(self.output, "[{}] {}", format.selection_key(), format)?;
        }
        let format = OutputFormat::from_selection_key(&self.ask("Enter your choice (1-4): ")?);

        let output_file = self.ask("Enter the output file name (default output.mp3): ")?;

        Ok(CollectOutcome::Ready(SynthesisRequest {
            text,
            voice_id: voice_id.to_string(),
            rate: SpeechRate::new(rate.value),
            format,
            output_path: normalize_output_path(&output_file).into(),
        }))
    }

    /// Writes `prompt` and returns the trimmed answer line.
    fn ask(&mut self, prompt: &str) -> Result<String, CollectError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
