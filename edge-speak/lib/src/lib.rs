//! Edge Speak
//!
//! Collects speech preferences through interactive prompts and hands them to
//! the Microsoft Edge read-aloud service, saving the returned audio locally.
//!
//! ## Flow
//!
//! 1. [`InputCollector`] asks for language, voice gender, text, rate, output
//!    format and file name, producing a [`SynthesisRequest`].
//! 2. [`SynthesisInvoker`] sends the request through a [`SpeechBackend`]
//!    (normally [`EdgeTtsBackend`]) and writes the audio to disk.
//!
//! ## Module Structure
//!
//! - [`catalog`] - voice and output format tables
//! - [`rate`] - bounded integer parsing and the speech rate modifier
//! - [`request`] - the request value and output file naming
//! - [`collector`] - the interactive prompt flow
//! - [`backend`] - the backend trait and the Edge websocket client
//! - [`invoker`] - log-and-continue synthesis runner
//! - [`logging`] - explicitly constructed tracing context
//! - [`error`] - error types

pub mod backend;
pub mod catalog;
pub mod collector;
pub mod error;
pub mod invoker;
pub mod logging;
pub mod rate;
pub mod request;

pub use backend::{EdgeTtsBackend, EdgeTtsConfig, SpeechBackend};
pub use catalog::{Gender, OutputFormat, VoiceCatalog};
pub use collector::{CollectOutcome, InputCollector};
pub use error::{CollectError, TtsError};
pub use invoker::{SynthesisInvoker, SynthesisOutcome};
pub use logging::{LogConfig, LogContext};
pub use rate::SpeechRate;
pub use request::SynthesisRequest;
