//! The speech synthesis backend seam.
//!
//! The invoker only depends on [`SpeechBackend`]. The production
//! implementation is [`EdgeTtsBackend`], which talks to the Microsoft Edge
//! read-aloud service over a websocket.

mod drm;
mod edge;
pub mod protocol;

pub use drm::sec_ms_gec;
pub use edge::{EdgeTtsBackend, EdgeTtsConfig};

use crate::error::TtsError;
use crate::request::SynthesisRequest;

/// A remote service that turns a [`SynthesisRequest`] into audio bytes.
///
/// ## Native Async Traits
///
/// This trait uses native async functions in traits, so implementations can
/// simply write `async fn synthesize`.
///
/// ## Examples
///
/// ```ignore
/// use edge_speak_lib::{SpeechBackend, SynthesisRequest, TtsError};
///
/// struct Silence;
///
/// impl SpeechBackend for Silence {
///     async fn synthesize(&self, _request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait SpeechBackend: Send + Sync {
    /// Synthesizes the request's text and returns the encoded audio.
    ///
    /// ## Errors
    ///
    /// Returns `TtsError` when the service cannot be reached, rejects the
    /// request, or returns no audio.
    fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, TtsError>> + Send;
}
