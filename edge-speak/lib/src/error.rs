//! Error types for the edge-speak library.

use std::time::Duration;

/// Errors that can occur while synthesizing speech.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// The websocket connection or one of its frames failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The handshake request could not be built.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Description of what was wrong with the request.
        reason: String,
    },

    /// There was nothing left to synthesize after cleaning the text.
    #[error("no text to synthesize")]
    EmptyText,

    /// The service sent a frame this client does not understand.
    #[error("unexpected response from speech service: {message}")]
    UnexpectedResponse {
        /// What was received.
        message: String,
    },

    /// A turn ended without any audio payload.
    #[error("no audio received from speech service")]
    NoAudioReceived,

    /// The service did not answer within the configured receive timeout.
    #[error("speech service did not respond within {0:?}")]
    Timeout(Duration),

    /// Writing the audio file failed.
    #[error("failed to write audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading answers from the interactive prompts.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Reading from the input or writing a prompt failed.
    #[error("prompt I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
