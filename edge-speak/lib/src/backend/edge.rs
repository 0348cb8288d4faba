//! Microsoft Edge read-aloud TTS backend.
//!
//! Each chunk of text is synthesized over its own websocket connection:
//! a `speech.config` frame selects the encoding, an `ssml` frame carries the
//! text, and the service streams binary audio frames until `turn.end`.

use std::time::Duration;

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use uuid::Uuid;

use super::SpeechBackend;
use super::drm::sec_ms_gec;
use super::protocol::{self, Frame};
use crate::error::TtsError;
use crate::request::SynthesisRequest;

/// Public read-aloud websocket endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1";

/// Client token the Edge browser ships with.
pub const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";

/// Browser version reported in the handshake.
pub const CHROMIUM_VERSION: &str = "140.0.3485.14";

const ORIGIN: &str = "chrome-extension://jdiccldimpdaibmpdkjnbmckianbfold";

/// Connection settings for [`EdgeTtsBackend`].
///
/// ## Examples
///
/// ```
/// use std::time::Duration;
/// use edge_speak_lib::EdgeTtsConfig;
///
/// let config = EdgeTtsConfig::new()
///     .with_endpoint("ws://127.0.0.1:9000/edge/v1")
///     .with_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.endpoint, "ws://127.0.0.1:9000/edge/v1");
/// ```
#[derive(Debug, Clone)]
pub struct EdgeTtsConfig {
    /// Websocket endpoint, without query string.
    pub endpoint: String,
    /// Value of the `TrustedClientToken` query parameter.
    pub trusted_client_token: String,
    /// Full browser version, e.g. `140.0.3485.14`.
    pub chromium_version: String,
    /// Upper bound for one chunk's exchange. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for EdgeTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            trusted_client_token: TRUSTED_CLIENT_TOKEN.into(),
            chromium_version: CHROMIUM_VERSION.into(),
            timeout: None,
        }
    }
}

impl EdgeTtsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the backend at another endpoint, e.g. a local test server.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_trusted_client_token(mut self, token: impl Into<String>) -> Self {
        self.trusted_client_token = token.into();
        self
    }

    #[must_use]
    pub fn with_chromium_version(mut self, version: impl Into<String>) -> Self {
        self.chromium_version = version.into();
        self
    }

    /// Bounds each chunk's exchange with the service.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn chromium_major_version(&self) -> &str {
        self.chromium_version
            .split('.')
            .next()
            .unwrap_or(&self.chromium_version)
    }
}

/// [`SpeechBackend`] backed by the Edge read-aloud service.
#[derive(Debug, Clone, Default)]
pub struct EdgeTtsBackend {
    config: EdgeTtsConfig,
}

impl EdgeTtsBackend {
    pub fn new(config: EdgeTtsConfig) -> Self {
        Self { config }
    }

    fn connection_url(&self) -> String {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        format!(
            "{}?TrustedClientToken={}&ConnectionId={}&Sec-MS-GEC={}&Sec-MS-GEC-Version=1-{}",
            self.config.endpoint,
            self.config.trusted_client_token,
            Uuid::new_v4().simple(),
            sec_ms_gec(now, &self.config.trusted_client_token),
            self.config.chromium_version,
        )
    }

    fn handshake_request(&self) -> Result<Request, TtsError> {
        let mut request = self.connection_url().into_client_request()?;

        let major = self.config.chromium_major_version();
        let user_agent = format!(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/{major}.0.0.0 Safari/537.36 Edg/{major}.0.0.0"
        );
        let user_agent =
            HeaderValue::from_str(&user_agent).map_err(|e| TtsError::InvalidRequest {
                reason: format!("invalid user agent: {e}"),
            })?;

        let headers = request.headers_mut();
        headers.insert("Pragma", HeaderValue::from_static("no-cache"));
        headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));
        headers.insert("Origin", HeaderValue::from_static(ORIGIN));
        headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert("User-Agent", user_agent);

        Ok(request)
    }

    async fn synthesize_chunk(
        &self,
        chunk: &str,
        request: &SynthesisRequest,
        rate: &str,
    ) -> Result<Vec<u8>, TtsError> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(chunk, request, rate))
                .await
                .map_err(|_| TtsError::Timeout(limit))?,
            None => self.exchange(chunk, request, rate).await,
        }
    }

    async fn exchange(
        &self,
        chunk: &str,
        request: &SynthesisRequest,
        rate: &str,
    ) -> Result<Vec<u8>, TtsError> {
        let (mut socket, _) = connect_async(self.handshake_request()?).await?;

        let timestamp = protocol::date_to_string(Utc::now());
        socket
            .send(Message::Text(protocol::speech_config_message(
                &timestamp,
                request.format.encoding_id(),
            )?))
            .await?;

        let ssml = protocol::mkssml(&request.voice_id, rate, chunk);
        let request_id = Uuid::new_v4().simple().to_string();
        socket
            .send(Message::Text(protocol::ssml_message(
                &request_id,
                &protocol::date_to_string(Utc::now()),
                &ssml,
            )))
            .await?;

        let mut audio = Vec::new();
        while let Some(message) = socket.next().await {
            match message? {
                Message::Text(text) => {
                    if protocol::parse_text_frame(&text)? == Frame::TurnEnd {
                        break;
                    }
                }
                Message::Binary(data) => {
                    if let Frame::Audio(payload) = protocol::parse_binary_frame(&data)? {
                        audio.extend_from_slice(payload);
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }

        if let Err(error) = socket.close(None).await {
            tracing::debug!(error = %error, "Closing speech websocket failed");
        }

        if audio.is_empty() {
            return Err(TtsError::NoAudioReceived);
        }
        Ok(audio)
    }
}

impl SpeechBackend for EdgeTtsBackend {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let rate = request.rate.to_string();
        let chunks = protocol::prepare_text(&request.text, &request.voice_id, &rate);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::debug!(
                chunk = index + 1,
                of = chunks.len(),
                bytes = chunk.len(),
                encoding = request.format.encoding_id(),
                "Sending Edge TTS request"
            );
            audio.extend(self.synthesize_chunk(chunk, request, &rate).await?);
        }

        tracing::debug!(audio_size = audio.len(), "Edge TTS synthesis complete");
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EdgeTtsConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.trusted_client_token, TRUSTED_CLIENT_TOKEN);
        assert!(config.timeout.is_none());
        assert_eq!(config.chromium_major_version(), "140");
    }

    #[test]
    fn test_connection_url_query() {
        let backend = EdgeTtsBackend::new(EdgeTtsConfig::new().with_endpoint("ws://host/edge/v1"));
        let url = backend.connection_url();

        assert!(url.starts_with("ws://host/edge/v1?TrustedClientToken=6A5AA1D4EAFF4E9FB37E23D68491D6F4"));
        assert!(url.contains("&ConnectionId="));
        assert!(url.contains("&Sec-MS-GEC="));
        assert!(url.ends_with("&Sec-MS-GEC-Version=1-140.0.3485.14"));
    }

    #[test]
    fn test_connection_url_uses_configured_token() {
        let backend = EdgeTtsBackend::new(
            EdgeTtsConfig::new()
                .with_endpoint("ws://host/edge/v1")
                .with_trusted_client_token("0123456789ABCDEF"),
        );
        let before = Utc::now().timestamp() as u64;
        let url = backend.connection_url();
        let after = Utc::now().timestamp() as u64;

        assert!(url.starts_with("ws://host/edge/v1?TrustedClientToken=0123456789ABCDEF&"));
        let gec = url
            .split('&')
            .find_map(|pair| pair.strip_prefix("Sec-MS-GEC="))
            .unwrap();
        assert!(
            gec == sec_ms_gec(before, "0123456789ABCDEF")
                || gec == sec_ms_gec(after, "0123456789ABCDEF")
        );
    }

    #[test]
    fn test_handshake_headers() {
        let backend = EdgeTtsBackend::new(
            EdgeTtsConfig::new()
                .with_endpoint("wss://example.com/edge/v1")
                .with_chromium_version("131.0.1.2"),
        );
        let request = backend.handshake_request().unwrap();
        let headers = request.headers();

        assert_eq!(headers["Origin"], ORIGIN);
        assert_eq!(headers["Pragma"], "no-cache");
        let user_agent = headers["User-Agent"].to_str().unwrap();
        assert!(user_agent.contains("Chrome/131.0.0.0"));
        assert!(user_agent.contains("Edg/131.0.0.0"));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let backend = EdgeTtsBackend::new(EdgeTtsConfig::new().with_endpoint("not a url"));
        assert!(backend.handshake_request().is_err());
    }

    #[tokio::test]
    async fn test_blank_text_fails_without_connecting() {
        let backend = EdgeTtsBackend::new(EdgeTtsConfig::new().with_endpoint("ws://127.0.0.1:9/x"));
        let request = SynthesisRequest {
            text: " \u{1} ".into(),
            voice_id: "voice".into(),
            rate: Default::default(),
            format: Default::default(),
            output_path: "out.mp3".into(),
        };

        let error = backend.synthesize(&request).await.unwrap_err();
        assert!(matches!(error, TtsError::EmptyText));
    }
}
