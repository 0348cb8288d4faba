//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use edge_speak_lib::{LogConfig, LogContext};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::Message;

/// In-memory log sink.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// A logging context writing into a [`Capture`].
pub fn captured_logging() -> (LogContext, Capture) {
    let capture = Capture::default();
    let writer = capture.clone();
    (
        LogContext::new(LogConfig::default(), move || writer.clone()),
        capture,
    )
}

/// What the fake speech service saw on one connection.
#[derive(Debug, Default)]
pub struct Exchange {
    pub uri: String,
    pub origin: String,
    pub config: String,
    pub ssml: String,
}

pub fn text_frame(path: &str, body: &str) -> Message {
    Message::Text(format!(
        "X-RequestId:0123\r\nContent-Type:application/json; charset=utf-8\r\nPath:{path}\r\n\r\n{body}"
    ))
}

pub fn audio_frame(payload: &[u8]) -> Message {
    let headers = "X-RequestId:0123\r\nContent-Type:audio/mpeg\r\nPath:audio\r\n";
    let mut frame = (headers.len() as u16).to_be_bytes().to_vec();
    frame.extend_from_slice(headers.as_bytes());
    frame.extend_from_slice(payload);
    Message::Binary(frame)
}

/// Starts a fake speech service that answers `connections` websocket
/// connections, replying to each with `replies` once the config and SSML
/// frames have arrived.
///
/// Returns the endpoint URL and a handle resolving to what was received.
pub async fn fake_service(
    connections: usize,
    replies: Vec<Message>,
) -> (String, tokio::task::JoinHandle<Vec<Exchange>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("ws://{}/edge/v1", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut exchanges = Vec::new();
        for _ in 0..connections {
            let (stream, _) = listener.accept().await.unwrap();
            let mut exchange = Exchange::default();

            let mut socket = tokio_tungstenite::accept_hdr_async(
                stream,
                |request: &Request, response: Response| {
                    exchange.uri = request.uri().to_string();
                    exchange.origin = request
                        .headers()
                        .get("Origin")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Ok::<Response, ErrorResponse>(response)
                },
            )
            .await
            .unwrap();

            exchange.config = socket.next().await.unwrap().unwrap().into_text().unwrap();
            exchange.ssml = socket.next().await.unwrap().unwrap().into_text().unwrap();

            for reply in replies.clone() {
                socket.send(reply).await.unwrap();
            }
            while let Some(Ok(_)) = socket.next().await {}

            exchanges.push(exchange);
        }
        exchanges
    });

    (endpoint, handle)
}

/// An endpoint nothing is listening on.
pub async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{address}/edge/v1")
}
