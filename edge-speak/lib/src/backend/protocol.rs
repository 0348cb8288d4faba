//! Message framing for the Edge read-aloud websocket protocol.
//!
//! Every frame starts with HTTP-like `Name:value` headers. Text frames
//! separate headers from the body with a blank line. Binary frames prefix
//! the headers with their length as a big-endian `u16` and carry audio after
//! them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TtsError;

/// Largest websocket message the service accepts.
const MAX_MESSAGE_BYTES: usize = 1 << 16;

/// Slack kept below [`MAX_MESSAGE_BYTES`] for header variations.
const MESSAGE_HEADROOM: usize = 50;

/// Pitch sent with every request.
pub const DEFAULT_PITCH: &str = "+0Hz";

/// Volume sent with every request.
pub const DEFAULT_VOLUME: &str = "+0%";

/// A frame received from the service.
#[derive(Debug, PartialEq, Eq)]
pub enum Frame<'a> {
    /// The service started processing the turn.
    TurnStart,
    /// Acknowledgement of the SSML request.
    Response,
    /// Word or sentence boundary metadata.
    Metadata,
    /// The turn is complete.
    TurnEnd,
    /// A piece of encoded audio. May be empty.
    Audio(&'a [u8]),
}

// ============================================================================
// Text preparation
// ============================================================================

/// Replaces control characters the service rejects with spaces.
///
/// Tab, line feed and carriage return are kept.
pub fn remove_incompatible_characters(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0..=8 | 11..=12 | 14..=31 => ' ',
            _ => c,
        })
        .collect()
}

/// Escapes the characters that are significant in SSML.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Splits escaped text into chunks of at most `max_bytes` bytes.
///
/// Splits prefer the last newline, then the last space inside the window.
/// A split never lands inside a UTF-8 character or an XML entity; an entity
/// longer than `max_bytes` becomes a chunk of its own. Chunks are trimmed and
/// blank chunks are dropped.
pub fn split_by_byte_length(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.len() > max_bytes {
        let window = &rest[..floor_char_boundary(rest, max_bytes)];
        let mut split_at = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .unwrap_or(window.len());
        split_at = before_open_entity(rest, split_at);
        if split_at == 0 {
            split_at = leading_unit_len(rest);
        }

        let chunk = rest[..split_at].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        rest = &rest[split_at..];
    }

    let tail = rest.trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }
    chunks
}

/// Cleans, escapes and splits user text for SSML messages sent with `voice`
/// and `rate`.
pub fn prepare_text(text: &str, voice: &str, rate: &str) -> Vec<String> {
    let escaped = escape_xml(&remove_incompatible_characters(text));
    split_by_byte_length(&escaped, max_text_bytes(voice, rate))
}

/// Text budget per message once the SSML envelope is accounted for.
pub fn max_text_bytes(voice: &str, rate: &str) -> usize {
    let envelope = ssml_message(
        &"0".repeat(32),
        &date_to_string(Utc::now()),
        &mkssml(voice, rate, ""),
    );
    MAX_MESSAGE_BYTES.saturating_sub(envelope.len() + MESSAGE_HEADROOM)
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Length of the entity or character `text` starts with.
fn leading_unit_len(text: &str) -> usize {
    match text.find(';') {
        Some(end) if text.starts_with('&') => end + 1,
        _ => text.chars().next().map_or(1, char::len_utf8),
    }
}

/// Moves `split_at` back to the `&` of an entity it would cut in half.
fn before_open_entity(text: &str, split_at: usize) -> usize {
    match text[..split_at].rfind('&') {
        Some(amp) if !text[amp..split_at].contains(';') => amp,
        _ => split_at,
    }
}

// ============================================================================
// Outgoing messages
// ============================================================================

/// Builds the SSML document for one chunk of escaped text.
pub fn mkssml(voice: &str, rate: &str, escaped_text: &str) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{voice}'>\
         <prosody pitch='{DEFAULT_PITCH}' rate='{rate}' volume='{DEFAULT_VOLUME}'>\
         {escaped_text}\
         </prosody></voice></speak>"
    )
}

/// Formats a timestamp the way browsers render `Date.toString()` in UTC.
pub fn date_to_string(now: DateTime<Utc>) -> String {
    now.format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
        .to_string()
}

#[derive(Serialize)]
struct SpeechConfig<'a> {
    context: ConfigContext<'a>,
}

#[derive(Serialize)]
struct ConfigContext<'a> {
    synthesis: ConfigSynthesis<'a>,
}

#[derive(Serialize)]
struct ConfigSynthesis<'a> {
    audio: ConfigAudio<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigAudio<'a> {
    metadataoptions: MetadataOptions,
    output_format: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataOptions {
    sentence_boundary_enabled: &'static str,
    word_boundary_enabled: &'static str,
}

/// Builds the `speech.config` frame selecting the output encoding.
pub fn speech_config_message(timestamp: &str, encoding_id: &str) -> Result<String, TtsError> {
    let config = SpeechConfig {
        context: ConfigContext {
            synthesis: ConfigSynthesis {
                audio: ConfigAudio {
                    metadataoptions: MetadataOptions {
                        sentence_boundary_enabled: "false",
                        word_boundary_enabled: "true",
                    },
                    output_format: encoding_id,
                },
            },
        },
    };
    let body = serde_json::to_string(&config).map_err(|e| TtsError::InvalidRequest {
        reason: e.to_string(),
    })?;

    Ok(format!(
        "X-Timestamp:{timestamp}\r\n\
         Content-Type:application/json; charset=utf-8\r\n\
         Path:speech.config\r\n\r\n\
         {body}\r\n"
    ))
}

/// Builds the `ssml` frame carrying the text to speak.
pub fn ssml_message(request_id: &str, timestamp: &str, ssml: &str) -> String {
    format!(
        "X-RequestId:{request_id}\r\n\
         Content-Type:application/ssml+xml\r\n\
         X-Timestamp:{timestamp}Z\r\n\
         Path:ssml\r\n\r\n\
         {ssml}"
    )
}

// ============================================================================
// Incoming frames
// ============================================================================

fn parse_headers(block: &str) -> HashMap<&str, &str> {
    block
        .lines()
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim(), value.trim()))
        })
        .collect()
}

/// Classifies a text frame by its `Path` header.
pub fn parse_text_frame(message: &str) -> Result<Frame<'static>, TtsError> {
    let header_block = message
        .split_once("\r\n\r\n")
        .map_or(message, |(headers, _)| headers);
    let headers = parse_headers(header_block);

    match headers.get("Path").copied() {
        Some("turn.start") => Ok(Frame::TurnStart),
        Some("response") => Ok(Frame::Response),
        Some("audio.metadata") => Ok(Frame::Metadata),
        Some("turn.end") => Ok(Frame::TurnEnd),
        Some(other) => Err(TtsError::UnexpectedResponse {
            message: format!("unknown text frame path '{other}'"),
        }),
        None => Err(TtsError::UnexpectedResponse {
            message: "text frame without a Path header".into(),
        }),
    }
}

/// Extracts the audio payload from a binary frame.
pub fn parse_binary_frame(message: &[u8]) -> Result<Frame<'_>, TtsError> {
    let Some((length, rest)) = message.split_first_chunk::<2>() else {
        return Err(TtsError::UnexpectedResponse {
            message: "binary frame shorter than its length prefix".into(),
        });
    };
    let header_length = usize::from(u16::from_be_bytes(*length));
    if header_length > rest.len() {
        return Err(TtsError::UnexpectedResponse {
            message: format!(
                "binary frame header length {header_length} exceeds frame size {}",
                rest.len()
            ),
        });
    }

    let (header_block, payload) = rest.split_at(header_length);
    let header_block =
        std::str::from_utf8(header_block).map_err(|e| TtsError::UnexpectedResponse {
            message: format!("binary frame headers are not UTF-8: {e}"),
        })?;

    match parse_headers(header_block).get("Path").copied() {
        Some("audio") => Ok(Frame::Audio(payload)),
        Some(other) => Err(TtsError::UnexpectedResponse {
            message: format!("unknown binary frame path '{other}'"),
        }),
        None => Err(TtsError::UnexpectedResponse {
            message: "binary frame without a Path header".into(),
        }),
    }
}
