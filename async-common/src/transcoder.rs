use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Version tag prepended to every encoded payload. Bump when the body
/// encoding changes so old readers reject new bytes instead of
/// misinterpreting them.
pub const FORMAT_VERSION: u8 = 1;

/// How many payload bytes to echo back in decode diagnostics.
const DIAGNOSTIC_LIMIT: usize = 256;

/// Enumeration of errors raised when encoding a message.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("failed to serialize message of type {message_type}: {error}")]
    Serialization {
        message_type: &'static str,
        #[source]
        error: serde_json::Error,
    },
}

/// Enumeration of errors raised when decoding a payload.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("received empty payload")]
    Empty,
    #[error("unsupported payload format version {version}, expected {FORMAT_VERSION}")]
    UnsupportedVersion { version: u8 },
    #[error("failed to deserialize payload `{payload}`: {error}")]
    Deserialization {
        payload: String,
        #[source]
        error: serde_json::Error,
    },
}

/// Bidirectional converter between an application message and the byte
/// sequence handed to the broker. Implementations must be thread-safe.
pub trait MessageTranscoder: Send + Sync {
    fn encode<T: Serialize>(&self, message: &T) -> Result<Vec<u8>, EncodeError>;

    fn decode<T: DeserializeOwned>(&self, src: &[u8]) -> Result<T, DecodeError>;
}

/// Transcoder producing a one-byte version tag followed by the JSON
/// document of the message. Stateless, so a single instance can be shared
/// across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTranscoder;

impl MessageTranscoder for JsonTranscoder {
    fn encode<T: Serialize>(&self, message: &T) -> Result<Vec<u8>, EncodeError> {
        let body = serde_json::to_vec(message).map_err(|e| {
            let message_type = std::any::type_name::<T>();
            error!("failed to encode message of type {}: {}", message_type, e);
            EncodeError::Serialization {
                message_type,
                error: e,
            }
        })?;

        let mut payload = Vec::with_capacity(1 + body.len());
        payload.push(FORMAT_VERSION);
        payload.extend_from_slice(&body);
        Ok(payload)
    }

    fn decode<T: DeserializeOwned>(&self, src: &[u8]) -> Result<T, DecodeError> {
        let Some((&version, body)) = src.split_first() else {
            error!("failed to decode message: empty payload");
            return Err(DecodeError::Empty);
        };

        if version != FORMAT_VERSION {
            error!("failed to decode message: unsupported format version {version}");
            return Err(DecodeError::UnsupportedVersion { version });
        }

        serde_json::from_slice(body).map_err(|e| {
            let payload = diagnostic_snippet(body);
            error!("failed to decode payload `{}`: {}", payload, e);
            DecodeError::Deserialization { payload, error: e }
        })
    }
}

/// Lossy, truncated rendering of a payload for error messages.
fn diagnostic_snippet(body: &[u8]) -> String {
    let mut snippet = String::from_utf8_lossy(body).into_owned();
    if snippet.len() > DIAGNOSTIC_LIMIT {
        let mut end = DIAGNOSTIC_LIMIT;
        while !snippet.is_char_boundary(end) {
            end -= 1;
        }
        snippet.truncate(end);
        snippet.push('…');
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct OrderPlaced {
        order_id: u64,
        customer: String,
        line_items: Vec<String>,
        attributes: HashMap<String, String>,
    }

    #[test]
    fn round_trip_reproduces_the_message() {
        let message = OrderPlaced {
            order_id: 42,
            customer: "ada".to_owned(),
            line_items: vec!["widget".to_owned(), "gadget".to_owned()],
            attributes: HashMap::from([("priority".to_owned(), "high".to_owned())]),
        };

        let transcoder = JsonTranscoder;
        let payload = transcoder.encode(&message).expect("message should encode");
        assert_eq!(payload[0], FORMAT_VERSION);

        let decoded: OrderPlaced = transcoder.decode(&payload).expect("payload should decode");
        assert_eq!(decoded, message);
    }

    #[test]
    fn empty_payload_is_rejected() {
        let result = JsonTranscoder.decode::<OrderPlaced>(&[]);
        assert!(matches!(result, Err(DecodeError::Empty)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut payload = JsonTranscoder
            .encode(&OrderPlaced {
                order_id: 1,
                customer: "bob".to_owned(),
                line_items: vec![],
                attributes: HashMap::new(),
            })
            .unwrap();
        payload[0] = 99;

        let result = JsonTranscoder.decode::<OrderPlaced>(&payload);
        assert!(matches!(
            result,
            Err(DecodeError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn malformed_body_reports_the_offending_bytes() {
        let payload = [&[FORMAT_VERSION], &b"{\"order_id\": oops"[..]].concat();

        let result = JsonTranscoder.decode::<OrderPlaced>(&payload);
        match result {
            Err(DecodeError::Deserialization { payload, .. }) => {
                assert!(payload.contains("oops"));
            }
            other => panic!("expected a deserialization error, got {:?}", other.err()),
        }
    }

    #[test]
    fn unserializable_message_reports_its_type() {
        // serde_json cannot encode maps with non-string keys.
        let message: HashMap<Vec<u8>, u32> = HashMap::from([(vec![1, 2], 3)]);

        let result = JsonTranscoder.encode(&message);
        match result {
            Err(EncodeError::Serialization { message_type, .. }) => {
                assert!(message_type.contains("HashMap"));
            }
            Ok(_) => panic!("expected encoding to fail"),
        }
    }
}
