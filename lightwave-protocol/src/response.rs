//! Decoding of inbound bridge datagrams.
//!
//! The Link replies in one of two shapes:
//!
//! - Structured: a `*!` marker followed by a JSON document carrying at
//!   least an integer `trans` sequence field.
//! - Legacy: `"<trans>,<freeText>"`, where `OK` acknowledges a command,
//!   an `ERR`-prefixed token reports a protocol error, and anything else
//!   is a payload (energy reports arrive this way).
//!
//! Decoding never panics and never returns an error past this boundary
//! that the caller could not log and discard.

use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Marker prefix for the structured (JSON) response shape.
pub const STRUCTURED_MARKER: &str = "*!";

/// The token prefix the bridge uses to flag a protocol-level error.
const ERROR_TOKEN: &str = "ERR";

/// Body of a decoded response, one variant per accepted wire shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Free-text content of a legacy `"<trans>,<content>"` reply
    Legacy(String),
    /// Fields of a structured `*!{...}` reply, minus nothing: the full
    /// document is kept, including the `trans` field
    Structured(Map<String, Value>),
}

/// A decoded inbound datagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Transaction/sequence identifier correlating this reply to a request
    pub transaction: u32,
    /// Decoded payload
    pub body: ResponseBody,
}

impl Response {
    /// Decode a raw datagram payload.
    ///
    /// Tries the structured shape first (marker-prefixed JSON), then the
    /// legacy comma-delimited shape. Malformed datagrams yield a
    /// [`DecodeError`]; they must be logged and discarded by the caller,
    /// never treated as fatal.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(payload).map_err(|_| DecodeError::NotUtf8)?;

        if let Some(document) = text.strip_prefix(STRUCTURED_MARKER) {
            return Self::decode_structured(document);
        }
        Self::decode_legacy(text)
    }

    fn decode_structured(document: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(document)?;
        let fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(DecodeError::MissingSequenceField),
        };

        let transaction = fields
            .get("trans")
            .and_then(Value::as_u64)
            .and_then(|trans| u32::try_from(trans).ok())
            .ok_or(DecodeError::MissingSequenceField)?;

        Ok(Self {
            transaction,
            body: ResponseBody::Structured(fields),
        })
    }

    fn decode_legacy(text: &str) -> Result<Self, DecodeError> {
        let (trans, content) = text
            .split_once(',')
            .ok_or_else(|| DecodeError::MissingDelimiter(text.to_string()))?;

        let transaction = trans
            .trim()
            .parse::<u32>()
            .map_err(|_| DecodeError::InvalidTransactionId(trans.to_string()))?;

        let content = content.replace(['\r', '\n'], "");
        Ok(Self {
            transaction,
            body: ResponseBody::Legacy(content),
        })
    }

    /// The protocol-level error carried by this response, if any.
    ///
    /// Legacy replies are errors when the content starts with the `ERR`
    /// token; `OK` and payload content (energy reports) are successes.
    /// Structured replies are errors when the document has an `error`
    /// field.
    pub fn error(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Legacy(content) if content.starts_with(ERROR_TOKEN) => Some(content),
            ResponseBody::Legacy(_) => None,
            ResponseBody::Structured(fields) => fields.get("error").and_then(Value::as_str),
        }
    }

    /// Whether this response acknowledges its command without error.
    pub fn is_ok(&self) -> bool {
        self.error().is_none()
    }

    /// The free-text content of a legacy reply, empty for structured ones.
    pub fn content(&self) -> &str {
        match &self.body {
            ResponseBody::Legacy(content) => content,
            ResponseBody::Structured(_) => "",
        }
    }
}

/// Readings returned by the energy monitor, all in watts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnergyReading {
    pub current: u32,
    pub max: u32,
    pub today: u32,
    pub yesterday: u32,
}

impl EnergyReading {
    /// Parse the content of an energy-query reply.
    ///
    /// The bridge answers `@?` with legacy content of the form
    /// `?W=<current>,<max>,<today>,<yesterday>`.
    pub fn parse(content: &str) -> Result<Self, DecodeError> {
        let malformed = || DecodeError::MalformedEnergyReport(content.to_string());

        let values = content.strip_prefix("?W=").ok_or_else(malformed)?;
        let mut fields = values.split(',').map(|field| field.trim().parse::<u32>());

        let mut next = || fields.next().and_then(Result::ok).ok_or_else(malformed);
        let reading = Self {
            current: next()?,
            max: next()?,
            today: next()?,
            yesterday: next()?,
        };

        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn legacy_ok_response() {
        let response = Response::decode(b"042,OK").unwrap();
        assert_eq!(response.transaction, 42);
        assert_eq!(response.body, ResponseBody::Legacy("OK".to_string()));
        assert!(response.is_ok());
        assert_eq!(response.error(), None);
    }

    #[test]
    fn legacy_error_response() {
        let response = Response::decode(b"042,ERR:SOMETHING").unwrap();
        assert_eq!(response.transaction, 42);
        assert_eq!(response.error(), Some("ERR:SOMETHING"));
        assert!(!response.is_ok());
    }

    #[test]
    fn legacy_line_endings_are_stripped() {
        let response = Response::decode(b"7,OK\r\n").unwrap();
        assert_eq!(response.content(), "OK");
        assert!(response.is_ok());
    }

    #[test]
    fn legacy_content_keeps_embedded_commas() {
        let response = Response::decode(b"3,?W=120,500,1000,900\r\n").unwrap();
        assert_eq!(response.transaction, 3);
        assert_eq!(response.content(), "?W=120,500,1000,900");
        // Payload content is not an error even though it is not "OK"
        assert!(response.is_ok());
    }

    #[test]
    fn structured_response_extracts_sequence_field() {
        let response = Response::decode(br#"*!{"trans":17,"fn":"on"}"#).unwrap();
        assert_eq!(response.transaction, 17);
        assert!(response.is_ok());
        match response.body {
            ResponseBody::Structured(fields) => {
                assert_eq!(fields.get("fn").and_then(Value::as_str), Some("on"));
            }
            other => panic!("expected structured body, got {other:?}"),
        }
    }

    #[test]
    fn structured_response_error_field() {
        let response = Response::decode(br#"*!{"trans":9,"error":"no such device"}"#).unwrap();
        assert_eq!(response.error(), Some("no such device"));
    }

    #[rstest]
    #[case::no_delimiter(b"OK".as_slice())]
    #[case::bad_transaction(b"abc,OK".as_slice())]
    #[case::bad_json(b"*!{not json".as_slice())]
    #[case::missing_sequence(br#"*!{"fn":"on"}"#.as_slice())]
    #[case::non_object(b"*!42".as_slice())]
    #[case::invalid_utf8(&[0x30, 0x2c, 0xff, 0xfe])]
    fn malformed_datagrams_are_decode_errors(#[case] payload: &[u8]) {
        assert!(Response::decode(payload).is_err());
    }

    #[test]
    fn energy_reading_parses_four_fields() {
        let response = Response::decode(b"003,?W=120,500,1000,900").unwrap();
        let reading = EnergyReading::parse(response.content()).unwrap();
        assert_eq!(
            reading,
            EnergyReading {
                current: 120,
                max: 500,
                today: 1000,
                yesterday: 900,
            }
        );
    }

    #[rstest]
    #[case::missing_marker("120,500,1000,900")]
    #[case::too_few_fields("?W=120,500")]
    #[case::non_numeric("?W=120,500,x,900")]
    #[case::empty("")]
    fn malformed_energy_reports_are_rejected(#[case] content: &str) {
        assert!(matches!(
            EnergyReading::parse(content),
            Err(DecodeError::MalformedEnergyReport(_))
        ));
    }
}
