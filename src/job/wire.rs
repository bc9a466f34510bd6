//! # Wire Format
//!
//! The exact JSON shapes exchanged with the fleet's server. Inbound
//! payloads are print jobs; outbound payloads are per-job result events.
//!
//! ## Inbound Job
//!
//! ```json
//! {
//!   "elements": [
//!     {"f": {"a": "c", "b": 1, "s": 2}},
//!     "Welcome to {{business_name}}",
//!     "",
//!     {"line": "solid"},
//!     {"qr_url": "https://example.com/r/x", "qr_size": 10, "qr_alignment": "c"},
//!     {"qr_bitmap": {"width": 96, "height": 96, "data": [0, 1, ...]}}
//!   ],
//!   "variables": {"business_name": "Cafe Luna"}
//! }
//! ```
//!
//! A bare element array is also accepted (older senders omit the
//! envelope). Element rules:
//!
//! - Plain string: text line. Empty string: blank line.
//! - `{"f": ...}`: partial format update (`a` alignment, `b` bold,
//!   `s` size 0/1/2).
//! - `{"line": ...}`: separator rule, string or `{"type", "width"}`.
//! - `{"qr_url": ...}` / `{"qr_bitmap": ...}` / legacy `{"qr": ...}`.
//! - `{"m": ...}`: sender metadata, acknowledged and skipped.
//!
//! Anything else fails the whole job with `MalformedElement`; a payload
//! the bridge half-understands must not reach paper.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::BridgeError;
use crate::job::{template, PrintElement, PrintJob};
use crate::ops::LineStyle;
use crate::protocol::text::Alignment;
use crate::qr::DEFAULT_SIZE;
use crate::style::FormatDirective;

/// Parse a raw payload into a validated print job.
pub fn parse_job(payload: &[u8]) -> Result<PrintJob, BridgeError> {
    let value: Value = serde_json::from_slice(payload)?;

    let (elements, variables) = match value {
        Value::Array(items) => (items, HashMap::new()),
        Value::Object(mut map) => {
            let elements = match map.remove("elements") {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(BridgeError::MalformedElement(
                        "\"elements\" must be an array".into(),
                    ))
                }
                None => {
                    return Err(BridgeError::MalformedElement(
                        "payload missing \"elements\"".into(),
                    ))
                }
            };
            let variables = match map.remove("variables") {
                Some(Value::Object(vars)) => vars
                    .into_iter()
                    .map(|(k, v)| {
                        if !template::is_known(&k) {
                            debug!(name = %k, "variable not on the standard list");
                        }
                        (k, value_to_string(&v))
                    })
                    .collect(),
                Some(_) => {
                    return Err(BridgeError::MalformedElement(
                        "\"variables\" must be an object".into(),
                    ))
                }
                None => HashMap::new(),
            };
            (elements, variables)
        }
        _ => {
            return Err(BridgeError::MalformedElement(
                "payload must be an object or array".into(),
            ))
        }
    };

    let mut parsed = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        if let Some(element) = parse_element(element)
            .map_err(|e| BridgeError::MalformedElement(format!("element {index}: {e}")))?
        {
            parsed.push(element);
        }
    }

    Ok(PrintJob {
        elements: parsed,
        variables,
    })
}

/// Parse one wire element. `Ok(None)` means a recognized element with
/// no print effect (sender metadata).
fn parse_element(value: &Value) -> Result<Option<PrintElement>, String> {
    match value {
        Value::String(text) => {
            if text.is_empty() {
                Ok(Some(PrintElement::Blank))
            } else {
                Ok(Some(PrintElement::Text(text.clone())))
            }
        }
        Value::Object(map) => {
            if let Some(fmt) = map.get("f") {
                parse_format(fmt).map(Some)
            } else if let Some(line) = map.get("line") {
                parse_line(line).map(Some)
            } else if map.contains_key("qr_bitmap") {
                parse_qr_bitmap(map).map(Some)
            } else if map.contains_key("qr_url") || map.contains_key("qr") {
                parse_qr_url(map).map(Some)
            } else if map.contains_key("m") {
                // Metadata rider (order id etc.), nothing to print
                Ok(None)
            } else {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                Err(format!("unknown element tag(s): {}", keys.join(", ")))
            }
        }
        other => Err(format!("unsupported element type: {other}")),
    }
}

fn parse_format(value: &Value) -> Result<PrintElement, String> {
    let map = value
        .as_object()
        .ok_or_else(|| "\"f\" must be an object".to_string())?;

    let mut directive = FormatDirective::default();

    if let Some(a) = map.get("a") {
        let s = a
            .as_str()
            .ok_or_else(|| "\"f.a\" must be a string".to_string())?;
        directive.alignment = Some(parse_alignment(s)?);
    }
    if let Some(b) = map.get("b") {
        directive.bold = Some(parse_bool(b)?);
    }
    if let Some(s) = map.get("s") {
        let n = s
            .as_i64()
            .ok_or_else(|| "\"f.s\" must be an integer".to_string())?;
        directive.size = Some(match n {
            0 => crate::ops::TextSize::Small,
            2 => crate::ops::TextSize::Large,
            // Firmware treats every other value as normal
            _ => crate::ops::TextSize::Normal,
        });
    }

    Ok(PrintElement::Format(directive))
}

fn parse_line(value: &Value) -> Result<PrintElement, String> {
    match value {
        Value::String(style) => Ok(PrintElement::Line {
            style: parse_line_style(style),
            width: None,
        }),
        Value::Object(map) => {
            let style = match map.get("type") {
                Some(Value::String(s)) => parse_line_style(s),
                None => LineStyle::Solid,
                Some(other) => return Err(format!("\"line.type\" must be a string, got {other}")),
            };
            let width = match map.get("width") {
                Some(v) => {
                    let n = v
                        .as_u64()
                        .ok_or_else(|| "\"line.width\" must be a positive integer".to_string())?;
                    Some(n.min(u8::MAX as u64) as u8)
                }
                None => None,
            };
            Ok(PrintElement::Line { style, width })
        }
        other => Err(format!("\"line\" must be a string or object, got {other}")),
    }
}

fn parse_qr_url(map: &serde_json::Map<String, Value>) -> Result<PrintElement, String> {
    let size = match map.get("qr_size") {
        Some(v) => v
            .as_u64()
            .ok_or_else(|| "\"qr_size\" must be a positive integer".to_string())?
            .min(u8::MAX as u64) as u8,
        None => DEFAULT_SIZE,
    };
    let alignment = match map.get("qr_alignment") {
        Some(Value::String(s)) => parse_alignment(s)?,
        Some(other) => return Err(format!("\"qr_alignment\" must be a string, got {other}")),
        None => Alignment::Center,
    };

    let url = if let Some(url) = map.get("qr_url") {
        url.as_str()
            .ok_or_else(|| "\"qr_url\" must be a string".to_string())?
            .to_string()
    } else {
        // Legacy {"qr": "..."} and {"qr": {"text"|"url": "..."}}
        match map.get("qr") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Object(inner)) => inner
                .get("text")
                .or_else(|| inner.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| "\"qr\" object missing \"text\"/\"url\"".to_string())?,
            _ => return Err("\"qr\" must be a string or object".to_string()),
        }
    };

    Ok(PrintElement::QrUrl {
        url,
        size,
        alignment,
    })
}

fn parse_qr_bitmap(map: &serde_json::Map<String, Value>) -> Result<PrintElement, String> {
    let bitmap = map
        .get("qr_bitmap")
        .and_then(Value::as_object)
        .ok_or_else(|| "\"qr_bitmap\" must be an object".to_string())?;

    let width = bitmap
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| "\"qr_bitmap.width\" must be a positive integer".to_string())?
        as u32;
    let height = bitmap
        .get("height")
        .and_then(Value::as_u64)
        .ok_or_else(|| "\"qr_bitmap.height\" must be a positive integer".to_string())?
        as u32;

    let data = bitmap
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| "\"qr_bitmap.data\" must be an array".to_string())?;
    let mut bytes = Vec::with_capacity(data.len());
    for (i, v) in data.iter().enumerate() {
        let n = v
            .as_u64()
            .filter(|n| *n <= 255)
            .ok_or_else(|| format!("\"qr_bitmap.data[{i}]\" must be a byte (0-255)"))?;
        bytes.push(n as u8);
    }

    Ok(PrintElement::QrBitmap {
        width,
        height,
        data: bytes,
    })
}

/// Anything that is not "dotted" renders as a solid rule; the firmware
/// treated unknown styles (and the retired "double") the same way.
fn parse_line_style(s: &str) -> LineStyle {
    match s.to_ascii_lowercase().as_str() {
        "dotted" => LineStyle::Dotted,
        _ => LineStyle::Solid,
    }
}

fn parse_alignment(s: &str) -> Result<Alignment, String> {
    match s.to_ascii_lowercase().as_str() {
        "l" | "left" => Ok(Alignment::Left),
        "c" | "center" => Ok(Alignment::Center),
        "r" | "right" => Ok(Alignment::Right),
        other => Err(format!("unknown alignment {other:?}")),
    }
}

fn parse_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        Value::String(s) => Ok(matches!(
            s.to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        )),
        other => Err(format!("expected a boolean, got {other}")),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// OUTBOUND EVENTS
// ============================================================================

/// Result of one job, published back to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    // The server keys on the literal "ok", not the variant name
    #[serde(rename = "ok")]
    Success,
    Error,
}

/// Per-job result event, emitted exactly once per accepted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobEvent {
    pub status: JobStatus,
    pub message: String,
    pub job_ref: String,
}

impl JobEvent {
    pub fn success(job_ref: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Success,
            message: "printed".into(),
            job_ref: job_ref.into(),
        }
    }

    pub fn error(job_ref: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Error,
            message: message.into(),
            job_ref: job_ref.into(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::TextSize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_text_and_blank() {
        let job = parse_job(br#"["hello", ""]"#).unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::Text("hello".into()), PrintElement::Blank]
        );
    }

    #[test]
    fn test_parse_envelope_with_variables() {
        let job = parse_job(
            br#"{"elements": ["{{order_id}}"], "variables": {"order_id": 42, "customer_name": "Ana"}}"#,
        )
        .unwrap();
        assert_eq!(job.variables.get("order_id").unwrap(), "42");
        assert_eq!(job.variables.get("customer_name").unwrap(), "Ana");
    }

    #[test]
    fn test_parse_format_full() {
        let job = parse_job(br#"[{"f": {"a": "c", "b": 1, "s": 2}}]"#).unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::Format(FormatDirective {
                alignment: Some(Alignment::Center),
                bold: Some(true),
                size: Some(TextSize::Large),
            })]
        );
    }

    #[test]
    fn test_parse_format_partial() {
        let job = parse_job(br#"[{"f": {"b": true}}]"#).unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::Format(FormatDirective {
                alignment: None,
                bold: Some(true),
                size: None,
            })]
        );
    }

    #[test]
    fn test_parse_format_size_out_of_range_is_normal() {
        let job = parse_job(br#"[{"f": {"s": 7}}]"#).unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::Format(FormatDirective {
                size: Some(TextSize::Normal),
                ..FormatDirective::default()
            })]
        );
    }

    #[test]
    fn test_parse_line_string_and_object() {
        let job = parse_job(br#"[{"line": "dotted"}, {"line": {"type": "solid", "width": 32}}]"#)
            .unwrap();
        assert_eq!(
            job.elements,
            vec![
                PrintElement::Line {
                    style: LineStyle::Dotted,
                    width: None,
                },
                PrintElement::Line {
                    style: LineStyle::Solid,
                    width: Some(32),
                },
            ]
        );
    }

    #[test]
    fn test_parse_line_unknown_style_is_solid() {
        let job = parse_job(br#"[{"line": "double"}, {"line": "DOTTED"}]"#).unwrap();
        assert_eq!(
            job.elements,
            vec![
                PrintElement::Line {
                    style: LineStyle::Solid,
                    width: None,
                },
                PrintElement::Line {
                    style: LineStyle::Dotted,
                    width: None,
                },
            ]
        );
    }

    #[test]
    fn test_parse_qr_url() {
        let job = parse_job(
            br#"[{"qr_url": "https://example.com", "qr_size": 8, "qr_alignment": "r"}]"#,
        )
        .unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::QrUrl {
                url: "https://example.com".into(),
                size: 8,
                alignment: Alignment::Right,
            }]
        );
    }

    #[test]
    fn test_parse_qr_url_defaults() {
        let job = parse_job(br#"[{"qr_url": "x"}]"#).unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::QrUrl {
                url: "x".into(),
                size: DEFAULT_SIZE,
                alignment: Alignment::Center,
            }]
        );
    }

    #[test]
    fn test_parse_legacy_qr_forms() {
        let job = parse_job(br#"[{"qr": "abc"}, {"qr": {"text": "def"}}]"#).unwrap();
        assert_eq!(job.elements.len(), 2);
        assert!(matches!(
            &job.elements[0],
            PrintElement::QrUrl { url, .. } if url == "abc"
        ));
        assert!(matches!(
            &job.elements[1],
            PrintElement::QrUrl { url, .. } if url == "def"
        ));
    }

    #[test]
    fn test_parse_qr_bitmap() {
        let job = parse_job(
            br#"[{"qr_bitmap": {"width": 16, "height": 2, "data": [1, 2, 3, 4]}}]"#,
        )
        .unwrap();
        assert_eq!(
            job.elements,
            vec![PrintElement::QrBitmap {
                width: 16,
                height: 2,
                data: vec![1, 2, 3, 4],
            }]
        );
    }

    #[test]
    fn test_parse_qr_bitmap_rejects_non_byte() {
        let err = parse_job(br#"[{"qr_bitmap": {"width": 8, "height": 1, "data": [300]}}]"#)
            .unwrap_err();
        assert!(matches!(err, BridgeError::MalformedElement(_)));
    }

    #[test]
    fn test_metadata_element_is_skipped() {
        let job = parse_job(br#"[{"m": {"order_id": "o-1"}}, "x"]"#).unwrap();
        assert_eq!(job.elements, vec![PrintElement::Text("x".into())]);
    }

    #[test]
    fn test_unknown_tag_fails_whole_job() {
        let err = parse_job(br#"["ok", {"banner": "?"}]"#).unwrap_err();
        match err {
            BridgeError::MalformedElement(msg) => {
                assert!(msg.contains("element 1"), "message was: {msg}");
                assert!(msg.contains("banner"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_json_fails() {
        assert!(matches!(
            parse_job(b"not json").unwrap_err(),
            BridgeError::Json(_)
        ));
    }

    #[test]
    fn test_job_event_serialization() {
        let ok = serde_json::to_value(JobEvent::success("job-1")).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({
                "status": "ok",
                "message": "printed",
                "job_ref": "job-1",
            })
        );

        let failed = serde_json::to_value(JobEvent::error("job-1", "device offline")).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({
                "status": "error",
                "message": "device offline",
                "job_ref": "job-1",
            })
        );
    }
}
