#![forbid(unsafe_code)]

//! JSON input parser for DOM-encoded pointer, mouse, and touch events.
//!
//! [`parse_dom_event`] accepts the JSON an embedding page serializes from a
//! native event:
//!
//! ```json
//! {"type": "touchmove", "target": 3, "passive": false,
//!  "changedTouches": [{"screenX": 10.5, "screenY": 20.0}]}
//! ```
//!
//! and returns the corresponding [`RawInputEvent`]. Event types outside the
//! drag vocabulary (`click`, `wheel`, ...) return `Ok(None)`.

use dragkit_core::{InputFamily, NativeEventType, RawInputEvent, TargetId, TouchPoint};
use serde::Deserialize;

/// Errors from parsing encoded DOM event JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTouch {
    screen_x: f64,
    screen_y: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDomEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    target: Option<u64>,
    #[serde(default)]
    screen_x: Option<f64>,
    #[serde(default)]
    screen_y: Option<f64>,
    #[serde(default)]
    passive: bool,
    #[serde(default)]
    changed_touches: Vec<RawTouch>,
}

/// Parse a JSON-encoded DOM event into a [`RawInputEvent`].
///
/// Returns `Ok(None)` for event types the recognizer never listens to.
///
/// Returns `Err` for malformed JSON, a missing `target`, or missing
/// coordinates on a pointer or mouse event. Touch events take their
/// coordinates from `changedTouches`, which may be empty.
pub fn parse_dom_event(json: &str) -> Result<Option<RawInputEvent>, InputParseError> {
    let raw: RawDomEvent =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    let Some(event_type) = NativeEventType::from_name(&raw.event_type) else {
        return Ok(None);
    };
    let target = TargetId(raw.target.ok_or(InputParseError::MissingField("target"))?);

    let event = match event_type.family() {
        InputFamily::Touch => {
            let touches = raw
                .changed_touches
                .iter()
                .map(|t| TouchPoint::new(t.screen_x, t.screen_y))
                .collect();
            RawInputEvent::touch(event_type, target, touches)
        }
        InputFamily::Pointer | InputFamily::Mouse => {
            let x = raw.screen_x.ok_or(InputParseError::MissingField("screenX"))?;
            let y = raw.screen_y.ok_or(InputParseError::MissingField("screenY"))?;
            RawInputEvent::new(event_type, target, x, y)
        }
    };
    Ok(Some(event.with_passive(raw.passive)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_event_parses() {
        let event = parse_dom_event(r#"{"type":"pointerdown","target":4,"screenX":10,"screenY":-2.5}"#)
            .expect("valid")
            .expect("recognized type");
        assert_eq!(event, RawInputEvent::new(NativeEventType::PointerDown, TargetId(4), 10.0, -2.5));
    }

    #[test]
    fn touch_event_uses_changed_touches() {
        let event = parse_dom_event(
            r#"{"type":"touchmove","target":1,"passive":true,
                "changedTouches":[{"screenX":3,"screenY":4},{"screenX":9,"screenY":9}]}"#,
        )
        .expect("valid")
        .expect("recognized type");
        assert!(event.passive);
        assert_eq!(
            event.changed_touches,
            vec![TouchPoint::new(3.0, 4.0), TouchPoint::new(9.0, 9.0)]
        );
    }

    #[test]
    fn touch_without_contacts_still_parses() {
        let event = parse_dom_event(r#"{"type":"touchend","target":1}"#)
            .expect("valid")
            .expect("recognized type");
        assert!(event.changed_touches.is_empty());
    }

    #[test]
    fn unrelated_type_is_none() {
        assert_eq!(parse_dom_event(r#"{"type":"click","target":1}"#), Ok(None));
    }

    #[test]
    fn missing_fields_are_reported() {
        assert_eq!(
            parse_dom_event(r#"{"type":"mousemove","screenX":1,"screenY":1}"#),
            Err(InputParseError::MissingField("target"))
        );
        assert_eq!(
            parse_dom_event(r#"{"type":"mousemove","target":1,"screenX":1}"#),
            Err(InputParseError::MissingField("screenY"))
        );
    }

    #[test]
    fn malformed_json_is_error() {
        let err = parse_dom_event("{not json").expect_err("malformed");
        assert!(matches!(err, InputParseError::Json(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
