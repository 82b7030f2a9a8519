//! Driver message templates.

use serde::{Deserialize, Serialize};

use buswatch_entity::message::MessageTemplateKind;

/// Fallback body for custom or under-specified sends.
const CUSTOM_FALLBACK: &str = "ALERT: Please check your bus status immediately.";

/// Render a message body from a template kind and optional context.
///
/// Speed and threshold are free-form context echoed into the text, not
/// re-validated against engine state.
pub fn render(
    kind: MessageTemplateKind,
    speed: Option<f64>,
    threshold: Option<f64>,
    custom_note: Option<&str>,
) -> String {
    let base = match (kind, speed, threshold) {
        (MessageTemplateKind::Overspeed, Some(speed), Some(threshold)) => format!(
            "ALERT: Overspeed detected. Current speed: {speed:.1} km/h \
             (limit: {threshold:.1} km/h). Please reduce speed immediately for safety."
        ),
        (MessageTemplateKind::DoorOpen, Some(speed), _) => format!(
            "ALERT: Door is open while bus is moving (speed: {speed:.1} km/h). \
             Please close the door immediately for passenger safety."
        ),
        _ => CUSTOM_FALLBACK.to_string(),
    };

    match custom_note {
        Some(note) if !note.is_empty() => format!("{base}\n\nNote: {note}"),
        _ => base,
    }
}

/// Descriptor of an available template, returned by the REST surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Template kind wire string.
    #[serde(rename = "type")]
    pub kind: MessageTemplateKind,
    /// Display name.
    pub name: String,
    /// Example rendered body.
    pub example: String,
}

/// The templates available to operators.
pub fn available_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            kind: MessageTemplateKind::Overspeed,
            name: "Overspeed Alert".to_string(),
            example: render(MessageTemplateKind::Overspeed, Some(85.0), Some(70.0), None),
        },
        TemplateInfo {
            kind: MessageTemplateKind::DoorOpen,
            name: "Door Open While Moving".to_string(),
            example: render(MessageTemplateKind::DoorOpen, Some(25.0), None, None),
        },
        TemplateInfo {
            kind: MessageTemplateKind::Custom,
            name: "Custom Message".to_string(),
            example: render(MessageTemplateKind::Custom, None, None, None),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overspeed_template() {
        let body = render(MessageTemplateKind::Overspeed, Some(85.0), Some(70.0), None);
        assert!(body.contains("85.0 km/h"));
        assert!(body.contains("limit: 70.0 km/h"));
    }

    #[test]
    fn test_door_open_template() {
        let body = render(MessageTemplateKind::DoorOpen, Some(25.0), None, None);
        assert!(body.contains("speed: 25.0 km/h"));
        assert!(body.contains("close the door"));
    }

    #[test]
    fn test_custom_note_appended() {
        let body = render(
            MessageTemplateKind::Custom,
            None,
            None,
            Some("Pull over at the next stop."),
        );
        assert!(body.starts_with(CUSTOM_FALLBACK));
        assert!(body.ends_with("Note: Pull over at the next stop."));
    }

    #[test]
    fn test_missing_context_falls_back() {
        // Overspeed without a threshold cannot render the specific text.
        let body = render(MessageTemplateKind::Overspeed, Some(85.0), None, None);
        assert_eq!(body, CUSTOM_FALLBACK);
    }

    #[test]
    fn test_template_catalogue() {
        let templates = available_templates();
        assert_eq!(templates.len(), 3);
        assert!(templates.iter().any(|t| t.kind == MessageTemplateKind::Custom));
    }
}
