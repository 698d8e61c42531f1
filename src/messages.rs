use crate::engine::{ChangeKind, ChangeRecord};
use serde::{Deserialize, Serialize};

/// Intents emitted by the comparison view for the owner of the report text.
///
/// The view never edits text itself; the owner applies the intent and calls
/// `update_comparison` again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComparisonEvent {
    #[serde(rename_all = "camelCase")]
    RevertChange {
        change: ChangeRecord,
        line_number: usize,
        change_kind: ChangeKind,
    },
    #[serde(rename_all = "camelCase")]
    ResetAllChanges { original_text: String },
}

impl ComparisonEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonEvent::RevertChange { .. } => "revertChange",
            ComparisonEvent::ResetAllChanges { .. } => "resetAllChanges",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn revert_payload_shape() {
        let event = ComparisonEvent::RevertChange {
            change: ChangeRecord::added(4, "new line"),
            line_number: 4,
            change_kind: ChangeKind::Added,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], json!("revertChange"));
        assert_eq!(value["lineNumber"], json!(4));
        assert_eq!(value["changeKind"], json!("added"));
        assert_eq!(value["change"]["content"], json!("new line"));
        assert_eq!(event.name(), "revertChange");
    }

    #[test]
    fn reset_payload_round_trips() {
        let event = ComparisonEvent::ResetAllChanges {
            original_text: "a\nb".to_string(),
        };
        let text = serde_json::to_string(&event).unwrap();
        assert_eq!(text, r#"{"type":"resetAllChanges","originalText":"a\nb"}"#);
        let back: ComparisonEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }
}
