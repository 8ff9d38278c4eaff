//! Content selector spec to Nexus content selector payload.

use crate::crd::ContentSelectorSpec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSelectorPayload {
    pub name: String,
    pub description: String,
    pub expression: String,
}

/// Update body; the selector name travels in the path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSelectorUpdate<'a> {
    pub description: &'a str,
    pub expression: &'a str,
}

impl ContentSelectorPayload {
    pub fn update_body(&self) -> ContentSelectorUpdate<'_> {
        ContentSelectorUpdate {
            description: &self.description,
            expression: &self.expression,
        }
    }
}

pub fn translate_content_selector(spec: &ContentSelectorSpec) -> ContentSelectorPayload {
    ContentSelectorPayload {
        name: spec.name.clone(),
        description: spec.description.clone(),
        expression: spec.expression.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_body_omits_name() {
        let payload = translate_content_selector(&ContentSelectorSpec {
            name: "team-a".to_string(),
            description: "Team A".to_string(),
            expression: "format == \"raw\"".to_string(),
        });
        assert_eq!(
            serde_json::to_value(payload.update_body()).unwrap(),
            json!({"description": "Team A", "expression": "format == \"raw\""})
        );
        assert_eq!(serde_json::to_value(&payload).unwrap()["name"], "team-a");
    }
}
