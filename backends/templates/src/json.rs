//! JSON-lines renderer.
//!
//! Writes one JSON object per render request instead of source text, for
//! inspecting what the builders produce or feeding another tool.

use codegen::{Payload, RenderError, Renderer, TemplateSlot};
use serde::Serialize;

#[derive(Serialize)]
struct Record<'r, 'p, 'a> {
    slot: TemplateSlot,
    kind: &'static str,
    definition: &'r Payload<'p, 'a>,
}

/// Renders every request as a line of JSON.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    output: String,
}

impl JsonRenderer {
    /// Create an empty renderer.
    pub fn new() -> Self { Self::default() }

    /// Hand back the rendered lines.
    pub fn finish(self) -> String { self.output }
}

impl<'a> Renderer<'a> for JsonRenderer {
    fn render(&mut self, slot: TemplateSlot, payload: Payload<'_, 'a>) -> Result<(), RenderError> {
        let record = Record { slot, kind: payload.label(), definition: &payload };
        let line = serde_json::to_string(&record).map_err(|e| RenderError::Message(e.to_string()))?;
        self.output.push_str(&line);
        self.output.push('\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use codegen::ObjectDefinition;

    use super::*;

    #[test]
    fn test_json_lines() {
        let def = ObjectDefinition::new("Widget", "Tst");
        let mut r = JsonRenderer::new();
        r.render(TemplateSlot::ObjectDefinition, Payload::Object(&def)).expect("render");
        r.render(TemplateSlot::InterfaceDefinition, Payload::Object(&def)).expect("render");
        let out = r.finish();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["slot"], "object-definition");
        assert_eq!(lines[0]["kind"], "object");
        assert_eq!(lines[1]["definition"]["interface_name"], "WidgetLike");
        assert_eq!(lines[1]["definition"]["c_type"], "TstWidget");
    }
}
