//! The renderer contract.
//!
//! Builders never format text. They hand a definition to a [`Renderer`] under
//! a [`TemplateSlot`]; what a slot turns into is the renderer's business.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::definitions::{EnumDefinition, FunctionDefinition, ObjectDefinition};

/// Named output slots a builder fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateSlot {
    /// An enum type with its values.
    Enum,
    /// A concrete object wrapper type.
    ObjectDefinition,
    /// The interface an object and its descendants implement.
    InterfaceDefinition,
    /// One "concrete type implements ancestor interface" relationship.
    ObjectImplement,
    /// A free function.
    Function,
    /// A method wrapper on an owning object.
    FunctionWrapper,
}

impl TemplateSlot {
    /// Every slot, in emission order within an object.
    pub const ALL: [TemplateSlot; 6] = [
        TemplateSlot::Enum,
        TemplateSlot::ObjectDefinition,
        TemplateSlot::InterfaceDefinition,
        TemplateSlot::ObjectImplement,
        TemplateSlot::Function,
        TemplateSlot::FunctionWrapper,
    ];

    /// Template name of the slot.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateSlot::Enum => "enum",
            TemplateSlot::ObjectDefinition => "object-definition",
            TemplateSlot::InterfaceDefinition => "interface-definition",
            TemplateSlot::ObjectImplement => "object-implement",
            TemplateSlot::Function => "go-function",
            TemplateSlot::FunctionWrapper => "go-function-wrapper",
        }
    }

    /// Look a slot up by template name.
    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|s| s.name() == name) }
}

impl fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// The definition rendered into a slot.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Payload<'p, 'a> {
    /// For [`TemplateSlot::Enum`].
    Enum(&'p EnumDefinition),
    /// For the object, interface and implement slots.
    Object(&'p ObjectDefinition),
    /// For the function slots.
    Function(&'p FunctionDefinition<'a>),
}

impl Payload<'_, '_> {
    /// Short label of the payload variant.
    pub fn label(&self) -> &'static str {
        match self {
            Payload::Enum(_) => "enum",
            Payload::Object(_) => "object",
            Payload::Function(_) => "function",
        }
    }

    /// Name of the rendered entity.
    pub fn entity(&self) -> &str {
        match self {
            Payload::Enum(def) => &def.enum_name,
            Payload::Object(def) => &def.object_name,
            Payload::Function(def) => &def.name,
        }
    }
}

/// Failure to render one definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No template is registered for the slot or snippet.
    #[error("no template named '{0}'")]
    MissingTemplate(String),
    /// The template refers to a field the payload does not provide.
    #[error("template '{template}' refers to unknown field '{field}'")]
    UnknownField {
        /// Template being rendered.
        template: String,
        /// The unresolved field.
        field: String,
    },
    /// The payload variant does not fit the slot.
    #[error("slot '{slot}' cannot render a {payload} payload")]
    PayloadMismatch {
        /// Slot being rendered.
        slot: TemplateSlot,
        /// Label of the offending payload.
        payload: &'static str,
    },
    /// Any other renderer-specific failure.
    #[error("{0}")]
    Message(String),
}

/// Receives definitions and emits output for them.
///
/// `'a` is the lifetime of the metadata the definitions borrow from.
pub trait Renderer<'a> {
    /// Render `payload` into `slot`.
    fn render(&mut self, slot: TemplateSlot, payload: Payload<'_, 'a>) -> Result<(), RenderError>;
}

impl<'a, R: Renderer<'a> + ?Sized> Renderer<'a> for &mut R {
    fn render(&mut self, slot: TemplateSlot, payload: Payload<'_, 'a>) -> Result<(), RenderError> {
        (**self).render(slot, payload)
    }
}

/// An owned copy of a rendered payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPayload<'a> {
    #[allow(missing_docs)]
    Enum(EnumDefinition),
    #[allow(missing_docs)]
    Object(ObjectDefinition),
    #[allow(missing_docs)]
    Function(FunctionDefinition<'a>),
}

/// One render request seen by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall<'a> {
    /// Requested slot.
    pub slot: TemplateSlot,
    /// Copy of the payload.
    pub payload: RecordedPayload<'a>,
}

/// Renderer that keeps every request instead of producing text.
///
/// Used for dry runs and for checking what a builder emits.
#[derive(Debug, Default)]
pub struct RecordingRenderer<'a> {
    calls: Vec<RecordedCall<'a>>,
    fail_on: Option<TemplateSlot>,
}

impl<'a> RecordingRenderer<'a> {
    /// Create an empty recorder.
    pub fn new() -> Self { Self::default() }

    /// A recorder that rejects every request for `slot`.
    pub fn failing_on(slot: TemplateSlot) -> Self { Self { calls: Vec::new(), fail_on: Some(slot) } }

    /// Accepted requests in order.
    pub fn calls(&self) -> &[RecordedCall<'a>] { &self.calls }

    /// Slots of the accepted requests in order.
    pub fn slots(&self) -> Vec<TemplateSlot> { self.calls.iter().map(|c| c.slot).collect() }

    /// Accepted requests for one slot.
    pub fn calls_for(&self, slot: TemplateSlot) -> impl Iterator<Item = &RecordedCall<'a>> {
        self.calls.iter().filter(move |c| c.slot == slot)
    }

    /// Hand back the accepted requests.
    pub fn into_calls(self) -> Vec<RecordedCall<'a>> { self.calls }
}

impl<'a> Renderer<'a> for RecordingRenderer<'a> {
    fn render(&mut self, slot: TemplateSlot, payload: Payload<'_, 'a>) -> Result<(), RenderError> {
        if self.fail_on == Some(slot) {
            return Err(RenderError::Message(format!("rejected '{}' for {}", payload.entity(), slot)));
        }
        let payload = match payload {
            Payload::Enum(def) => RecordedPayload::Enum(def.clone()),
            Payload::Object(def) => RecordedPayload::Object(def.clone()),
            Payload::Function(def) => RecordedPayload::Function(def.clone()),
        };
        self.calls.push(RecordedCall { slot, payload });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names_round_trip() {
        for slot in TemplateSlot::ALL {
            assert_eq!(TemplateSlot::from_name(slot.name()), Some(slot));
        }
        assert_eq!(TemplateSlot::from_name("c-marshal"), None);
        assert_eq!(TemplateSlot::FunctionWrapper.to_string(), "go-function-wrapper");
    }

    #[test]
    fn test_recording_renderer() {
        let def = ObjectDefinition::new("Button", "Gtk");
        let mut recorder = RecordingRenderer::new();
        recorder.render(TemplateSlot::ObjectDefinition, Payload::Object(&def)).expect("recorded");
        recorder.render(TemplateSlot::InterfaceDefinition, Payload::Object(&def)).expect("recorded");
        assert_eq!(
            recorder.slots(),
            vec![TemplateSlot::ObjectDefinition, TemplateSlot::InterfaceDefinition]
        );
        assert_eq!(recorder.calls()[0].payload, RecordedPayload::Object(def.clone()));

        let mut failing = RecordingRenderer::failing_on(TemplateSlot::InterfaceDefinition);
        assert!(failing.render(TemplateSlot::ObjectDefinition, Payload::Object(&def)).is_ok());
        let err = failing
            .render(TemplateSlot::InterfaceDefinition, Payload::Object(&def))
            .expect_err("slot is rejected");
        assert!(err.to_string().contains("Button"));
        assert_eq!(failing.calls().len(), 1);
    }
}
