//! Text renderer over a [`TemplateSet`].

use std::collections::BTreeMap;

use codegen::{FunctionDefinition, Payload, RenderError, Renderer, TemplateSlot};
use metadata::Direction;

use crate::fields::{self, Fields};
use crate::template_set::TemplateSet;

/// Renders each slot with its snippet into an in-memory buffer.
#[derive(Debug)]
pub struct TemplateRenderer {
    templates: TemplateSet,
    output: String,
    rendered: BTreeMap<TemplateSlot, usize>,
}

impl TemplateRenderer {
    /// Create a renderer writing after `preamble`.
    pub fn new(templates: TemplateSet, preamble: impl Into<String>) -> Self {
        Self { templates, output: preamble.into(), rendered: BTreeMap::new() }
    }

    /// Output so far.
    pub fn output(&self) -> &str { &self.output }

    /// How many payloads were rendered into `slot`.
    pub fn rendered(&self, slot: TemplateSlot) -> usize {
        self.rendered.get(&slot).copied().unwrap_or(0)
    }

    /// Hand back the rendered text.
    pub fn finish(self) -> String { self.output }

    fn fields_for(&self, slot: TemplateSlot, payload: Payload<'_, '_>) -> Result<Fields, RenderError> {
        let mismatch = || RenderError::PayloadMismatch { slot, payload: payload.label() };
        match (slot, payload) {
            (TemplateSlot::Enum, Payload::Enum(def)) => {
                let mut values = String::new();
                for value in &def.values {
                    values.push_str(&self.templates.render("enum-value", &fields::enum_value_fields(value))?);
                }
                let mut fields = fields::enum_fields(def);
                fields.insert("Values", values);
                Ok(fields)
            }
            (
                TemplateSlot::ObjectDefinition
                | TemplateSlot::InterfaceDefinition
                | TemplateSlot::ObjectImplement,
                Payload::Object(def),
            ) => Ok(fields::object_fields(def)),
            (TemplateSlot::Function | TemplateSlot::FunctionWrapper, Payload::Function(def)) => {
                let mut fields = fields::function_fields(def);
                fields.insert("ArgMarshalBody", self.arg_marshal_body(def)?);
                fields.insert("RetMarshalBody", self.ret_marshal_body(def)?);
                Ok(fields)
            }
            _ => Err(mismatch()),
        }
    }

    /// `c-marshal` for every input, `c-decl` for every pure output and the
    /// error slot.
    fn arg_marshal_body(&self, def: &FunctionDefinition<'_>) -> Result<String, RenderError> {
        let mut body = String::new();
        for param in &def.for_native.args {
            let snippet = match param.direction {
                Direction::In | Direction::InOut => "c-marshal",
                Direction::Out => "c-decl",
            };
            body.push_str(&self.templates.render(snippet, &fields::parameter_fields(param))?);
        }
        for error in def.for_target.rets.iter().filter(|p| p.is_error()) {
            body.push_str(&self.templates.render("c-decl", &fields::parameter_fields(error))?);
        }
        Ok(body)
    }

    /// `go-marshal` for the return value and every output, `go-error` for the
    /// error slot.
    fn ret_marshal_body(&self, def: &FunctionDefinition<'_>) -> Result<String, RenderError> {
        let mut body = String::new();
        for param in def.for_native.rets.iter().chain(def.native_outputs()) {
            body.push_str(&self.templates.render("go-marshal", &fields::parameter_fields(param))?);
        }
        for error in def.for_target.rets.iter().filter(|p| p.is_error()) {
            body.push_str(&self.templates.render("go-error", &fields::parameter_fields(error))?);
        }
        Ok(body)
    }
}

impl<'a> Renderer<'a> for TemplateRenderer {
    fn render(&mut self, slot: TemplateSlot, payload: Payload<'_, 'a>) -> Result<(), RenderError> {
        let fields = self.fields_for(slot, payload)?;
        let text = self.templates.render(slot.name(), &fields)?;
        self.output.push_str(&text);
        *self.rendered.entry(slot).or_default() += 1;
        Ok(())
    }
}
