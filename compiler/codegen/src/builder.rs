//! Definition builders for enums and objects.
//!
//! Object processing flattens inheritance: an object gets an implements
//! relationship for itself and every ancestor below the fundamental root, and
//! one function definition per distinct method name found on the way up,
//! attributed to the most-derived class declaring it.

use std::collections::BTreeSet;
use std::iter;

use metadata::{InfoKind, InfoNode, Repository};
use tracing::{debug, warn};

use crate::classifier::read_params;
use crate::context::GenerationContext;
use crate::definitions::{EnumDefinition, EnumValue, FunctionDefinition, ObjectDefinition};
use crate::render::{Payload, RenderError, Renderer, TemplateSlot};
use crate::utils::camel_case;
use crate::{CodegenError, Result};

/// Name of the root object type.
pub const ROOT_OBJECT_NAME: &str = "Object";

/// A method left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMethod {
    /// Class declaring the method.
    pub class_name: String,
    /// Method name.
    pub method: String,
    /// Why it was skipped.
    pub reason: String,
}

/// A render request the renderer rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    /// Requested slot.
    pub slot: TemplateSlot,
    /// Name of the entity being rendered.
    pub entity: String,
    /// The renderer's error.
    pub error: RenderError,
}

/// What processing one entry produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryOutcome {
    /// Enum definitions built.
    pub enums: usize,
    /// Object definitions built.
    pub objects: usize,
    /// Implements relationships built.
    pub implements: usize,
    /// Function definitions built.
    pub functions: usize,
    /// Methods that could not be classified.
    pub skipped_methods: Vec<SkippedMethod>,
    /// Rejected render requests.
    pub render_failures: Vec<RenderFailure>,
    /// Non-fatal problems with the metadata itself.
    pub diagnostics: Vec<String>,
}

impl EntryOutcome {
    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: EntryOutcome) {
        self.enums += other.enums;
        self.objects += other.objects;
        self.implements += other.implements;
        self.functions += other.functions;
        self.skipped_methods.extend(other.skipped_methods);
        self.render_failures.extend(other.render_failures);
        self.diagnostics.extend(other.diagnostics);
    }

    fn emit<'a, R: Renderer<'a> + ?Sized>(
        &mut self,
        renderer: &mut R,
        slot: TemplateSlot,
        payload: Payload<'_, 'a>,
    ) {
        if let Err(error) = renderer.render(slot, payload) {
            warn!(slot = %slot, entity = payload.entity(), "render failed: {error}");
            self.render_failures.push(RenderFailure {
                slot,
                entity: payload.entity().to_string(),
                error,
            });
        }
    }
}

/// Whether the parent walk continues past `node`.
///
/// False for the root object type and for fundamental types.
pub fn has_parent(node: &InfoNode) -> bool {
    node.name() != ROOT_OBJECT_NAME && !node.is_fundamental()
}

/// The ancestors of an object, nearest first.
#[derive(Debug, Default)]
pub struct Lineage<'a> {
    /// Ancestors below the root, nearest first.
    pub nodes: Vec<&'a InfoNode>,
    /// Why the walk stopped before reaching the root, if it did.
    pub cut: Option<CodegenError>,
}

/// Walk the parent chain of `node` iteratively.
///
/// The fundamental root ends the walk and is not included. An unresolvable
/// or absent parent, a repeated object or more than `limit` ancestors stop
/// the walk early; the nodes collected so far are kept and the reason is in
/// [`Lineage::cut`].
pub fn ancestors<'a>(repo: &'a dyn Repository, node: &'a InfoNode, limit: usize) -> Lineage<'a> {
    let object = node.name().to_string();
    let mut lineage = Lineage::default();
    let mut seen = BTreeSet::from([(node.namespace(), node.name())]);
    let mut current = node;

    while has_parent(current) {
        let Some(reference) = current.parent_name() else {
            lineage.cut = Some(CodegenError::Unrooted { object, class: current.full_name() });
            break;
        };
        let parent = match repo.resolve(current.namespace(), reference) {
            Some(parent) if parent.kind() == InfoKind::Object => parent,
            _ => {
                lineage.cut =
                    Some(CodegenError::MissingParent { object, parent: reference.to_string() });
                break;
            }
        };
        if !has_parent(parent) {
            break;
        }
        if !seen.insert((parent.namespace(), parent.name())) {
            lineage.cut =
                Some(CodegenError::AncestorCycle { object, repeated: parent.full_name() });
            break;
        }
        if lineage.nodes.len() == limit {
            lineage.cut = Some(CodegenError::AncestorDepthExceeded { object, limit });
            break;
        }
        lineage.nodes.push(parent);
        current = parent;
    }
    lineage
}

/// Build and render the definition of an enum or flags entry.
pub fn process_enum<'a, R: Renderer<'a> + ?Sized>(
    ctx: &mut GenerationContext,
    repo: &'a dyn Repository,
    node: &'a InfoNode,
    renderer: &mut R,
) -> Result<EntryOutcome> {
    if !matches!(node.kind(), InfoKind::Enum | InfoKind::Flags) {
        return Err(CodegenError::UnexpectedKind {
            name: node.name().to_string(),
            expected: "enum",
            found: node.kind(),
        });
    }
    let mut outcome = EntryOutcome::default();
    let name = node.name();
    let prefix = ctx.c_prefix(repo, node.namespace());

    let mut values = Vec::with_capacity(node.enum_values().len());
    for value in node.enum_values() {
        match value.value() {
            Some(v) => values.push(EnumValue {
                name: camel_case(value.name()),
                enum_name: name.to_string(),
                value: v,
            }),
            None => outcome
                .diagnostics
                .push(format!("{name}: '{}' is a {} node, not a value", value.name(), value.kind())),
        }
    }
    let def = EnumDefinition { enum_name: name.to_string(), c_type: format!("{prefix}{name}"), values };

    debug!(entity = name, values = def.values.len(), "enum");
    outcome.enums += 1;
    outcome.emit(renderer, TemplateSlot::Enum, Payload::Enum(&def));
    Ok(outcome)
}

/// Build and render the definitions of an object entry.
///
/// Emits, in order: the object definition, its interface definition, one
/// implements relationship per class in the lineage (derived first), then
/// the methods. A class's own methods are rendered both as a free function
/// and as a wrapper; inherited ones only as a wrapper. A method that cannot
/// be classified is skipped, and its name still shadows same-named methods
/// further up.
pub fn process_object<'a, R: Renderer<'a> + ?Sized>(
    ctx: &mut GenerationContext,
    repo: &'a dyn Repository,
    node: &'a InfoNode,
    renderer: &mut R,
) -> Result<EntryOutcome> {
    if node.kind() != InfoKind::Object {
        return Err(CodegenError::UnexpectedKind {
            name: node.name().to_string(),
            expected: "object",
            found: node.kind(),
        });
    }
    let mut outcome = EntryOutcome::default();
    let prefix = ctx.c_prefix(repo, node.namespace());
    let def = ObjectDefinition::for_node(node, &prefix);

    outcome.objects += 1;
    outcome.emit(renderer, TemplateSlot::ObjectDefinition, Payload::Object(&def));
    outcome.emit(renderer, TemplateSlot::InterfaceDefinition, Payload::Object(&def));

    let lineage = ancestors(repo, node, ctx.max_ancestor_depth());
    if let Some(cut) = lineage.cut {
        warn!(entity = node.name(), "ancestor walk stopped: {cut}");
        outcome.diagnostics.push(cut.to_string());
    }
    let classes: Vec<&'a InfoNode> = iter::once(node).chain(lineage.nodes).collect();

    for class in &classes {
        let prefix = ctx.c_prefix(repo, class.namespace());
        let implement = ObjectDefinition::for_node(class, &prefix).implemented_by(&def);
        outcome.implements += 1;
        outcome.emit(renderer, TemplateSlot::ObjectImplement, Payload::Object(&implement));
    }

    let mut seen = BTreeSet::new();
    for (depth, class) in classes.iter().enumerate() {
        for method in class.object_methods() {
            if !seen.insert(method.name()) {
                continue;
            }
            let function = match build_method(ctx, &def, class, method) {
                Ok(function) => function,
                Err(err) => {
                    warn!(
                        entity = node.name(),
                        class = class.name(),
                        method = method.name(),
                        "skipping method: {err}"
                    );
                    outcome.skipped_methods.push(SkippedMethod {
                        class_name: class.name().to_string(),
                        method: method.name().to_string(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            outcome.functions += 1;
            if depth == 0 {
                outcome.emit(renderer, TemplateSlot::Function, Payload::Function(&function));
            }
            outcome.emit(renderer, TemplateSlot::FunctionWrapper, Payload::Function(&function));
        }
    }

    debug!(
        entity = node.name(),
        ancestors = classes.len() - 1,
        functions = outcome.functions,
        skipped = outcome.skipped_methods.len(),
        "object"
    );
    Ok(outcome)
}

fn build_method<'a>(
    ctx: &GenerationContext,
    owner: &ObjectDefinition,
    class: &InfoNode,
    method: &'a InfoNode,
) -> Result<FunctionDefinition<'a>> {
    let flags = method.function_flags().ok_or_else(|| CodegenError::UnexpectedKind {
        name: method.name().to_string(),
        expected: "function",
        found: method.kind(),
    })?;
    let params = read_params(ctx.mapper(), method, flags)?;
    Ok(FunctionDefinition {
        name: method.name().to_string(),
        owner: Some(owner.clone()),
        class_name: class.name().to_string(),
        for_target: params.target,
        for_native: params.native,
        flags,
        info: method,
    })
}
