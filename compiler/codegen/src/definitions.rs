//! Definitions handed to renderers.
//!
//! These are the only shapes a renderer ever sees. They borrow the metadata
//! node they were built from, so a definition cannot outlive the repository.

use metadata::{Direction, FunctionFlags, InfoNode};
use serde::Serialize;
use typemap::{MappedType, TypeClass};

use crate::utils::camel_case;

/// Name of the synthetic parameter carrying a callable's return value.
pub const RETVAL_NAME: &str = "retval";

/// Name of the synthetic parameter appended for throwing callables.
pub const ERROR_NAME: &str = "error";

/// One entry of an argument or return list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter<'a> {
    /// Parameter name as found in the metadata.
    pub name: String,
    /// Data flow direction.
    pub direction: Direction,
    /// Target-language type name.
    pub target_type: String,
    /// Native ABI type name.
    pub native_type: String,
    /// Value, opaque handle or error.
    pub class: TypeClass,
    /// Originating arg node; `None` for synthetic entries.
    #[serde(skip)]
    pub info: Option<&'a InfoNode>,
}

impl<'a> Parameter<'a> {
    /// Build a parameter from a mapped type.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        mapped: MappedType,
        info: Option<&'a InfoNode>,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            target_type: mapped.target,
            native_type: mapped.native,
            class: mapped.class,
            info,
        }
    }

    /// Name of the native-side temporary, `c_<name>`.
    pub fn c_name(&self) -> String { format!("c_{}", self.name) }

    /// Whether the native value is passed by pointer.
    ///
    /// Error entries always are; synthetic entries otherwise are not; anything
    /// else follows the pointer flag of its arg type.
    pub fn is_pointer(&self) -> bool {
        if self.is_error() {
            return true;
        }
        self.info.and_then(InfoNode::type_info).is_some_and(|t| t.pointer)
    }

    /// Whether this entry is the synthetic error output.
    pub fn is_error(&self) -> bool { self.class == TypeClass::Error }

    /// Whether this entry is the opaque handle pair.
    pub fn is_opaque_handle(&self) -> bool { self.class == TypeClass::OpaqueHandle }
}

/// A pair of argument and return lists for one side of a binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArgsAndRets<'a> {
    /// Arguments in metadata order.
    pub args: Vec<Parameter<'a>>,
    /// Returns; synthetic entries come last.
    pub rets: Vec<Parameter<'a>>,
}

/// Names derived for one object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDefinition {
    /// Concrete wrapper type name.
    pub object_name: String,
    /// Interface implemented by the wrapper and its descendants, `<Name>Like`.
    pub interface_name: String,
    /// Native type name, `<prefix><Name>`.
    pub c_type: String,
    /// Accessor returning the native handle, `As<Name>`.
    pub cast_func: String,
}

impl ObjectDefinition {
    /// Derive the names for an object called `name` in a namespace using `prefix`.
    pub fn new(name: &str, prefix: &str) -> Self {
        Self {
            object_name: name.to_string(),
            interface_name: format!("{name}Like"),
            c_type: format!("{prefix}{name}"),
            cast_func: format!("As{name}"),
        }
    }

    /// Derive the names for an object node.
    pub fn for_node(node: &InfoNode, prefix: &str) -> Self { Self::new(node.name(), prefix) }

    /// Payload stating that `concrete` implements this object's interface.
    ///
    /// Keeps this object's interface, native type and cast function and swaps
    /// in the concrete object's name.
    pub fn implemented_by(&self, concrete: &ObjectDefinition) -> Self {
        Self { object_name: concrete.object_name.clone(), ..self.clone() }
    }
}

/// One named constant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// CamelCase value name.
    pub name: String,
    /// Name of the owning enum.
    pub enum_name: String,
    /// Integer value.
    pub value: i64,
}

/// Definition of an enum or flags type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
    /// Enum name.
    pub enum_name: String,
    /// Native type name, `<prefix><Name>`.
    pub c_type: String,
    /// Values in metadata order.
    pub values: Vec<EnumValue>,
}

/// Definition of one bound callable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition<'a> {
    /// Callable name as found in the metadata.
    pub name: String,
    /// Object the generated wrapper is attached to.
    pub owner: Option<ObjectDefinition>,
    /// Class the method was declared on; an ancestor for inherited methods.
    pub class_name: String,
    /// Target-language side.
    pub for_target: ArgsAndRets<'a>,
    /// Native side.
    pub for_native: ArgsAndRets<'a>,
    /// Function flags of the callable.
    pub flags: FunctionFlags,
    /// Originating function node.
    #[serde(skip)]
    pub info: &'a InfoNode,
}

impl<'a> FunctionDefinition<'a> {
    /// Target-language name.
    pub fn target_name(&self) -> String { camel_case(&self.name) }

    /// Native symbol; empty when the node carries none.
    pub fn c_name(&self) -> &str { self.info.symbol().unwrap_or_default() }

    /// Whether the callable is bound as a method.
    pub fn has_owner(&self) -> bool { self.owner.is_some() }

    /// Whether the native call produces a value.
    pub fn returns_value(&self) -> bool { !self.for_native.rets.is_empty() }

    /// The native return value, when there is one.
    pub fn c_ret(&self) -> Option<&Parameter<'a>> { self.for_native.rets.first() }

    /// Native args that receive output.
    pub fn native_outputs(&self) -> impl Iterator<Item = &Parameter<'a>> {
        self.for_native.args.iter().filter(|p| p.direction.is_output())
    }

    /// Target-language parameter list, `name type` pairs joined by `, `.
    ///
    /// Owned callables take a leading `self <Interface>` except in the wrapper
    /// form, where the receiver is implicit.
    pub fn arglist(&self, wrapper: bool) -> String {
        let receiver = match &self.owner {
            Some(owner) if !wrapper => Some(format!("self {}", owner.interface_name)),
            _ => None,
        };
        receiver
            .into_iter()
            .chain(self.for_target.args.iter().map(|a| format!("{} {}", a.name, a.target_type)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Target-language return list, `name type` pairs joined by `, `.
    pub fn retlist(&self) -> String {
        self.for_target
            .rets
            .iter()
            .map(|r| format!("{} {}", r.name, r.target_type))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Values passed to the native call.
    ///
    /// Owned callables pass the receiver's native handle first; output args
    /// are passed by address.
    pub fn marshaled_values(&self) -> String {
        let receiver = self.owner.as_ref().map(|o| format!("self.As{}()", o.object_name));
        receiver
            .into_iter()
            .chain(self.for_native.args.iter().map(|p| {
                if p.direction.is_output() {
                    format!("&{}", p.c_name())
                } else {
                    p.c_name()
                }
            }))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
