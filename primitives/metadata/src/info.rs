//! Info nodes: kind-tagged handles over one metadata entry.
//!
//! A node is a common header (name, owning namespace, deprecation, free-form
//! attributes) plus exactly one [`InfoData`] variant. The variant fixes the
//! node's [`InfoKind`] at construction; kind-specific accessors return `None`
//! (or an empty slice) when asked about a capability the kind does not have.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags::{FunctionFlags, SignalFlags, VFuncFlags};
use crate::type_info::{Direction, ScopeType, Transfer, TypeInfo, TypeTag};

/// The closed set of metadata entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoKind {
    /// Free function or method.
    Function,
    /// Callback signature.
    Callback,
    /// Plain structure.
    Struct,
    /// Boxed type.
    Boxed,
    /// Enumeration.
    Enum,
    /// Bit flags.
    Flags,
    /// Class.
    Object,
    /// Capability interface.
    Interface,
    /// Constant.
    Constant,
    /// Union.
    Union,
    /// Single enumeration value.
    Value,
    /// Signal.
    Signal,
    /// Virtual function.
    VFunc,
    /// Property.
    Property,
    /// Field of a structure or class.
    Field,
    /// Callable argument.
    Arg,
    /// Type description.
    Type,
    /// Reference that could not be resolved.
    Unresolved,
}

impl InfoKind {
    /// Metadata spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoKind::Function => "function",
            InfoKind::Callback => "callback",
            InfoKind::Struct => "struct",
            InfoKind::Boxed => "boxed",
            InfoKind::Enum => "enum",
            InfoKind::Flags => "flags",
            InfoKind::Object => "object",
            InfoKind::Interface => "interface",
            InfoKind::Constant => "constant",
            InfoKind::Union => "union",
            InfoKind::Value => "value",
            InfoKind::Signal => "signal",
            InfoKind::VFunc => "vfunc",
            InfoKind::Property => "property",
            InfoKind::Field => "field",
            InfoKind::Arg => "arg",
            InfoKind::Type => "type",
            InfoKind::Unresolved => "unresolved",
        }
    }

    /// Functions, signals and virtual functions.
    pub fn is_callable(&self) -> bool {
        matches!(self, InfoKind::Function | InfoKind::Signal | InfoKind::VFunc)
    }

    /// Kinds that carry a registered runtime type.
    pub fn is_registered_type(&self) -> bool {
        matches!(
            self,
            InfoKind::Enum
                | InfoKind::Interface
                | InfoKind::Object
                | InfoKind::Struct
                | InfoKind::Union
        )
    }
}

impl fmt::Display for InfoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Signature shared by every callable kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallableInfo {
    /// Return type; a non-pointer void means nothing is returned.
    #[serde(default)]
    pub return_type: TypeInfo,
    /// Ownership of the returned value.
    #[serde(default)]
    pub caller_owns: Transfer,
    /// Whether the return value may be null.
    #[serde(default)]
    pub may_return_null: bool,
    /// Attributes attached to the return value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub return_attributes: BTreeMap<String, String>,
    /// Formal arguments in declaration order; each is an [`InfoKind::Arg`] node.
    #[serde(default)]
    pub args: Vec<InfoNode>,
}

/// A function or method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// Signature.
    #[serde(flatten)]
    pub callable: CallableInfo,
    /// Exported native symbol.
    pub symbol: String,
    /// Function flags.
    #[serde(default)]
    pub flags: FunctionFlags,
    /// Property this function reads or writes, for getters and setters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Virtual function this function wraps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vfunc: Option<String>,
}

/// A signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Handler signature.
    #[serde(flatten)]
    pub callable: CallableInfo,
    /// Signal flags.
    #[serde(default)]
    pub flags: SignalFlags,
    /// Name of the class closure virtual function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_closure: Option<String>,
    /// Whether a `true` return stops emission.
    #[serde(default)]
    pub true_stops_emit: bool,
}

/// A virtual function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VFuncInfo {
    /// Signature.
    #[serde(flatten)]
    pub callable: CallableInfo,
    /// Virtual function flags.
    #[serde(default)]
    pub flags: VFuncFlags,
    /// Offset in the class structure; `None` when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Signal this virtual function is the class closure of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    /// Method that invokes this virtual function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoker: Option<String>,
}

fn default_storage_type() -> TypeTag { TypeTag::Uint32 }

/// An enumeration or flags type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumInfo {
    /// Registered native type name.
    #[serde(default)]
    pub type_name: String,
    /// Type initialisation function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_init: Option<String>,
    /// Integer type the values are stored in. Informational only.
    #[serde(default = "default_storage_type")]
    pub storage_type: TypeTag,
    /// [`InfoKind::Value`] children in declaration order.
    #[serde(default)]
    pub values: Vec<InfoNode>,
    /// Methods attached to the enumeration.
    #[serde(default)]
    pub methods: Vec<InfoNode>,
}

/// One enumeration member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueInfo {
    /// Numeric value.
    pub value: i64,
}

/// A class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectInfo {
    /// Registered native type name.
    pub type_name: String,
    /// Type initialisation function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_init: Option<String>,
    /// Whether the class is abstract.
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Whether the class is a fundamental root type.
    pub fundamental: bool,
    /// Parent class reference, `Name` or `Namespace.Name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Implemented interfaces, `Name` or `Namespace.Name`.
    pub interfaces: Vec<String>,
    /// Instance fields.
    pub fields: Vec<InfoNode>,
    /// Properties.
    pub properties: Vec<InfoNode>,
    /// Methods, each an [`InfoKind::Function`] node.
    pub methods: Vec<InfoNode>,
    /// Signals.
    pub signals: Vec<InfoNode>,
    /// Virtual functions.
    pub vfuncs: Vec<InfoNode>,
    /// Class constants.
    pub constants: Vec<InfoNode>,
}

/// A capability interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceInfo {
    /// Registered native type name.
    pub type_name: String,
    /// Type initialisation function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_init: Option<String>,
    /// Types an implementer must also be.
    pub prerequisites: Vec<String>,
    /// Properties.
    pub properties: Vec<InfoNode>,
    /// Methods.
    pub methods: Vec<InfoNode>,
    /// Signals.
    pub signals: Vec<InfoNode>,
    /// Virtual functions.
    pub vfuncs: Vec<InfoNode>,
    /// Constants.
    pub constants: Vec<InfoNode>,
}

/// A structure, boxed type or union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructInfo {
    /// Registered native type name; empty when unregistered.
    pub type_name: String,
    /// Fields.
    pub fields: Vec<InfoNode>,
    /// Methods.
    pub methods: Vec<InfoNode>,
    /// Whether this is the class structure of an object.
    pub is_gtype_struct: bool,
    /// Whether the type is defined outside the introspection data.
    pub foreign: bool,
}

/// A callable argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgInfo {
    /// Passing direction.
    #[serde(default)]
    pub direction: Direction,
    /// Whether the caller allocates storage for an out argument.
    #[serde(default)]
    pub caller_allocates: bool,
    /// Whether this argument is really the return value.
    #[serde(default)]
    pub return_value: bool,
    /// Whether the argument may be omitted.
    #[serde(default)]
    pub optional: bool,
    /// Whether null is accepted.
    #[serde(default)]
    pub may_be_null: bool,
    /// Ownership transfer.
    #[serde(default)]
    pub ownership_transfer: Transfer,
    /// Callback scope.
    #[serde(default)]
    pub scope: ScopeType,
    /// Argument type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
}

impl ArgInfo {
    /// An argument of `type_info` passed in `direction`, every other attribute unset.
    pub fn new(direction: Direction, type_info: TypeInfo) -> Self {
        Self {
            direction,
            caller_allocates: false,
            return_value: false,
            optional: false,
            may_be_null: false,
            ownership_transfer: Transfer::default(),
            scope: ScopeType::default(),
            type_info,
        }
    }
}

/// A field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    /// Readable.
    #[serde(default = "yes")]
    pub readable: bool,
    /// Writable.
    #[serde(default)]
    pub writable: bool,
}

fn yes() -> bool { true }

/// A property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// Property type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    /// Ownership transfer of the property value.
    #[serde(default)]
    pub ownership_transfer: Transfer,
}

/// A constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantInfo {
    /// Constant type.
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    /// Literal value.
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Kind-specific payload of an [`InfoNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InfoData {
    #[allow(missing_docs)]
    Function(FunctionInfo),
    #[allow(missing_docs)]
    Callback(CallableInfo),
    #[allow(missing_docs)]
    Struct(StructInfo),
    #[allow(missing_docs)]
    Boxed(StructInfo),
    #[allow(missing_docs)]
    Enum(EnumInfo),
    #[allow(missing_docs)]
    Flags(EnumInfo),
    #[allow(missing_docs)]
    Object(ObjectInfo),
    #[allow(missing_docs)]
    Interface(InterfaceInfo),
    #[allow(missing_docs)]
    Constant(ConstantInfo),
    #[allow(missing_docs)]
    Union(StructInfo),
    #[allow(missing_docs)]
    Value(ValueInfo),
    #[allow(missing_docs)]
    Signal(SignalInfo),
    #[allow(missing_docs)]
    VFunc(VFuncInfo),
    #[allow(missing_docs)]
    Property(PropertyInfo),
    #[allow(missing_docs)]
    Field(FieldInfo),
    #[allow(missing_docs)]
    Arg(ArgInfo),
    #[allow(missing_docs)]
    Type(TypeInfo),
    #[allow(missing_docs)]
    Unresolved,
}

impl InfoData {
    /// Kind implied by this payload.
    pub fn kind(&self) -> InfoKind {
        match self {
            InfoData::Function(_) => InfoKind::Function,
            InfoData::Callback(_) => InfoKind::Callback,
            InfoData::Struct(_) => InfoKind::Struct,
            InfoData::Boxed(_) => InfoKind::Boxed,
            InfoData::Enum(_) => InfoKind::Enum,
            InfoData::Flags(_) => InfoKind::Flags,
            InfoData::Object(_) => InfoKind::Object,
            InfoData::Interface(_) => InfoKind::Interface,
            InfoData::Constant(_) => InfoKind::Constant,
            InfoData::Union(_) => InfoKind::Union,
            InfoData::Value(_) => InfoKind::Value,
            InfoData::Signal(_) => InfoKind::Signal,
            InfoData::VFunc(_) => InfoKind::VFunc,
            InfoData::Property(_) => InfoKind::Property,
            InfoData::Field(_) => InfoKind::Field,
            InfoData::Arg(_) => InfoKind::Arg,
            InfoData::Type(_) => InfoKind::Type,
            InfoData::Unresolved => InfoKind::Unresolved,
        }
    }
}

/// A handle to one metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoNode {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    namespace: String,
    #[serde(default)]
    deprecated: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(flatten)]
    data: InfoData,
}

impl InfoNode {
    /// Create a node; its kind is taken from `data` and never changes.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, data: InfoData) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            deprecated: false,
            attributes: BTreeMap::new(),
            data,
        }
    }

    /// Mark the node deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Attach a free-form attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /* -- Base info -- */

    /// Kind of the node.
    pub fn kind(&self) -> InfoKind { self.data.kind() }

    /// Entry name.
    pub fn name(&self) -> &str { &self.name }

    /// Owning namespace.
    pub fn namespace(&self) -> &str { &self.namespace }

    /// Lowercased namespace joined to the name with an underscore.
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.namespace.to_lowercase(), self.name)
    }

    /// Whether the entry is deprecated.
    pub fn is_deprecated(&self) -> bool { self.deprecated }

    /// Free-form attribute lookup.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Raw payload.
    pub fn data(&self) -> &InfoData { &self.data }

    /// Fill in `namespace` on this node and every nested child that has none.
    pub fn adopt_namespace(&mut self, namespace: &str) {
        if self.namespace.is_empty() {
            self.namespace = namespace.to_string();
        }
        for child in self.children_mut() {
            child.adopt_namespace(namespace);
        }
    }

    fn children_mut(&mut self) -> Vec<&mut InfoNode> {
        fn all<'a>(lists: Vec<&'a mut Vec<InfoNode>>) -> Vec<&'a mut InfoNode> {
            lists.into_iter().flat_map(|l| l.iter_mut()).collect()
        }
        match &mut self.data {
            InfoData::Function(f) => all(vec![&mut f.callable.args]),
            InfoData::Signal(s) => all(vec![&mut s.callable.args]),
            InfoData::VFunc(v) => all(vec![&mut v.callable.args]),
            InfoData::Callback(c) => all(vec![&mut c.args]),
            InfoData::Enum(e) | InfoData::Flags(e) => all(vec![&mut e.values, &mut e.methods]),
            InfoData::Object(o) => all(vec![
                &mut o.fields,
                &mut o.properties,
                &mut o.methods,
                &mut o.signals,
                &mut o.vfuncs,
                &mut o.constants,
            ]),
            InfoData::Interface(i) => all(vec![
                &mut i.properties,
                &mut i.methods,
                &mut i.signals,
                &mut i.vfuncs,
                &mut i.constants,
            ]),
            InfoData::Struct(s) | InfoData::Boxed(s) | InfoData::Union(s) => {
                all(vec![&mut s.fields, &mut s.methods])
            }
            _ => Vec::new(),
        }
    }

    /* -- Callables -- */

    /// Whether the node is a function, signal or virtual function.
    pub fn is_callable(&self) -> bool { self.kind().is_callable() }

    /// Signature of a callable (callbacks included).
    pub fn as_callable(&self) -> Option<&CallableInfo> {
        match &self.data {
            InfoData::Function(f) => Some(&f.callable),
            InfoData::Signal(s) => Some(&s.callable),
            InfoData::VFunc(v) => Some(&v.callable),
            InfoData::Callback(c) => Some(c),
            _ => None,
        }
    }

    /// Return type of a callable.
    pub fn return_type(&self) -> Option<&TypeInfo> { self.as_callable().map(|c| &c.return_type) }

    /// Formal arguments of a callable; empty for other kinds.
    pub fn args(&self) -> &[InfoNode] { self.as_callable().map(|c| c.args.as_slice()).unwrap_or(&[]) }

    /// Number of formal arguments.
    pub fn n_args(&self) -> usize { self.args().len() }

    /// Formal argument `n`.
    pub fn arg(&self, n: usize) -> Option<&InfoNode> { self.args().get(n) }

    /* -- Functions, signals, vfuncs -- */

    #[allow(missing_docs)]
    pub fn as_function(&self) -> Option<&FunctionInfo> {
        match &self.data {
            InfoData::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Native symbol of a function.
    pub fn symbol(&self) -> Option<&str> { self.as_function().map(|f| f.symbol.as_str()) }

    /// Flags of a function.
    pub fn function_flags(&self) -> Option<FunctionFlags> { self.as_function().map(|f| f.flags) }

    #[allow(missing_docs)]
    pub fn as_signal(&self) -> Option<&SignalInfo> {
        match &self.data {
            InfoData::Signal(s) => Some(s),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_vfunc(&self) -> Option<&VFuncInfo> {
        match &self.data {
            InfoData::VFunc(v) => Some(v),
            _ => None,
        }
    }

    /* -- Registered types -- */

    /// Whether the node carries a registered runtime type.
    pub fn is_registered_type(&self) -> bool { self.kind().is_registered_type() }

    /// Registered native type name.
    pub fn registered_type_name(&self) -> Option<&str> {
        match &self.data {
            InfoData::Enum(e) => Some(e.type_name.as_str()),
            InfoData::Object(o) => Some(o.type_name.as_str()),
            InfoData::Interface(i) => Some(i.type_name.as_str()),
            InfoData::Struct(s) | InfoData::Union(s) => Some(s.type_name.as_str()),
            _ => None,
        }
    }

    /// Registered type initialisation function.
    pub fn registered_type_init(&self) -> Option<&str> {
        match &self.data {
            InfoData::Enum(e) => e.type_init.as_deref(),
            InfoData::Object(o) => o.type_init.as_deref(),
            InfoData::Interface(i) => i.type_init.as_deref(),
            _ => None,
        }
    }

    /* -- Enums and values -- */

    /// Payload of an enumeration or flags node.
    pub fn as_enum(&self) -> Option<&EnumInfo> {
        match &self.data {
            InfoData::Enum(e) | InfoData::Flags(e) => Some(e),
            _ => None,
        }
    }

    /// Value children of an enumeration; empty for other kinds.
    pub fn enum_values(&self) -> &[InfoNode] {
        self.as_enum().map(|e| e.values.as_slice()).unwrap_or(&[])
    }

    /// Numeric value of a value node.
    pub fn value(&self) -> Option<i64> {
        match &self.data {
            InfoData::Value(v) => Some(v.value),
            _ => None,
        }
    }

    /* -- Objects -- */

    #[allow(missing_docs)]
    pub fn as_object(&self) -> Option<&ObjectInfo> {
        match &self.data {
            InfoData::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Parent reference of an object.
    pub fn parent_name(&self) -> Option<&str> { self.as_object().and_then(|o| o.parent.as_deref()) }

    /// Whether an object is a fundamental root type.
    pub fn is_fundamental(&self) -> bool { self.as_object().is_some_and(|o| o.fundamental) }

    /// Whether an object is abstract.
    pub fn is_abstract(&self) -> bool { self.as_object().is_some_and(|o| o.is_abstract) }

    /// Methods of an object; empty for other kinds.
    pub fn object_methods(&self) -> &[InfoNode] {
        self.as_object().map(|o| o.methods.as_slice()).unwrap_or(&[])
    }

    /// Interfaces implemented by an object.
    pub fn object_interfaces(&self) -> &[String] {
        self.as_object().map(|o| o.interfaces.as_slice()).unwrap_or(&[])
    }

    #[allow(missing_docs)]
    pub fn as_interface(&self) -> Option<&InterfaceInfo> {
        match &self.data {
            InfoData::Interface(i) => Some(i),
            _ => None,
        }
    }

    /// Payload of a structure, boxed type or union.
    pub fn as_struct(&self) -> Option<&StructInfo> {
        match &self.data {
            InfoData::Struct(s) | InfoData::Boxed(s) | InfoData::Union(s) => Some(s),
            _ => None,
        }
    }

    /* -- Args and types -- */

    #[allow(missing_docs)]
    pub fn as_arg(&self) -> Option<&ArgInfo> {
        match &self.data {
            InfoData::Arg(a) => Some(a),
            _ => None,
        }
    }

    /// Direction of an argument.
    pub fn direction(&self) -> Option<Direction> { self.as_arg().map(|a| a.direction) }

    /// Type of an argument, field, property, constant or type node.
    pub fn type_info(&self) -> Option<&TypeInfo> {
        match &self.data {
            InfoData::Arg(a) => Some(&a.type_info),
            InfoData::Field(f) => Some(&f.type_info),
            InfoData::Property(p) => Some(&p.type_info),
            InfoData::Constant(c) => Some(&c.type_info),
            InfoData::Type(t) => Some(t),
            _ => None,
        }
    }
}
