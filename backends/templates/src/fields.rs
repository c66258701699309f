//! Flat field maps built from definitions.
//!
//! | Snippet | Fields |
//! |---|---|
//! | `enum` | `EnumName`, `CType`, `Values`, `ValueCount` |
//! | `enum-value` | `Name`, `EnumName`, `Value` |
//! | object slots | `ObjectName`, `InterfaceName`, `CType`, `CastFunc` |
//! | parameter snippets | `Name`, `CName`, `CType`, `GoType`, `CGoType`, `CValue`, `GoValue`, `Direction` |
//! | function slots | see [`function_fields`] |

use std::collections::BTreeMap;

use codegen::{EnumDefinition, EnumValue, FunctionDefinition, ObjectDefinition, Parameter};
use metadata::Direction;

/// Placeholder values keyed by field name.
pub type Fields = BTreeMap<&'static str, String>;

/// Fields of an enum; `Values` is left to the renderer.
pub fn enum_fields(def: &EnumDefinition) -> Fields {
    Fields::from([
        ("EnumName", def.enum_name.clone()),
        ("CType", def.c_type.clone()),
        ("ValueCount", def.values.len().to_string()),
    ])
}

/// Fields of one enum value.
pub fn enum_value_fields(value: &EnumValue) -> Fields {
    Fields::from([
        ("Name", value.name.clone()),
        ("EnumName", value.enum_name.clone()),
        ("Value", value.value.to_string()),
    ])
}

/// Fields of an object, interface or implements payload.
pub fn object_fields(def: &ObjectDefinition) -> Fields {
    Fields::from([
        ("ObjectName", def.object_name.clone()),
        ("InterfaceName", def.interface_name.clone()),
        ("CType", def.c_type.clone()),
        ("CastFunc", def.cast_func.clone()),
    ])
}

/// Fields of a parameter, for the marshalling snippets.
pub fn parameter_fields(param: &Parameter<'_>) -> Fields {
    let direction = match param.direction {
        Direction::In => "in",
        Direction::Out => "out",
        Direction::InOut => "inout",
    };
    Fields::from([
        ("Name", param.name.clone()),
        ("CName", param.c_name()),
        ("CType", param.native_type.clone()),
        ("GoType", param.target_type.clone()),
        ("CGoType", c_go_type(param)),
        ("CValue", c_value(param)),
        ("GoValue", go_value(param)),
        ("Direction", direction.to_string()),
    ])
}

/// Fields of a function payload, apart from the marshal bodies.
///
/// `Name`, `GoName`, `CName`, `ClassName`, `ObjectName`, `InterfaceName`,
/// `CastFunc`, `Arglist` (with receiver), `WrapperArglist`, `Retlist`,
/// `Results` (return value first, then `Retlist`), `MarshaledValues`,
/// `CallArgs` (plus the error slot for throwing callables), `CallPrefix`
/// (binds the native return value), `ForwardValues` (wrapper to function),
/// `Return` (`return ` when there are results), `ReturnsValue` and `Throws`.
pub fn function_fields(def: &FunctionDefinition<'_>) -> Fields {
    let owner = def.owner.as_ref();
    let throws = def.flags.throws;

    let results: Vec<String> = def
        .c_ret()
        .map(|ret| format!("{} {}", ret.name, ret.target_type))
        .into_iter()
        .chain(def.for_target.rets.iter().map(|r| format!("{} {}", r.name, r.target_type)))
        .collect();

    let mut call_args = def.marshaled_values();
    if throws {
        if !call_args.is_empty() {
            call_args.push_str(", ");
        }
        call_args.push_str("&c_error");
    }

    let forward: Vec<&str> = owner
        .map(|_| "self")
        .into_iter()
        .chain(def.for_target.args.iter().map(|a| a.name.as_str()))
        .collect();

    let call_prefix = match def.c_ret() {
        Some(ret) => format!("{} := ", ret.c_name()),
        None => String::new(),
    };

    Fields::from([
        ("Name", def.name.clone()),
        ("GoName", def.target_name()),
        ("CName", def.c_name().to_string()),
        ("ClassName", def.class_name.clone()),
        ("ObjectName", owner.map(|o| o.object_name.clone()).unwrap_or_default()),
        ("InterfaceName", owner.map(|o| o.interface_name.clone()).unwrap_or_default()),
        ("CastFunc", owner.map(|o| o.cast_func.clone()).unwrap_or_default()),
        ("Arglist", def.arglist(false)),
        ("WrapperArglist", def.arglist(true)),
        ("Retlist", def.retlist()),
        ("Return", if results.is_empty() { String::new() } else { "return ".to_string() }),
        ("Results", results.join(", ")),
        ("MarshaledValues", def.marshaled_values()),
        ("CallArgs", call_args),
        ("CallPrefix", call_prefix),
        ("ForwardValues", forward.join(", ")),
        ("ReturnsValue", def.returns_value().to_string()),
        ("Throws", throws.to_string()),
    ])
}

/// cgo type of the native temporary.
///
/// Error slots and pointer inputs are pointers; pointer outputs are declared
/// as the pointee and passed by address.
fn c_go_type(param: &Parameter<'_>) -> String {
    let base = format!("C.{}", param.native_type);
    if param.is_pointer() && (param.is_error() || param.direction == Direction::In) {
        format!("*{base}")
    } else {
        base
    }
}

/// Expression converting the target value into the native temporary.
fn c_value(param: &Parameter<'_>) -> String {
    let name = &param.name;
    match param.target_type.as_str() {
        "string" => format!("(*C.gchar)(C.CString({name}))"),
        "bool" => format!("gbool({name})"),
        _ if param.is_opaque_handle() => format!("C.gpointer(unsafe.Pointer(&{name}))"),
        _ => format!("{}({name})", c_go_type(param)),
    }
}

/// Expression converting the native temporary into the target value.
fn go_value(param: &Parameter<'_>) -> String {
    let c_name = param.c_name();
    match param.target_type.as_str() {
        "string" => format!("C.GoString((*C.char)({c_name}))"),
        "bool" => format!("{c_name} != 0"),
        _ if param.is_opaque_handle() => format!("unsafe.Pointer({c_name})"),
        target => format!("{target}({c_name})"),
    }
}
