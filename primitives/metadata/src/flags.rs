//! Flag sets reported for functions, signals and virtual functions.
//!
//! Each set deserializes from booleans and can also be decoded from the raw bit
//! mask used by the introspection ABI.

use serde::{Deserialize, Serialize};

/// Decode `bits` into one boolean per entry of `masks`, in order.
fn decode<const N: usize>(bits: u32, masks: [u32; N]) -> [bool; N] { masks.map(|m| bits & m != 0) }

/// Encode booleans back into a bit mask.
fn encode<const N: usize>(values: [bool; N], masks: [u32; N]) -> u32 {
    values.iter().zip(masks.iter()).filter(|(v, _)| **v).fold(0, |acc, (_, m)| acc | m)
}

const FUNCTION_MASKS: [u32; 6] = [1 << 0, 1 << 1, 1 << 2, 1 << 3, 1 << 4, 1 << 5];

/// Flags of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionFlags {
    /// The function is a method and takes the instance as first argument.
    pub is_method: bool,
    /// The function constructs a new instance.
    pub is_constructor: bool,
    /// The function is a property getter.
    pub is_getter: bool,
    /// The function is a property setter.
    pub is_setter: bool,
    /// The function invokes a virtual function.
    pub wraps_vfunc: bool,
    /// The function reports failures through a trailing error output.
    pub throws: bool,
}

impl FunctionFlags {
    /// Decode the ABI bit mask.
    pub fn from_bits(bits: u32) -> Self {
        let [is_method, is_constructor, is_getter, is_setter, wraps_vfunc, throws] =
            decode(bits, FUNCTION_MASKS);
        Self { is_method, is_constructor, is_getter, is_setter, wraps_vfunc, throws }
    }

    /// Encode as the ABI bit mask.
    pub fn bits(&self) -> u32 {
        encode(
            [
                self.is_method,
                self.is_constructor,
                self.is_getter,
                self.is_setter,
                self.wraps_vfunc,
                self.throws,
            ],
            FUNCTION_MASKS,
        )
    }
}

const SIGNAL_MASKS: [u32; 9] =
    [1 << 0, 1 << 1, 1 << 2, 1 << 3, 1 << 4, 1 << 5, 1 << 6, 1 << 7, 1 << 8];

/// Flags of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalFlags {
    /// Invoke the class handler in the first emission stage.
    pub run_first: bool,
    /// Invoke the class handler in the third emission stage.
    pub run_last: bool,
    /// Invoke the class handler in the last emission stage.
    pub run_cleanup: bool,
    /// Recursive emission restarts instead of nesting.
    pub no_recurse: bool,
    /// Supports detail strings.
    pub detailed: bool,
    /// Can be emitted as a plain action.
    pub action: bool,
    /// No emission hooks are supported.
    pub no_hooks: bool,
    /// Varargs must always be collected.
    pub must_collect: bool,
    /// Deprecated signal.
    pub deprecated: bool,
}

impl SignalFlags {
    /// Decode the ABI bit mask.
    pub fn from_bits(bits: u32) -> Self {
        let [run_first, run_last, run_cleanup, no_recurse, detailed, action, no_hooks, must_collect, deprecated] =
            decode(bits, SIGNAL_MASKS);
        Self {
            run_first,
            run_last,
            run_cleanup,
            no_recurse,
            detailed,
            action,
            no_hooks,
            must_collect,
            deprecated,
        }
    }

    /// Encode as the ABI bit mask.
    pub fn bits(&self) -> u32 {
        encode(
            [
                self.run_first,
                self.run_last,
                self.run_cleanup,
                self.no_recurse,
                self.detailed,
                self.action,
                self.no_hooks,
                self.must_collect,
                self.deprecated,
            ],
            SIGNAL_MASKS,
        )
    }
}

const VFUNC_MASKS: [u32; 4] = [1 << 0, 1 << 1, 1 << 2, 1 << 3];

/// Flags of a virtual function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VFuncFlags {
    /// Overrides must chain up to the parent implementation.
    pub must_chain_up: bool,
    /// Subclasses must override.
    pub must_override: bool,
    /// Subclasses must not override.
    pub must_not_override: bool,
    /// Reports failures through a trailing error output.
    pub throws: bool,
}

impl VFuncFlags {
    /// Decode the ABI bit mask.
    pub fn from_bits(bits: u32) -> Self {
        let [must_chain_up, must_override, must_not_override, throws] = decode(bits, VFUNC_MASKS);
        Self { must_chain_up, must_override, must_not_override, throws }
    }

    /// Encode as the ABI bit mask.
    pub fn bits(&self) -> u32 {
        encode(
            [self.must_chain_up, self.must_override, self.must_not_override, self.throws],
            VFUNC_MASKS,
        )
    }
}
