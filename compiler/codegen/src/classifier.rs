//! Parameter classification.
//!
//! Splits a callable's signature into the four lists a binding needs:
//! target-language args and rets, native args and rets. Every arg is passed
//! natively; the target side only sees what flows its way, so `In` args are
//! target args, `Out` args are target rets and `InOut` args are both.

use metadata::{Direction, FunctionFlags, InfoNode};
use typemap::TypeMapper;

use crate::definitions::{ArgsAndRets, Parameter, ERROR_NAME, RETVAL_NAME};
use crate::{CodegenError, Result};

/// The classified signature of one callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedParams<'a> {
    /// Target-language args and rets.
    pub target: ArgsAndRets<'a>,
    /// Native args and rets.
    pub native: ArgsAndRets<'a>,
}

/// Classify the parameters of `callable`.
///
/// All-or-nothing: the first arg or return type without a mapping fails the
/// whole callable and no partial lists are returned. A produced return value
/// becomes a synthetic `retval` native ret; a throwing callable gets a trailing
/// `error` target ret.
pub fn read_params<'a>(
    mapper: &TypeMapper,
    callable: &'a InfoNode,
    flags: FunctionFlags,
) -> Result<ClassifiedParams<'a>> {
    if !callable.is_callable() {
        return Err(CodegenError::UnexpectedKind {
            name: callable.name().to_string(),
            expected: "callable",
            found: callable.kind(),
        });
    }
    let unsupported = |parameter: &str, source: typemap::UnsupportedType| CodegenError::UnsupportedType {
        callable: callable.name().to_string(),
        parameter: parameter.to_string(),
        source,
    };

    let mut params = ClassifiedParams::default();

    if let Some(ret) = callable.return_type().filter(|r| r.returns_value()) {
        let mapped = mapper.map_type(ret).map_err(|e| unsupported(RETVAL_NAME, e))?;
        params.native.rets.push(Parameter::new(RETVAL_NAME, Direction::Out, mapped, None));
    }

    for arg in callable.args() {
        let (Some(direction), Some(type_info)) = (arg.direction(), arg.type_info()) else {
            return Err(CodegenError::UnexpectedKind {
                name: arg.name().to_string(),
                expected: "arg",
                found: arg.kind(),
            });
        };
        let mapped = mapper.map_type(type_info).map_err(|e| unsupported(arg.name(), e))?;
        let param = Parameter::new(arg.name(), direction, mapped, Some(arg));

        if direction.is_input() {
            params.target.args.push(param.clone());
        }
        if direction.is_output() {
            params.target.rets.push(param.clone());
        }
        params.native.args.push(param);
    }

    if flags.throws {
        params.target.rets.push(Parameter::new(ERROR_NAME, Direction::Out, mapper.error_type(), None));
    }

    Ok(params)
}
