//! `construct`: bind call arguments to fields.

use std::sync::Arc;

use clue_ir::Name;
use clue_value::{Args, ClueSet, EvalError, EvalResult, RecordValue, SynthesisError, Value};
use rustc_hash::FxHashMap;

use super::{expect_record, method, MethodFn, SynthesisContext};
use crate::Runtime;

/// One constructor parameter, in clue order.
struct Param {
    name: Name,
    default: Option<Value>,
}

struct Signature {
    params: Vec<Param>,
    by_name: FxHashMap<Name, usize>,
}

pub(crate) fn build(ctx: &SynthesisContext<'_>, clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    let mut params = Vec::with_capacity(clues.len());
    let mut by_name = FxHashMap::default();
    let mut after_default = false;

    for clue in clues {
        let field = ctx.field_name(clue.name)?;
        let default = clue.default.value().cloned();
        if default.is_some() {
            after_default = true;
        } else if after_default {
            return Err(SynthesisError::NonDefaultAfterDefault {
                class: ctx.class_name().to_owned(),
                behavior: ctx.behavior_name().to_owned(),
                field: field.to_owned(),
            });
        }
        by_name.insert(clue.name, params.len());
        params.push(Param {
            name: clue.name,
            default,
        });
    }

    let signature = Arc::new(Signature { params, by_name });
    Ok(method(move |rt, this, args| {
        let record = expect_record(this)?;
        bind(rt, record, args, &signature)
    }))
}

/// Resolve every parameter before assigning anything, so a failed call
/// leaves the instance untouched.
fn bind(rt: &Runtime, record: &RecordValue, args: &Args, sig: &Signature) -> EvalResult {
    let class = || rt.class_name(record.class()).to_owned();
    let positional = args.positional_args();
    if positional.len() > sig.params.len() {
        return Err(EvalError::TooManyPositional {
            class: class(),
            expected: sig.params.len(),
            got: positional.len(),
        });
    }

    let mut bound: Vec<Option<Value>> = vec![None; sig.params.len()];
    for (slot, value) in bound.iter_mut().zip(positional) {
        *slot = Some(value.clone());
    }

    for (name, value) in args.keyword_args() {
        let Some(&pos) = sig.by_name.get(name) else {
            return Err(EvalError::UnexpectedKeyword {
                class: class(),
                name: rt.text(*name).to_owned(),
            });
        };
        if bound[pos].is_some() {
            return Err(EvalError::DuplicateArgument {
                class: class(),
                name: rt.text(*name).to_owned(),
            });
        }
        bound[pos] = Some(value.clone());
    }

    let mut values = Vec::with_capacity(sig.params.len());
    for (param, value) in sig.params.iter().zip(bound) {
        match value.or_else(|| param.default.clone()) {
            Some(value) => values.push((param.name, value)),
            None => {
                return Err(EvalError::MissingArgument {
                    class: class(),
                    name: rt.text(param.name).to_owned(),
                })
            }
        }
    }

    for (name, value) in values {
        record.set(name, value);
    }
    Ok(Value::None)
}
