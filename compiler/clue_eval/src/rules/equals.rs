//! `equals`: ordered field tuple equality within one runtime class.

use clue_value::{ClueSet, EvalError, SynthesisError, Value};

use super::{expect_record, method, MethodFn, SynthesisContext};

pub(crate) fn build(ctx: &SynthesisContext<'_>, clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    let names = ctx.field_names(clues)?;

    Ok(method(move |rt, this, args| {
        let other = args.single().ok_or_else(|| EvalError::WrongArgCount {
            method: "equals".to_owned(),
            expected: 1,
            got: args.len(),
        })?;
        let this = expect_record(this)?;

        // Not ours to decide: the runtime tries the reflected operand next.
        let Some(that) = other.as_record() else {
            return Ok(Value::NotImplemented);
        };
        if this.class() != that.class() {
            return Ok(Value::NotImplemented);
        }
        if this.ptr_eq(that) {
            return Ok(Value::Bool(true));
        }

        for &name in names.iter() {
            let a = rt.read_field(this, name)?;
            let b = rt.read_field(that, name)?;
            if !rt.equals(&a, &b)? {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    }))
}
