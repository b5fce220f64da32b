//! `represent`: `ClassName(field=repr, ...)`.

use clue_ir::Name;
use clue_value::{ClueSet, SynthesisError, Value};

use super::{expect_record, method, no_args, MethodFn, SynthesisContext};

pub(crate) fn build(ctx: &SynthesisContext<'_>, clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    let fields: Vec<(Name, String)> = clues
        .iter()
        .map(|clue| ctx.field_name(clue.name).map(|text| (clue.name, format!("{text}="))))
        .collect::<Result<_, _>>()?;

    Ok(method(move |rt, this, args| {
        no_args("represent", args)?;
        let record = expect_record(this)?;

        // Runtime class, so subclass instances print their own name.
        let mut out = String::from(rt.class_name(record.class()));
        out.push('(');
        for (i, (name, prefix)) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(prefix);
            let value = rt.read_field(record, *name)?;
            out.push_str(&rt.represent(&value)?);
        }
        out.push(')');
        Ok(Value::string(out))
    }))
}
