//! Behaviors outside the standard record protocols.
//!
//! Both are ordinary rules: they plug into the registry under their own
//! names and propagate to subclasses like the core set.

use clue_value::{ClueSet, SynthesisError, Value};

use super::{expect_record, method, no_args, MethodFn, SynthesisContext};

/// `as-dict`: ordered mapping of field name to current value.
pub(crate) fn build_as_dict(
    ctx: &SynthesisContext<'_>,
    clues: &ClueSet,
) -> Result<MethodFn, SynthesisError> {
    let fields = clues
        .iter()
        .map(|clue| ctx.field_name(clue.name).map(|text| (clue.name, text.to_owned())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(method(move |rt, this, args| {
        no_args("as-dict", args)?;
        let record = expect_record(this)?;
        let mut entries = Vec::with_capacity(fields.len());
        for (name, key) in &fields {
            entries.push((key.clone(), rt.read_field(record, *name)?));
        }
        Ok(Value::map(entries))
    }))
}

/// `match-args`: the field names accepted as positional sub-patterns.
pub(crate) fn build_match_args(
    ctx: &SynthesisContext<'_>,
    clues: &ClueSet,
) -> Result<MethodFn, SynthesisError> {
    let names = clues
        .iter()
        .map(|clue| ctx.field_name(clue.name).map(Value::string))
        .collect::<Result<Vec<_>, _>>()?;
    let names = Value::tuple(names);

    Ok(method(move |_rt, _this, args| {
        no_args("match-args", args)?;
        Ok(names.clone())
    }))
}
