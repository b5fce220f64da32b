//! `hash`: hash of the ordered field tuple.

use clue_value::{ClueSet, SynthesisError, Value};

use super::{expect_record, method, no_args, MethodFn, SynthesisContext};

pub(crate) fn build(ctx: &SynthesisContext<'_>, clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    let names = ctx.field_names(clues)?;

    Ok(method(move |rt, this, args| {
        no_args("hash", args)?;
        let record = expect_record(this)?;
        let values = names
            .iter()
            .map(|&name| rt.read_field(record, name))
            .collect::<Result<Vec<_>, _>>()?;
        // Unhashable field values fail here, at call time.
        let hash = rt.hash_sequence(&values)?;
        Ok(Value::Int(i64::from_ne_bytes(hash.to_ne_bytes())))
    }))
}
