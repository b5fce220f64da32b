//! `iterate-fields`: restartable iteration over field values.

use std::sync::Arc;

use clue_value::{ClueSet, FieldIter, SynthesisError, Value};

use super::{expect_record, method, no_args, MethodFn, SynthesisContext};

pub(crate) fn build(ctx: &SynthesisContext<'_>, clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    let names = ctx.field_names(clues)?;

    Ok(method(move |_rt, this, args| {
        no_args("iterate-fields", args)?;
        let record = expect_record(this)?;
        Ok(Value::Fields(FieldIter::new(record.clone(), Arc::clone(&names))))
    }))
}
