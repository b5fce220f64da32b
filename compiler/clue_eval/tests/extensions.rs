//! Behaviors beyond the standard set: subclass-registered rules, positional
//! matching and slot-driven clues.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use clue_eval::{
    method, Args, Behavior, ClassDecl, ClassId, ClueSet, CollectorKind, EvalError, MethodFn,
    RuleRegistry, Runtime, SynthesisContext, SynthesisError, SynthesisRule, Value,
};
use pretty_assertions::assert_eq;

#[test]
fn test_as_dict_registered_on_intermediate_class() {
    clue_eval::init_tracing();
    let rt = Runtime::new();
    let datum = rt.datum("Datum").unwrap();
    let my_datum = rt
        .declare(
            ClassDecl::new("MyDatum")
                .base(datum)
                .fixed_storage()
                .behavior(Behavior::AsDict.rule()),
        )
        .unwrap();
    let point = rt
        .declare(
            ClassDecl::new("Point")
                .base(my_datum)
                .fixed_storage()
                .field("x", "int")
                .field("y", "int"),
        )
        .unwrap();
    let other = rt
        .declare(ClassDecl::new("Other").base(datum).fixed_storage().field("v", "int"))
        .unwrap();

    let p = rt
        .construct(point, &Args::positional([Value::int(2), Value::int(3)]))
        .unwrap();
    let dict = rt.call_method(&p, "as-dict", &Args::new()).unwrap();
    assert_eq!(
        dict,
        Value::map(vec![
            ("x".to_owned(), Value::int(2)),
            ("y".to_owned(), Value::int(3)),
        ])
    );
    assert_eq!(rt.represent(&dict).unwrap(), "{'x': 2, 'y': 3}");

    let o = rt.construct(other, &Args::positional([Value::int(1)])).unwrap();
    assert_eq!(
        rt.call_method(&o, "as-dict", &Args::new()),
        Err(EvalError::UndefinedMethod {
            type_name: "Other".to_owned(),
            method: "as-dict".to_owned(),
        })
    );
}

fn field_count(ctx: &SynthesisContext<'_>, clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    if clues.len() > 3 {
        return Err(ctx.reject("too many fields to count"));
    }
    let count = i64::try_from(clues.len()).unwrap_or(i64::MAX);
    Ok(method(move |_, _, _| Ok(Value::int(count))))
}

#[test]
fn test_user_rule_through_registry() {
    let mut rules = RuleRegistry::standard();
    rules.register(SynthesisRule::new("field-count", field_count));
    let rt = Runtime::builder().rules(rules).build();
    let datum = rt.datum("Datum").unwrap();
    let pair = rt
        .declare(
            ClassDecl::new("Pair")
                .base(datum)
                .fixed_storage()
                .field("a", "int")
                .field("b", "int"),
        )
        .unwrap();
    let wide = rt
        .declare(
            ClassDecl::new("Wide")
                .base(pair)
                .fixed_storage()
                .field("c", "int")
                .field("d", "int"),
        )
        .unwrap();

    let args = Args::positional([Value::int(1), Value::int(2)]);
    let p = rt.construct(pair, &args).unwrap();
    assert_eq!(rt.call_method(&p, "field-count", &Args::new()).unwrap(), Value::int(2));

    let w = rt
        .construct(
            wide,
            &Args::positional([Value::int(1), Value::int(2), Value::int(3), Value::int(4)]),
        )
        .unwrap();
    assert_eq!(
        rt.call_method(&w, "field-count", &Args::new()),
        Err(EvalError::Synthesis(SynthesisError::Rejected {
            class: "Wide".to_owned(),
            behavior: "field-count".to_owned(),
            reason: "too many fields to count".to_owned(),
        }))
    );
}

struct Exprs {
    rt: Runtime,
    integer: ClassId,
    bin_op: ClassId,
}

fn exprs() -> Exprs {
    let rt = Runtime::builder().rules(RuleRegistry::with_extras()).build();
    let datum = rt.datum("Datum").unwrap();
    let expression = rt
        .declare(ClassDecl::new("Expression").base(datum).fixed_storage())
        .unwrap();
    let integer = rt
        .declare(
            ClassDecl::new("Integer")
                .base(expression)
                .fixed_storage()
                .field("value", "int"),
        )
        .unwrap();
    let bin_op = rt
        .declare(
            ClassDecl::new("BinOp")
                .base(expression)
                .fixed_storage()
                .field("op", "str")
                .field("left", "Expression")
                .field("right", "Expression"),
        )
        .unwrap();
    Exprs {
        rt,
        integer,
        bin_op,
    }
}

impl Exprs {
    fn int(&self, n: i64) -> Value {
        self.rt
            .construct(self.integer, &Args::positional([Value::int(n)]))
            .unwrap()
    }

    fn op(&self, op: &str, left: Value, right: Value) -> Value {
        self.rt
            .construct(self.bin_op, &Args::positional([Value::string(op), left, right]))
            .unwrap()
    }

    fn evaluate(&self, expr: &Value) -> Result<i64, EvalError> {
        if let Some(parts) = self.rt.match_positional(expr, self.integer, 1)? {
            return Ok(parts[0].as_int().unwrap_or_default());
        }
        if let Some(parts) = self.rt.match_positional(expr, self.bin_op, 3)? {
            let left = self.evaluate(&parts[1])?;
            let right = self.evaluate(&parts[2])?;
            return match parts[0].as_str() {
                Some("+") => Ok(left + right),
                Some("*") => Ok(left * right),
                _ => Err(EvalError::NotARecord {
                    type_name: "operator".to_owned(),
                }),
            };
        }
        Err(EvalError::NotARecord {
            type_name: expr.type_name().to_owned(),
        })
    }
}

#[test]
fn test_positional_matching_evaluates_expression() {
    let e = exprs();
    let expr = e.op(
        "+",
        e.op("*", e.int(3), e.int(4)),
        e.op("*", e.int(5), e.int(6)),
    );
    assert_eq!(e.evaluate(&expr), Ok(42));
    assert_eq!(
        e.rt.represent(&e.op("+", e.int(1), e.int(2))).unwrap(),
        "BinOp(op='+', left=Integer(value=1), right=Integer(value=2))"
    );
}

#[test]
fn test_positional_matching_edges() {
    let e = exprs();
    let one = e.int(1);

    assert_eq!(e.rt.match_positional(&one, e.bin_op, 3).unwrap(), None);
    assert_eq!(e.rt.match_positional(&Value::int(1), e.integer, 1).unwrap(), None);
    assert_eq!(
        e.rt.match_positional(&one, e.integer, 0).unwrap(),
        Some(Vec::new())
    );
    assert_eq!(
        e.rt.match_positional(&one, e.integer, 2),
        Err(EvalError::TooManySubpatterns {
            class: "Integer".to_owned(),
            expected: 1,
            got: 2,
        })
    );

    let args = e.rt.call_method(&one, "match-args", &Args::new()).unwrap();
    assert_eq!(args, Value::tuple(vec![Value::string("value")]));
}

#[test]
fn test_slot_collector_datum() {
    let rt = Runtime::new();
    let root = rt
        .declare(
            ClassDecl::datum("SlotDatum", rt.rules()).collector(CollectorKind::Slots),
        )
        .unwrap();
    let vec2 = rt
        .declare(ClassDecl::new("Vec2").base(root).slots(["x", "y"]))
        .unwrap();
    let vec3 = rt
        .declare(ClassDecl::new("Vec3").base(vec2).slots(["z"]))
        .unwrap();

    let v = rt
        .construct(vec3, &Args::positional([Value::int(1), Value::int(2), Value::int(3)]))
        .unwrap();
    assert_eq!(rt.represent(&v).unwrap(), "Vec3(x=1, y=2, z=3)");

    // Slots never carry defaults.
    assert_eq!(
        rt.construct(vec2, &Args::positional([Value::int(1)])),
        Err(EvalError::MissingArgument {
            class: "Vec2".to_owned(),
            name: "y".to_owned(),
        })
    );
    assert_eq!(
        rt.set_field(&v, "w", Value::int(0)),
        Err(EvalError::NoSuchSlot {
            class: "Vec3".to_owned(),
            field: "w".to_owned(),
        })
    );
}
