use pretty_assertions::assert_eq;
use wend_ir::{AstBuilder, BinaryOp, SharedArena, Span, StringInterner, UnaryOp};

use crate::context::ContextId;
use crate::errors::{EvalError, EvalErrorKind, EvalNote};
use crate::tests::{sp, Session};
use crate::value::{Number, Value, ValueKind};
use crate::{run, InterpreterBuilder, Runtime, StackGrowth};

const NO_SPAN: Span = Span::DUMMY;

fn kind(result: Result<Option<Value>, EvalError>) -> Result<Option<ValueKind>, EvalErrorKind> {
    result.map(|v| v.map(|v| v.kind)).map_err(|e| e.kind)
}

fn int(n: i64) -> Result<Option<ValueKind>, EvalErrorKind> {
    Ok(Some(ValueKind::Number(Number::Int(n))))
}

fn illegal(operation: &str) -> Result<Option<ValueKind>, EvalErrorKind> {
    Err(EvalErrorKind::IllegalOperation {
        operation: operation.to_string(),
    })
}

// Literals and variables

#[test]
fn literal_is_stamped_with_node_span_and_context() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let lit = b.float(1.5, sp(3, 6));
    let mut s = Session::new(&interner, b);

    let value = s.eval(lit).map(|v| v.map(|v| (v.kind, v.span, v.context)));
    assert_eq!(
        value,
        Ok(Some((
            ValueKind::Number(Number::Float(1.5)),
            sp(3, 6),
            Some(ContextId::ROOT)
        )))
    );
}

#[test]
fn string_literal_resolves_interned_text() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let lit = b.string("hello", NO_SPAN);
    let mut s = Session::new(&interner, b);
    assert_eq!(kind(s.eval(lit)), Ok(Some(ValueKind::Str("hello".into()))));
}

#[test]
fn variable_read_is_restamped_at_access_site() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let seven = b.int(7, sp(8, 9));
    let assign = b.assign("x", seven, sp(0, 9));
    let read = b.ident("x", sp(20, 21));
    let mut s = Session::new(&interner, b);

    let _ = s.eval(assign);
    let value = s.eval(read).map(|v| v.map(|v| v.span));
    assert_eq!(value, Ok(Some(sp(20, 21))));
    // The stored value keeps its own provenance.
    assert_eq!(s.global("x").map(|v| v.span), Some(sp(8, 9)));
}

#[test]
fn undefined_variable_is_name_error_at_access() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let read = b.ident("nope", sp(4, 8));
    let mut s = Session::new(&interner, b);

    let err = s.eval(read).err();
    assert_eq!(
        err.map(|e| (e.kind, e.span, e.context)),
        Some((
            EvalErrorKind::NameError {
                name: "nope".to_string()
            },
            Some(sp(4, 8)),
            Some(ContextId::ROOT)
        ))
    );
}

#[test]
fn assignment_yields_bound_value() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let value = b.string("v", NO_SPAN);
    let assign = b.assign("x", value, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(assign)), Ok(Some(ValueKind::Str("v".into()))));
    assert_eq!(s.global("x"), Some(&Value::string("v")));
}

#[test]
fn assigning_no_value_is_illegal_at_rhs() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let cond = b.int(0, NO_SPAN);
    let body = b.int(1, NO_SPAN);
    let loop_ = b.while_(cond, body, sp(8, 30));
    let assign = b.assign("x", loop_, sp(0, 30));
    let mut s = Session::new(&interner, b);

    let err = s.eval(assign).err();
    assert_eq!(
        err.as_ref().map(|e| e.message.as_str()),
        Some("illegal operation: expression produced no value")
    );
    assert_eq!(err.and_then(|e| e.span), Some(sp(8, 30)));
    assert_eq!(s.global("x"), None);
}

// Operators

#[test]
fn binary_result_spans_node() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let one = b.int(1, sp(0, 1));
    let two = b.int(2, sp(4, 5));
    let sum = b.binary(BinaryOp::Add, one, two);
    let mut s = Session::new(&interner, b);

    assert_eq!(s.eval(sum).map(|v| v.map(|v| v.span)), Ok(Some(sp(0, 5))));
}

#[test]
fn binary_evaluates_left_before_right() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let left = b.ident("first", sp(0, 5));
    let right = b.ident("second", sp(8, 14));
    let sum = b.binary(BinaryOp::Add, left, right);
    let mut s = Session::new(&interner, b);

    assert_eq!(
        kind(s.eval(sum)),
        Err(EvalErrorKind::NameError {
            name: "first".to_string()
        })
    );
}

#[test]
fn unary_negate_and_not() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let five = b.int(5, NO_SPAN);
    let neg = b.unary(UnaryOp::Neg, five, NO_SPAN);
    let zero = b.int(0, NO_SPAN);
    let not = b.unary(UnaryOp::Not, zero, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(neg)), int(-5));
    assert_eq!(kind(s.eval(not)), int(1));
}

#[test]
fn unary_error_points_at_operator_node() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let text = b.string("abc", sp(1, 6));
    let neg = b.unary(UnaryOp::Neg, text, sp(0, 6));
    let mut s = Session::new(&interner, b);

    let err = s.eval(neg).err();
    assert_eq!(
        err.map(|e| (e.kind, e.span)),
        Some((
            EvalErrorKind::IllegalOperation {
                operation: "- string".to_string()
            },
            Some(sp(0, 6))
        ))
    );
}

// Conditionals

#[test]
fn if_picks_first_truthy_branch() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let c1 = b.int(0, NO_SPAN);
    let b1 = b.string("first", NO_SPAN);
    let c2 = b.int(2, NO_SPAN);
    let b2 = b.string("second", NO_SPAN);
    let c3 = b.int(3, NO_SPAN);
    let b3 = b.string("third", NO_SPAN);
    let node = b.if_([(c1, b1), (c2, b2), (c3, b3)], None, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(node)), Ok(Some(ValueKind::Str("second".into()))));
}

#[test]
fn if_false_takes_else_without_evaluating_branch() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let cond = b.int(0, NO_SPAN);
    // Evaluating this body would fail with a name error.
    let body = b.ident("never_defined", NO_SPAN);
    let else_ = b.string("else", NO_SPAN);
    let node = b.if_([(cond, body)], Some(else_), NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(node)), Ok(Some(ValueKind::Str("else".into()))));
}

#[test]
fn if_without_match_or_else_is_absent() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let cond = b.string("", NO_SPAN);
    let body = b.int(1, NO_SPAN);
    let node = b.if_([(cond, body)], None, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(node)), Ok(None));
}

#[test]
fn function_condition_is_falsy() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let fbody = b.int(1, NO_SPAN);
    let func = b.func(None, &[], fbody, NO_SPAN);
    let body = b.string("taken", NO_SPAN);
    let else_ = b.string("not taken", NO_SPAN);
    let node = b.if_([(func, body)], Some(else_), NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(
        kind(s.eval(node)),
        Ok(Some(ValueKind::Str("not taken".into())))
    );
}

// Loops

/// `object acc = 0` then
/// `walk i = start through end [step s] then object acc = acc * 10 + i`.
fn digits_program(start: i64, end: i64, step: Option<i64>) -> Result<Option<Value>, EvalError> {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let zero = b.int(0, NO_SPAN);
    let init = b.assign("acc", zero, NO_SPAN);

    let acc = b.ident("acc", NO_SPAN);
    let ten = b.int(10, NO_SPAN);
    let shifted = b.binary(BinaryOp::Mul, acc, ten);
    let i = b.ident("i", NO_SPAN);
    let next = b.binary(BinaryOp::Add, shifted, i);
    let body = b.assign("acc", next, NO_SPAN);

    let start = b.int(start, NO_SPAN);
    let end = b.int(end, NO_SPAN);
    let step = step.map(|n| b.int(n, NO_SPAN));
    let loop_ = b.for_("i", start, end, step, body, NO_SPAN);
    let read = b.ident("acc", NO_SPAN);
    let mut s = Session::new(&interner, b);
    s.eval_all(&[init, loop_, read])
}

#[test]
fn for_ascending_binds_each_counter() {
    assert_eq!(kind(digits_program(0, 5, None)), int(1234));
    assert_eq!(kind(digits_program(1, 4, Some(1))), int(123));
}

#[test]
fn for_descending_with_negative_step() {
    assert_eq!(kind(digits_program(5, 0, Some(-1))), int(54321));
}

#[test]
fn for_with_stepping_past_end() {
    assert_eq!(kind(digits_program(1, 8, Some(3))), int(147));
}

#[test]
fn for_with_empty_range_runs_nothing() {
    assert_eq!(kind(digits_program(3, 3, None)), int(0));
    assert_eq!(kind(digits_program(5, 0, None)), int(0));
}

#[test]
fn for_result_is_absent_and_variable_remains() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let start = b.int(0, NO_SPAN);
    let end = b.int(3, NO_SPAN);
    let body = b.int(0, NO_SPAN);
    let loop_ = b.for_("i", start, end, None, body, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(loop_)), Ok(None));
    assert_eq!(s.global("i"), Some(&Value::int(2)));
}

#[test]
fn for_rejects_non_number_bounds() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let start = b.int(0, NO_SPAN);
    let end = b.string("ten", sp(12, 17));
    let body = b.int(0, NO_SPAN);
    let loop_ = b.for_("i", start, end, None, body, NO_SPAN);
    let mut s = Session::new(&interner, b);

    let err = s.eval(loop_).err();
    assert_eq!(
        err.map(|e| (e.message, e.span)),
        Some((
            "illegal operation: loop end must be a number, not a string".to_string(),
            Some(sp(12, 17))
        ))
    );
}

#[test]
fn while_counts_down() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let three = b.int(3, NO_SPAN);
    let init = b.assign("n", three, NO_SPAN);
    let n = b.ident("n", NO_SPAN);
    let zero = b.int(0, NO_SPAN);
    let cond = b.binary(BinaryOp::Gt, n, zero);
    let n2 = b.ident("n", NO_SPAN);
    let one = b.int(1, NO_SPAN);
    let dec = b.binary(BinaryOp::Sub, n2, one);
    let body = b.assign("n", dec, NO_SPAN);
    let loop_ = b.while_(cond, body, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval_all(&[init, loop_])), Ok(None));
    assert_eq!(s.global("n"), Some(&Value::int(0)));
}

#[test]
fn while_stops_at_body_error() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let cond = b.int(1, NO_SPAN);
    let body = b.ident("missing", NO_SPAN);
    let loop_ = b.while_(cond, body, NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(
        kind(s.eval(loop_)),
        Err(EvalErrorKind::NameError {
            name: "missing".to_string()
        })
    );
}

// Functions

#[test]
fn named_function_is_bound_and_returned() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.int(1, NO_SPAN);
    let def = b.func(Some("one"), &[], body, sp(0, 12));
    let mut s = Session::new(&interner, b);

    let value = s.eval(def);
    assert!(matches!(
        value.as_ref().map(|v| v.as_ref().map(|v| &v.kind)),
        Ok(Some(ValueKind::Function(_)))
    ));
    assert_eq!(s.global("one"), value.ok().flatten().as_ref());
}

#[test]
fn anonymous_function_is_not_bound() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.int(1, NO_SPAN);
    let def = b.func(None, &[], body, NO_SPAN);
    let mut s = Session::new(&interner, b);

    let _ = s.eval(def);
    assert_eq!(s.runtime.env().len(), 1);
    assert_eq!(s.global("<anonymous>"), None);
}

#[test]
fn call_binds_parameters_in_order() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let a = b.ident("a", NO_SPAN);
    let bb = b.ident("b", NO_SPAN);
    let body = b.binary(BinaryOp::Sub, a, bb);
    let def = b.func(Some("sub"), &["a", "b"], body, NO_SPAN);
    let callee = b.ident("sub", NO_SPAN);
    let ten = b.int(10, NO_SPAN);
    let three = b.int(3, NO_SPAN);
    let call = b.call(callee, &[ten, three], NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval_all(&[def, call])), int(7));
}

#[test]
fn anonymous_function_called_inline() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let x = b.ident("x", NO_SPAN);
    let two = b.int(2, NO_SPAN);
    let body = b.binary(BinaryOp::Mul, x, two);
    let def = b.func(None, &["x"], body, NO_SPAN);
    let arg = b.int(21, NO_SPAN);
    let call = b.call(def, &[arg], NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(call)), int(42));
}

#[test]
fn return_value_is_restamped_at_call_site() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.int(5, sp(12, 13));
    let def = b.func(Some("five"), &[], body, sp(0, 13));
    let callee = b.ident("five", sp(20, 24));
    let call = b.call(callee, &[], sp(20, 26));
    let mut s = Session::new(&interner, b);

    let value = s.eval_all(&[def, call]);
    assert_eq!(
        value.map(|v| v.map(|v| (v.span, v.context))),
        Ok(Some((sp(20, 26), Some(ContextId::ROOT))))
    );
}

#[test]
fn wrong_arity_fails_before_body_runs() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    // The body would fail with a name error if it ran.
    let body = b.ident("boom", NO_SPAN);
    let def = b.func(Some("f"), &["a", "b"], body, sp(0, 20));
    let callee = b.ident("f", sp(30, 31));
    let arg = b.int(1, sp(32, 33));
    let call = b.call(callee, &[arg], sp(30, 34));
    let mut s = Session::new(&interner, b);

    let err = s.eval_all(&[def, call]).err();
    assert_eq!(
        err.map(|e| (e.kind, e.message, e.span, e.context, e.notes)),
        Some((
            EvalErrorKind::ArityMismatch {
                name: "f".to_string(),
                expected: 2,
                got: 1
            },
            "f expects 2 arguments, got 1".to_string(),
            Some(sp(0, 20)),
            Some(ContextId::ROOT),
            vec![EvalNote::with_span("called here", sp(30, 34))]
        ))
    );
    // No call context was created.
    assert_eq!(s.runtime.context_count(), 1);
}

#[test]
fn arity_error_names_anonymous_functions() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.int(0, NO_SPAN);
    let def = b.func(None, &[], body, NO_SPAN);
    let arg = b.int(1, NO_SPAN);
    let call = b.call(def, &[arg], NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(
        s.eval(call).err().map(|e| e.message),
        Some("<anonymous> expects 0 arguments, got 1".to_string())
    );
}

#[test]
fn calling_a_number_is_illegal() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let callee = b.int(3, sp(0, 1));
    let call = b.call(callee, &[], sp(0, 3));
    let mut s = Session::new(&interner, b);

    let err = s.eval(call).err();
    assert_eq!(
        err.map(|e| (e.message, e.span)),
        Some((
            "illegal operation: number is not callable".to_string(),
            Some(sp(0, 3))
        ))
    );
}

#[test]
fn argument_evaluation_stops_at_first_error() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.int(0, NO_SPAN);
    let def = b.func(Some("f"), &["a", "b"], body, NO_SPAN);
    let callee = b.ident("f", NO_SPAN);
    let first = b.ident("first_missing", NO_SPAN);
    let second = b.ident("second_missing", NO_SPAN);
    let call = b.call(callee, &[first, second], NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(
        kind(s.eval_all(&[def, call])),
        Err(EvalErrorKind::NameError {
            name: "first_missing".to_string()
        })
    );
}

#[test]
fn body_without_value_makes_call_absent() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let cond = b.int(0, NO_SPAN);
    let loop_body = b.int(0, NO_SPAN);
    let body = b.while_(cond, loop_body, NO_SPAN);
    let def = b.func(Some("nothing"), &[], body, NO_SPAN);
    let callee = b.ident("nothing", NO_SPAN);
    let call = b.call(callee, &[], NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval_all(&[def, call])), Ok(None));
}

#[test]
fn error_inside_call_carries_call_context() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.ident("missing", sp(10, 17));
    let def = b.func(Some("f"), &[], body, sp(0, 17));
    let callee = b.ident("f", sp(20, 21));
    let call = b.call(callee, &[], sp(20, 23));
    let mut s = Session::new(&interner, b);

    let err = s.eval_all(&[def, call]).err();
    let ctx = err.as_ref().and_then(|e| e.context);
    assert!(ctx.is_some_and(|c| c != ContextId::ROOT));
    let frames = err.map(|e| {
        s.runtime
            .backtrace(&e)
            .frames()
            .iter()
            .map(|f| (interner.lookup(f.name), f.span))
            .collect::<Vec<_>>()
    });
    assert_eq!(
        frames,
        Some(vec![
            ("<program>", Some(sp(20, 23))),
            ("f", Some(sp(10, 17)))
        ])
    );
}

#[test]
fn successful_call_reclaims_its_context() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let x = b.ident("x", NO_SPAN);
    let def = b.func(Some("id"), &["x"], x, NO_SPAN);
    let callee = b.ident("id", NO_SPAN);
    let arg = b.int(4, NO_SPAN);
    let call = b.call(callee, &[arg], NO_SPAN);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval_all(&[def, call])), int(4));
    assert_eq!(s.runtime.context_count(), 1);
    assert_eq!(s.runtime.env().len(), 1);
}

#[test]
fn recursion_limit_is_enforced_when_configured() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let self_ref = b.ident("spin", NO_SPAN);
    let body = b.call(self_ref, &[], sp(15, 21));
    let def = b.func(Some("spin"), &[], body, NO_SPAN);
    let callee = b.ident("spin", NO_SPAN);
    let call = b.call(callee, &[], NO_SPAN);
    let mut s = Session::new(&interner, b);

    let _ = s.eval(def);
    let err = s.eval_limited(call, 50).err();
    assert_eq!(
        err.map(|e| (e.kind, e.span)),
        Some((EvalErrorKind::RecursionLimit { depth: 50 }, Some(sp(15, 21))))
    );
}

#[test]
fn function_from_another_arena_runs_in_its_own_arena() {
    let interner = StringInterner::new();
    let mut runtime = Runtime::new(&interner);
    let root = runtime.root();

    // First program: `func triple(n) -> n * 3`
    let mut first = AstBuilder::new(&interner);
    let n = first.ident("n", NO_SPAN);
    let three = first.int(3, NO_SPAN);
    let body = first.binary(BinaryOp::Mul, n, three);
    let def = first.func(Some("triple"), &["n"], body, NO_SPAN);
    let first = SharedArena::new(first.finish());
    assert!(run(&first, def, &interner, &mut runtime, root).is_ok());

    // Second program, with a different layout: `triple(1 + 1)`
    let mut second = AstBuilder::new(&interner);
    let one = second.int(1, NO_SPAN);
    let one_again = second.int(1, NO_SPAN);
    let arg = second.binary(BinaryOp::Add, one, one_again);
    let callee = second.ident("triple", NO_SPAN);
    let call = second.call(callee, &[arg], NO_SPAN);
    let second = SharedArena::new(second.finish());

    assert_eq!(kind(run(&second, call, &interner, &mut runtime, root)), int(6));
}

#[test]
fn arguments_are_copies() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let v = b.string("kept", sp(8, 14));
    let init = b.assign("s", v, NO_SPAN);
    let new_val = b.int(0, NO_SPAN);
    let body = b.assign("p", new_val, NO_SPAN);
    let def = b.func(Some("clobber"), &["p"], body, NO_SPAN);
    let callee = b.ident("clobber", NO_SPAN);
    let arg = b.ident("s", sp(40, 41));
    let call = b.call(callee, &[arg], NO_SPAN);
    let mut s = Session::new(&interner, b);

    let _ = s.eval_all(&[init, def, call]);
    let stored = s.global("s").map(|v| (v.kind.clone(), v.span, v.context));
    assert_eq!(
        stored,
        Some((ValueKind::Str("kept".into()), sp(8, 14), Some(ContextId::ROOT)))
    );
}

#[test]
fn illegal_binary_on_function_operand() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let body = b.int(0, NO_SPAN);
    let func = b.func(None, &[], body, sp(0, 10));
    let one = b.int(1, sp(13, 14));
    let sum = b.binary(BinaryOp::Add, func, one);
    let mut s = Session::new(&interner, b);

    let err = s.eval(sum).err();
    assert_eq!(
        err.map(|e| (e.kind, e.span)),
        Some((
            EvalErrorKind::IllegalOperation {
                operation: "function + number".to_string()
            },
            Some(sp(0, 14))
        ))
    );
}

#[test]
fn string_minus_number_is_illegal() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let text = b.string("abc", NO_SPAN);
    let one = b.int(1, NO_SPAN);
    let diff = b.binary(BinaryOp::Sub, text, one);
    let mut s = Session::new(&interner, b);

    assert_eq!(kind(s.eval(diff)), illegal("string - number"));
}

#[test]
fn call_depth_unwinds_after_failed_and_successful_calls() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    // func half(x) -> x / 0
    let x = b.ident("x", NO_SPAN);
    let zero = b.int(0, NO_SPAN);
    let body = b.binary(BinaryOp::Div, x, zero);
    let def = b.func(Some("half"), &["x"], body, NO_SPAN);
    let callee = b.ident("half", NO_SPAN);
    let four = b.int(4, NO_SPAN);
    let failing = b.call(callee, &[four], NO_SPAN);
    // func id(x) -> x
    let x = b.ident("x", NO_SPAN);
    let id = b.func(Some("id"), &["x"], x, NO_SPAN);
    let callee = b.ident("id", NO_SPAN);
    let one = b.int(1, NO_SPAN);
    let passing = b.call(callee, &[one], NO_SPAN);
    let arena = SharedArena::new(b.finish());
    let mut runtime = Runtime::new(&interner);

    let mut interp = InterpreterBuilder::new(&interner, &arena, &mut runtime).build();
    assert!(interp.eval(def, ContextId::ROOT).is_ok());
    assert!(interp.eval(id, ContextId::ROOT).is_ok());
    assert_eq!(
        kind(interp.eval(failing, ContextId::ROOT)),
        Err(EvalErrorKind::DivisionByZero)
    );
    assert_eq!(interp.call_depth(), 0);
    assert_eq!(kind(interp.eval(passing, ContextId::ROOT)), int(1));
    assert_eq!(interp.call_depth(), 0);
}

#[test]
fn custom_stack_growth_carries_deep_recursion_on_a_small_thread() {
    let outcome = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let interner = StringInterner::new();
            let mut b = AstBuilder::new(&interner);
            // func down(n) -> if n <= 0 then 0 otherwise down(n - 1)
            let n = b.ident("n", NO_SPAN);
            let zero = b.int(0, NO_SPAN);
            let cond = b.binary(BinaryOp::LtEq, n, zero);
            let base = b.int(0, NO_SPAN);
            let self_ref = b.ident("down", NO_SPAN);
            let n = b.ident("n", NO_SPAN);
            let one = b.int(1, NO_SPAN);
            let pred = b.binary(BinaryOp::Sub, n, one);
            let step = b.call(self_ref, &[pred], NO_SPAN);
            let body = b.if_([(cond, base)], Some(step), NO_SPAN);
            let def = b.func(Some("down"), &["n"], body, NO_SPAN);
            let callee = b.ident("down", NO_SPAN);
            let depth = b.int(2_000, NO_SPAN);
            let call = b.call(callee, &[depth], NO_SPAN);
            let arena = SharedArena::new(b.finish());
            let mut runtime = Runtime::new(&interner);

            let mut interp = InterpreterBuilder::new(&interner, &arena, &mut runtime)
                .stack_growth(StackGrowth {
                    red_zone: 64 * 1024,
                    segment: 256 * 1024,
                })
                .build();
            let _ = interp.eval(def, ContextId::ROOT);
            match interp.eval(call, ContextId::ROOT) {
                Ok(Some(Value {
                    kind: ValueKind::Number(Number::Int(n)),
                    ..
                })) => Some(n),
                _ => None,
            }
        })
        .map(|handle| handle.join());

    assert!(matches!(outcome, Ok(Ok(Some(0)))));
}
