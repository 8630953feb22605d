//! Program loading, validation and rendering

mod common;

use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use stepwise_runtime::{BinaryOp, Interpreter, LoadError, Program};

const FACT_JSON: &str = r#"{
  "ast_version": 1,
  "statements": [
    { "line": 1, "kind": { "Function": {
        "name": "fact",
        "params": ["n"],
        "body": [
          { "line": 2, "kind": { "If": {
              "cond": { "Binary": { "op": "Le", "left": { "Variable": "n" }, "right": { "Literal": 1 } } },
              "skip": 1 } } },
          { "line": 3, "kind": { "Return": { "Literal": 1 } } },
          { "line": 4, "kind": { "Return": { "Binary": {
              "op": "Mul",
              "left": { "Variable": "n" },
              "right": { "Call": { "name": "fact", "args": [
                  { "Binary": { "op": "Sub", "left": { "Variable": "n" }, "right": { "Literal": 1 } } }
              ] } } } } } }
        ] } } },
    { "line": 5, "kind": { "Print": { "Call": { "name": "fact", "args": [{ "Literal": 6 }] } } } }
  ]
}"#;

#[test]
fn test_load_from_json_and_run() {
    let program = Program::from_json(FACT_JSON).unwrap();
    assert_eq!(program.statements().len(), 2);
    assert_eq!(program.call_site_count(), 2);

    let mut interp = Interpreter::new(&program, Vec::new());
    interp.run().unwrap();
    assert_eq!(String::from_utf8(interp.into_output()).unwrap(), "720\n");
}

#[test]
fn test_json_round_trip_preserves_statements() {
    let program = Program::from_json(FACT_JSON).unwrap();
    let reloaded = Program::from_json(&program.to_json().unwrap()).unwrap();
    assert_eq!(program, reloaded);
}

#[test]
fn test_call_args_default_to_empty() {
    let json = r#"{ "ast_version": 1, "statements": [
        { "line": 1, "kind": { "Function": { "name": "one", "body": [
            { "line": 2, "kind": { "Return": { "Literal": 1 } } } ] } } },
        { "line": 3, "kind": { "Print": { "Call": { "name": "one" } } } }
    ] }"#;
    let program = Program::from_json(json).unwrap();
    let mut interp = Interpreter::new(&program, Vec::new());
    interp.run().unwrap();
    assert_eq!(interp.output().as_slice(), b"1\n");
}

#[rstest]
#[case::not_json("print 1")]
#[case::missing_statements(r#"{ "ast_version": 1 }"#)]
#[case::unknown_statement(r#"{ "ast_version": 1, "statements": [ { "line": 1, "kind": { "While": {} } } ] }"#)]
fn test_malformed_json(#[case] json: &str) {
    assert!(matches!(Program::from_json(json), Err(LoadError::Json(_))));
}

#[test]
fn test_load_error_messages() {
    let err = Program::load(vec![if_skip(9, lit(1), 3), print(10, lit(1))]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"9: if skips 3 statements but only 1 follow");

    let err = Program::load(vec![func(4, "f", &["a", "a"], vec![ret(5, var("a"))])]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"4: duplicate parameter 'a' in function f");

    let err = Program::from_json(r#"{ "ast_version": 2, "statements": [] }"#).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Unsupported AST version 2 (expected 1)");
}

#[test]
fn test_render() {
    let program = load(vec![
        assign(1, "x", lit(1)),
        func(
            2,
            "f",
            &["a", "b"],
            vec![
                if_skip(3, and(var("a"), or(var("b"), lit(0))), 1),
                ret(4, call("g", vec![var("a"), lit(2)])),
                ret(5, bin(BinaryOp::Add, var("a"), var("x"))),
            ],
        ),
        print(6, call("f", vec![lit(1), lit(2)])),
    ]);
    assert_eq!(
        program.render(),
        concat!(
            "   1 x = 1\n",
            "   2 function f(a, b) [3 statements]\n",
            "   3     if ((a && (b || 0))) skip 1\n",
            "   4     return g(a, 2)\n",
            "   5     return (a + x)\n",
            "   6 print f(1, 2)\n",
        )
    );
}
