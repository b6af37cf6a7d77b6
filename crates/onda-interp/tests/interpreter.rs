// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end interpreter tests: whole programs run through a
//! captured-output engine.

use onda_interp::{Interpreter, RuntimeDiagnostic, Value};

/// Run a program, returning its result and everything it printed.
fn run(source: &str) -> (Result<Value, RuntimeDiagnostic>, String) {
    let (mut interp, buffer) = Interpreter::with_captured_output();
    let result = interp.run_source(source);
    let output = buffer.borrow().clone();
    (result, output)
}

fn run_output(source: &str) -> String {
    let (result, output) = run(source);
    assert!(result.is_ok(), "unexpected error: {:?}", result.unwrap_err());
    output
}

fn run_error_kind(source: &str) -> &'static str {
    let (result, _) = run(source);
    result.expect_err("expected the program to fail").error.kind_name()
}

// ---------------------------------------------------------------------------
// End-to-end programs
// ---------------------------------------------------------------------------

#[test]
fn function_call_adds() {
    let output = run_output("def add(a, b) { return a + b }\nprint(add(2, 3))");
    assert_eq!(output, "5\n");
}

#[test]
fn negative_index_reads_from_the_end() {
    let output = run_output("x = [1, 2, 3]\nprint(x[-1])");
    assert_eq!(output, "3\n");
}

#[test]
fn division_by_zero_is_reported() {
    assert_eq!(run_error_kind("print(1 / 0)"), "ZeroDivision");
    assert_eq!(run_error_kind("print(1 // 0)"), "ZeroDivision");
    assert_eq!(run_error_kind("print(1 % 0)"), "ZeroDivision");
}

#[test]
fn for_range_is_till_exclusive() {
    assert_eq!(run_output("for i from 0 till 3 { print(i) }"), "0\n1\n2\n");
}

#[test]
fn for_range_counts_down_when_till_is_smaller() {
    assert_eq!(run_output("for i from 3 till 0 { print(i) }"), "3\n2\n1\n");
}

#[test]
fn for_in_iterates_list_elements_and_string_characters() {
    assert_eq!(run_output("for x in [10, 20] { print(x) }"), "10\n20\n");
    assert_eq!(run_output("for c in \"ab\" { print(c) }"), "a\nb\n");
}

// ---------------------------------------------------------------------------
// Kind dispatch
// ---------------------------------------------------------------------------

#[test]
fn unsupported_operations_are_type_errors_not_crashes() {
    assert_eq!(run_error_kind("x = [1] + 1"), "Type");
    assert_eq!(run_error_kind("x = void - 1"), "Type");
    assert_eq!(run_error_kind("x = \"a\" * \"b\""), "Type");
    assert_eq!(run_error_kind("x = -\"a\""), "Type");
}

#[test]
fn mixed_numeric_arithmetic_widens_to_flt() {
    assert_eq!(run_output("print(1 + 0.5)"), "1.5\n");
    assert_eq!(run_output("print(2.0 * 3)"), "6.0\n");
}

#[test]
fn division_stays_int_when_exact() {
    assert_eq!(run_output("print(6 / 3)"), "2\n");
    assert_eq!(run_output("print(7 / 2)"), "3.5\n");
    assert_eq!(run_output("print(7 // 2)"), "3\n");
}

#[test]
fn repetition_is_commutative_and_clamps_negative_counts() {
    assert_eq!(run_output("print(\"ab\" * 2)"), "abab\n");
    assert_eq!(run_output("print(2 * \"ab\")"), "abab\n");
    assert_eq!(run_output("print([1] * 3)"), "[1, 1, 1]\n");
    assert_eq!(run_output("print(3 * [1])"), "[1, 1, 1]\n");
    assert_eq!(run_output("print(\"ab\" * -1)"), "\n");
    assert_eq!(run_output("print([1] * -1)"), "[]\n");
}

#[test]
fn incomparable_kinds_are_type_errors_but_equality_is_false() {
    assert_eq!(run_error_kind("x = [1] > 1"), "Type");
    assert_eq!(run_output("print([1] == 1)"), "0\n");
    assert_eq!(run_output("print(1 == 1.0)"), "1\n");
}

#[test]
fn strings_and_lists_order_by_length() {
    assert_eq!(run_output("print(\"abc\" > \"zz\")"), "1\n");
    assert_eq!(run_output("print([1, 2] < [0, 0, 0])"), "1\n");
}

#[test]
fn pow_produces_unreal_number_error() {
    assert_eq!(run_error_kind("x = (0 - 8) ** 0.5"), "UnrealNumber");
}

// ---------------------------------------------------------------------------
// Copies and references
// ---------------------------------------------------------------------------

#[test]
fn variable_reads_are_deep_copies() {
    let output = run_output("a = [1, 2]\nb = a\nb[0] = 9\nprint(a[0])");
    assert_eq!(output, "1\n");
}

#[test]
fn chained_assignment_binds_both_without_aliasing() {
    let output = run_output("a = b = [1]\na[0] = 9\nprint(b[0])\nprint(a[0])");
    assert_eq!(output, "1\n9\n");
}

#[test]
fn slice_assignment_mutates_in_place() {
    let output = run_output("a = [1, 2, 3, 4]\na[1:3] = [9, 9]\nprint(a)");
    assert_eq!(output, "[1, 9, 9, 4]\n");
}

#[test]
fn slice_assignment_rejects_width_mismatch() {
    assert_eq!(run_error_kind("a = [1, 2, 3, 4]\na[1:3] = [9]"), "Type");
}

#[test]
fn string_slice_assignment_replaces_characters() {
    assert_eq!(run_output("s = \"abcd\"\ns[1:3] = \"xy\"\nprint(s)"), "axyd\n");
    assert_eq!(run_error_kind("s = \"abcd\"\ns[1:3] = \"x\""), "Type");
}

#[test]
fn string_index_is_a_one_character_string() {
    assert_eq!(run_output("s = \"abc\"\nprint(s[1])"), "b\n");
    assert_eq!(run_output("s = \"abc\"\ns[0] = \"z\"\nprint(s)"), "zbc\n");
}

#[test]
fn out_of_range_indices_in_both_directions() {
    assert_eq!(run_error_kind("x = [1, 2, 3, 4]\nprint(x[4])"), "Index");
    assert_eq!(run_error_kind("x = [1, 2, 3, 4]\nprint(x[-5])"), "Index");
}

#[test]
fn slices_with_omitted_bounds() {
    assert_eq!(run_output("x = [1, 2, 3, 4]\nprint(x[1:])"), "[2, 3, 4]\n");
    assert_eq!(run_output("x = [1, 2, 3, 4]\nprint(x[:2])"), "[1, 2]\n");
    assert_eq!(run_output("x = [1, 2, 3, 4]\nprint(x[:-1])"), "[1, 2, 3]\n");
}

#[test]
fn nested_index_assignment_reaches_inner_containers() {
    assert_eq!(
        run_output("m = [[1, 2], [3, 4]]\nm[1][0] = 9\nprint(m)"),
        "[[1, 2], [9, 4]]\n"
    );
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

#[test]
fn object_members_read_write_and_create() {
    let output = run_output("o = {a: 1}\no.a = 2\no.b = 3\nprint(o.a)\nprint(o.b)");
    assert_eq!(output, "2\n3\n");
}

#[test]
fn reading_a_missing_member_is_a_type_error() {
    assert_eq!(run_error_kind("o = {a: 1}\nprint(o.missing)"), "Type");
}

#[test]
fn objects_compare_by_members_in_any_order() {
    assert_eq!(run_output("print({a: 1, b: 2} == {b: 2, a: 1})"), "1\n");
    assert_eq!(run_output("print({a: 1} == {a: 2})"), "0\n");
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

#[test]
fn short_circuit_skips_the_right_operand() {
    let output = run_output(
        "def noisy() { print(\"side\")\n return 1 }\nx = false and noisy()\ny = true or noisy()",
    );
    assert_eq!(output, "");
}

#[test]
fn and_or_return_the_deciding_operand() {
    assert_eq!(run_output("print(0 and \"x\")"), "0\n");
    assert_eq!(run_output("print(1 and \"x\")"), "x\n");
    assert_eq!(run_output("print(0 or \"x\")"), "x\n");
    assert_eq!(run_output("print(5 or \"x\")"), "5\n");
}

#[test]
fn conditional_operator_evaluates_one_branch() {
    let output = run_output(
        "def noisy() { print(\"side\")\n return 1 }\nprint(1 ? \"yes\" : noisy())",
    );
    assert_eq!(output, "yes\n");
}

#[test]
fn while_with_break_and_continue() {
    let output = run_output(
        "i = 0\nwhile true {\n    i = i + 1\n    if i == 2 { continue }\n    if i > 3 { break }\n    print(i)\n}",
    );
    assert_eq!(output, "1\n3\n");
}

#[test]
fn return_propagates_through_nested_loops() {
    let output = run_output(
        "def find() {\n    for i from 0 till 10 {\n        while true { return i }\n    }\n}\nprint(find())",
    );
    assert_eq!(output, "0\n");
}

#[test]
fn top_level_return_is_the_script_result() {
    let (result, _) = run("return 5");
    match result.expect("script should succeed") {
        Value::Int(5) => {}
        other => panic!("expected Int 5, got {:?}", other),
    }
}

#[test]
fn exit_terminates_through_any_call_depth() {
    let (result, output) = run("def f() { exit 3 }\nf()\nprint(\"unreached\")");
    assert_eq!(output, "");
    let diag = result.expect_err("exit should surface");
    assert_eq!(diag.error.kind_name(), "Exit");
}

#[test]
fn assert_failure_and_success() {
    assert_eq!(run_error_kind("assert 1 == 2"), "AssertionNotMet");
    assert_eq!(run_output("assert 1 == 1\nprint(\"ok\")"), "ok\n");
}

// ---------------------------------------------------------------------------
// Scoping and calls
// ---------------------------------------------------------------------------

#[test]
fn assignment_in_a_function_creates_a_local() {
    let output = run_output("x = 1\ndef f() { x = 2 }\nf()\nprint(x)");
    assert_eq!(output, "1\n");
}

#[test]
fn function_bodies_read_outer_variables() {
    assert_eq!(run_output("x = 1\ndef g() { print(x) }\ng()"), "1\n");
}

#[test]
fn global_assignment_writes_the_outer_binding() {
    let output = run_output("x = 1\ndef h() { global x = 5 }\nh()\nprint(x)");
    assert_eq!(output, "5\n");
}

#[test]
fn arity_mismatch_has_no_side_effects() {
    let (result, output) = run(
        "def f(a, b) { return a }\nf(print(\"a\"), print(\"b\"), print(\"c\"))",
    );
    assert_eq!(output, "", "no argument may run before the arity check");
    assert_eq!(
        result.expect_err("expected arity error").error.kind_name(),
        "CallableArgCount"
    );
}

#[test]
fn recursion_works_through_the_registry() {
    let output = run_output(
        "def fib(n) {\n    if n < 2 { return n }\n    return fib(n - 1) + fib(n - 2)\n}\nprint(fib(10))",
    );
    assert_eq!(output, "55\n");
}

#[test]
fn functions_are_values_that_survive_scope_churn() {
    let output = run_output(
        "def make() {\n    def inner(x) { return x * 2 }\n    return inner\n}\nf = make()\nprint(f(21))",
    );
    assert_eq!(output, "42\n");
}

#[test]
fn redefining_a_def_name_rebinds_it() {
    let output = run_output("def f() { return 1 }\ndef f() { return 2 }\nprint(f())");
    assert_eq!(output, "2\n");
}

#[test]
fn parameters_are_deep_copies() {
    let output = run_output(
        "a = [1, 2]\ndef clobber(v) { v[0] = 9 }\nclobber(a)\nprint(a[0])",
    );
    assert_eq!(output, "1\n");
}

#[test]
fn undefined_symbol_is_reported() {
    assert_eq!(run_error_kind("print(missing)"), "SymbolNotDefined");
}

#[test]
fn calling_a_non_function_is_a_type_error() {
    assert_eq!(run_error_kind("x = 1\nx()"), "Type");
}

// ---------------------------------------------------------------------------
// Natives
// ---------------------------------------------------------------------------

#[test]
fn conversions_round_values_through_kinds() {
    assert_eq!(run_output("print(int(\"12\") + 1)"), "13\n");
    assert_eq!(run_output("print(flt(2))"), "2.0\n");
    assert_eq!(run_output("print(str(12) + \"!\")"), "12!\n");
    assert_eq!(run_output("print(int(3.9))"), "3\n");
    assert_eq!(run_error_kind("print(int(\"nope\"))"), "Type");
}

#[test]
fn len_counts_elements_and_characters() {
    assert_eq!(run_output("print(len([1, 2, 3]))"), "3\n");
    assert_eq!(run_output("print(len(\"abcd\"))"), "4\n");
    assert_eq!(run_error_kind("print(len(1))"), "Type");
}

#[test]
fn chr_and_ord_are_inverses() {
    assert_eq!(run_output("print(ord(\"A\"))"), "65\n");
    assert_eq!(run_output("print(chr(97))"), "a\n");
    assert_eq!(run_error_kind("print(chr(0 - 1))"), "Encoding");
    assert_eq!(run_error_kind("print(ord(\"ab\"))"), "Type");
}

#[test]
fn split_drops_empty_tokens() {
    assert_eq!(
        run_output("print(split(\"a,b;;c\", [\",\", \";\"]))"),
        "[\"a\", \"b\", \"c\"]\n"
    );
}

#[test]
fn replace_and_join() {
    assert_eq!(
        run_output("print(replace(\"l\", \"L\", \"hello\"))"),
        "heLLo\n"
    );
    assert_eq!(
        run_output("print(join([\"a\", \"b\", \"c\"], \"-\"))"),
        "a-b-c\n"
    );
}

#[test]
fn sort_uses_the_comparator() {
    let output = run_output(
        "def ascending(a, b) { return a - b }\nprint(sort([3, 1, 2], ascending))",
    );
    assert_eq!(output, "[1, 2, 3]\n");
}

#[test]
fn sort_propagates_comparator_errors() {
    assert_eq!(
        run_error_kind("def bad(a, b) { return a / 0 }\nsort([3, 1, 2], bad)"),
        "ZeroDivision"
    );
}

#[test]
fn eval_runs_in_the_calling_scope() {
    assert_eq!(run_output("x = 41\nprint(eval(\"return x + 1\"))"), "42\n");
}

#[test]
fn eval_errors_carry_a_trace_frame_for_the_boundary() {
    let (result, _) = run("eval(\"1 / 0\")");
    let diag = result.expect_err("expected zero division");
    assert_eq!(diag.error.kind_name(), "ZeroDivision");
    assert_eq!(diag.trace.len(), 1, "the eval boundary is one trace frame");
}

#[test]
fn eval_syntax_errors_surface_with_their_kind() {
    assert_eq!(run_error_kind("eval(\"1 +\")"), "Syntax");
    assert_eq!(run_error_kind("eval(\"break\")"), "BreakOutsideLoop");
}

#[test]
fn script_native_runs_a_file_and_sees_globals() {
    let dir = std::env::temp_dir().join(format!("onda-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("module.onda");
    std::fs::write(&path, "global base = base + 1\nreturn base").expect("write module");

    let program = format!("base = 10\nprint(script(\"{}\"))\nprint(base)", path.display());
    assert_eq!(run_output(&program), "11\n11\n");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn read_write_and_exist() {
    let dir = std::env::temp_dir().join(format!("onda-io-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("data.txt");
    let program = format!(
        "p = \"{}\"\nprint(exist(p))\nwrite(p, \"one\")\nappend(p, \"two\")\nprint(read(p))\nprint(exist(p))",
        path.display()
    );
    assert_eq!(run_output(&program), "0\nonetwo\n1\n");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_a_file_error() {
    assert_eq!(run_error_kind("read(\"/no/such/onda/file\")"), "File");
}

// ---------------------------------------------------------------------------
// Tracebacks
// ---------------------------------------------------------------------------

#[test]
fn traceback_lists_call_frames_outermost_first() {
    let (result, _) = run(
        "def inner() { return 1 / 0 }\ndef outer() { return inner() }\nouter()",
    );
    let diag = result.expect_err("expected zero division");
    assert_eq!(diag.error.kind_name(), "ZeroDivision");
    assert_eq!(diag.trace.len(), 2);
    assert_eq!(diag.trace[0].label.as_deref(), Some("outer"));
    assert_eq!(diag.trace[1].label.as_deref(), Some("inner"));
}

#[test]
fn repl_lines_share_one_root_scope() {
    let mut interp = Interpreter::new();
    interp.run_line("x = 2").expect("define");
    let echoed = interp.run_line("x * 21").expect("evaluate");
    match echoed {
        Some(Value::Int(42)) => {}
        other => panic!("expected Int 42, got {:?}", other),
    }
}
