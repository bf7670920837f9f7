use std::fs;

use myrpal::{evaluate, interpreter::value::Value};
use walkdir::WalkDir;

fn assert_value(src: &str, expected: &str) {
    match evaluate(src) {
        Ok(result) => assert_eq!(result.value.to_string(), expected, "for program: {src}"),
        Err(e) => panic!("Script failed: {src}\nError: {e}"),
    }
}

fn assert_printed(src: &str, expected: &str) {
    match evaluate(src) {
        Ok(result) => assert_eq!(result.printed, expected, "for program: {src}"),
        Err(e) => panic!("Script failed: {src}\nError: {e}"),
    }
}

fn assert_failure(src: &str) {
    if evaluate(src).is_ok() {
        panic!("Script succeeded but was expected to fail: {src}")
    }
}

#[test]
fn sample_programs_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "rpal"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = evaluate(&source) {
            panic!("Sample program {path:?} failed:\n{source}\nError: {e}");
        }
    }

    assert!(count > 0, "No sample programs found in tests/programs");
}

#[test]
fn let_and_arithmetic() {
    assert_value("let x = 5 in x + 3", "8");
    assert_value("let x = 7 in let y = 9 in x * y", "63");
    assert_value("8 - 5", "3");
    assert_value("10 / 4", "2");
    assert_value("-5 + 3", "-2");
    assert_value("2 ** 10", "1024");
    assert_value("2 ** 3 ** 2", "512");
}

#[test]
fn where_binds_like_let() {
    assert_value("x + 3 where x = 5", "8");
    assert_value("(x * y where x = 3) where y = 4", "12");
}

#[test]
fn comparisons_and_logic() {
    assert_value("2 ls 3", "true");
    assert_value("2 < 3", "true");
    assert_value("3 gr 2", "true");
    assert_value("2 le 2", "true");
    assert_value("3 >= 3", "true");
    assert_value("2 ne 3", "true");
    assert_value("2 eq 2", "true");
    assert_value("'abc' eq 'abc'", "true");
    assert_value("'abc' ne 'abd'", "true");
    assert_value("not false", "true");
    assert_value("true & false", "false");
    assert_value("false or true", "true");
}

#[test]
fn conditionals_select_branches() {
    assert_value("5 gr 3 -> 'yes' | 'no'", "yes");
    assert_value("1 eq 2 -> 10 | 20", "20");
    assert_value("true -> (false -> 1 | 2) | 3", "2");
}

#[test]
fn lambdas_and_application() {
    assert_value("(fn x. x + 1) 4", "5");
    assert_value("(fn x y. x + y) 2 3", "5");
    assert_value("(fn (x, y). x * y) (3, 4)", "12");
    assert_value("(fn (). 7) dummy", "7");
    assert_value("let Twice f x = f (f x) in Twice (fn n. n * 2) 5", "20");
}

#[test]
fn infix_operator_application() {
    assert_value("let Add x y = x + y in 2 @Add 3", "5");
    assert_value("'ab' @Conc 'cd'", "abcd");
}

#[test]
fn tuples_and_selection() {
    assert_value("(1, 2, 3)", "(1, 2, 3)");
    assert_value("(1, 2, 3) aug 4", "(1, 2, 3, 4)");
    assert_value("nil aug 1", "(1)");
    assert_value("nil", "nil");
    assert_value("let t = (10, 20, 30) in t 2", "20");
    assert_value("Order (1, 2, 3)", "3");
    assert_value("Order nil", "0");
    assert_value("Order ((1, 2, 3) aug 4)", "4");
    assert_value("Null nil", "true");
    assert_value("Null (1, 2)", "false");
}

#[test]
fn simultaneous_and_layered_definitions() {
    assert_value("let x = 1 and y = 2 in x + y", "3");
    assert_value("let x, y = (1, 2) in x + y", "3");
    assert_value("let a = 2 within b = a + 3 in b", "5");
    assert_value("let x = 2 and y = 3 in let Swap (a, b) = (b, a) in Swap (x, y)", "(3, 2)");
}

#[test]
fn recursion_through_the_fixed_point() {
    assert_value("let rec f n = n eq 0 -> 1 | n * f (n - 1) in f 5", "120");
    assert_value("let rec Sum n = n eq 0 -> 0 | n + Sum (n - 1) in Sum 10", "55");
    assert_value("Len 'hello' where rec Len s = Null s -> 0 | 1 + Len (Stern s)", "5");
}

#[test]
fn string_builtins() {
    assert_value("Stem 'abc'", "a");
    assert_value("Stern 'abc'", "bc");
    assert_value("Conc 'ab' 'cd'", "abcd");
    assert_value("Conc (Stem 'rpal') (Stern 'rpal')", "rpal");
    assert_value("ItoS 42", "42");
    assert_value("Neg 5", "-5");
    assert_value("Null ''", "true");
}

#[test]
fn type_predicates() {
    assert_value("Isinteger 5", "true");
    assert_value("Isinteger 'x'", "false");
    assert_value("Isstring 'x'", "true");
    assert_value("Istruthvalue true", "true");
    assert_value("Istuple (1, 2)", "true");
    assert_value("Istuple nil", "true");
    assert_value("Isdummy dummy", "true");
    assert_value("Isfunction Print", "true");
    assert_value("Isfunction (fn x. x)", "true");
    assert_value("Isfunction 3", "false");
}

#[test]
fn print_emits_and_returns_dummy() {
    let result = evaluate("Print 5").unwrap();
    assert_eq!(result.printed, "5");
    assert_eq!(result.value, Value::Dummy);

    assert_printed("Print 'hello'", "hello");
    assert_printed("Print '\\n'", "\n");
    assert_printed("Print 'a\\'b'", "a'b");
}

#[test]
fn tuple_components_print_right_to_left() {
    // The rightmost component is evaluated first, so the prints of the
    // current call precede those of the recursive call.
    assert_printed("let rec Fibs a b limit = a gr limit -> dummy \
                    | (Fibs b (a + b) limit, Print (Conc ' ' (ItoS a))) \
                    in Fibs 3 5 41",
                   " 3 5 8 13 21 34");
}

#[test]
fn palindromes_print_in_ascending_order() {
    assert_printed("let rec Rev n acc = n eq 0 -> acc \
                    | Rev (n / 10) (acc * 10 + (n - (n / 10) * 10)) \
                    in let rec Disp n limit = n gr limit -> dummy \
                    | (Disp (n + 1) limit, (Rev n 0) eq n -> Print (Conc ' ' (ItoS n)) | dummy) \
                    in Disp 5 125",
                   " 5 6 7 8 9 11 22 33 44 55 66 77 88 99 101 111 121");
}

#[test]
fn pretty_rendering_of_tuples() {
    let result = evaluate("(3, 1, 2)").unwrap();
    assert_eq!(result.value.pretty(), "1, 2, 3");

    let result = evaluate("('pear', 'apple')").unwrap();
    assert_eq!(result.value.pretty(), "apple, pear");

    // Mixed element types keep their order.
    let result = evaluate("(2, 'a', 1)").unwrap();
    assert_eq!(result.value.pretty(), "2, a, 1");

    let result = evaluate("42").unwrap();
    assert_eq!(result.value.pretty(), "42");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0");
    assert_failure("let x = 0 in 10 / x");
}

#[test]
fn unbound_identifier_is_error() {
    assert_failure("x + 1");
    assert_failure("let y = x + 1 in y");
}

#[test]
fn tuple_index_out_of_range_is_error() {
    assert_failure("let t = (1, 2) in t 3");
    assert_failure("let t = (1, 2) in t 0");
}

#[test]
fn binding_arity_mismatch_is_error() {
    assert_failure("(fn (x, y). x) (1, 2, 3)");
    assert_failure("(fn (x, y). x) 1");
}

#[test]
fn operand_type_mismatches_are_errors() {
    assert_failure("1 + 'a'");
    assert_failure("not 5");
    assert_failure("5 aug 1");
    assert_failure("'a' eq 1");
    assert_failure("1 -> 2 | 3");
    assert_failure("Order 5");
    assert_failure("Stem nil");
    assert_failure("Stem ''");
    assert_failure("3 4");
}

#[test]
fn overflow_is_error() {
    assert_failure("9223372036854775807 + 1");
    assert_failure("2 ** 64");
    assert_failure("2 ** (0 - 1)");
}

#[test]
fn syntax_errors_are_reported() {
    assert_failure("let x = in x");
    assert_failure("1 +");
    assert_failure("(1, 2");
    assert_failure("let x = 1 in x )");
    assert_failure("fn . 1");
    assert_failure("1 ;");
    assert_failure("");
}

#[test]
fn lexical_errors_are_reported() {
    assert_failure("a \\ b");
    assert_failure("'abc");
    assert_failure("99999999999999999999");
}
