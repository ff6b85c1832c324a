use reckon::run_script;

fn results(source: &str) -> String {
    run_script(source).expect("session faulted").results
}

fn diagnostics(source: &str) -> String {
    run_script(source).expect("session faulted").diagnostics
}

/// Asserts that evaluating `source` prints `expected` as a whole result line.
fn assert_result(source: &str, expected: &str) {
    let out = results(source);
    assert!(out.lines().any(|line| line == expected),
            "expected line {expected:?} in output of {source:?}, got:\n{out}");
}

/// Asserts that evaluating `source` reports a failure mentioning `needle`.
fn assert_failure(source: &str, needle: &str) {
    let diag = diagnostics(source);
    assert!(diag.contains(needle),
            "expected a diagnostic containing {needle:?} for {source:?}, got:\n{diag}");
}

#[test]
fn numeric_literals_round_trip() {
    assert_result("42;", "= 42");
    assert_result("0.5;", "= 0.5");
    assert_result(".5;", "= 0.5");
    assert_result("1e3;", "= 1000");
    assert_result("2.5e-1;", "= 0.25");
}

#[test]
fn additive_and_multiplicative_precedence() {
    assert_result("1 + 2 * 3;", "= 7");
    assert_result("10 - 2 - 3;", "= 5");
    assert_result("(1 + 2) * 3;", "= 9");
    assert_result("10 / 4;", "= 2.5");
}

#[test]
fn power_is_right_associative() {
    assert_result("2^3^2;", "= 512");
    assert_result("2 ^ 3;", "= 8");
}

#[test]
fn unary_minus_binds_before_the_power() {
    // the negative-literal path negates first, then applies the exponent
    assert_result("-3^2;", "= 9");
    assert_result("-(2 + 3);", "= -5");
    assert_result("-pi;", "= -3.1415926535");
}

#[test]
fn negated_variable_takes_the_power() {
    let out = results("x = 4; -x ^ 2;");
    assert!(out.contains("= 16"), "got:\n{out}");
}

#[test]
fn modulo_follows_the_floor_sign_convention() {
    assert_result("7 % -2;", "= -1");
    assert_result("-7 % 2;", "= 1");
    assert_result("-7 % -2;", "= -1");
    assert_result("7 % 2;", "= 1");
    assert_result("6 % 3;", "= 0");
    assert_result("0 % 5;", "= 0");
}

#[test]
fn division_and_modulo_by_zero_are_recoverable() {
    assert_failure("5 / 0;", "Division by zero");
    assert_failure("5 % 0;", "Modulo by zero");

    // the session stays usable after the failure
    let output = run_script("5 / 0; 1 + 1;").expect("session faulted");
    assert!(output.diagnostics.contains("Division by zero"));
    assert!(output.results.contains("= 2"));
}

#[test]
fn bare_mention_declares_at_zero_and_assignment_updates() {
    let out = results("x; x = 5; x;");
    assert!(out.contains("Created new user variable x with value 0."), "got:\n{out}");
    assert!(out.contains("User variable x updated, was 0, now x = 5."), "got:\n{out}");
    assert!(out.contains("= 5"), "got:\n{out}");
}

#[test]
fn bare_mention_of_an_existing_variable_just_evaluates() {
    let out = results("x; x;");
    assert!(out.contains("= 0"), "got:\n{out}");
    assert!(diagnostics("x; x;").is_empty());
}

#[test]
fn assignment_may_reference_the_variable_being_declared() {
    // the unresolved name inside the expression becomes a zero-valued
    // declaration directive, so `x = x;` creates x at 0
    let out = results("x = x;");
    assert!(out.contains("Created new user variable x with value 0"), "got:\n{out}");
}

#[test]
fn ending_the_input_declares_a_trailing_bare_name() {
    let out = results("z");
    assert!(out.contains("Created new user variable z with value 0."), "got:\n{out}");
}

#[test]
fn delete_all_empties_the_store() {
    let out = results("x; y; delete uvars all; display uvars;");
    assert!(out.contains("Cleared all user variables."), "got:\n{out}");
    assert!(out.contains("No user variables to display."), "got:\n{out}");
}

#[test]
fn delete_accepts_one_name_with_or_without_the_separator() {
    let out = results("a = 1; b = 2; delete uvars a; display uvars;");
    assert!(out.contains("Deleted user variable a."), "got:\n{out}");
    assert!(out.contains("Displaying all 1 user variables:"), "got:\n{out}");
    assert!(out.contains("b = 2"), "got:\n{out}");

    let out = results("c = 3; delete c; display uvars;");
    assert!(out.contains("Deleted user variable c."), "got:\n{out}");
    assert!(out.contains("No user variables to display."), "got:\n{out}");
}

#[test]
fn deleting_a_missing_variable_fails() {
    assert_failure("delete zz;", "No variable named 'zz' exists");
}

#[test]
fn reserved_names_resolve_case_insensitively() {
    assert_result("pi;", "= 3.1415926535");
    assert_result("PI;", "= 3.1415926535");
    assert_result("Pi;", "= 3.1415926535");
    assert_result("E;", "= 2.718281828459045");

    let out = results("1 + 1; QuIt; 2 + 2;");
    assert!(out.contains("= 2"), "got:\n{out}");
    assert!(!out.contains("= 4"), "quit should end the session, got:\n{out}");
}

#[test]
fn user_variables_are_case_sensitive() {
    let out = results("x = 1; X = 2; x; X;");
    assert!(out.contains("= 1"), "got:\n{out}");
    assert!(out.contains("= 2"), "got:\n{out}");
}

#[test]
fn system_constants_cannot_be_assigned() {
    // the lexer resolves the constant to a number before '=' is ever seen,
    // so the value prints and the dangling '=' is rejected
    let output = run_script("pi = 3;").expect("session faulted");
    assert!(output.results.contains("= 3.1415926535"));
    assert!(output.diagnostics.contains("Unexpected token"));
}

#[test]
fn display_lists_constants_variables_and_operators() {
    let out = results("display sysvars;");
    assert!(out.contains("e = 2.718281828459045"), "got:\n{out}");
    assert!(out.contains("g = 9.80665"), "got:\n{out}");
    assert!(out.contains("phi = 1.6180339887"), "got:\n{out}");
    assert!(out.contains("pi = 3.1415926535"), "got:\n{out}");

    let out = results("v = 7; display uvars;");
    assert!(out.contains("Displaying all 1 user variables:"), "got:\n{out}");
    assert!(out.contains("v = 7"), "got:\n{out}");

    let out = results("display operators;");
    assert!(out.contains("^ : Raise to a power"), "got:\n{out}");
    assert!(out.contains("% : Modulo"), "got:\n{out}");

    let out = results("w = 1; display all;");
    assert!(out.contains("System constants:"), "got:\n{out}");
    assert!(out.contains("w = 1"), "got:\n{out}");
}

#[test]
fn display_rejects_unknown_targets() {
    assert_failure("display everything;", "Bad argument 'everything' for 'display'");
}

#[test]
fn help_prints_the_command_list() {
    let out = results("help;");
    assert!(out.contains("Symbols and commands"), "got:\n{out}");
}

#[test]
fn undeclared_use_and_bad_characters_are_reported() {
    assert_failure("y + 1;", "Tried to use an undeclared variable 'y'");
    assert_failure("2 @ 3;", "Bad token '@'");
    assert_failure("(1 + 2;", "Expected closing parenthesis");
}

#[test]
fn resynchronization_skips_to_the_next_statement_boundary() {
    // the first statement consumes its ';' before failing, so recovery
    // discards up to the following boundary; the newline then ends the scan
    let output = run_script("5 + ; 1 + 1;\n2 + 2;").expect("session faulted");
    assert!(output.diagnostics.contains("Unexpected token"));
    assert!(!output.results.contains("= 2"), "got:\n{}", output.results);
    assert!(output.results.contains("= 4"), "got:\n{}", output.results);
}

#[test]
fn newline_ends_a_statement_like_a_semicolon() {
    let out = results("1 + 1\n2 * 3;");
    assert!(out.contains("= 2"), "got:\n{out}");
    assert!(out.contains("= 6"), "got:\n{out}");
}

// Known quirk, preserved deliberately: a power evaluated inside the term
// loop returns immediately, so a multiplicative operator after it is left
// unconsumed and rejected as the start of the next statement. A plain
// number before '^' does not trigger this, because the number's own
// lookahead consumes the power first.
#[test]
fn known_quirk_power_after_parenthesis_ends_the_term() {
    let output = run_script("(2)^3 * 4;").expect("session faulted");
    assert!(output.results.contains("= 8"), "got:\n{}", output.results);
    assert!(output.diagnostics.contains("Unexpected token: '*'"),
            "got:\n{}",
            output.diagnostics);
}

#[test]
fn power_after_a_plain_number_keeps_the_term_going() {
    assert_result("2^3 * 4;", "= 32");
}

#[test]
fn empty_input_is_a_clean_session() {
    let output = run_script("").expect("session faulted");
    assert!(output.results.is_empty());
    assert!(output.diagnostics.is_empty());
}
