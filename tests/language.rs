use std::fs;

use olang::run;
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "ol"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = content.lines()
                              .find_map(|line| line.trim().strip_prefix("// expect:"))
                              .unwrap_or_else(|| panic!("{path:?} has no '// expect:' header"))
                              .trim();

        count += 1;
        let result = run(&content);
        match expected {
            "error" => assert!(result.is_err(), "{path:?} succeeded but was expected to fail"),
            "none" => assert_eq!(result.unwrap_or_else(|e| panic!("{path:?} failed: {e}")),
                                 None,
                                 "{path:?}"),
            value => {
                let value: f64 = value.parse()
                                      .unwrap_or_else(|_| panic!("{path:?} has a bad header"));
                let result = result.unwrap_or_else(|e| panic!("{path:?} failed: {e}"));
                assert_eq!(result, Some(value), "{path:?}");
            },
        }
    }

    assert!(count > 0, "No scripts found in demos");
}

fn assert_result(src: &str, expected: f64) {
    match run(src) {
        Ok(Some(value)) => assert_eq!(value, expected, "{src}"),
        Ok(None) => panic!("Script produced no value: {src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if run(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn basic_arithmetic() {
    assert_result("1 + 1", 2.0);
    assert_result("5 - 1", 4.0);
    assert_result("2 * 2", 4.0);
    assert_result("4 / 2", 2.0);
}

#[test]
fn precedence_and_grouping() {
    assert_result("1 + 2 * 3", 7.0);
    assert_result("1 * 2 + 3", 5.0);
    assert_result("(1 + 2) * 3", 9.0);
    assert_result("10 - 4 - 3", 3.0);
    assert_result("64 / 4 / 2", 8.0);
    assert_result("2 * (3 + 4) * 5", 70.0);
}

#[test]
fn signs() {
    assert_result("-3 + 5", 2.0);
    assert_result("2 * -3", -6.0);
    assert_result("-(2 + 3)", -5.0);
    assert_result("- -4", 4.0);
    assert_result("5-1", 4.0);
}

#[test]
fn number_notations() {
    assert_result(".5 + .25", 0.75);
    assert_result("1e3 / 2E1", 50.0);
    assert_result("2E-1 * 10", 2.0);
}

#[test]
fn variables() {
    assert_result("var x = 1\nx = x + 1", 2.0);
    assert_result("var x = 2; var y = x * 3; y - x", 4.0);
    assert_result("var a\nvar b\na = b = 7\na + b", 14.0);
    assert_result("var x = 10\nx = x / 4\nx", 2.5);
}

#[test]
fn multi_line_groupings() {
    assert_result("(1\n+ 2)", 3.0);
    assert_result("var x = (1\n  + 2) * 3", 9.0);
    assert_result("var x = (\n  2 *\n  (3\n   - 1)\n)\nx + 1", 5.0);
}

#[test]
fn signed_number_after_an_operand_subtracts() {
    assert_result("var y = 3\ny -1", 2.0);
    assert_result("var y = 3\nvar x = y -1\nx", 2.0);
    assert_result("var y = 3\ny +1 * 2", 5.0);
}

#[test]
fn long_chains_run() {
    assert_result(&vec!["1"; 10_000].join(" + "), 10_000.0);
    assert_result(&vec!["2 * 3"; 5_000].join(" - "), -29_988.0);

    let declarations = (0..1_000).map(|i| format!("var a{i}\n")).collect::<String>();
    let chain = (0..1_000).map(|i| format!("a{i} = ")).collect::<String>();
    assert_result(&format!("{declarations}{chain}7\na0 + a999"), 14.0);
}

#[test]
fn deep_nesting_fails_cleanly() {
    assert_failure(&format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000)));
    assert_failure(&format!("{}1", "- ".repeat(10_000)));
}

#[test]
fn comments_are_ignored() {
    assert_result("// start\n1 + /* inline */ 2 // end", 3.0);
    assert_result("/*\n multi\n line\n*/\n4", 4.0);
}

#[test]
fn no_value() {
    assert_eq!(run("").unwrap(), None);
    assert_eq!(run("var x").unwrap(), None);
    assert_eq!(run("// nothing here").unwrap(), None);
}

#[test]
fn division_by_zero_is_infinite() {
    assert_result("1 / 0", f64::INFINITY);
    assert_result("-1 / 0", f64::NEG_INFINITY);
}

#[test]
fn failures() {
    assert_failure("1 +");
    assert_failure("x");
    assert_failure("var x\nvar x");
    assert_failure("var x\nx + 1");
    assert_failure("if (1) { 2 }");
    assert_failure("f(1)");
    assert_failure("\"unterminated");
    assert_failure("1 2");
}

#[test]
fn errors_report_positions() {
    let message = run("var a = 1\na + b").unwrap_err().to_string();

    assert!(message.contains("line 2, column 5"), "{message}");
}
