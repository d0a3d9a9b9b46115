//! End-to-end coverage of the helpers running on the in-memory host.

use anyhow::{Context, anyhow};
use dryspec::{
    Argument, Bindings, ErrorExpectation, ErrorKind, Example, Helpers, LetContextArgs,
    MessageMatcher, Scope, bindings,
};
use rstest::{fixture, rstest};
use test_helpers::{Report, Suite};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
struct ArgumentError(&'static str);

impl Default for ArgumentError {
    fn default() -> Self {
        Self("ArgumentError")
    }
}

fn argument_error() -> ErrorKind {
    ErrorKind::of::<ArgumentError>()
}

fn sum_subject(scope: &mut Suite) -> dryspec::DeclarationResult<()> {
    scope.subject(|example| Ok(example.get::<i32>("a")? + example.get::<i32>("b")?))
}

fn it_equals(scope: &mut Suite, expected: i32) -> dryspec::DeclarationResult<()> {
    scope.it(&format!("should eq {expected}"), move |example| {
        assert_eq!(example.subject_as::<i32>()?, expected);
        Ok(())
    })
}

fn assert_all_passed(report: &Report) {
    let failures = report
        .failures()
        .map(|outcome| format!("{}: {:?}", outcome.full_name(), outcome.failure()))
        .collect::<Vec<_>>();
    assert!(failures.is_empty(), "failing test cases: {failures:#?}");
}

#[fixture]
fn let_context_suite() -> Suite {
    Suite::describe("let_context", |scope| {
        sum_subject(scope)?;
        scope.group("one variable", |scope| {
            scope.define("b", |_| Ok(1_i32))?;
            scope.let_context(bindings! { a: 2 }, |scope| it_equals(scope, 3))?;
            scope.let_context(("Negative number", bindings! { a: -1 }), |scope| {
                it_equals(scope, 0)
            })
        })?;
        scope.let_context(bindings! { a: 1, b: 2 }, |scope| it_equals(scope, 3))
    })
    .expect("let_context declarations are valid")
}

#[rstest]
fn let_context_names_groups_after_bindings(let_context_suite: Suite) {
    assert_eq!(
        let_context_suite.group_names(),
        [
            "one variable",
            "{a: 2}",
            "Negative number {a: -1}",
            "{a: 1, b: 2}"
        ]
    );
}

#[rstest]
fn let_context_bindings_feed_the_subject(let_context_suite: Suite) {
    let report = let_context_suite.run();
    assert_all_passed(&report);
    assert_eq!(
        report.full_names(),
        [
            "let_context one variable {a: 2} should eq 3",
            "let_context one variable Negative number {a: -1} should eq 0",
            "let_context {a: 1, b: 2} should eq 3",
        ]
    );
}

#[test]
fn let_context_accepts_validated_dynamic_arguments() {
    let args = LetContextArgs::from_arguments(vec![
        Argument::Label("dynamic".into()),
        Argument::Bindings(bindings! { a: 4, b: 5 }),
    ])
    .expect("label and bindings is an accepted shape");
    let suite = Suite::describe("dynamic", |scope| {
        sum_subject(scope)?;
        scope.let_context(args, |scope| it_equals(scope, 9))
    })
    .expect("declaration succeeds");
    assert_eq!(suite.group_names(), ["dynamic {a: 4, b: 5}"]);
    assert_all_passed(&suite.run());
}

#[test]
fn let_context_values_are_typed_by_their_binding() {
    let suite = Suite::describe("typed", |scope| {
        scope.let_context(
            Bindings::new().with("name", "dryspec").with("sizes", vec![1_u8, 2]),
            |scope| {
                scope.it("reads each binding", |example| {
                    assert_eq!(example.get::<&str>("name")?, "dryspec");
                    assert_eq!(example.get::<Vec<u8>>("sizes")?, vec![1, 2]);
                    Ok(())
                })
            },
        )
    })
    .expect("declaration succeeds");
    assert_eq!(suite.group_names(), [r#"{name: "dryspec", sizes: [1, 2]}"#]);
    assert_all_passed(&suite.run());
}

#[fixture]
fn raise_suite() -> Suite {
    Suite::describe("subject_should_raise", |scope| {
        scope.group("Raising string", |scope| {
            scope.subject(|_| -> anyhow::Result<()> { Err(anyhow!("Test")) })?;
            scope.subject_should_raise("Test")
        })?;
        scope.group("Raising exception class", |scope| {
            scope.subject(|_| -> anyhow::Result<()> { Err(ArgumentError::default().into()) })?;
            scope.subject_should_raise(argument_error())
        })?;
        scope.group("Raising exception class and string", |scope| {
            scope.subject(|_| -> anyhow::Result<()> { Err(ArgumentError("Test").into()) })?;
            scope.subject_should_raise((argument_error(), "Test"))
        })
    })
    .expect("raise declarations are valid")
}

#[rstest]
fn raise_assertions_are_named_after_their_arguments(raise_suite: Suite) {
    assert_eq!(
        raise_suite.test_case_names(),
        [
            "subject should raise Test",
            "subject should raise ArgumentError",
            "subject should raise ArgumentError (\"Test\")",
        ]
    );
}

#[rstest]
fn raise_assertions_pass_on_matching_errors(raise_suite: Suite) {
    assert_all_passed(&raise_suite.run());
}

#[rstest]
#[case(ErrorExpectation::any())]
#[case(ErrorExpectation::kind(argument_error()))]
#[case(ErrorExpectation::message(MessageMatcher::pattern("^Te").expect("valid pattern")))]
fn raise_assertions_fail_when_nothing_is_raised(#[case] expectation: ErrorExpectation) {
    let suite = Suite::describe("quiet", |scope| {
        scope.subject(|_| Ok(1_i32))?;
        scope.subject_should_raise(expectation)
    })
    .expect("declaration succeeds");
    let report = suite.run();
    assert_eq!(report.len(), 1);
    assert!(!report.all_passed());
}

#[rstest]
#[case(ErrorExpectation::message("Other"))]
#[case(ErrorExpectation::kind_and_message(argument_error(), "Other"))]
#[case(ErrorExpectation::kind(ErrorKind::matching("NeverMatches", |_| false)))]
fn raise_assertions_fail_on_mismatched_errors(#[case] expectation: ErrorExpectation) {
    let suite = Suite::describe("mismatch", |scope| {
        scope.subject(|_| -> anyhow::Result<()> { Err(ArgumentError("Test").into()) })?;
        scope.subject_should_raise(expectation)
    })
    .expect("declaration succeeds");
    assert!(!suite.run().all_passed());
}

#[test]
fn raise_assertions_read_the_message_of_the_matching_kind() {
    let suite = Suite::describe("wrapped", |scope| {
        scope.subject(|_| -> anyhow::Result<()> {
            Err(ArgumentError("Test")).context("while loading")
        })?;
        scope.subject_should_raise((argument_error(), "Test"))?;
        scope.subject_should_raise("while loading")
    })
    .expect("declaration succeeds");
    assert_all_passed(&suite.run());
}

#[test]
fn subject_should_not_raise_passes_for_plain_values() {
    let suite = Suite::describe("subject_should_not_raise", |scope| {
        scope.subject(|_| Ok(1_i32))?;
        scope.subject_should_not_raise(ErrorExpectation::any())
    })
    .expect("declaration succeeds");
    assert_eq!(suite.test_case_names(), ["subject should not raise"]);
    assert_all_passed(&suite.run());
}

#[rstest]
#[case(ErrorExpectation::any(), false)]
#[case(ErrorExpectation::kind(argument_error()), false)]
#[case(ErrorExpectation::kind(ErrorKind::matching("OtherError", |_| false)), true)]
#[case(ErrorExpectation::kind_and_message(argument_error(), "Other"), true)]
fn subject_should_not_raise_only_fails_on_matching_errors(
    #[case] expectation: ErrorExpectation,
    #[case] passes: bool,
) {
    let suite = Suite::describe("raising subject", |scope| {
        scope.subject(|_| -> anyhow::Result<()> { Err(ArgumentError("Test").into()) })?;
        scope.subject_should_not_raise(expectation)
    })
    .expect("declaration succeeds");
    assert_eq!(suite.run().all_passed(), passes);
}

#[test]
fn for_subject_aliases_named_values() {
    let suite = Suite::describe("for_subject", |scope| {
        scope.define("foo", |_| Ok(55_i32))?;
        scope.define("bar", |_| Ok(66_i32))?;
        scope.for_subject("foo", |scope| it_equals(scope, 55))?;
        scope.for_subject("bar", |scope| it_equals(scope, 66))
    })
    .expect("declaration succeeds");
    assert_eq!(suite.group_names(), ["subject: foo", "subject: bar"]);
    let report = suite.run();
    assert_all_passed(&report);
    assert_eq!(
        report.full_names(),
        [
            "for_subject subject: foo should eq 55",
            "for_subject subject: bar should eq 66",
        ]
    );
}

#[test]
fn for_subject_resolves_names_declared_further_in() {
    let suite = Suite::describe("late binding", |scope| {
        scope.for_subject("foo", |scope| {
            scope.let_context(bindings! { foo: 7_i32 }, |scope| it_equals(scope, 7))
        })
    })
    .expect("declaration succeeds");
    assert_all_passed(&suite.run());
}

#[test]
fn for_subject_reports_unknown_names_at_execution_time() {
    let suite = Suite::describe("unknown", |scope| {
        scope.for_subject("missing", |scope| it_equals(scope, 1))
    })
    .expect("unknown names are only resolved when run");
    let report = suite.run();
    let failure = report
        .find("subject: missing")
        .and_then(|outcome| outcome.failure())
        .expect("the test case fails");
    assert_eq!(failure.to_string(), "undefined named value 'missing'");
}

#[test]
fn for_subject_unknown_names_fail_both_assertion_forms() {
    let suite = Suite::describe("typo", |scope| {
        scope.for_subject("missing", |scope| {
            scope.subject_should_raise(ErrorExpectation::any())?;
            scope.subject_should_not_raise(argument_error())
        })
    })
    .expect("unknown names are only resolved when run");
    let report = suite.run();
    assert_eq!(report.len(), 2);
    for outcome in report.failures() {
        assert_eq!(
            outcome.failure().map(ToString::to_string).as_deref(),
            Some("undefined named value 'missing'"),
            "{}",
            outcome.full_name()
        );
    }
    assert_eq!(report.failures().count(), 2);
}

#[test]
fn helpers_compose_through_nesting() {
    let suite = Suite::describe("parsing", |scope| {
        scope.define("input", |_| Ok("12"))?;
        scope.subject(|example| {
            let input = example.get::<&str>("input")?;
            Ok(input.parse::<i32>()?)
        })?;
        scope.subject_should_not_raise(ErrorExpectation::any())?;
        scope.let_context(bindings! { input: "twelve" }, |scope| {
            scope.subject_should_raise(ErrorKind::of::<std::num::ParseIntError>())?;
            scope.for_subject("input", |scope| {
                scope.it("is the raw text", |example| {
                    assert_eq!(example.subject_as::<&str>()?, "twelve");
                    Ok(())
                })
            })
        })
    })
    .expect("declaration succeeds");
    let report = suite.run();
    assert_all_passed(&report);
    assert_eq!(
        report.full_names(),
        [
            "parsing subject should not raise",
            "parsing {input: \"twelve\"} subject should raise ParseIntError",
            "parsing {input: \"twelve\"} subject: input is the raw text",
        ]
    );
}
