//! Given steps queueing declarations for the suite under test.

use crate::fixtures::{Declaration, SuiteState};
use anyhow::{Result, anyhow};
use dryspec::{ErrorExpectation, ErrorKind, FalsePositivePolicy};
use rstest_bdd_macros::given;
use test_helpers::text::{parse_integer_bindings, unquote};

fn bindings_from(text: &str) -> Result<Vec<(String, i64)>> {
    parse_integer_bindings(text).ok_or_else(|| anyhow!("malformed bindings: {text}"))
}

#[given("a subject adding a and b")]
fn sum_subject(suite_state: &SuiteState) {
    suite_state.queue(Declaration::SumSubject);
}

#[given("a subject raising {message}")]
fn raising_subject(suite_state: &SuiteState, message: String) {
    suite_state.queue(Declaration::RaisingSubject(unquote(&message).to_owned()));
}

#[given("a subject parsing {text}")]
fn parsing_subject(suite_state: &SuiteState, text: String) {
    suite_state.queue(Declaration::ParsingSubject(unquote(&text).to_owned()));
}

#[given("a subject returning {value:i64}")]
fn returning_subject(suite_state: &SuiteState, value: i64) {
    suite_state.queue(Declaration::ReturningSubject(value));
}

#[given("a named value {name} of {value:i64}")]
fn named_value(suite_state: &SuiteState, name: String, value: i64) {
    suite_state.queue(Declaration::NamedValue { name, value });
}

#[given("a let_context binding {bindings} expecting {expected:i64}")]
fn let_context(suite_state: &SuiteState, bindings: String, expected: i64) -> Result<()> {
    suite_state.queue(Declaration::LetContext {
        label: None,
        bindings: bindings_from(&bindings)?,
        expected,
    });
    Ok(())
}

#[given("a let_context labelled {label} binding {bindings} expecting {expected:i64}")]
fn labelled_let_context(
    suite_state: &SuiteState,
    label: String,
    bindings: String,
    expected: i64,
) -> Result<()> {
    suite_state.queue(Declaration::LetContext {
        label: Some(unquote(&label).to_owned()),
        bindings: bindings_from(&bindings)?,
        expected,
    });
    Ok(())
}

#[given("a let_context with no bindings")]
fn empty_let_context(suite_state: &SuiteState) {
    suite_state.queue(Declaration::LetContext {
        label: None,
        bindings: Vec::new(),
        expected: 0,
    });
}

#[given("a raise assertion expecting any error")]
fn raise_any(suite_state: &SuiteState) {
    suite_state.queue(Declaration::RaiseAssertion(ErrorExpectation::any()));
}

#[given("a raise assertion expecting message {message}")]
fn raise_message(suite_state: &SuiteState, message: String) {
    suite_state.queue(Declaration::RaiseAssertion(ErrorExpectation::message(
        unquote(&message),
    )));
}

#[given("a raise assertion expecting a parse error")]
fn raise_parse_error(suite_state: &SuiteState) {
    suite_state.queue(Declaration::RaiseAssertion(ErrorExpectation::kind(
        ErrorKind::of::<std::num::ParseIntError>(),
    )));
}

#[given("a no-raise assertion expecting any error")]
fn no_raise_any(suite_state: &SuiteState) {
    suite_state.queue(Declaration::NoRaiseAssertion(ErrorExpectation::any()));
}

#[given("a no-raise assertion expecting message {message}")]
fn no_raise_message(suite_state: &SuiteState, message: String) {
    suite_state.queue(Declaration::NoRaiseAssertion(ErrorExpectation::message(
        unquote(&message),
    )));
}

#[given("a for_subject alias of {name} expecting {expected:i64}")]
fn for_subject(suite_state: &SuiteState, name: String, expected: i64) {
    suite_state.queue(Declaration::ForSubject {
        name: unquote(&name).to_owned(),
        expected,
    });
}

#[given("the false positive policy is raise")]
fn strict_policy(suite_state: &SuiteState) {
    suite_state.policy.set(FalsePositivePolicy::Raise);
}
