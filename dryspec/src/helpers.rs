//! The helper operations, available on every host [`Scope`].

use std::rc::Rc;

use crate::bindings::LetContextArgs;
use crate::error::{DeclarationError, DeclarationResult};
use crate::expectation::ErrorExpectation;
use crate::host::{Example, SUBJECT, Scope};

const RAISE_VERB: &str = "subject should raise";
const NO_RAISE_VERB: &str = "subject should not raise";

/// Shortcuts for common group, binding and assertion patterns.
///
/// Implemented for every [`Scope`], so the helpers read as part of the host's
/// own declaration vocabulary.
pub trait Helpers: Scope {
    /// Open a group declaring each binding as a named value, then run `body`
    /// inside it.
    ///
    /// Without a label the group is named after the bindings' rendering,
    /// e.g. `{a: 1, b: 2}`; with one it is named `"<label> {a: 1, b: 2}"`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::EmptyBindings`],
    /// [`DeclarationError::DuplicateBinding`] or
    /// [`DeclarationError::InvalidName`] before anything is declared, and
    /// propagates errors from `body`.
    fn let_context<A, F>(&mut self, args: A, body: F) -> DeclarationResult<()>
    where
        A: Into<LetContextArgs>,
        F: FnOnce(&mut Self) -> DeclarationResult<()>,
    {
        let call = args.into();
        let bindings = call.bindings();
        bindings.validate()?;
        let name = call.group_name();
        tracing::debug!(group = %name, bindings = bindings.len(), "declaring let_context group");
        self.group(&name, |scope| {
            for binding in bindings {
                scope.named_value(binding.name(), binding.thunk())?;
            }
            body(scope)
        })
    }

    /// Register a test case asserting that the subject raises an error
    /// matching `expectation`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::PotentialFalsePositive`] when the
    /// expectation is unconstrained and the host's policy is
    /// [`FalsePositivePolicy::Raise`](crate::FalsePositivePolicy::Raise).
    fn subject_should_raise<X>(&mut self, expected: X) -> DeclarationResult<()>
    where
        X: Into<ErrorExpectation>,
    {
        let expectation = expected.into();
        let name = expectation.test_case_name(RAISE_VERB);
        if expectation.is_unconstrained() {
            self.settings().on_potential_false_positives.review(&name)?;
        }
        tracing::debug!(test_case = %name, "declaring raise assertion");
        self.test_case(
            &name,
            Box::new(move |example: &mut Self::Example| example.assert_raises(&expectation)),
        )
    }

    /// Register a test case asserting that the subject does not raise an
    /// error matching `expectation`.
    ///
    /// With a kind or message, errors that do not match pass unchecked.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::PotentialFalsePositive`] when the
    /// expectation is constrained and the host's policy is
    /// [`FalsePositivePolicy::Raise`](crate::FalsePositivePolicy::Raise).
    fn subject_should_not_raise<X>(&mut self, expected: X) -> DeclarationResult<()>
    where
        X: Into<ErrorExpectation>,
    {
        let expectation = expected.into();
        let name = expectation.test_case_name(NO_RAISE_VERB);
        if !expectation.is_unconstrained() {
            self.settings().on_potential_false_positives.review(&name)?;
        }
        tracing::debug!(test_case = %name, "declaring no-raise assertion");
        self.test_case(
            &name,
            Box::new(move |example: &mut Self::Example| example.assert_not_raises(&expectation)),
        )
    }

    /// Open a group named `subject: <name>` whose subject is the named value
    /// `name`, then run `body` inside it.
    ///
    /// The name is resolved when the subject is evaluated, so it may be
    /// defined in any enclosing group, or in a group nested inside this one.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidName`] for a blank name or for the
    /// subject itself, and propagates errors from `body`.
    fn for_subject<F>(&mut self, name: &str, body: F) -> DeclarationResult<()>
    where
        F: FnOnce(&mut Self) -> DeclarationResult<()>,
    {
        if name.trim().is_empty() {
            return Err(DeclarationError::InvalidName {
                name: name.to_owned(),
                reason: "the subject alias needs a named value",
            });
        }
        if name == SUBJECT {
            return Err(DeclarationError::InvalidName {
                name: name.to_owned(),
                reason: "the subject cannot alias itself",
            });
        }
        let group = format!("subject: {name}");
        let target = name.to_owned();
        tracing::debug!(group = %group, "declaring subject alias");
        self.group(&group, move |scope| {
            scope.named_value(
                SUBJECT,
                Rc::new(move |example: &mut Self::Example| example.value(&target)),
            )?;
            body(scope)
        })
    }
}

impl<S: Scope> Helpers for S {}
