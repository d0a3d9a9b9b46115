//! Capabilities a behaviour-driven host framework exposes to the helpers.
//!
//! The helpers never hold an ambient "current group". Every declaration is
//! made through an explicit [`Scope`] handle, and every test body receives the
//! [`Example`] it runs in. A host implements both traits; the helpers only
//! compose their primitives.

use std::any::{Any, type_name};
use std::rc::Rc;

use crate::error::{DeclarationResult, Failure, ResolutionError};
use crate::expectation::ErrorExpectation;
use crate::settings::Settings;

/// Reserved name of the value under test.
pub const SUBJECT: &str = "subject";

/// Type-erased value produced by a named value.
pub type Value = Rc<dyn Any>;

/// Suspended computation producing a named value for one test instance.
///
/// Hosts evaluate a thunk at most once per instance, on first access.
pub type Thunk<E> = Rc<dyn Fn(&mut E) -> anyhow::Result<Value>>;

/// Body of a registered test case.
pub type TestBody<E> = Box<dyn Fn(&mut E) -> Result<(), Failure>>;

/// Declaration-time handle on the group currently being built.
pub trait Scope: Sized {
    /// Execution-time view handed to thunks and test bodies.
    type Example: Example + 'static;

    /// Open a child group named `name` and run `body` with it active.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `body` and reports host failures as
    /// [`DeclarationError::Scope`](crate::DeclarationError::Scope).
    fn group<F>(&mut self, name: &str, body: F) -> DeclarationResult<()>
    where
        F: FnOnce(&mut Self) -> DeclarationResult<()>;

    /// Register a lazily evaluated, per-instance memoised value.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the value.
    fn named_value(&mut self, name: &str, thunk: Thunk<Self::Example>) -> DeclarationResult<()>;

    /// Register a leaf test case.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the test case.
    fn test_case(&mut self, name: &str, body: TestBody<Self::Example>) -> DeclarationResult<()>;

    /// Settings consulted by the helpers.
    fn settings(&self) -> Settings {
        Settings::default()
    }

    /// Register a typed named value.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the value.
    fn define<T, F>(&mut self, name: &str, producer: F) -> DeclarationResult<()>
    where
        T: Any,
        F: Fn(&mut Self::Example) -> anyhow::Result<T> + 'static,
    {
        self.named_value(
            name,
            Rc::new(move |example: &mut Self::Example| {
                producer(example).map(|value| Rc::new(value) as Value)
            }),
        )
    }

    /// Define the subject for this group and its descendants.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the value.
    fn subject<T, F>(&mut self, producer: F) -> DeclarationResult<()>
    where
        T: Any,
        F: Fn(&mut Self::Example) -> anyhow::Result<T> + 'static,
    {
        self.define(SUBJECT, producer)
    }

    /// Register a test case from a closure.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the test case.
    fn it<F>(&mut self, name: &str, body: F) -> DeclarationResult<()>
    where
        F: Fn(&mut Self::Example) -> Result<(), Failure> + 'static,
    {
        self.test_case(name, Box::new(body))
    }
}

/// Execution-time view of a single test instance.
pub trait Example {
    /// Resolve `name` from the innermost scope outward.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the value's thunk, or a
    /// [`ResolutionError`] when the name cannot be resolved.
    fn value(&mut self, name: &str) -> anyhow::Result<Value>;

    /// Evaluate the subject.
    ///
    /// # Errors
    ///
    /// Returns whatever the subject raises.
    fn subject(&mut self) -> anyhow::Result<Value> {
        self.value(SUBJECT)
    }

    /// Resolve `name` and clone it out as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::TypeMismatch`] when the value is not a `T`,
    /// in addition to the errors of [`Example::value`].
    fn get<T>(&mut self, name: &str) -> anyhow::Result<T>
    where
        T: Any + Clone,
    {
        let value = self.value(name)?;
        downcast(name, &value)
    }

    /// Evaluate the subject and clone it out as `T`.
    ///
    /// # Errors
    ///
    /// See [`Example::get`].
    fn subject_as<T>(&mut self) -> anyhow::Result<T>
    where
        T: Any + Clone,
    {
        self.get(SUBJECT)
    }

    /// Assert that evaluating the subject raises an error matching
    /// `expectation`.
    ///
    /// # Errors
    ///
    /// Returns a [`Failure`] when nothing is raised or the raised error does
    /// not match.
    fn assert_raises(&mut self, expectation: &ErrorExpectation) -> Result<(), Failure> {
        let outcome = self.subject();
        expectation.verify_raises(outcome)
    }

    /// Assert that evaluating the subject does not raise an error matching
    /// `expectation`. Errors that do not match are let through.
    ///
    /// # Errors
    ///
    /// Returns a [`Failure`] when a matching error is raised.
    fn assert_not_raises(&mut self, expectation: &ErrorExpectation) -> Result<(), Failure> {
        let outcome = self.subject();
        expectation.verify_not_raises(outcome)
    }
}

fn downcast<T>(name: &str, value: &Value) -> anyhow::Result<T>
where
    T: Any + Clone,
{
    value.as_ref().downcast_ref::<T>().cloned().ok_or_else(|| {
        ResolutionError::TypeMismatch {
            name: name.to_owned(),
            expected: type_name::<T>(),
        }
        .into()
    })
}
