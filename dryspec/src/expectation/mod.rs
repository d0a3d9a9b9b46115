//! Expectations about errors raised by the subject.
//!
//! An [`ErrorExpectation`] pairs an optional [`ErrorKind`] with an optional
//! [`MessageMatcher`]. A missing kind accepts any error; a missing message
//! leaves the message unconstrained.

mod kind;
mod message;

pub use kind::ErrorKind;
pub use message::MessageMatcher;

use crate::error::{DeclarationError, DeclarationResult, Failure, ResolutionError};
use crate::host::Value;

/// One positional argument of a raise assertion, for callers that assemble
/// arguments dynamically.
#[derive(Clone, Debug)]
pub enum RaiseArgument {
    /// A kind classifier.
    Kind(ErrorKind),
    /// A message constraint.
    Message(MessageMatcher),
}

impl RaiseArgument {
    const fn shape_name(&self) -> &'static str {
        match self {
            Self::Kind(_) => "kind",
            Self::Message(_) => "message",
        }
    }
}

impl From<ErrorKind> for RaiseArgument {
    fn from(kind: ErrorKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<MessageMatcher> for RaiseArgument {
    fn from(message: MessageMatcher) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for RaiseArgument {
    fn from(text: &str) -> Self {
        Self::Message(MessageMatcher::exact(text))
    }
}

impl From<String> for RaiseArgument {
    fn from(text: String) -> Self {
        Self::Message(MessageMatcher::Exact(text))
    }
}

/// Constraints a raised error must satisfy.
#[derive(Clone, Debug, Default)]
pub struct ErrorExpectation {
    kind: Option<ErrorKind>,
    message: Option<MessageMatcher>,
}

impl ErrorExpectation {
    /// Accept any error.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            kind: None,
            message: None,
        }
    }

    /// Accept errors of `kind` with any message.
    #[must_use]
    pub const fn kind(kind: ErrorKind) -> Self {
        Self {
            kind: Some(kind),
            message: None,
        }
    }

    /// Accept errors of any kind whose message satisfies `message`.
    #[must_use]
    pub fn message(message: impl Into<MessageMatcher>) -> Self {
        Self {
            kind: None,
            message: Some(message.into()),
        }
    }

    /// Accept errors of `kind` whose message satisfies `message`.
    #[must_use]
    pub fn kind_and_message(kind: ErrorKind, message: impl Into<MessageMatcher>) -> Self {
        Self {
            kind: Some(kind),
            message: Some(message.into()),
        }
    }

    /// Build an expectation from positional arguments.
    ///
    /// Accepted shapes are `[]`, `[kind]`, `[message]` and `[kind, message]`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::ArgumentShape`] for any other shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use dryspec::{ErrorExpectation, RaiseArgument};
    ///
    /// let expectation = ErrorExpectation::from_arguments(vec![RaiseArgument::from("Test")])?;
    /// assert_eq!(expectation.test_case_name("subject should raise"), "subject should raise Test");
    ///
    /// let rejected = ErrorExpectation::from_arguments(vec!["a".into(), "b".into()]);
    /// assert!(rejected.is_err());
    /// # Ok::<_, dryspec::DeclarationError>(())
    /// ```
    pub fn from_arguments(args: Vec<RaiseArgument>) -> DeclarationResult<Self> {
        let found = args
            .iter()
            .map(RaiseArgument::shape_name)
            .collect::<Vec<_>>()
            .join(", ");
        let mut positional = args.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (None, None, None) => Ok(Self::any()),
            (Some(RaiseArgument::Kind(kind)), None, None) => Ok(Self::kind(kind)),
            (Some(RaiseArgument::Message(message)), None, None) => Ok(Self::message(message)),
            (Some(RaiseArgument::Kind(kind)), Some(RaiseArgument::Message(message)), None) => {
                Ok(Self::kind_and_message(kind, message))
            }
            _ => Err(DeclarationError::ArgumentShape {
                helper: "raise assertion",
                found,
            }),
        }
    }

    /// The kind constraint, if any.
    #[must_use]
    pub const fn kind_matcher(&self) -> Option<&ErrorKind> {
        self.kind.as_ref()
    }

    /// The message constraint, if any.
    #[must_use]
    pub const fn message_matcher(&self) -> Option<&MessageMatcher> {
        self.message.as_ref()
    }

    /// Whether every error satisfies this expectation.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.kind.is_none() && self.message.is_none()
    }

    /// Whether `err` satisfies both constraints.
    ///
    /// With a kind, the message is checked against the layer of the error
    /// chain the kind accepts; without one, against the outermost message.
    #[must_use]
    pub fn matches(&self, err: &anyhow::Error) -> bool {
        let message_matches = |text: String| {
            self.message
                .as_ref()
                .is_none_or(|message| message.matches(&text))
        };
        match &self.kind {
            Some(kind) => kind
                .find(err)
                .is_some_and(|cause| message_matches(cause.to_string())),
            None => message_matches(err.to_string()),
        }
    }

    /// Name of the test case asserting this expectation, e.g.
    /// `subject should raise ParseIntError ("invalid digit")`.
    ///
    /// The message suffix is only added when a kind is present; a lone
    /// message stands in for the kind.
    #[must_use]
    pub fn test_case_name(&self, verb: &str) -> String {
        let description = match (&self.kind, &self.message) {
            (Some(kind), _) => kind.to_string(),
            (None, Some(message)) => message.to_string(),
            (None, None) => String::new(),
        };
        let mut name = if description.is_empty() {
            verb.to_owned()
        } else {
            format!("{verb} {description}")
        };
        if let (Some(_), Some(message)) = (&self.kind, &self.message) {
            name.push_str(&format!(" ({})", message.inspect()));
        }
        name
    }

    fn expected_phrase(&self) -> String {
        match (&self.kind, &self.message) {
            (None, None) => "an error".to_owned(),
            (Some(kind), None) => kind.to_string(),
            (None, Some(message)) => format!("an error with message {}", message.inspect()),
            (Some(kind), Some(message)) => format!("{kind} with message {}", message.inspect()),
        }
    }

    /// Judge the outcome of evaluating the subject for a raise assertion.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Assertion`] when nothing was raised or the error
    /// does not match, and [`Failure::Raised`] when a named value could not
    /// be resolved while evaluating the subject.
    pub fn verify_raises(&self, outcome: anyhow::Result<Value>) -> Result<(), Failure> {
        match outcome {
            Ok(_) => Err(Failure::assertion(format!(
                "expected subject to raise {}, but nothing was raised",
                self.expected_phrase()
            ))),
            Err(err) if is_resolution_failure(&err) => Err(Failure::Raised(err)),
            Err(err) if self.matches(&err) => Ok(()),
            Err(err) => Err(Failure::assertion(format!(
                "expected subject to raise {}, got {err:#}",
                self.expected_phrase()
            ))),
        }
    }

    /// Judge the outcome of evaluating the subject for a no-raise assertion.
    ///
    /// Errors that do not match are let through, so a constrained
    /// expectation passes when the subject raises something else.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Assertion`] when a matching error was raised, and
    /// [`Failure::Raised`] when a named value could not be resolved while
    /// evaluating the subject.
    pub fn verify_not_raises(&self, outcome: anyhow::Result<Value>) -> Result<(), Failure> {
        match outcome {
            Ok(_) => Ok(()),
            Err(err) if is_resolution_failure(&err) => Err(Failure::Raised(err)),
            Err(err) if self.matches(&err) => Err(Failure::assertion(format!(
                "expected subject not to raise {}, got {err:#}",
                self.expected_phrase()
            ))),
            Err(err) => {
                tracing::debug!(error = %err, "letting through an error outside the expectation");
                Ok(())
            }
        }
    }
}

/// Unresolved, mistyped or cyclic named values are faults in the suite, not
/// errors raised by the subject.
fn is_resolution_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ResolutionError>().is_some()
}

impl From<ErrorKind> for ErrorExpectation {
    fn from(kind: ErrorKind) -> Self {
        Self::kind(kind)
    }
}

impl From<MessageMatcher> for ErrorExpectation {
    fn from(message: MessageMatcher) -> Self {
        Self::message(message)
    }
}

impl From<&str> for ErrorExpectation {
    fn from(text: &str) -> Self {
        Self::message(text)
    }
}

impl From<String> for ErrorExpectation {
    fn from(text: String) -> Self {
        Self::message(text)
    }
}

impl<M> From<(ErrorKind, M)> for ErrorExpectation
where
    M: Into<MessageMatcher>,
{
    fn from((kind, message): (ErrorKind, M)) -> Self {
        Self::kind_and_message(kind, message)
    }
}
