//! Error types produced while declaring and running helper-generated tests.

use thiserror::Error;

/// Result alias for declaration-time operations.
pub type DeclarationResult<T> = Result<T, DeclarationError>;

/// Errors raised while a helper is declaring groups, values or test cases.
///
/// Each variant is reported before anything is registered with the host, so a
/// malformed helper call never leaves a partial group behind.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeclarationError {
    /// The helper was called with arguments it does not accept.
    #[error("{helper} does not accept arguments shaped as [{found}]")]
    ArgumentShape {
        /// Helper, or family of helpers, that rejected the call.
        helper: &'static str,
        /// Rendering of the rejected argument kinds.
        found: String,
    },

    /// `let_context` was given no bindings.
    #[error("let_context requires at least one binding")]
    EmptyBindings,

    /// The same binding name appeared twice in one `let_context` call.
    #[error("binding '{name}' is declared more than once")]
    DuplicateBinding {
        /// Name that was repeated.
        name: String,
    },

    /// A binding or subject name cannot be used.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The configured policy rejects an assertion that may pass spuriously.
    #[error("'{test_case}' risks a false positive")]
    PotentialFalsePositive {
        /// Name of the rejected test case.
        test_case: String,
    },

    /// The host could not complete a declaration.
    #[error("host scope error: {message}")]
    Scope {
        /// Host supplied description of the failure.
        message: String,
    },
}

impl DeclarationError {
    /// Construct a [`DeclarationError::Scope`] from any message.
    ///
    /// # Examples
    ///
    /// ```
    /// use dryspec::DeclarationError;
    ///
    /// let err = DeclarationError::scope("cursor lost");
    /// assert_eq!(err.to_string(), "host scope error: cursor lost");
    /// ```
    #[must_use]
    pub fn scope(message: impl Into<String>) -> Self {
        Self::Scope {
            message: message.into(),
        }
    }
}

/// Errors a host reports while resolving named values for a test instance.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolutionError {
    /// No scope in the example's chain defines the name.
    #[error("undefined named value '{name}'")]
    Unresolved {
        /// Name that could not be found.
        name: String,
    },

    /// The value exists but holds a different type.
    #[error("named value '{name}' is not a {expected}")]
    TypeMismatch {
        /// Name of the value.
        name: String,
        /// Type the caller asked for.
        expected: &'static str,
    },

    /// Evaluating the value requires its own result.
    #[error("named value '{name}' depends on itself")]
    Cyclic {
        /// Name of the value being evaluated.
        name: String,
    },
}

/// Outcome of a failed test case.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Failure {
    /// An expectation did not hold.
    #[error("{message}")]
    Assertion {
        /// Explanation shown in the host's report.
        message: String,
    },

    /// The test body itself returned an error.
    #[error(transparent)]
    Raised(#[from] anyhow::Error),

    /// The test body panicked.
    #[error("panicked: {message}")]
    Panicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl Failure {
    /// Construct a [`Failure::Assertion`].
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}
