//! Declaration shortcuts for behaviour-driven test suites.
//!
//! `dryspec` adds four helpers to any host framework that implements the
//! [`Scope`] and [`Example`] capabilities:
//!
//! - [`Helpers::let_context`] opens a group that declares several named
//!   values at once.
//! - [`Helpers::subject_should_raise`] registers a test asserting the subject
//!   raises a matching error.
//! - [`Helpers::subject_should_not_raise`] registers a test asserting it does
//!   not.
//! - [`Helpers::for_subject`] opens a group whose subject is an existing named
//!   value.
//!
//! The helpers only compose the host's own primitives; discovery, execution
//! and reporting belong to the host.
//!
//! # Examples
//!
//! ```
//! use dryspec::{Example, Helpers, Scope, bindings};
//! use test_helpers::Suite;
//!
//! let suite = Suite::describe("addition", |scope| {
//!     scope.subject(|example| Ok(example.get::<i32>("a")? + example.get::<i32>("b")?))?;
//!     scope.let_context(bindings! { a: 1, b: 2 }, |scope| {
//!         scope.it("adds", |example| {
//!             assert_eq!(example.subject_as::<i32>()?, 3);
//!             Ok(())
//!         })
//!     })
//! })?;
//!
//! let report = suite.run();
//! assert!(report.all_passed());
//! assert_eq!(report.full_names(), ["addition {a: 1, b: 2} adds"]);
//! # Ok::<_, dryspec::DeclarationError>(())
//! ```

mod bindings;
mod error;
mod expectation;
mod helpers;
pub mod host;
mod settings;

pub use bindings::{Argument, Binding, Bindings, LetContextArgs};
pub use error::{DeclarationError, DeclarationResult, Failure, ResolutionError};
pub use expectation::{ErrorExpectation, ErrorKind, MessageMatcher, RaiseArgument};
pub use helpers::Helpers;
pub use host::{Example, SUBJECT, Scope, TestBody, Thunk, Value};
pub use settings::{ENV_PREFIX, FalsePositivePolicy, Settings, SettingsError};
