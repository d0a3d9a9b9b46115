//! Error kind classifiers.

use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

type Predicate = Rc<dyn Fn(&(dyn StdError + 'static)) -> bool>;

/// Predicate identifying an acceptable error kind.
///
/// A kind is tested against every layer of an error's `anyhow` chain, so
/// context added around an error does not hide it. [`ErrorKind::of`] matches
/// by downcasting; [`ErrorKind::matching`] accepts any predicate, for kinds
/// that are values rather than types.
#[derive(Clone)]
pub struct ErrorKind {
    name: String,
    predicate: Predicate,
}

impl ErrorKind {
    /// Match errors of type `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dryspec::ErrorKind;
    ///
    /// let kind = ErrorKind::of::<std::num::ParseIntError>();
    /// assert_eq!(kind.name(), "ParseIntError");
    /// let err = anyhow::Error::new("x".parse::<i32>().unwrap_err());
    /// assert!(kind.matches(&err));
    /// ```
    #[must_use]
    pub fn of<E>() -> Self
    where
        E: StdError + 'static,
    {
        Self {
            name: short_type_name(std::any::type_name::<E>()).to_owned(),
            predicate: Rc::new(|cause: &(dyn StdError + 'static)| cause.is::<E>()),
        }
    }

    /// Match error layers accepted by `predicate`, described as `name`.
    #[must_use]
    pub fn matching<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&(dyn StdError + 'static)) -> bool + 'static,
    {
        Self {
            name: name.into(),
            predicate: Rc::new(predicate),
        }
    }

    /// Name used in generated test case names.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The outermost layer of `err` that is of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhow::Context;
    /// use dryspec::ErrorKind;
    ///
    /// let kind = ErrorKind::of::<std::num::ParseIntError>();
    /// let err = "x".parse::<i32>().context("while reading the port").unwrap_err();
    /// let cause = kind.find(&err).expect("the parse error is in the chain");
    /// assert_eq!(cause.to_string(), "invalid digit found in string");
    /// ```
    #[must_use]
    pub fn find<'a>(&self, err: &'a anyhow::Error) -> Option<&'a (dyn StdError + 'static)> {
        err.chain().find(|cause| (self.predicate)(*cause))
    }

    /// Whether any layer of `err` is of this kind.
    #[must_use]
    pub fn matches(&self, err: &anyhow::Error) -> bool {
        self.find(err).is_some()
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorKind")
            .field("name", &self.name)
            .field("predicate", &"<predicate>")
            .finish()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
