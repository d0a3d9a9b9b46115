//! Call shapes accepted by `let_context`.

use super::Bindings;
use crate::error::{DeclarationError, DeclarationResult};

/// The two call shapes `let_context` accepts.
#[derive(Clone, Debug)]
pub enum LetContextArgs {
    /// Bindings only; the group is named after their rendering.
    Unlabelled(Bindings),
    /// A label followed by bindings.
    Labelled {
        /// Descriptive label prefixed to the rendering.
        label: String,
        /// Bindings declared in the group.
        bindings: Bindings,
    },
}

/// One positional argument of `let_context`, for callers that assemble
/// arguments dynamically.
#[derive(Clone, Debug)]
pub enum Argument {
    /// A descriptive label.
    Label(String),
    /// A set of bindings.
    Bindings(Bindings),
}

impl Argument {
    const fn shape_name(&self) -> &'static str {
        match self {
            Self::Label(_) => "label",
            Self::Bindings(_) => "bindings",
        }
    }
}

impl LetContextArgs {
    /// Validate positional arguments into one of the accepted shapes.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::ArgumentShape`] unless the arguments are
    /// `[bindings]` or `[label, bindings]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dryspec::{Argument, LetContextArgs, bindings};
    ///
    /// let args = LetContextArgs::from_arguments(vec![
    ///     Argument::Label("Negative number".into()),
    ///     Argument::Bindings(bindings! { a: -1 }),
    /// ])?;
    /// assert_eq!(args.group_name(), "Negative number {a: -1}");
    /// # Ok::<_, dryspec::DeclarationError>(())
    /// ```
    pub fn from_arguments(args: Vec<Argument>) -> DeclarationResult<Self> {
        let found = args
            .iter()
            .map(Argument::shape_name)
            .collect::<Vec<_>>()
            .join(", ");
        let mut positional = args.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (Some(Argument::Bindings(bindings)), None, None) => Ok(Self::Unlabelled(bindings)),
            (Some(Argument::Label(label)), Some(Argument::Bindings(bindings)), None) => {
                Ok(Self::Labelled { label, bindings })
            }
            _ => Err(DeclarationError::ArgumentShape {
                helper: "let_context",
                found,
            }),
        }
    }

    /// The bindings to declare.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        match self {
            Self::Unlabelled(bindings) | Self::Labelled { bindings, .. } => bindings,
        }
    }

    /// Display name of the group: the rendering, prefixed by the label when
    /// one was given.
    #[must_use]
    pub fn group_name(&self) -> String {
        match self {
            Self::Unlabelled(bindings) => bindings.render(),
            Self::Labelled { label, bindings } => format!("{label} {}", bindings.render()),
        }
    }
}

impl From<Bindings> for LetContextArgs {
    fn from(bindings: Bindings) -> Self {
        Self::Unlabelled(bindings)
    }
}

impl<L> From<(L, Bindings)> for LetContextArgs
where
    L: Into<String>,
{
    fn from((label, bindings): (L, Bindings)) -> Self {
        Self::Labelled {
            label: label.into(),
            bindings,
        }
    }
}
