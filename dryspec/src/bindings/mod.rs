//! Named value bindings declared together by `let_context`.

mod args;

pub use args::{Argument, LetContextArgs};

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::error::{DeclarationError, DeclarationResult};
use crate::host::{Thunk, Value};

/// A single name bound to a captured value.
///
/// The value is captured when the binding is built. Each test instance gets
/// its own clone, so instances never share state through a binding.
#[derive(Clone)]
pub struct Binding {
    name: String,
    rendered: String,
    factory: Rc<dyn Fn() -> Value>,
}

impl Binding {
    /// Bind `name` to `value`.
    #[must_use]
    pub fn new<T>(name: impl Into<String>, value: T) -> Self
    where
        T: Any + Clone + fmt::Debug,
    {
        let rendered = format!("{value:?}");
        Self {
            name: name.into(),
            rendered,
            factory: Rc::new(move || Rc::new(value.clone()) as Value),
        }
    }

    /// The bound name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Debug` rendering of the captured value.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// A thunk yielding a fresh clone of the captured value.
    pub(crate) fn thunk<E: 'static>(&self) -> Thunk<E> {
        let factory = Rc::clone(&self.factory);
        Rc::new(move |_: &mut E| Ok(factory()))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("value", &self.rendered)
            .finish_non_exhaustive()
    }
}

/// Ordered set of bindings.
///
/// Order is declaration order and drives the rendered group name.
///
/// # Examples
///
/// ```
/// use dryspec::{Bindings, bindings};
///
/// let pair = bindings! { a: 1, b: "two" };
/// assert_eq!(pair.to_string(), r#"{a: 1, b: "two"}"#);
///
/// let built = Bindings::new().with("a", 1).with("b", "two");
/// assert_eq!(built.to_string(), pair.to_string());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a binding, builder style.
    #[must_use]
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Any + Clone + fmt::Debug,
    {
        self.push(Binding::new(name, value));
        self
    }

    /// Add a binding.
    pub fn push(&mut self, binding: Binding) {
        self.entries.push(binding);
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.entries.iter()
    }

    /// Render as `{name: value, ...}` using each value's `Debug` form.
    #[must_use]
    pub fn render(&self) -> String {
        let pairs = self
            .entries
            .iter()
            .map(|binding| format!("{}: {}", binding.name, binding.rendered))
            .collect::<Vec<_>>();
        format!("{{{}}}", pairs.join(", "))
    }

    /// Check the set can be declared: non-empty, unique, non-blank names.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::EmptyBindings`],
    /// [`DeclarationError::InvalidName`] or
    /// [`DeclarationError::DuplicateBinding`].
    pub fn validate(&self) -> DeclarationResult<()> {
        if self.entries.is_empty() {
            return Err(DeclarationError::EmptyBindings);
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for binding in &self.entries {
            if binding.name.trim().is_empty() {
                return Err(DeclarationError::InvalidName {
                    name: binding.name.clone(),
                    reason: "binding names must not be blank",
                });
            }
            if !seen.insert(binding.name.as_str()) {
                return Err(DeclarationError::DuplicateBinding {
                    name: binding.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromIterator<Binding> for Bindings {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build [`Bindings`] from `name: value` pairs.
///
/// At least one pair is required.
///
/// ```
/// let set = dryspec::bindings! { a: 1, b: 2 };
/// assert_eq!(set.len(), 2);
/// ```
#[macro_export]
macro_rules! bindings {
    ($($name:ident : $value:expr),+ $(,)?) => {
        $crate::Bindings::new()$(.with(stringify!($name), $value))+
    };
}
