//! Per-test-case runtime state.

use std::collections::HashMap;
use std::rc::Rc;

use dryspec::{Example, ResolutionError, Thunk, Value};

/// Named values visible to one running test case.
///
/// Definitions are resolved by name with inner groups shadowing outer ones.
/// Each value is evaluated at most once per instance; a thunk that raises is
/// not memoised and will be evaluated again on the next access.
pub struct Instance {
    definitions: HashMap<String, Thunk<Self>>,
    memo: HashMap<String, Value>,
    evaluating: Vec<String>,
}

impl Instance {
    /// Build an instance from definitions ordered outermost first.
    #[must_use]
    pub fn new<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (String, Thunk<Self>)>,
    {
        Self {
            definitions: definitions.into_iter().collect(),
            memo: HashMap::new(),
            evaluating: Vec::new(),
        }
    }

    /// Whether `name` has already been evaluated in this instance.
    #[must_use]
    pub fn is_memoised(&self, name: &str) -> bool {
        self.memo.contains_key(name)
    }
}

impl Example for Instance {
    fn value(&mut self, name: &str) -> anyhow::Result<Value> {
        if let Some(value) = self.memo.get(name) {
            return Ok(Rc::clone(value));
        }
        if self.evaluating.iter().any(|pending| pending == name) {
            return Err(ResolutionError::Cyclic {
                name: name.to_owned(),
            }
            .into());
        }
        let thunk = self
            .definitions
            .get(name)
            .cloned()
            .ok_or_else(|| ResolutionError::Unresolved {
                name: name.to_owned(),
            })?;
        self.evaluating.push(name.to_owned());
        let outcome = thunk(self);
        self.evaluating.pop();
        let value = outcome?;
        self.memo.insert(name.to_owned(), Rc::clone(&value));
        Ok(value)
    }
}
