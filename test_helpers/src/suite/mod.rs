//! A minimal in-memory host for exercising the helpers.
//!
//! [`Suite`] records the declaration tree built through its [`Scope`]
//! implementation and runs it sequentially. Every test case gets a fresh
//! [`Instance`] holding the named values visible from its group, innermost
//! definitions first, memoised on first access.
//!
//! # Examples
//!
//! ```
//! use dryspec::{Example, Scope};
//! use dryspec_test_helpers::Suite;
//!
//! let suite = Suite::describe("numbers", |scope| {
//!     scope.define("n", |_| Ok(2_i32))?;
//!     scope.it("doubles", |example| {
//!         assert_eq!(example.get::<i32>("n")? * 2, 4);
//!         Ok(())
//!     })
//! })?;
//! assert!(suite.run().all_passed());
//! # Ok::<_, dryspec::DeclarationError>(())
//! ```

mod instance;
mod report;

pub use instance::Instance;
pub use report::{Outcome, Report, Status};

use std::panic::{AssertUnwindSafe, catch_unwind};

use dryspec::{
    DeclarationError, DeclarationResult, Failure, Scope, Settings, SettingsError, TestBody, Thunk,
};

type Definition = (String, Thunk<Instance>);

struct Group {
    name: String,
    values: Vec<Definition>,
    children: Vec<Node>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            values: Vec::new(),
            children: Vec::new(),
        }
    }
}

enum Node {
    Group(Group),
    Case(Case),
}

struct Case {
    name: String,
    body: TestBody<Instance>,
}

/// Recording host: a declaration tree plus a sequential runner.
pub struct Suite {
    root: Group,
    cursor: Vec<usize>,
    settings: Settings,
}

impl Suite {
    /// An empty suite whose root group is named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            root: Group::new(&name.into()),
            cursor: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// An empty suite configured from `DRYSPEC_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns the [`SettingsError`] raised while loading the settings.
    pub fn from_env(name: impl Into<String>) -> Result<Self, SettingsError> {
        Ok(Self::new(name).with_settings(Settings::load()?))
    }

    /// Replace the settings handed to helpers.
    #[must_use]
    pub const fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Declare into the root group.
    ///
    /// # Errors
    ///
    /// Propagates errors returned by `body`.
    pub fn declare<F>(&mut self, body: F) -> DeclarationResult<()>
    where
        F: FnOnce(&mut Self) -> DeclarationResult<()>,
    {
        self.cursor.clear();
        body(self)
    }

    /// Build a suite named `name` from `body`.
    ///
    /// # Errors
    ///
    /// Propagates errors returned by `body`.
    pub fn describe<F>(name: impl Into<String>, body: F) -> DeclarationResult<Self>
    where
        F: FnOnce(&mut Self) -> DeclarationResult<()>,
    {
        let mut suite = Self::new(name);
        suite.declare(body)?;
        Ok(suite)
    }

    /// Names of every declared group below the root, depth first.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_group_names(&self.root, &mut names);
        names
    }

    /// Names of every declared test case, depth first.
    #[must_use]
    pub fn test_case_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_case_names(&self.root, &mut names);
        names
    }

    /// Run every test case in declaration order.
    #[must_use]
    pub fn run(&self) -> Report {
        let mut outcomes = Vec::new();
        let mut path = Vec::new();
        let mut chain = Vec::new();
        run_group(&self.root, &mut path, &mut chain, &mut outcomes);
        Report::new(outcomes)
    }

    fn current_mut(&mut self) -> DeclarationResult<&mut Group> {
        let mut group = &mut self.root;
        for &index in &self.cursor {
            group = match group.children.get_mut(index) {
                Some(Node::Group(child)) => child,
                _ => {
                    return Err(DeclarationError::scope(
                        "declaration cursor points outside the group tree",
                    ));
                }
            };
        }
        Ok(group)
    }
}

impl Scope for Suite {
    type Example = Instance;

    fn group<F>(&mut self, name: &str, body: F) -> DeclarationResult<()>
    where
        F: FnOnce(&mut Self) -> DeclarationResult<()>,
    {
        let current = self.current_mut()?;
        let index = current.children.len();
        current.children.push(Node::Group(Group::new(name)));
        self.cursor.push(index);
        let outcome = body(self);
        self.cursor.pop();
        if outcome.is_err() {
            // Drop the half-built group so a failed declaration leaves no trace.
            self.current_mut()?.children.truncate(index);
        }
        outcome
    }

    fn named_value(&mut self, name: &str, thunk: Thunk<Instance>) -> DeclarationResult<()> {
        self.current_mut()?.values.push((name.to_owned(), thunk));
        Ok(())
    }

    fn test_case(&mut self, name: &str, body: TestBody<Instance>) -> DeclarationResult<()> {
        self.current_mut()?.children.push(Node::Case(Case {
            name: name.to_owned(),
            body,
        }));
        Ok(())
    }

    fn settings(&self) -> Settings {
        self.settings
    }
}

fn collect_group_names(group: &Group, names: &mut Vec<String>) {
    for child in &group.children {
        if let Node::Group(inner) = child {
            names.push(inner.name.clone());
            collect_group_names(inner, names);
        }
    }
}

fn collect_case_names(group: &Group, names: &mut Vec<String>) {
    for child in &group.children {
        match child {
            Node::Group(inner) => collect_case_names(inner, names),
            Node::Case(case) => names.push(case.name.clone()),
        }
    }
}

fn run_group<'a>(
    group: &'a Group,
    path: &mut Vec<String>,
    chain: &mut Vec<&'a Group>,
    outcomes: &mut Vec<Outcome>,
) {
    path.push(group.name.clone());
    chain.push(group);
    for child in &group.children {
        match child {
            Node::Group(inner) => run_group(inner, path, chain, outcomes),
            Node::Case(case) => outcomes.push(run_case(case, path, chain)),
        }
    }
    chain.pop();
    path.pop();
}

fn run_case(case: &Case, path: &[String], chain: &[&Group]) -> Outcome {
    let definitions = chain
        .iter()
        .flat_map(|group| group.values.iter().cloned())
        .collect::<Vec<_>>();
    let mut instance = Instance::new(definitions);
    let status = match catch_unwind(AssertUnwindSafe(|| (case.body)(&mut instance))) {
        Ok(Ok(())) => Status::Passed,
        Ok(Err(failure)) => Status::Failed(failure),
        Err(payload) => Status::Failed(Failure::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    };
    Outcome::new(path.to_vec(), case.name.clone(), status)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}
