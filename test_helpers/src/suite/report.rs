//! Results of running a [`Suite`](super::Suite).

use dryspec::Failure;

/// Result of one test case.
#[derive(Debug)]
pub enum Status {
    /// The body returned `Ok`.
    Passed,
    /// The body failed, raised, or panicked.
    Failed(Failure),
}

/// A test case together with the groups enclosing it.
#[derive(Debug)]
pub struct Outcome {
    groups: Vec<String>,
    name: String,
    status: Status,
}

impl Outcome {
    pub(crate) const fn new(groups: Vec<String>, name: String, status: Status) -> Self {
        Self {
            groups,
            name,
            status,
        }
    }

    /// Group names from the suite root inward.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The test case's own name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group names and the test case name joined by spaces.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.groups
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the test case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.status, Status::Passed)
    }

    /// The failure, when the test case failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match &self.status {
            Status::Passed => None,
            Status::Failed(failure) => Some(failure),
        }
    }
}

/// Outcomes of a run, in declaration order.
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    pub(crate) const fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    /// Every outcome.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of test cases run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no test case ran.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Whether every test case passed. An empty run counts as passing.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(Outcome::passed)
    }

    /// Full names of every test case.
    #[must_use]
    pub fn full_names(&self) -> Vec<String> {
        self.outcomes.iter().map(Outcome::full_name).collect()
    }

    /// First outcome whose full name contains `fragment`.
    #[must_use]
    pub fn find(&self, fragment: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.full_name().contains(fragment))
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }
}
