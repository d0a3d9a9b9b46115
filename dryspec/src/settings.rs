//! Host-level settings consulted by the helpers.
//!
//! Settings are plain serde data so hosts can embed them in their own
//! configuration. [`Settings::load`] layers `DRYSPEC_`-prefixed environment
//! variables over the defaults using figment.

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{DeclarationError, DeclarationResult};

/// Prefix for environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "DRYSPEC_";

/// How to treat assertions that could pass for the wrong reason.
///
/// A raise assertion without a kind or message accepts any error, and a
/// no-raise assertion with a kind or message lets every other error through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FalsePositivePolicy {
    /// Register the test case silently.
    Nothing,
    /// Register the test case and emit a warning.
    #[default]
    Warn,
    /// Reject the declaration.
    Raise,
}

impl FalsePositivePolicy {
    /// Apply the policy to a risky test case before it is registered.
    pub(crate) fn review(self, test_case: &str) -> DeclarationResult<()> {
        match self {
            Self::Nothing => Ok(()),
            Self::Warn => {
                tracing::warn!(
                    test_case,
                    "assertion may pass for an unexpected error; constrain the error kind or message"
                );
                Ok(())
            }
            Self::Raise => Err(DeclarationError::PotentialFalsePositive {
                test_case: test_case.to_owned(),
            }),
        }
    }
}

/// Settings shared by every helper declared through a host scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Policy for assertions that risk false positives.
    pub on_potential_false_positives: FalsePositivePolicy,
}

/// Errors raised while loading [`Settings`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// figment could not gather or extract the settings.
    #[error("failed to load dryspec settings: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl Settings {
    /// Settings with the given false-positive policy.
    #[must_use]
    pub const fn with_policy(policy: FalsePositivePolicy) -> Self {
        Self {
            on_potential_false_positives: policy,
        }
    }

    /// The figment used by [`Settings::load`].
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load settings from the defaults and `DRYSPEC_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when an environment value cannot be
    /// deserialized, for example an unknown policy name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dryspec::{FalsePositivePolicy, Settings};
    ///
    /// figment::Jail::expect_with(|jail| {
    ///     jail.set_env("DRYSPEC_ON_POTENTIAL_FALSE_POSITIVES", "raise");
    ///     let settings = Settings::load().expect("settings load");
    ///     assert_eq!(settings.on_potential_false_positives, FalsePositivePolicy::Raise);
    ///     Ok(())
    /// });
    /// ```
    pub fn load() -> Result<Self, SettingsError> {
        Self::figment()
            .extract()
            .map_err(|err| SettingsError::Load(Box::new(err)))
    }
}
