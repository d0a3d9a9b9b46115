//! Helpers for loading dryspec settings inside a `figment::Jail`.
//!
//! Settings read `DRYSPEC_*` environment variables, which are process-global.
//! Running every load inside a jail serialises those tests and restores the
//! environment afterwards.

use anyhow::{Result, anyhow};
use dryspec::Settings;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Loads [`Settings`] with each `(name, value)` pair set as an environment
/// variable for the duration of the load.
///
/// # Errors
///
/// Returns an error when the settings fail to load.
///
/// # Examples
///
/// ```
/// use dryspec::FalsePositivePolicy;
/// use dryspec_test_helpers::figment::settings_with_env;
///
/// let settings = settings_with_env(&[("DRYSPEC_ON_POTENTIAL_FALSE_POSITIVES", "nothing")])?;
/// assert_eq!(settings.on_potential_false_positives, FalsePositivePolicy::Nothing);
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn settings_with_env(vars: &[(&str, &str)]) -> Result<Settings> {
    with_jail(|jail| {
        for (name, value) in vars {
            jail.set_env(name, value);
        }
        Settings::load().map_err(figment_error)
    })
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adaptor, which hands over the owned error"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
