use std::fmt;
use std::time::Duration;

use super::schema::Key;

/// Detailed match result returned by
/// [`LootRule::matches_detailed()`](super::rule::LootRule::matches_detailed).
///
/// Records whether the rule matched, which condition stopped it, how many
/// conditions were checked, and the wall-clock duration of the check.
#[derive(Debug, Clone)]
#[must_use]
pub struct MatchReport {
    failed: Option<Key>,
    checked: usize,
    total: usize,
    duration: Duration,
}

impl MatchReport {
    pub(crate) fn new(failed: Option<Key>, checked: usize, total: usize, duration: Duration) -> Self {
        Self {
            failed,
            checked,
            total,
            duration,
        }
    }

    /// Same answer as [`LootRule::matches()`](super::rule::LootRule::matches).
    #[must_use]
    pub fn matched(&self) -> bool {
        self.failed.is_none()
    }

    /// Key of the first condition that did not pass.
    #[must_use]
    pub fn failed(&self) -> Option<Key> {
        self.failed
    }

    /// Conditions evaluated before the check finished, the failing one included.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Conditions the rule declares.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failed {
            None => write!(f, "matched")?,
            Some(key) => write!(f, "failed at {key}")?,
        }
        write!(f, ", checked: {}/{}", self.checked, self.total)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
