//! Output value objects shared by every evaluator.

use crate::error::PercentageOutOfRange;
use serde::{Deserialize, Serialize};

// =============================================================================
// PERCENTAGE BANDS
// =============================================================================

/// Coarse-grained milestone progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PercentageBand {
    NotStarted,
    InProgress,
    Submitted,
    Reviewed,
    Completed,
}

impl PercentageBand {
    /// The integer percentage this band reports.
    #[must_use]
    pub fn percent(&self) -> u8 {
        match self {
            PercentageBand::NotStarted => 0,
            PercentageBand::InProgress => 25,
            PercentageBand::Submitted => 50,
            PercentageBand::Reviewed => 75,
            PercentageBand::Completed => 100,
        }
    }

    /// The band reporting exactly `percent`, if any.
    #[must_use]
    pub fn from_percent(percent: u8) -> Option<Self> {
        match percent {
            0 => Some(PercentageBand::NotStarted),
            25 => Some(PercentageBand::InProgress),
            50 => Some(PercentageBand::Submitted),
            75 => Some(PercentageBand::Reviewed),
            100 => Some(PercentageBand::Completed),
            _ => None,
        }
    }

    /// Whether this band lies strictly between NotStarted and Completed.
    #[must_use]
    pub fn is_intermediate(&self) -> bool {
        !matches!(self, PercentageBand::NotStarted | PercentageBand::Completed)
    }
}

// =============================================================================
// MILESTONE RESULT
// =============================================================================

/// Completeness of one milestone (or of the profile).
///
/// For milestones, `is_complete` and `percentage` are computed independently:
/// a milestone can show 100% while its gate is still closed.
///
/// Deserialization rejects percentages above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMilestoneResult")]
pub struct MilestoneResult {
    pub is_complete: bool,
    pub percentage: u8,
}

/// Wire shape of [`MilestoneResult`] before range checking.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMilestoneResult {
    is_complete: bool,
    percentage: u8,
}

impl TryFrom<StoredMilestoneResult> for MilestoneResult {
    type Error = PercentageOutOfRange;

    fn try_from(stored: StoredMilestoneResult) -> Result<Self, Self::Error> {
        if stored.percentage > 100 {
            return Err(PercentageOutOfRange(stored.percentage));
        }
        Ok(Self::new(stored.is_complete, stored.percentage))
    }
}

impl MilestoneResult {
    #[must_use]
    pub fn new(is_complete: bool, percentage: u8) -> Self {
        Self {
            is_complete,
            percentage: percentage.min(100),
        }
    }

    /// `{false, 0}`.
    #[must_use]
    pub fn incomplete() -> Self {
        Self::new(false, 0)
    }

    #[must_use]
    pub fn from_band(is_complete: bool, band: PercentageBand) -> Self {
        Self::new(is_complete, band.percent())
    }

    /// Lossy rebuild from a stored flag: 100 when set, 0 otherwise.
    #[must_use]
    pub fn from_flag(is_complete: bool) -> Self {
        Self::new(is_complete, if is_complete { 100 } else { 0 })
    }
}

impl Default for MilestoneResult {
    fn default() -> Self {
        Self::incomplete()
    }
}

// =============================================================================
// GATING RESULTS
// =============================================================================

/// The three gates exposed to the rest of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressKey {
    CompleteProfile,
    CanAccessResult,
    CanAccessFinal,
}

impl ProgressKey {
    pub const ALL: [ProgressKey; 3] = [
        ProgressKey::CompleteProfile,
        ProgressKey::CanAccessResult,
        ProgressKey::CanAccessFinal,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ProgressKey::CompleteProfile => "completeProfile",
            ProgressKey::CanAccessResult => "canAccessResult",
            ProgressKey::CanAccessFinal => "canAccessFinal",
        }
    }
}

/// Percentage-bearing gating view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatingResult {
    pub complete_profile: MilestoneResult,
    pub can_access_result: MilestoneResult,
    pub can_access_final: MilestoneResult,
}

impl GatingResult {
    /// All gates closed, all percentages zero.
    #[must_use]
    pub fn locked() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: ProgressKey) -> MilestoneResult {
        match key {
            ProgressKey::CompleteProfile => self.complete_profile,
            ProgressKey::CanAccessResult => self.can_access_result,
            ProgressKey::CanAccessFinal => self.can_access_final,
        }
    }

    /// Drop the percentages.
    #[must_use]
    pub fn to_simple(&self) -> SimpleProgress {
        SimpleProgress {
            complete_profile: self.complete_profile.is_complete,
            can_access_result: self.can_access_result.is_complete,
            can_access_final: self.can_access_final.is_complete,
        }
    }

    /// Whether any gate reports an intermediate band (neither 0 nor 100).
    #[must_use]
    pub fn has_intermediate_percentage(&self) -> bool {
        ProgressKey::ALL
            .iter()
            .any(|key| !matches!(self.get(*key).percentage, 0 | 100))
    }
}

/// Boolean-only gating view, as persisted in session tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleProgress {
    pub complete_profile: bool,
    pub can_access_result: bool,
    pub can_access_final: bool,
}

impl SimpleProgress {
    /// All gates closed.
    #[must_use]
    pub fn locked() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: ProgressKey) -> bool {
        match key {
            ProgressKey::CompleteProfile => self.complete_profile,
            ProgressKey::CanAccessResult => self.can_access_result,
            ProgressKey::CanAccessFinal => self.can_access_final,
        }
    }
}
