//! # Progress Facade
//!
//! The public entry point of the engine.
//!
//! Callers get two views of the same computation:
//!
//! - [`GatingResult`]: percentages and flags, for badges and progress bars.
//! - [`SimpleProgress`]: flags only, for session tokens and route guards.
//!
//! [`ProgressFacade::reconstruct_detailed_from_simple`] goes the other way for
//! caches that only kept the flags. It is a degraded fallback: intermediate
//! bands (25/50/75) cannot be recovered and come back as 0.

use crate::identity::who_you_are;
use crate::model::{Milestone, Role, UserSnapshot};
use crate::progress::{
    GatingResult, MilestoneGatingCoordinator, MilestoneResult, SimpleProgress, StageAssessor,
    StageReport,
};

/// Entry point for progress computation.
pub struct ProgressFacade;

impl ProgressFacade {
    /// Full percentage-bearing result for a user under a role.
    #[must_use]
    pub fn compute_detailed(user: &UserSnapshot, role: Role) -> GatingResult {
        let gating = MilestoneGatingCoordinator::evaluate(user, role);
        tracing::debug!(
            %role,
            profile = gating.complete_profile.percentage,
            result = gating.can_access_result.percentage,
            final_gate = gating.can_access_final.percentage,
            "progress computed"
        );
        gating
    }

    /// Like [`Self::compute_detailed`], with the role derived from the username.
    #[must_use]
    pub fn compute_detailed_auto(user: &UserSnapshot) -> GatingResult {
        let role = Self::resolve_role(user);
        Self::compute_detailed(user, role)
    }

    /// Flags only.
    #[must_use]
    pub fn compute_simple(user: &UserSnapshot, role: Role) -> SimpleProgress {
        Self::compute_detailed(user, role).to_simple()
    }

    /// Flags only, with the role derived from the username.
    #[must_use]
    pub fn compute_simple_auto(user: &UserSnapshot) -> SimpleProgress {
        Self::compute_detailed_auto(user).to_simple()
    }

    /// Approximate detailed view from flags: 100 where set, 0 elsewhere.
    ///
    /// Use only when the detailed view itself was not cached.
    #[must_use]
    pub fn reconstruct_detailed_from_simple(simple: &SimpleProgress) -> GatingResult {
        GatingResult {
            complete_profile: MilestoneResult::from_flag(simple.complete_profile),
            can_access_result: MilestoneResult::from_flag(simple.can_access_result),
            can_access_final: MilestoneResult::from_flag(simple.can_access_final),
        }
    }

    /// Per-milestone reports for a student's thesis, Final included.
    ///
    /// Users without a project get NotStarted reports.
    #[must_use]
    pub fn milestone_reports(user: &UserSnapshot) -> [StageReport; 3] {
        let project = user.final_project();
        Milestone::ALL.map(|milestone| StageAssessor::assess(project, milestone))
    }

    /// Role from the identity classifier.
    #[must_use]
    pub fn resolve_role(user: &UserSnapshot) -> Role {
        who_you_are(user.username.as_deref(), user.is_admin)
    }
}

// =============================================================================
// TESTS
// =============================================================================
