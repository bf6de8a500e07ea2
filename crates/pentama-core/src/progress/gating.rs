//! # Milestone Gating
//!
//! Cascades milestone results into the access gates.
//!
//! - Students: Result opens once Proposal is complete; Final opens once both
//!   Proposal and Result are complete.
//! - Lecturers: no thesis of their own, so every gate follows profile
//!   completeness.
//! - Admin / unknown: locked.

use crate::model::{Milestone, Role, UserSnapshot};
use crate::progress::{GatingResult, MilestoneResult, ProfileProgressCalculator, StageAssessor};

/// Combines profile and stage results into access gates.
pub struct MilestoneGatingCoordinator;

impl MilestoneGatingCoordinator {
    /// Evaluate all gates for a user under the given role.
    #[must_use]
    pub fn evaluate(user: &UserSnapshot, role: Role) -> GatingResult {
        match role {
            Role::Student => Self::student(user),
            Role::Lecturer => Self::lecturer(user),
            Role::Admin | Role::Unknown => GatingResult::locked(),
        }
    }

    fn student(user: &UserSnapshot) -> GatingResult {
        let complete_profile = ProfileProgressCalculator::evaluate(user, Role::Student);

        let project = user.final_project();
        let proposal = StageAssessor::evaluate(project, Milestone::Proposal);
        let result = StageAssessor::evaluate(project, Milestone::Result);

        GatingResult {
            complete_profile,
            can_access_result: proposal,
            can_access_final: cascade(proposal, result),
        }
    }

    fn lecturer(user: &UserSnapshot) -> GatingResult {
        let complete_profile = ProfileProgressCalculator::evaluate(user, Role::Lecturer);
        GatingResult {
            complete_profile,
            can_access_result: complete_profile,
            can_access_final: complete_profile,
        }
    }
}

/// Final gate from the Proposal and Result milestones.
///
/// Until Result is complete the earlier milestone's percentage is shown, so a
/// finished proposal does not read as 0% toward Final.
#[must_use]
pub fn cascade(proposal: MilestoneResult, result: MilestoneResult) -> MilestoneResult {
    let percentage = if result.is_complete {
        result.percentage
    } else {
        proposal.percentage
    };
    MilestoneResult::new(proposal.is_complete && result.is_complete, percentage)
}
